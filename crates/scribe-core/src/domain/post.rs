use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the short display form of a post.
const PREVIEW_CHARS: usize = 15;

/// Post entity - a text entry owned by exactly one author, optionally
/// tagged with a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    /// Creation timestamp; listings order by this, most recent first.
    /// Never changed after creation.
    pub pub_date: DateTime<Utc>,
}

impl Post {
    /// Create a new post with generated ID and the current timestamp.
    pub fn new(author_id: Uuid, text: String, group_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            group_id,
            text,
            pub_date: Utc::now(),
        }
    }

    /// Apply an edit in place. Identity, author, and pub_date are kept.
    pub fn revise(&mut self, text: String, group_id: Option<Uuid>) {
        self.text = text;
        self.group_id = group_id;
    }

    /// Short display form: the first 15 characters of the text.
    pub fn preview(&self) -> String {
        self.text.chars().take(PREVIEW_CHARS).collect()
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview())
    }
}
