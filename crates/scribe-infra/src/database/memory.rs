//! In-memory repository implementations - used as fallback when no
//! database is configured, and by handler tests.
//!
//! Rows live in a `Vec` behind an async `RwLock`; `save` replaces an
//! existing row in place, so insertion order is preserved across edits.
//! Note: data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Group, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    BaseRepository, GroupRepository, PostRepository, UserRepository,
};

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|u| u.id == id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|u| u.id == entity.id) {
            Some(slot) => *slot = entity.clone(),
            None => rows.push(entity.clone()),
        }
        Ok(entity)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }
}

/// In-memory group repository.
#[derive(Default)]
pub struct InMemoryGroupRepository {
    rows: RwLock<Vec<Group>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Group, Uuid> for InMemoryGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|g| g.id == id).cloned())
    }

    async fn save(&self, entity: Group) -> Result<Group, RepoError> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|g| g.slug == entity.slug && g.id != entity.id)
        {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                entity.slug
            )));
        }
        match rows.iter_mut().find(|g| g.id == entity.id) {
            Some(slot) => *slot = entity.clone(),
            None => rows.push(entity.clone()),
        }
        Ok(entity)
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|g| g.slug == slug).cloned())
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    rows: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most-recent-first ordering; equal timestamps keep insertion order.
    fn ordered(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        posts
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|p| p.id == entity.id) {
            Some(slot) => *slot = entity.clone(),
            None => rows.push(entity.clone()),
        }
        Ok(entity)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(Self::ordered(rows.clone()))
    }

    async fn find_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(Self::ordered(
            rows.iter()
                .filter(|p| p.group_id == Some(group_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(Self::ordered(
            rows.iter()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }
}
