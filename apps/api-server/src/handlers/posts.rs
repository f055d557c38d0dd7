//! Post handlers: index listing, detail, create, edit.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use scribe_core::domain::Post;
use scribe_core::pagination::{PAGE_SIZE, Page, paginate, resolve_page_number};
use scribe_shared::dto::{CreatePostRequest, PageQuery, PostPage, PostResponse, UpdatePostRequest};
use scribe_shared::response::FieldError;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        group_id: post.group_id,
        text: post.text,
        pub_date: post.pub_date,
    }
}

pub(crate) fn to_page(page: Page<Post>) -> PostPage {
    PostPage {
        page: page.number,
        total_pages: page.total_pages,
        total_posts: page.total_items,
        posts: page.items.into_iter().map(to_response).collect(),
    }
}

/// Validate the submitted fields of a create/edit request.
///
/// Returns the trimmed text and the group id, or a 422 carrying one
/// entry per failing field and leaving no state changed.
async fn validated_fields(
    state: &AppState,
    text: &str,
    group: Option<Uuid>,
) -> AppResult<(String, Option<Uuid>)> {
    let mut errors = Vec::new();

    let text = text.trim();
    if text.is_empty() {
        errors.push(FieldError::new("text", "must not be empty"));
    }

    if let Some(group_id) = group {
        if state.groups.find_by_id(group_id).await?.is_none() {
            errors.push(FieldError::new("group", "unknown group"));
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok((text.to_string(), group))
}

/// GET /api/posts - all posts, most recent first, paginated.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let number = resolve_page_number(query.page.as_deref());
    let page = paginate(posts, number, PAGE_SIZE);

    Ok(HttpResponse::Ok().json(to_page(page)))
}

/// GET /api/posts/{post_id}
pub async fn detail(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/posts - create a post.
///
/// The author is always the authenticated user; the request body carries
/// no author field. Points the caller at the author's profile listing,
/// where the new post now appears.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (text, group_id) = validated_fields(&state, &req.text, req.group).await?;

    let post = Post::new(identity.user_id, text, group_id);
    let saved = state.posts.save(post).await?;

    tracing::info!(post_id = %saved.id, author = %identity.username, "Post created");

    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("/api/profiles/{}/posts", identity.username),
        ))
        .json(to_response(saved)))
}

/// PUT /api/posts/{post_id} - edit a post, author only.
///
/// A non-author caller is sent to the detail view with no error body;
/// the edit surface is never revealed to them.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?;

    if post.author_id != identity.user_id {
        return Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, format!("/api/posts/{post_id}")))
            .finish());
    }

    let req = body.into_inner();
    let (text, group_id) = validated_fields(&state, &req.text, req.group).await?;

    post.revise(text, group_id);
    let saved = state.posts.save(post).await?;

    tracing::info!(post_id = %saved.id, author = %identity.username, "Post edited");

    Ok(HttpResponse::Ok().json(to_response(saved)))
}
