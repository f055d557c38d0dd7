//! Profile listing handler.

use actix_web::{HttpResponse, web};

use scribe_core::pagination::{PAGE_SIZE, paginate, resolve_page_number};
use scribe_shared::dto::{PageQuery, ProfileResponse, UserResponse};

use crate::handlers::posts::to_page;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/profiles/{username}/posts - the author's posts, paginated.
pub async fn profile_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{username}'")))?;

    let posts = state.posts.find_by_author(author.id).await?;
    let number = resolve_page_number(query.page.as_deref());
    let page = paginate(posts, number, PAGE_SIZE);

    Ok(HttpResponse::Ok().json(ProfileResponse {
        author: UserResponse {
            id: author.id,
            username: author.username,
            created_at: author.created_at,
        },
        page: to_page(page),
    }))
}
