//! Group listing handler.

use actix_web::{HttpResponse, web};

use scribe_core::pagination::{PAGE_SIZE, paginate, resolve_page_number};
use scribe_shared::dto::{GroupPostsResponse, GroupResponse, PageQuery};

use crate::handlers::posts::to_page;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/groups/{slug}/posts - the group's posts, paginated.
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group '{slug}'")))?;

    let posts = state.posts.find_by_group(group.id).await?;
    let number = resolve_page_number(query.page.as_deref());
    let page = paginate(posts, number, PAGE_SIZE);

    Ok(HttpResponse::Ok().json(GroupPostsResponse {
        group: GroupResponse {
            id: group.id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        },
        page: to_page(page),
    }))
}
