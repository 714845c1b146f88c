//! Author profile pages.

use actix_web::{HttpResponse, web};

use quill_shared::dto::{AuthorResponse, ProfileResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::posts::{PageQuery, feed_response};

/// GET /api/profiles/{username} - the author plus one page of their posts.
pub async fn feed(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("author '{username}' not found")))?;

    let page = state.posts.page_by_author(user.id, query.page()).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        author: AuthorResponse {
            id: user.id.to_string(),
            username: user.username,
        },
        feed: feed_response(page),
    }))
}
