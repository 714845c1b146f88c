//! Group feed and administrative group creation.

use actix_web::{HttpResponse, web};

use quill_core::domain::Group;
use quill_shared::dto::{GroupFeedResponse, GroupForm, GroupResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::posts::{PageQuery, feed_response};

fn group_response(group: &Group) -> GroupResponse {
    GroupResponse {
        id: group.id.to_string(),
        title: group.title.clone(),
        slug: group.slug.clone(),
        description: group.description.clone(),
    }
}

/// GET /api/groups/{slug} - the group plus one page of its posts.
pub async fn feed(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group '{slug}' not found")))?;

    let page = state.posts.page_by_group(group.id, query.page()).await?;

    Ok(HttpResponse::Ok().json(GroupFeedResponse {
        group: group_response(&group),
        feed: feed_response(page),
    }))
}

/// POST /api/groups - administrative creation; not an end-user workflow,
/// so a missing identity is a plain 401 rather than a login redirect.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<GroupForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    let group = Group::new(form.title, form.slug, form.description);
    group.validate()?;

    let saved = state.groups.insert(group).await?;

    tracing::info!(group_id = %saved.id, slug = %saved.slug, curator = %identity.username, "group created");

    Ok(HttpResponse::Created().json(group_response(&saved)))
}
