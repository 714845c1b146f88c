//! Post feeds, detail lookup, and the authoring/editing workflows.

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::domain::{Page, Post};
use quill_shared::dto::{FeedResponse, PostForm, PostResponse};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// `?page=N` query, 1-based; absent or zero means the first page.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u64>,
}

impl PageQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

pub fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        author_id: post.author_id.to_string(),
        group_id: post.group_id.map(|id| id.to_string()),
        text: post.text.clone(),
        pub_date: post.pub_date.to_rfc3339(),
    }
}

pub fn feed_response(page: Page<Post>) -> FeedResponse {
    FeedResponse {
        posts: page.items.iter().map(post_response).collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
    }
}

/// Anonymous writers are sent to login, keeping the page they wanted.
fn redirect_to_login(next: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, format!("/api/auth/login?next={next}")))
        .finish()
}

/// GET /api/posts - the global feed, newest first.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.page_recent(query.page()).await?;

    Ok(HttpResponse::Ok().json(feed_response(page)))
}

/// GET /api/posts/{post_id} - single post lookup.
pub async fn detail(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post '{post_id}' not found")))?;

    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// POST /api/posts - the authoring workflow.
pub async fn create(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    req: HttpRequest,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    // Guard clause: an anonymous write never reaches validation or storage.
    let Some(identity) = identity.0 else {
        return Ok(redirect_to_login(req.path()));
    };

    let form = body.into_inner();
    validate_form(&state, &form).await?;

    let post = Post::new(identity.user_id, form.text, form.group);
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, author = %identity.username, label = %saved, "post created");

    Ok(HttpResponse::Created().json(post_response(&saved)))
}

/// PUT /api/posts/{post_id} - the editing workflow, author only.
pub async fn edit(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let Some(identity) = identity.0 else {
        return Ok(redirect_to_login(req.path()));
    };

    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post '{post_id}' not found")))?;

    // Author-only, checked before validation and before any field is
    // touched. A non-author is bounced back to the detail page.
    if post.author_id != identity.user_id {
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, format!("/api/posts/{post_id}")))
            .finish());
    }

    let form = body.into_inner();
    validate_form(&state, &form).await?;

    // pub_date and author_id are never modified by an edit.
    post.text = form.text;
    post.group_id = form.group;
    let saved = state.posts.update(post).await?;

    tracing::info!(post_id = %saved.id, label = %saved, "post edited");

    Ok(HttpResponse::Ok().json(post_response(&saved)))
}

/// Field validation shared by authoring and editing: text must carry
/// content and a supplied group must exist.
async fn validate_form(state: &AppState, form: &PostForm) -> Result<(), AppError> {
    Post::validate_text(&form.text)?;

    if let Some(group_id) = form.group {
        state
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("group '{group_id}' does not exist")))?;
    }

    Ok(())
}
