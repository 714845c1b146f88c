//! End-to-end tests: the full router over in-memory state.
//!
//! Each test builds a fresh application, registers its own authors and
//! creates its own records through the HTTP surface.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, Error, test, web};
use uuid::Uuid;

use api_server::handlers;
use api_server::state::AppState;
use quill_core::ports::{PasswordService, TokenService};
use quill_infra::auth::{JwtConfig, JwtTokenService};
use quill_infra::Argon2PasswordService;
use quill_shared::dto::{
    AuthResponse, FeedResponse, GroupFeedResponse, GroupForm, PostForm, PostResponse,
    ProfileResponse, RegisterRequest,
};

async fn spawn_app()
-> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "quill-test".to_string(),
    }));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::in_memory()))
            .app_data(web::Data::new(token_service))
            .app_data(web::Data::new(password_service))
            .configure(handlers::configure_routes),
    )
    .await
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Register an author and return their access token.
async fn register<S, B>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(RegisterRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "password123".to_string(),
        })
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let auth: AuthResponse = test::read_body_json(resp).await;
    auth.access_token
}

async fn create_group<S, B>(app: &S, token: &str, slug: &str) -> Uuid
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header(bearer(token))
        .set_json(GroupForm {
            title: format!("The {slug} group"),
            slug: slug.to_string(),
            description: "Made by a test".to_string(),
        })
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let group: quill_shared::dto::GroupResponse = test::read_body_json(resp).await;
    Uuid::parse_str(&group.id).unwrap()
}

async fn create_post<S, B>(app: &S, token: &str, text: &str, group: Option<Uuid>) -> PostResponse
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(token))
        .set_json(PostForm {
            text: text.to_string(),
            group,
        })
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    test::read_body_json(resp).await
}

async fn get_ok<T, S, B>(app: &S, uri: &str) -> T
where
    T: serde::de::DeserializeOwned,
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");

    test::read_body_json(resp).await
}

fn location(resp: &ServiceResponse<impl MessageBody>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect carries a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let app = spawn_app().await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn guest_can_read_listings_and_detail() {
    let app = spawn_app().await;
    let token = register(&app, "writer").await;
    let travel = create_group(&app, &token, "travel").await;
    let post = create_post(&app, &token, "Postcard from Lisbon", Some(travel)).await;

    // No Authorization header on any of these.
    let feed: FeedResponse = get_ok(&app, "/api/posts").await;
    assert_eq!(feed.total_items, 1);

    let group_feed: GroupFeedResponse = get_ok(&app, "/api/groups/travel").await;
    assert_eq!(group_feed.group.slug, "travel");
    assert_eq!(group_feed.feed.posts.len(), 1);

    let profile: ProfileResponse = get_ok(&app, "/api/profiles/writer").await;
    assert_eq!(profile.author.username, "writer");
    assert_eq!(profile.feed.posts.len(), 1);

    let detail: PostResponse = get_ok(&app, &format!("/api/posts/{}", post.id)).await;
    assert_eq!(detail.text, "Postcard from Lisbon");
}

#[actix_web::test]
async fn unknown_resources_return_not_found() {
    let app = spawn_app().await;

    for uri in [
        format!("/api/posts/{}", Uuid::new_v4()),
        "/api/groups/no-such-slug".to_string(),
        "/api/profiles/nobody".to_string(),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }
}

#[actix_web::test]
async fn anonymous_writes_redirect_to_login_and_persist_nothing() {
    let app = spawn_app().await;
    let token = register(&app, "writer").await;
    let post = create_post(&app, &token, "original", None).await;

    // Anonymous create
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(PostForm {
            text: "drive-by".to_string(),
            group: None,
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/api/auth/login?next=/api/posts");

    // Anonymous edit
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", post.id))
        .set_json(PostForm {
            text: "defaced".to_string(),
            group: None,
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp),
        format!("/api/auth/login?next=/api/posts/{}", post.id)
    );

    // Nothing reached persistence.
    let feed: FeedResponse = get_ok(&app, "/api/posts").await;
    assert_eq!(feed.total_items, 1);
    let detail: PostResponse = get_ok(&app, &format!("/api/posts/{}", post.id)).await;
    assert_eq!(detail.text, "original");
}

#[actix_web::test]
async fn created_post_lands_in_every_feed() {
    let app = spawn_app().await;
    let token = register(&app, "writer").await;
    let travel = create_group(&app, &token, "travel").await;
    let post = create_post(&app, &token, "Window seat, please", Some(travel)).await;

    assert_eq!(post.group_id.as_deref(), Some(travel.to_string().as_str()));

    let feed: FeedResponse = get_ok(&app, "/api/posts").await;
    assert_eq!(feed.posts[0].id, post.id);

    let group_feed: GroupFeedResponse = get_ok(&app, "/api/groups/travel").await;
    assert_eq!(group_feed.feed.posts[0].id, post.id);

    let profile: ProfileResponse = get_ok(&app, "/api/profiles/writer").await;
    assert_eq!(profile.feed.posts[0].id, post.id);
}

#[actix_web::test]
async fn empty_text_is_rejected_before_write() {
    let app = spawn_app().await;
    let token = register(&app, "writer").await;

    for text in ["", "   \n\t"] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&token))
            .set_json(PostForm {
                text: text.to_string(),
                group: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    let feed: FeedResponse = get_ok(&app, "/api/posts").await;
    assert_eq!(feed.total_items, 0);
}

#[actix_web::test]
async fn unknown_group_is_rejected_before_write() {
    let app = spawn_app().await;
    let token = register(&app, "writer").await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&token))
        .set_json(PostForm {
            text: "homeless post".to_string(),
            group: Some(Uuid::new_v4()),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let feed: FeedResponse = get_ok(&app, "/api/posts").await;
    assert_eq!(feed.total_items, 0);
}

#[actix_web::test]
async fn author_edit_replaces_content_and_keeps_provenance() {
    let app = spawn_app().await;
    let token = register(&app, "writer").await;
    let travel = create_group(&app, &token, "travel").await;
    let post = create_post(&app, &token, "first draft", None).await;

    let edit = PostForm {
        text: "second draft".to_string(),
        group: Some(travel),
    };

    // Identical edits are idempotent.
    for _ in 0..2 {
        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", post.id))
            .insert_header(bearer(&token))
            .set_json(&edit)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let detail: PostResponse = get_ok(&app, &format!("/api/posts/{}", post.id)).await;
        assert_eq!(detail.text, "second draft");
        assert_eq!(detail.group_id.as_deref(), Some(travel.to_string().as_str()));
        assert_eq!(detail.author_id, post.author_id);
        assert_eq!(detail.pub_date, post.pub_date);
    }

    // No new row appeared.
    let feed: FeedResponse = get_ok(&app, "/api/posts").await;
    assert_eq!(feed.total_items, 1);
}

#[actix_web::test]
async fn non_author_edit_redirects_to_detail_and_changes_nothing() {
    let app = spawn_app().await;
    let author_token = register(&app, "author").await;
    let other_token = register(&app, "bystander").await;
    let post = create_post(&app, &author_token, "mine alone", None).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(bearer(&other_token))
        .set_json(PostForm {
            text: "mine now".to_string(),
            group: None,
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/api/posts/{}", post.id));

    let detail: PostResponse = get_ok(&app, &format!("/api/posts/{}", post.id)).await;
    assert_eq!(detail.text, "mine alone");
}

#[actix_web::test]
async fn editing_missing_post_is_not_found() {
    let app = spawn_app().await;
    let token = register(&app, "writer").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", Uuid::new_v4()))
        .insert_header(bearer(&token))
        .set_json(PostForm {
            text: "into the void".to_string(),
            group: None,
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn thirteen_posts_paginate_ten_three_zero() {
    let app = spawn_app().await;
    let token = register(&app, "prolific").await;
    create_group(&app, &token, "travel").await;
    let travel = {
        let group_feed: GroupFeedResponse = get_ok(&app, "/api/groups/travel").await;
        Uuid::parse_str(&group_feed.group.id).unwrap()
    };

    for i in 0..13 {
        create_post(&app, &token, &format!("entry {i}"), Some(travel)).await;
    }

    for base in [
        "/api/posts".to_string(),
        "/api/groups/travel".to_string(),
        "/api/profiles/prolific".to_string(),
    ] {
        for (page, expected) in [(1, 10), (2, 3), (3, 0)] {
            let uri = format!("{base}?page={page}");
            let count = if base == "/api/posts" {
                let feed: FeedResponse = get_ok(&app, &uri).await;
                assert_eq!(feed.total_pages, 2, "{uri}");
                assert_eq!(feed.total_items, 13, "{uri}");
                feed.posts.len()
            } else if base.contains("groups") {
                let feed: GroupFeedResponse = get_ok(&app, &uri).await;
                feed.feed.posts.len()
            } else {
                let feed: ProfileResponse = get_ok(&app, &uri).await;
                feed.feed.posts.len()
            };
            assert_eq!(count, expected, "{uri}");
        }
    }
}

#[actix_web::test]
async fn feeds_are_newest_first() {
    let app = spawn_app().await;
    let token = register(&app, "writer").await;

    create_post(&app, &token, "oldest", None).await;
    create_post(&app, &token, "middle", None).await;
    create_post(&app, &token, "newest", None).await;

    let feed: FeedResponse = get_ok(&app, "/api/posts").await;
    let texts: Vec<&str> = feed.posts.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, ["newest", "middle", "oldest"]);
}

#[actix_web::test]
async fn group_feed_excludes_other_groups() {
    let app = spawn_app().await;
    let token = register(&app, "writer").await;
    let travel = create_group(&app, &token, "travel").await;
    let cooking = create_group(&app, &token, "cooking").await;

    create_post(&app, &token, "airports", Some(travel)).await;
    create_post(&app, &token, "sourdough", Some(cooking)).await;
    create_post(&app, &token, "ungrouped", None).await;

    let feed: GroupFeedResponse = get_ok(&app, "/api/groups/cooking").await;
    assert_eq!(feed.feed.total_items, 1);
    assert_eq!(feed.feed.posts[0].text, "sourdough");
}

#[actix_web::test]
async fn duplicate_group_slug_is_a_conflict() {
    let app = spawn_app().await;
    let token = register(&app, "curator").await;
    create_group(&app, &token, "travel").await;

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header(bearer(&token))
        .set_json(GroupForm {
            title: "Travel, again".to_string(),
            slug: "travel".to_string(),
            description: "A duplicate".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn group_creation_requires_identity() {
    let app = spawn_app().await;

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .set_json(GroupForm {
            title: "Anonymous".to_string(),
            slug: "anonymous".to_string(),
            description: "No curator".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
