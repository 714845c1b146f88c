//! HTTP handlers and route configuration.

mod auth;
mod groups;
mod health;
mod posts;
mod profiles;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post routes: public reads, login-gated writes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::create))
                    .route("/{post_id}", web::get().to(posts::detail))
                    .route("/{post_id}", web::put().to(posts::edit)),
            )
            // Group routes: public feed, administrative creation
            .service(
                web::scope("/groups")
                    .route("", web::post().to(groups::create))
                    .route("/{slug}", web::get().to(groups::feed)),
            )
            // Author profiles
            .route("/profiles/{username}", web::get().to(profiles::feed)),
    );
}
