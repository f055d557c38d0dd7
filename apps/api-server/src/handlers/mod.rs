//! HTTP handlers and route configuration.

mod auth;
mod groups;
mod health;
mod posts;
mod profiles;

#[cfg(test)]
mod tests;

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
            // Post routes
            .route("/posts", web::get().to(posts::index))
            .route("/posts", web::post().to(posts::create))
            .route("/posts/{post_id}", web::get().to(posts::detail))
            .route("/posts/{post_id}", web::put().to(posts::update))
            // Listing routes
            .route("/groups/{slug}/posts", web::get().to(groups::group_posts))
            .route(
                "/profiles/{username}/posts",
                web::get().to(profiles::profile_posts),
            ),
    );
}
