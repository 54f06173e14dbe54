//! HTTP routes

mod auth;
mod health;
mod purge;

use actix_web::web;

pub use auth::CurrentUser;

/// Register every route on an `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(health::healthz))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout))
        .route("/session", web::get().to(auth::session))
        .route("/purge_cache", web::post().to(purge::purge_cache));
}
