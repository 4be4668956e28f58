//! HTTP inbound adapter exposing REST endpoints.
//!
//! Dashboard routes require a signed-in session; the widget routes are
//! public and gated by verification token and origin instead.

pub mod articles;
pub mod auth;
pub mod error;
pub mod health;
pub mod promotions;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod wallet;
pub mod website;
pub mod widget;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` handler on `cfg`.
///
/// Callers mount this inside the `/api` scope wrapped with session
/// middleware, and provide [`state::HttpState`] plus
/// [`validation::json_body_config`] as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(promotions::create_promotion)
        .service(articles::list_articles)
        .service(wallet::get_wallet)
        .service(website::website_content)
        .service(widget::recommend)
        .service(widget::preflight);
}
