//! Builders for the HTTP state from the server configuration.
//!
//! A configured pool selects the Diesel repositories and a configured
//! identity provider selects the HTTP login adapter. Outside production
//! anything missing falls back to fixtures so the server can boot for local
//! development; with origin enforcement on, both are required.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use credx_backend::domain::ports::{
    ContentRepository, FixtureContentRepository, FixtureLoginService, FixturePromotionRepository,
    FixtureWalletRepository, FixtureWidgetRepository, LoginService, PromotionRepository,
    WalletRepository, WidgetRepository,
};
use credx_backend::domain::{OriginPolicy, PromotionService, WalletService, WidgetService};
use credx_backend::inbound::http::state::HttpState;
use credx_backend::outbound::identity::HttpLoginService;
use credx_backend::outbound::persistence::{
    DieselContentRepository, DieselPromotionRepository, DieselWalletRepository,
    DieselWidgetRepository,
};
use credx_backend::settings::IdentitySettings;

use super::ServerConfig;

struct Repositories<C, P, W, G> {
    content: Arc<C>,
    promotions: Arc<P>,
    wallets: Arc<W>,
    widget: Arc<G>,
}

fn compose<C, P, W, G>(
    repos: Repositories<C, P, W, G>,
    login: Arc<dyn LoginService>,
    policy: OriginPolicy,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    C: ContentRepository + 'static,
    P: PromotionRepository + 'static,
    W: WalletRepository + 'static,
    G: WidgetRepository + 'static,
{
    let promotions = Arc::new(PromotionService::new(repos.content, repos.promotions, clock));
    HttpState {
        login,
        promotions: promotions.clone(),
        articles: promotions.clone(),
        website_content: promotions,
        wallet: Arc::new(WalletService::new(repos.wallets)),
        widget: Arc::new(WidgetService::new(repos.widget, policy)),
    }
}

fn build_login_service(identity: Option<&IdentitySettings>) -> std::io::Result<Arc<dyn LoginService>> {
    match identity {
        Some(identity) => {
            let service =
                HttpLoginService::new(&identity.base_url, identity.api_key.clone(), identity.timeout)
                    .map_err(std::io::Error::other)?;
            info!(base_url = %identity.base_url, "authenticating against identity provider");
            Ok(Arc::new(service))
        }
        None => {
            info!("no identity provider configured; using development login");
            Ok(Arc::new(FixtureLoginService))
        }
    }
}

fn require_production_backends(config: &ServerConfig) -> std::io::Result<()> {
    if config.origin_policy != OriginPolicy::Enforce {
        return Ok(());
    }
    let missing = match (&config.db_pool, &config.identity) {
        (None, _) => "a database pool",
        (_, None) => "an identity provider",
        (Some(_), Some(_)) => return Ok(()),
    };
    Err(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("production servers require {missing}; refusing fixture fallback"),
    ))
}

/// Build the handler state for `config`.
///
/// # Errors
///
/// Returns an error when the identity client cannot be constructed, or when
/// a production configuration lacks a database pool or identity provider.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    require_production_backends(config)?;
    let login = build_login_service(config.identity.as_ref())?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let policy = config.origin_policy;

    let state = match &config.db_pool {
        Some(pool) => compose(
            Repositories {
                content: Arc::new(DieselContentRepository::new(pool.clone())),
                promotions: Arc::new(DieselPromotionRepository::new(pool.clone())),
                wallets: Arc::new(DieselWalletRepository::new(pool.clone())),
                widget: Arc::new(DieselWidgetRepository::new(pool.clone())),
            },
            login,
            policy,
            clock,
        ),
        None => {
            info!("no database configured; serving fixture repositories");
            compose(
                Repositories {
                    content: Arc::new(FixtureContentRepository),
                    promotions: Arc::new(FixturePromotionRepository),
                    wallets: Arc::new(FixtureWalletRepository),
                    widget: Arc::new(FixtureWidgetRepository),
                },
                login,
                policy,
                clock,
            )
        }
    };
    Ok(web::Data::new(state))
}
