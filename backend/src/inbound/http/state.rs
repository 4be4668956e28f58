//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they are testable against mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{
    ArticlesQuery, LoginService, PromotionCommand, WalletQuery, WebsiteContentQuery, WidgetQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use credx_backend::domain::ports::{
///     FixtureContentRepository, FixtureLoginService, FixturePromotionRepository,
///     FixtureWalletRepository, FixtureWidgetRepository,
/// };
/// use credx_backend::domain::{OriginPolicy, PromotionService, WalletService, WidgetService};
/// use credx_backend::inbound::http::state::HttpState;
///
/// let promotions = Arc::new(PromotionService::new(
///     Arc::new(FixtureContentRepository),
///     Arc::new(FixturePromotionRepository),
///     Arc::new(mockable::DefaultClock),
/// ));
/// let state = HttpState {
///     login: Arc::new(FixtureLoginService),
///     promotions: promotions.clone(),
///     articles: promotions.clone(),
///     website_content: promotions,
///     wallet: Arc::new(WalletService::new(Arc::new(FixtureWalletRepository))),
///     widget: Arc::new(WidgetService::new(
///         Arc::new(FixtureWidgetRepository),
///         OriginPolicy::for_environment(false),
///     )),
/// };
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub promotions: Arc<dyn PromotionCommand>,
    pub articles: Arc<dyn ArticlesQuery>,
    pub website_content: Arc<dyn WebsiteContentQuery>,
    pub wallet: Arc<dyn WalletQuery>,
    pub widget: Arc<dyn WidgetQuery>,
}
