//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) describe what the domain needs from storage.
//! Driving ports (`*Command`, `*Query`, `LoginService`) are what inbound
//! adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod content_repository;
mod dashboard_query;
mod login_service;
mod promotion_command;
mod promotion_repository;
mod wallet_query;
mod wallet_repository;
mod widget_query;
mod widget_repository;

#[cfg(test)]
pub use content_repository::MockContentRepository;
pub use content_repository::{
    ContentRepository, ContentRepositoryError, FixtureContentRepository,
};
#[cfg(test)]
pub use dashboard_query::{MockArticlesQuery, MockWebsiteContentQuery};
pub use dashboard_query::{ArticlesQuery, WebsiteContentQuery};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_LOGIN_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use promotion_command::MockPromotionCommand;
pub use promotion_command::{CreatePromotionRequest, PromotionCommand};
#[cfg(test)]
pub use promotion_repository::MockPromotionRepository;
pub use promotion_repository::{
    FixturePromotionRepository, PromotionRepository, PromotionRepositoryError,
};
#[cfg(test)]
pub use wallet_query::MockWalletQuery;
pub use wallet_query::WalletQuery;
#[cfg(test)]
pub use wallet_repository::MockWalletRepository;
pub use wallet_repository::{FixtureWalletRepository, WalletRepository, WalletRepositoryError};
#[cfg(test)]
pub use widget_query::MockWidgetQuery;
pub use widget_query::WidgetQuery;
#[cfg(test)]
pub use widget_repository::MockWidgetRepository;
pub use widget_repository::{FixtureWidgetRepository, WidgetRepository, WidgetRepositoryError};
