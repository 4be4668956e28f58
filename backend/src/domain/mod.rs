//! Domain primitives, ports, and services.
//!
//! Purpose: Define the strongly typed vocabulary of the dashboard (websites,
//! content, promotion jobs, wallets, widget recommendations) and the
//! services that enforce ownership before anything is read or written.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - PromotionService, WalletService, WidgetService: driving port
//!   implementations composed by the server.

pub mod auth;
pub mod content;
pub mod error;
pub mod ports;
pub mod promotion;
mod promotion_service;
pub mod trace_id;
pub mod user;
pub(crate) mod validation;
pub mod wallet;
mod wallet_service;
pub mod widget;
mod widget_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::content::{
    ContentId, ContentItem, ContentSnapshot, RECENT_CONTENT_LIMIT, WebsiteId,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::promotion::{
    ArticleRecord, ArticleSummary, Budget, NewPromotionJob, PROCESSING_SUMMARY, PromotionId,
    PromotionJob, PromotionJobState, PromotionStatus, PromotionValidationError,
};
pub use self::promotion_service::PromotionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};
pub use self::wallet::{
    TRANSACTION_HISTORY_LIMIT, Transaction, TransactionType, WalletOverview,
};
pub use self::wallet_service::WalletService;
pub use self::widget::{
    OriginPolicy, PLACEHOLDER_IMAGE_URL, PLACEHOLDER_LINK, Recommendation, VerifiedWebsite,
    WidgetRequest, WidgetValidationError, normalise_domain, origin_hostname,
};
pub use self::widget_service::WidgetService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use credx_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
