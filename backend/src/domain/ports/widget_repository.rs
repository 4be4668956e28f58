//! Port backing the public recommendation widget.

use async_trait::async_trait;

use crate::domain::{Recommendation, VerifiedWebsite, WebsiteId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by widget repository adapters.
    pub enum WidgetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "widget repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "widget repository query failed: {message}",
    }
}

/// Token lookup and recommendation selection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WidgetRepository: Send + Sync {
    /// Resolve the website registered with `token`.
    async fn find_website_by_token(
        &self,
        token: &str,
    ) -> Result<Option<VerifiedWebsite>, WidgetRepositoryError>;

    /// Newest active promotion of the website with budget left.
    async fn find_recommendation(
        &self,
        website_id: &WebsiteId,
    ) -> Result<Option<Recommendation>, WidgetRepositoryError>;
}

/// Fixture implementation that knows no tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWidgetRepository;

#[async_trait]
impl WidgetRepository for FixtureWidgetRepository {
    async fn find_website_by_token(
        &self,
        _token: &str,
    ) -> Result<Option<VerifiedWebsite>, WidgetRepositoryError> {
        Ok(None)
    }

    async fn find_recommendation(
        &self,
        _website_id: &WebsiteId,
    ) -> Result<Option<Recommendation>, WidgetRepositoryError> {
        Ok(None)
    }
}
