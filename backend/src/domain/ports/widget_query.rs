//! Driving port for the public recommendation widget.

use async_trait::async_trait;

use crate::domain::{Error, Recommendation, WidgetRequest};

/// Recommendation lookup for an embedding website.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WidgetQuery: Send + Sync {
    /// Verify the token and origin, then pick a recommendation.
    ///
    /// `Ok(None)` means the website has nothing to promote right now.
    async fn recommend(&self, request: WidgetRequest) -> Result<Option<Recommendation>, Error>;
}
