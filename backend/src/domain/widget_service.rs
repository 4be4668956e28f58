//! Recommendation selection for the embeddable widget.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{WidgetQuery, WidgetRepository, WidgetRepositoryError};
use crate::domain::{Error, OriginPolicy, Recommendation, WidgetRequest};

const INVALID_TOKEN: &str = "Forbidden: invalid verification token";
const ORIGIN_MISMATCH: &str = "Forbidden: origin does not match the verified domain";

fn map_widget_error(error: WidgetRepositoryError) -> Error {
    match error {
        WidgetRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("widget repository unavailable: {message}"))
        }
        WidgetRepositoryError::Query { message } => {
            Error::internal(format!("widget repository error: {message}"))
        }
    }
}

/// Service resolving a widget request to one recommendation.
#[derive(Clone)]
pub struct WidgetService<R> {
    repo: Arc<R>,
    policy: OriginPolicy,
}

impl<R> WidgetService<R> {
    pub fn new(repo: Arc<R>, policy: OriginPolicy) -> Self {
        Self { repo, policy }
    }
}

#[async_trait]
impl<R> WidgetQuery for WidgetService<R>
where
    R: WidgetRepository,
{
    async fn recommend(&self, request: WidgetRequest) -> Result<Option<Recommendation>, Error> {
        let website = self
            .repo
            .find_website_by_token(request.verification_token())
            .await
            .map_err(map_widget_error)?
            .ok_or_else(|| {
                warn!(origin = request.origin(), "widget token not recognised");
                Error::forbidden(INVALID_TOKEN)
            })?;

        if !self.policy.allows(request.origin(), &website.domain_name) {
            warn!(
                origin = request.origin(),
                website_id = %website.website_id,
                "widget origin rejected"
            );
            return Err(Error::forbidden(ORIGIN_MISMATCH));
        }

        let recommendation = self
            .repo
            .find_recommendation(&website.website_id)
            .await
            .map_err(map_widget_error)?;
        debug!(
            website_id = %website.website_id,
            viewer_id = request.viewer_id(),
            served = recommendation.is_some(),
            "widget recommendation resolved"
        );
        Ok(recommendation)
    }
}
