//! Driving port for creating promotion jobs.

use async_trait::async_trait;

use crate::domain::{Error, PromotionJob, UserId};

/// Raw promotion request as received by an inbound adapter.
///
/// `budget` is `None` when the payload value was missing or not a number;
/// the service reports that as invalid input in its fixed check order.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePromotionRequest {
    /// Authenticated caller. Never read from the request payload.
    pub user_id: UserId,
    pub content_id: String,
    pub budget: Option<f64>,
    /// Optional title override; blank values fall back to the content title.
    pub title: Option<String>,
}

/// Use-case port for promotion creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromotionCommand: Send + Sync {
    /// Validate, authorise and insert one inactive promotion job.
    ///
    /// Duplicate submissions create duplicate jobs.
    async fn create_promotion(&self, request: CreatePromotionRequest)
    -> Result<PromotionJob, Error>;
}
