//! Port for writing promotion jobs.
//!
//! The `promotions` table carries a vector-typed embedding column, so
//! adapters write it with raw SQL. Keeping the write behind this single
//! method keeps the dialect out of the domain.

use async_trait::async_trait;

use crate::domain::{NewPromotionJob, PromotionJob};

use super::define_port_error;

define_port_error! {
    /// Errors raised by promotion repository adapters.
    pub enum PromotionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "promotion repository connection failed: {message}",
        /// Insert failed during execution.
        Query { message: String } =>
            "promotion repository query failed: {message}",
    }
}

/// Promotion job persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromotionRepository: Send + Sync {
    /// Insert one inactive job.
    ///
    /// The write is conditional on `job.promoter_id` owning the website of
    /// `job.article_id` at the moment of the insert. When that predicate
    /// fails nothing is written and `None` is returned.
    async fn insert_promotion_job(
        &self,
        job: &NewPromotionJob,
    ) -> Result<Option<PromotionJob>, PromotionRepositoryError>;
}

/// Fixture implementation that never writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePromotionRepository;

#[async_trait]
impl PromotionRepository for FixturePromotionRepository {
    async fn insert_promotion_job(
        &self,
        _job: &NewPromotionJob,
    ) -> Result<Option<PromotionJob>, PromotionRepositoryError> {
        Ok(None)
    }
}
