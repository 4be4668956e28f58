//! Promotion creation and the owner dashboard read models.
//!
//! Every operation here is gated by the ownership invariant: only the owner
//! of a website may read its articles or promote its content. Unknown ids and
//! foreign ids fail identically so callers cannot probe for other owners'
//! data.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    ArticlesQuery, ContentRepository, ContentRepositoryError, CreatePromotionRequest,
    PromotionCommand, PromotionRepository, PromotionRepositoryError, WebsiteContentQuery,
};
use crate::domain::{
    ArticleSummary, Budget, ContentId, ContentItem, ContentSnapshot, Error, NewPromotionJob,
    PROCESSING_SUMMARY, PromotionJob, PromotionValidationError, RECENT_CONTENT_LIMIT, UserId,
    WebsiteId,
};
use crate::domain::validation::{FieldName, parse_required_uuid};

const CONTENT_ID: FieldName = FieldName::new("content_id");
const CONTENT_DENIED: &str = "Forbidden: you do not have access to this content";
const WEBSITE_DENIED: &str = "Forbidden: you do not have access to this website";

fn map_content_error(error: ContentRepositoryError) -> Error {
    match error {
        ContentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("content repository unavailable: {message}"))
        }
        ContentRepositoryError::Query { message } => {
            Error::internal(format!("content repository error: {message}"))
        }
    }
}

fn map_promotion_error(error: PromotionRepositoryError) -> Error {
    match error {
        PromotionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("promotion repository unavailable: {message}"))
        }
        PromotionRepositoryError::Query { message } => {
            Error::internal(format!("promotion repository error: {message}"))
        }
    }
}

fn map_budget_error(error: PromotionValidationError) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": "budget", "code": "invalid_budget" }))
}

fn parse_content_id(raw: &str) -> Result<ContentId, Error> {
    parse_required_uuid(Some(raw), CONTENT_ID).map(ContentId::from_uuid)
}

/// Service implementing promotion creation and the article/content queries.
#[derive(Clone)]
pub struct PromotionService<C, P> {
    content_repo: Arc<C>,
    promotion_repo: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<C, P> PromotionService<C, P> {
    /// Create a service over the content and promotion repositories.
    pub fn new(content_repo: Arc<C>, promotion_repo: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            content_repo,
            promotion_repo,
            clock,
        }
    }
}

impl<C, P> PromotionService<C, P>
where
    C: ContentRepository,
{
    /// Prove that `user_id` owns the website of `content_id` and return the
    /// content fields a promotion copies.
    ///
    /// Fails with `Forbidden` for unknown and foreign content alike.
    pub async fn authorize(
        &self,
        content_id: &ContentId,
        user_id: &UserId,
    ) -> Result<ContentSnapshot, Error> {
        let snapshot = self
            .content_repo
            .find_owned_content(content_id, user_id)
            .await
            .map_err(map_content_error)?;

        snapshot.ok_or_else(|| {
            warn!(
                operation = "authorize",
                %content_id,
                %user_id,
                "content ownership check failed"
            );
            Error::forbidden(CONTENT_DENIED)
        })
    }

    async fn require_website_owner(
        &self,
        website_id: &WebsiteId,
        owner: &UserId,
    ) -> Result<(), Error> {
        let owned = self
            .content_repo
            .website_owned_by(website_id, owner)
            .await
            .map_err(map_content_error)?;
        if owned {
            Ok(())
        } else {
            warn!(
                operation = "list_articles",
                %website_id,
                user_id = %owner,
                "website ownership check failed"
            );
            Err(Error::forbidden(WEBSITE_DENIED))
        }
    }
}

#[async_trait]
impl<C, P> PromotionCommand for PromotionService<C, P>
where
    C: ContentRepository,
    P: PromotionRepository,
{
    async fn create_promotion(
        &self,
        request: CreatePromotionRequest,
    ) -> Result<PromotionJob, Error> {
        let CreatePromotionRequest {
            user_id,
            content_id,
            budget,
            title,
        } = request;

        let budget = Budget::from_input(budget).map_err(map_budget_error)?;
        let content_id = parse_content_id(&content_id)?;
        let snapshot = self.authorize(&content_id, &user_id).await?;

        let ContentSnapshot {
            title: content_title,
            description: _,
            tags,
            category,
        } = snapshot;
        let title = title
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or(content_title);

        let job = NewPromotionJob {
            article_id: content_id,
            promoter_id: user_id,
            title,
            summary: PROCESSING_SUMMARY.to_owned(),
            tags,
            category,
            budget,
            created_at: self.clock.utc(),
        };

        let created = self
            .promotion_repo
            .insert_promotion_job(&job)
            .await
            .map_err(map_promotion_error)?
            .ok_or_else(|| {
                // Ownership changed between the check and the conditional insert.
                warn!(
                    operation = "create_promotion",
                    %content_id,
                    %user_id,
                    "conditional promotion insert matched no owned content"
                );
                Error::forbidden(CONTENT_DENIED)
            })?;

        info!(
            operation = "create_promotion",
            promotion_id = created.id.get(),
            %content_id,
            %user_id,
            budget = created.budget.credits(),
            "promotion job queued for processing"
        );
        Ok(created)
    }
}

#[async_trait]
impl<C, P> ArticlesQuery for PromotionService<C, P>
where
    C: ContentRepository,
    P: Send + Sync,
{
    async fn list_articles(
        &self,
        website_id: WebsiteId,
        owner: UserId,
    ) -> Result<Vec<ArticleSummary>, Error> {
        self.require_website_owner(&website_id, &owner).await?;
        let records = self
            .content_repo
            .list_articles(&website_id)
            .await
            .map_err(map_content_error)?;
        Ok(records.into_iter().map(ArticleSummary::derive).collect())
    }
}

#[async_trait]
impl<C, P> WebsiteContentQuery for PromotionService<C, P>
where
    C: ContentRepository,
    P: Send + Sync,
{
    async fn recent_content(
        &self,
        website_id: WebsiteId,
        owner: UserId,
    ) -> Result<Vec<ContentItem>, Error> {
        self.content_repo
            .recent_content(&website_id, &owner, RECENT_CONTENT_LIMIT)
            .await
            .map_err(map_content_error)
    }
}

#[cfg(test)]
#[path = "promotion_service_tests.rs"]
mod tests;
