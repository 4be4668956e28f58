//! Driving ports for the owner dashboard read models.

use async_trait::async_trait;

use crate::domain::{ArticleSummary, ContentItem, Error, UserId, WebsiteId};

/// Articles of a website with their surfaced promotion state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesQuery: Send + Sync {
    /// List every article of `website_id`; the caller must own the website.
    async fn list_articles(
        &self,
        website_id: WebsiteId,
        owner: UserId,
    ) -> Result<Vec<ArticleSummary>, Error>;
}

/// Recently ingested content of a website.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebsiteContentQuery: Send + Sync {
    /// Newest content first, capped; foreign websites yield an empty list.
    async fn recent_content(
        &self,
        website_id: WebsiteId,
        owner: UserId,
    ) -> Result<Vec<ContentItem>, Error>;
}
