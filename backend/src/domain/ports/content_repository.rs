//! Port for reading websites and their content items.

use async_trait::async_trait;

use crate::domain::{ArticleRecord, ContentId, ContentItem, ContentSnapshot, UserId, WebsiteId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by content repository adapters.
    pub enum ContentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "content repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "content repository query failed: {message}",
    }
}

/// Read access to websites and content items, always scoped by owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Load the content item if and only if its website is owned by `owner`.
    ///
    /// Missing content and foreign content both return `None`.
    async fn find_owned_content(
        &self,
        content_id: &ContentId,
        owner: &UserId,
    ) -> Result<Option<ContentSnapshot>, ContentRepositoryError>;

    /// Whether `owner` owns the website. Unknown websites return `false`.
    async fn website_owned_by(
        &self,
        website_id: &WebsiteId,
        owner: &UserId,
    ) -> Result<bool, ContentRepositoryError>;

    /// Every content item of the website with all its promotion jobs,
    /// newest item first.
    async fn list_articles(
        &self,
        website_id: &WebsiteId,
    ) -> Result<Vec<ArticleRecord>, ContentRepositoryError>;

    /// At most `limit` items, newest first, of a website owned by `owner`.
    async fn recent_content(
        &self,
        website_id: &WebsiteId,
        owner: &UserId,
        limit: i64,
    ) -> Result<Vec<ContentItem>, ContentRepositoryError>;
}

/// Fixture implementation that owns nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContentRepository;

#[async_trait]
impl ContentRepository for FixtureContentRepository {
    async fn find_owned_content(
        &self,
        _content_id: &ContentId,
        _owner: &UserId,
    ) -> Result<Option<ContentSnapshot>, ContentRepositoryError> {
        Ok(None)
    }

    async fn website_owned_by(
        &self,
        _website_id: &WebsiteId,
        _owner: &UserId,
    ) -> Result<bool, ContentRepositoryError> {
        Ok(false)
    }

    async fn list_articles(
        &self,
        _website_id: &WebsiteId,
    ) -> Result<Vec<ArticleRecord>, ContentRepositoryError> {
        Ok(Vec::new())
    }

    async fn recent_content(
        &self,
        _website_id: &WebsiteId,
        _owner: &UserId,
        _limit: i64,
    ) -> Result<Vec<ContentItem>, ContentRepositoryError> {
        Ok(Vec::new())
    }
}
