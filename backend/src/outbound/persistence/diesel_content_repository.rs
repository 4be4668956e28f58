//! PostgreSQL-backed `ContentRepository`.
//!
//! Every read that returns content joins `websites` and filters on the
//! owner, so a caller can never observe another owner's articles.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Uuid as SqlUuid;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{ContentRepository, ContentRepositoryError};
use crate::domain::{
    ArticleRecord, ContentId, ContentItem, ContentSnapshot, PromotionId, PromotionJobState,
    UserId, WebsiteId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ArticleHeadingRow, ContentItemRow, ContentSnapshotRow, PromotionStateRow};
use super::pool::{DbPool, PoolError};
use super::schema::{content_items, websites};

/// Numeric columns are cast so they decode as `f64`.
const PROMOTION_STATES_SQL: &str = r#"
SELECT p.id,
       p.article_id,
       p.active,
       p.status,
       p.budget::float8 AS budget,
       p.credits_spent::float8 AS credits_spent,
       p.created_at
FROM promotions p
JOIN content_items c ON c.content_id = p.article_id
WHERE c.website_id = $1
"#;

/// Diesel-backed implementation of the content repository port.
#[derive(Clone)]
pub struct DieselContentRepository {
    pool: DbPool,
}

impl DieselContentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContentRepositoryError {
    map_basic_pool_error(error, ContentRepositoryError::connection)
}

fn diesel_error(operation: &'static str) -> impl FnOnce(diesel::result::Error) -> ContentRepositoryError {
    move |error| {
        map_basic_diesel_error(
            error,
            operation,
            ContentRepositoryError::query,
            ContentRepositoryError::connection,
        )
    }
}

fn row_to_item(row: ContentItemRow) -> ContentItem {
    ContentItem {
        content_id: ContentId::from_uuid(row.content_id),
        website_id: WebsiteId::from_uuid(row.website_id),
        title: row.title,
        description: row.description,
        tags: row.tags,
        category: row.category,
        original_url: row.original_url,
        image_url: row.image_url,
        created_at: row.created_at,
    }
}

fn row_to_state(row: PromotionStateRow) -> PromotionJobState {
    PromotionJobState {
        id: PromotionId::new(row.id),
        active: row.active,
        status: row.status,
        budget: row.budget,
        credits_spent: row.credits_spent,
        created_at: row.created_at,
    }
}

/// Attach job states to their articles, keeping the heading order.
fn group_articles(
    headings: Vec<ArticleHeadingRow>,
    states: Vec<PromotionStateRow>,
) -> Vec<ArticleRecord> {
    let mut jobs_by_article: HashMap<Uuid, Vec<PromotionJobState>> = HashMap::new();
    for row in states {
        jobs_by_article
            .entry(row.article_id)
            .or_default()
            .push(row_to_state(row));
    }

    headings
        .into_iter()
        .map(|heading| ArticleRecord {
            content_id: ContentId::from_uuid(heading.content_id),
            title: heading.title,
            jobs: jobs_by_article.remove(&heading.content_id).unwrap_or_default(),
        })
        .collect()
}

#[async_trait]
impl ContentRepository for DieselContentRepository {
    async fn find_owned_content(
        &self,
        content_id: &ContentId,
        owner: &UserId,
    ) -> Result<Option<ContentSnapshot>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = content_items::table
            .inner_join(websites::table)
            .filter(content_items::content_id.eq(content_id.as_uuid()))
            .filter(websites::owner_id.eq(owner.as_uuid()))
            .select((
                content_items::title,
                content_items::description,
                content_items::tags,
                content_items::category,
            ))
            .first::<ContentSnapshotRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error("find owned content"))?;

        Ok(row.map(|row| ContentSnapshot {
            title: row.title,
            description: row.description,
            tags: row.tags,
            category: row.category,
        }))
    }

    async fn website_owned_by(
        &self,
        website_id: &WebsiteId,
        owner: &UserId,
    ) -> Result<bool, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            websites::table
                .filter(websites::website_id.eq(website_id.as_uuid()))
                .filter(websites::owner_id.eq(owner.as_uuid())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(diesel_error("check website owner"))
    }

    async fn list_articles(
        &self,
        website_id: &WebsiteId,
    ) -> Result<Vec<ArticleRecord>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let website = *website_id.as_uuid();

        // Headings and job states come from one snapshot.
        let (headings, states) = conn
            .transaction(|conn| {
                async move {
                    let headings = content_items::table
                        .filter(content_items::website_id.eq(website))
                        .order((
                            content_items::created_at.desc(),
                            content_items::content_id.asc(),
                        ))
                        .select((content_items::content_id, content_items::title))
                        .load::<ArticleHeadingRow>(conn)
                        .await?;
                    if headings.is_empty() {
                        return Ok((headings, Vec::new()));
                    }
                    let states = sql_query(PROMOTION_STATES_SQL)
                        .bind::<SqlUuid, _>(website)
                        .load::<PromotionStateRow>(conn)
                        .await?;
                    Ok((headings, states))
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error("list articles"))?;

        Ok(group_articles(headings, states))
    }

    async fn recent_content(
        &self,
        website_id: &WebsiteId,
        owner: &UserId,
        limit: i64,
    ) -> Result<Vec<ContentItem>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = content_items::table
            .inner_join(websites::table)
            .filter(content_items::website_id.eq(website_id.as_uuid()))
            .filter(websites::owner_id.eq(owner.as_uuid()))
            .order((
                content_items::created_at.desc(),
                content_items::content_id.asc(),
            ))
            .limit(limit)
            .select(ContentItemRow::as_select())
            .load::<ContentItemRow>(&mut conn)
            .await
            .map_err(diesel_error("recent content"))?;

        Ok(rows.into_iter().map(row_to_item).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    fn state(id: i64, article_id: Uuid) -> PromotionStateRow {
        PromotionStateRow {
            id,
            article_id,
            active: Some(false),
            status: None,
            budget: Some(10.0),
            credits_spent: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("timestamp")
                + Duration::minutes(id),
        }
    }

    #[rstest]
    fn jobs_are_grouped_under_their_article() {
        let promoted = Uuid::new_v4();
        let plain = Uuid::new_v4();
        let headings = vec![
            ArticleHeadingRow {
                content_id: plain,
                title: "Plain".into(),
            },
            ArticleHeadingRow {
                content_id: promoted,
                title: "Promoted".into(),
            },
        ];

        let records = group_articles(headings, vec![state(1, promoted), state(2, promoted)]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Plain");
        assert!(records[0].jobs.is_empty());
        assert_eq!(records[1].jobs.len(), 2);
    }

    #[rstest]
    fn states_for_unlisted_articles_are_dropped() {
        let listed = Uuid::new_v4();
        let records = group_articles(
            vec![ArticleHeadingRow {
                content_id: listed,
                title: "Listed".into(),
            }],
            vec![state(1, Uuid::new_v4())],
        );

        assert!(records[0].jobs.is_empty());
    }
}
