//! PostgreSQL-backed `PromotionRepository`.
//!
//! The insert selects its article from `content_items JOIN websites` under
//! the promoter's ownership predicate, so the check and the write are one
//! statement. Zero returned rows means the predicate failed.

use async_trait::async_trait;
use diesel::OptionalExtension;
use diesel::sql_query;
use diesel::sql_types::{Array, Double, Nullable, Text, Timestamptz, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PromotionRepository, PromotionRepositoryError};
use crate::domain::{Budget, ContentId, NewPromotionJob, PromotionId, PromotionJob, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::PromotionJobRow;
use super::pool::{DbPool, PoolError};

/// `$1` article, `$2` promoter, `$3` title, `$4` summary, `$5` tags,
/// `$6` category, `$7` budget, `$8` created_at.
const INSERT_OWNED_JOB_SQL: &str = r#"
INSERT INTO promotions
    (article_id, promoter_id, title, summary, tags, categories, budget, active, created_at)
SELECT c.content_id, $2, $3, $4, $5, $6, $7::numeric, false, $8
FROM content_items c
JOIN websites w ON w.website_id = c.website_id
WHERE c.content_id = $1 AND w.owner_id = $2
RETURNING id,
          article_id,
          promoter_id,
          title,
          summary,
          tags,
          categories,
          budget::float8 AS budget,
          active,
          created_at
"#;

/// Diesel-backed implementation of the promotion repository port.
#[derive(Clone)]
pub struct DieselPromotionRepository {
    pool: DbPool,
}

impl DieselPromotionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PromotionRepositoryError {
    map_basic_pool_error(error, PromotionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PromotionRepositoryError {
    map_basic_diesel_error(
        error,
        "insert promotion job",
        PromotionRepositoryError::query,
        PromotionRepositoryError::connection,
    )
}

fn row_to_job(row: PromotionJobRow) -> Result<PromotionJob, PromotionRepositoryError> {
    let budget = Budget::new(row.budget).map_err(|err| {
        PromotionRepositoryError::query(format!("stored budget of job {}: {err}", row.id))
    })?;
    Ok(PromotionJob {
        id: PromotionId::new(row.id),
        article_id: ContentId::from_uuid(row.article_id),
        promoter_id: UserId::from_uuid(row.promoter_id),
        title: row.title,
        summary: row.summary,
        tags: row.tags,
        category: row.categories,
        budget,
        active: row.active,
        created_at: row.created_at,
    })
}

#[async_trait]
impl PromotionRepository for DieselPromotionRepository {
    async fn insert_promotion_job(
        &self,
        job: &NewPromotionJob,
    ) -> Result<Option<PromotionJob>, PromotionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sql_query(INSERT_OWNED_JOB_SQL)
            .bind::<SqlUuid, _>(job.article_id.as_uuid())
            .bind::<SqlUuid, _>(job.promoter_id.as_uuid())
            .bind::<Text, _>(&job.title)
            .bind::<Text, _>(&job.summary)
            .bind::<Array<Text>, _>(&job.tags)
            .bind::<Nullable<Text>, _>(job.category.as_deref())
            .bind::<Double, _>(job.budget.credits())
            .bind::<Timestamptz, _>(job.created_at)
            .get_result::<PromotionJobRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        if row.is_none() {
            debug!(
                article_id = %job.article_id,
                promoter_id = %job.promoter_id,
                "ownership predicate rejected promotion insert"
            );
        }
        row.map(row_to_job).transpose()
    }
}
