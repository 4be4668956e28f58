//! PostgreSQL-backed `WidgetRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Uuid as SqlUuid;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{WidgetRepository, WidgetRepositoryError};
use crate::domain::{Recommendation, VerifiedWebsite, WebsiteId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::RecommendationRow;
use super::pool::{DbPool, PoolError};
use super::schema::websites;

/// Newest active job of the website that still has budget left.
const RECOMMENDATION_SQL: &str = r#"
SELECT p.title, p.summary, c.original_url, c.image_url
FROM promotions p
JOIN content_items c ON c.content_id = p.article_id
WHERE c.website_id = $1
  AND p.active
  AND p.budget > COALESCE(p.credits_spent, 0)
ORDER BY p.created_at DESC, p.id DESC
LIMIT 1
"#;

/// Diesel-backed implementation of the widget repository port.
#[derive(Clone)]
pub struct DieselWidgetRepository {
    pool: DbPool,
}

impl DieselWidgetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> WidgetRepositoryError {
    map_basic_pool_error(error, WidgetRepositoryError::connection)
}

fn diesel_error(operation: &'static str) -> impl FnOnce(diesel::result::Error) -> WidgetRepositoryError {
    move |error| {
        map_basic_diesel_error(
            error,
            operation,
            WidgetRepositoryError::query,
            WidgetRepositoryError::connection,
        )
    }
}

#[async_trait]
impl WidgetRepository for DieselWidgetRepository {
    async fn find_website_by_token(
        &self,
        token: &str,
    ) -> Result<Option<VerifiedWebsite>, WidgetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = websites::table
            .filter(websites::verification_token.eq(token))
            .select((websites::website_id, websites::domain_name))
            .first::<(Uuid, String)>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error("find website by token"))?;

        Ok(row.map(|(website_id, domain_name)| VerifiedWebsite {
            website_id: WebsiteId::from_uuid(website_id),
            domain_name,
        }))
    }

    async fn find_recommendation(
        &self,
        website_id: &WebsiteId,
    ) -> Result<Option<Recommendation>, WidgetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sql_query(RECOMMENDATION_SQL)
            .bind::<SqlUuid, _>(website_id.as_uuid())
            .get_result::<RecommendationRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error("find recommendation"))?;

        Ok(row.map(|row| {
            Recommendation::new(row.title, Some(row.summary), row.original_url, row.image_url)
        }))
    }
}
