//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Rows read through `sql_query` derive
//! `QueryableByName` and name their SQL types explicitly; numeric columns
//! are cast to `float8` or `text` in the statement itself.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Array, BigInt, Bool, Double, Nullable, Text, Timestamptz, Uuid as SqlUuid};
use uuid::Uuid;

use super::schema::content_items;

/// Content item read through the query DSL.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentItemRow {
    pub content_id: Uuid,
    pub website_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub original_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Ownership-checked snapshot columns.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct ContentSnapshotRow {
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
}

/// Article heading used by the dashboard list.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct ArticleHeadingRow {
    pub content_id: Uuid,
    pub title: String,
}

/// Promotion row returned by the conditional insert.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct PromotionJobRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = SqlUuid)]
    pub article_id: Uuid,
    #[diesel(sql_type = SqlUuid)]
    pub promoter_id: Uuid,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub summary: String,
    #[diesel(sql_type = Array<Text>)]
    pub tags: Vec<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub categories: Option<String>,
    #[diesel(sql_type = Double)]
    pub budget: f64,
    #[diesel(sql_type = Bool)]
    pub active: bool,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Status-relevant projection of a promotion row.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct PromotionStateRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = SqlUuid)]
    pub article_id: Uuid,
    #[diesel(sql_type = Nullable<Bool>)]
    pub active: Option<bool>,
    #[diesel(sql_type = Nullable<Text>)]
    pub status: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub budget: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub credits_spent: Option<f64>,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct WalletRow {
    #[diesel(sql_type = SqlUuid)]
    pub wallet_id: Uuid,
    /// `numeric::text`, kept verbatim.
    #[diesel(sql_type = Text)]
    pub balance: String,
}

#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct TransactionRow {
    #[diesel(sql_type = SqlUuid)]
    pub transaction_id: Uuid,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
    #[diesel(sql_type = Text)]
    pub transaction_type: String,
    #[diesel(sql_type = Text)]
    pub amount: String,
    #[diesel(sql_type = Nullable<SqlUuid>)]
    pub content_id: Option<Uuid>,
    #[diesel(sql_type = Nullable<SqlUuid>)]
    pub from_wallet_id: Option<Uuid>,
    #[diesel(sql_type = Nullable<SqlUuid>)]
    pub to_wallet_id: Option<Uuid>,
}

/// Columns the widget renders for one promotion.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct RecommendationRow {
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub summary: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub original_url: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub image_url: Option<String>,
}
