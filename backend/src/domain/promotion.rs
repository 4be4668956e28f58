//! Promotion jobs and the article status projection built from them.
//!
//! A promotion job is written once, inactive, by the promotion service. An
//! external worker later enriches it, flips `active` and eventually sets a
//! terminal `status`. This crate never updates or deletes a job.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ContentId, UserId};

/// Summary stored on every new job until the worker writes the real one.
pub const PROCESSING_SUMMARY: &str =
    "Your promotion is being processed. Summary and details will appear soon.";

/// Validation errors for promotion inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PromotionValidationError {
    /// The budget was absent or not a number.
    #[error("budget must be a number")]
    BudgetNotNumeric,
    /// The budget was NaN or infinite.
    #[error("budget must be finite")]
    BudgetNotFinite,
    /// The budget was zero or negative.
    #[error("budget must be greater than zero, got {value}")]
    BudgetNotPositive { value: f64 },
}

/// Credits allocated to a promotion.
///
/// ## Invariants
/// - finite and strictly positive.
///
/// # Examples
/// ```
/// use credx_backend::domain::Budget;
///
/// assert_eq!(Budget::new(50.0).map(|b| b.credits()), Ok(50.0));
/// assert!(Budget::new(0.0).is_err());
/// assert!(Budget::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Budget(f64);

impl Budget {
    /// Validate a numeric budget.
    pub fn new(value: f64) -> Result<Self, PromotionValidationError> {
        if !value.is_finite() {
            return Err(PromotionValidationError::BudgetNotFinite);
        }
        if value <= 0.0 {
            return Err(PromotionValidationError::BudgetNotPositive { value });
        }
        Ok(Self(value))
    }

    /// Validate a budget that may have failed numeric parsing upstream.
    pub fn from_input(value: Option<f64>) -> Result<Self, PromotionValidationError> {
        value
            .ok_or(PromotionValidationError::BudgetNotNumeric)
            .and_then(Self::new)
    }

    /// Credit amount.
    pub const fn credits(self) -> f64 {
        self.0
    }
}

/// Database-generated promotion job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PromotionId(i64);

impl PromotionId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Values for a promotion job insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotionJob {
    pub article_id: ContentId,
    pub promoter_id: UserId,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub budget: Budget,
    pub created_at: DateTime<Utc>,
}

/// A persisted promotion job as returned to its creator.
///
/// The embedding column is never part of this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionJob {
    pub id: PromotionId,
    pub article_id: ContentId,
    pub promoter_id: UserId,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub budget: Budget,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl PromotionJob {
    /// Status shown to the dashboard for this job.
    pub fn status(&self) -> PromotionStatus {
        PromotionStatus::from_activation(self.active)
    }
}

/// Promotion status surfaced per article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    /// The article has never been promoted.
    NotPromoted,
    /// Waiting for the worker to enrich and activate the job.
    Processing,
    /// Live and spending budget.
    Active,
    /// Finished after exhausting its budget.
    Completed,
    /// Stopped by the worker or an operator.
    Inactive,
}

impl PromotionStatus {
    /// Map the `active` flag when the worker has not written a status.
    pub const fn from_activation(active: bool) -> Self {
        if active { Self::Active } else { Self::Processing }
    }

    /// Parse a worker-written status value. Unknown values yield `None`.
    pub fn from_worker_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Projection of a job row used for status derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionJobState {
    pub id: PromotionId,
    pub active: Option<bool>,
    pub status: Option<String>,
    pub budget: Option<f64>,
    pub credits_spent: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl PromotionJobState {
    fn derived_status(&self) -> PromotionStatus {
        self.status
            .as_deref()
            .and_then(PromotionStatus::from_worker_value)
            .unwrap_or_else(|| PromotionStatus::from_activation(self.active.unwrap_or(false)))
    }
}

/// Content item together with every job referencing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRecord {
    pub content_id: ContentId,
    pub title: String,
    pub jobs: Vec<PromotionJobState>,
}

/// One dashboard row: an article with its surfaced promotion state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSummary {
    pub content_id: ContentId,
    pub title: String,
    pub promotion_status: PromotionStatus,
    pub budget: f64,
    pub spent: f64,
}

impl ArticleSummary {
    /// Derive the row for an article.
    ///
    /// The most recently created job wins; equal timestamps fall back to the
    /// higher id. A worker-written status takes precedence over `active`.
    /// Absent numbers read as zero.
    ///
    /// # Examples
    /// ```
    /// use credx_backend::domain::{ArticleRecord, ArticleSummary, ContentId, PromotionStatus};
    /// use uuid::Uuid;
    ///
    /// let record = ArticleRecord {
    ///     content_id: ContentId::from_uuid(Uuid::nil()),
    ///     title: "Intro".into(),
    ///     jobs: Vec::new(),
    /// };
    /// let row = ArticleSummary::derive(record);
    /// assert_eq!(row.promotion_status, PromotionStatus::NotPromoted);
    /// assert_eq!(row.budget, 0.0);
    /// ```
    pub fn derive(record: ArticleRecord) -> Self {
        let ArticleRecord {
            content_id,
            title,
            jobs,
        } = record;

        let surfaced = jobs
            .iter()
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        match surfaced {
            None => Self {
                content_id,
                title,
                promotion_status: PromotionStatus::NotPromoted,
                budget: 0.0,
                spent: 0.0,
            },
            Some(job) => Self {
                content_id,
                title,
                promotion_status: job.derived_status(),
                budget: job.budget.unwrap_or(0.0),
                spent: job.credits_spent.unwrap_or(0.0),
            },
        }
    }
}
