//! Promotion creation for the signed-in owner.
//!
//! ```text
//! POST /api/dashboard/promotions {"content_id":"...","budget":50,"title":"Optional"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::PromotionJob;
use crate::domain::ports::CreatePromotionRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload. The promoter is always the session user.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreatePromotionBody {
    #[serde(default)]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub content_id: Option<String>,
    /// Positive number of credits; must be a JSON number.
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 50)]
    pub budget: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Numeric reading of a JSON budget; anything but a JSON number is `None`.
fn budget_value(raw: Option<&Value>) -> Option<f64> {
    raw?.as_f64()
}

/// Created promotion job.
#[derive(Debug, Serialize, ToSchema)]
pub struct PromotionJobResponse {
    pub id: i64,
    pub article_id: String,
    pub promoter_id: String,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub categories: Option<String>,
    pub budget: f64,
    pub active: bool,
    pub created_at: String,
}

impl From<PromotionJob> for PromotionJobResponse {
    fn from(job: PromotionJob) -> Self {
        Self {
            id: job.id.get(),
            article_id: job.article_id.to_string(),
            promoter_id: job.promoter_id.to_string(),
            title: job.title,
            summary: job.summary,
            tags: job.tags,
            categories: job.category,
            budget: job.budget.credits(),
            active: job.active,
            created_at: job.created_at.to_rfc3339(),
        }
    }
}

/// Queue a promotion job for one of the caller's articles.
#[utoipa::path(
    post,
    path = "/api/dashboard/promotions",
    request_body = CreatePromotionBody,
    responses(
        (status = 201, description = "Promotion job created", body = PromotionJobResponse),
        (status = 400, description = "Invalid budget or content id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Content not owned by caller", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "createPromotion",
    security(("SessionCookie" = []))
)]
#[post("/dashboard/promotions")]
pub async fn create_promotion(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePromotionBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = payload.into_inner();
    let request = CreatePromotionRequest {
        user_id,
        content_id: body.content_id.unwrap_or_default(),
        budget: budget_value(body.budget.as_ref()),
        title: body.title,
    };
    let job = state.promotions.create_promotion(request).await?;
    Ok(HttpResponse::Created().json(PromotionJobResponse::from(job)))
}
