//! Article list with promotion state for one owned website.
//!
//! ```text
//! GET /api/dashboard/articles?websiteId=...
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ArticleSummary, PromotionStatus, WebsiteId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_required_uuid};

const WEBSITE_ID: FieldName = FieldName::new("websiteId");

/// Query string for the article list.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticlesParams {
    #[serde(rename = "websiteId")]
    #[param(required = true)]
    pub website_id: Option<String>,
}

/// One dashboard row.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleRowResponse {
    pub content_id: String,
    pub title: String,
    /// `not_promoted`, `processing`, `active`, `completed` or `inactive`.
    #[schema(example = "processing")]
    pub promotion_status: String,
    pub budget: f64,
    pub spent: f64,
}

fn status_label(status: PromotionStatus) -> &'static str {
    match status {
        PromotionStatus::NotPromoted => "not_promoted",
        PromotionStatus::Processing => "processing",
        PromotionStatus::Active => "active",
        PromotionStatus::Completed => "completed",
        PromotionStatus::Inactive => "inactive",
    }
}

impl From<ArticleSummary> for ArticleRowResponse {
    fn from(row: ArticleSummary) -> Self {
        Self {
            content_id: row.content_id.to_string(),
            title: row.title,
            promotion_status: status_label(row.promotion_status).to_owned(),
            budget: row.budget,
            spent: row.spent,
        }
    }
}

/// List articles of a website owned by the caller.
#[utoipa::path(
    get,
    path = "/api/dashboard/articles",
    params(ArticlesParams),
    responses(
        (status = 200, description = "Article rows", body = [ArticleRowResponse]),
        (status = 400, description = "Missing or invalid websiteId", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Website not owned by caller", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "listArticles",
    security(("SessionCookie" = []))
)]
#[get("/dashboard/articles")]
pub async fn list_articles(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<ArticlesParams>,
) -> ApiResult<web::Json<Vec<ArticleRowResponse>>> {
    let owner = session.require_user_id()?;
    let website_id = WebsiteId::from_uuid(parse_required_uuid(
        params.website_id.as_deref(),
        WEBSITE_ID,
    )?);
    let rows = state.articles.list_articles(website_id, owner).await?;
    Ok(web::Json(rows.into_iter().map(Into::into).collect()))
}
