//! Recently ingested content of one website.
//!
//! ```text
//! GET /api/dashboard/website/{websiteId}
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ContentItem, WebsiteId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_required_uuid};

/// Content item payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContentItemResponse {
    pub content_id: String,
    pub website_id: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub categories: Option<String>,
    pub original_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
}

impl From<ContentItem> for ContentItemResponse {
    fn from(item: ContentItem) -> Self {
        Self {
            content_id: item.content_id.to_string(),
            website_id: item.website_id.to_string(),
            title: item.title,
            description: item.description,
            tags: item.tags,
            categories: item.category,
            original_url: item.original_url,
            image_url: item.image_url,
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

/// Newest content of a website owned by the caller.
///
/// Websites the caller does not own yield an empty list.
#[utoipa::path(
    get,
    path = "/api/dashboard/website/{websiteId}",
    params(("websiteId" = String, Path, description = "Website identifier")),
    responses(
        (status = 200, description = "Up to ten newest items", body = [ContentItemResponse]),
        (status = 400, description = "Invalid websiteId", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "websiteContent",
    security(("SessionCookie" = []))
)]
#[get("/dashboard/website/{website_id}")]
pub async fn website_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ContentItemResponse>>> {
    let owner = session.require_user_id()?;
    let raw = path.into_inner();
    let website_id =
        WebsiteId::from_uuid(parse_required_uuid(Some(&raw), FieldName::new("websiteId"))?);
    let items = state.website_content.recent_content(website_id, owner).await?;
    Ok(web::Json(items.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{InMemoryHarness, json_body, login_cookie};
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_web::test]
    async fn owner_sees_newest_ten() {
        let harness = InMemoryHarness::new();
        let site = harness.owned_website("good.com", "tok-1");
        for index in 0..11 {
            harness.store.add_content(site, &format!("Story {index}"));
        }
        let app = test::init_service(harness.app()).await;
        let cookie = login_cookie(&app).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/dashboard/website/{site}"))
            .cookie(cookie)
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;

        let items = body.as_array().expect("array");
        assert_eq!(items.len(), 10);
        assert_eq!(items[0]["title"], "Story 10");
        assert_eq!(items[0]["website_id"], site.to_string());
    }

    #[actix_web::test]
    async fn foreign_website_is_empty() {
        let harness = InMemoryHarness::new();
        let site = harness.foreign_website("other.com", "tok-2");
        harness.store.add_content(site, "Theirs");
        let app = test::init_service(harness.app()).await;
        let cookie = login_cookie(&app).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/dashboard/website/{site}"))
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn malformed_id_is_rejected() {
        let app = test::init_service(InMemoryHarness::new().app()).await;
        let cookie = login_cookie(&app).await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard/website/not-a-uuid")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
