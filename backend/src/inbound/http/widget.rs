//! Public recommendation widget embedded on third-party pages.
//!
//! ```text
//! POST    /api/widget {"verificationToken":"...","userId":"visitor-1"}
//! OPTIONS /api/widget
//! ```
//!
//! Every response, including errors, echoes the request `Origin` so the
//! browser lets the embedding page read it. Whether that origin is allowed
//! to receive recommendations is decided by the domain policy.

use actix_web::http::header::{self, HeaderMap, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError, options, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, Recommendation, WidgetRequest, WidgetValidationError};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_body_error, missing_field_error};

const PREFLIGHT_METHODS: &str = "POST, OPTIONS";
const PREFLIGHT_HEADERS: &str = "Content-Type";
const PREFLIGHT_MAX_AGE_SECS: &str = "86400";

/// Widget request payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WidgetBody {
    #[serde(default)]
    pub verification_token: Option<String>,
    /// Visitor identifier; strings and numbers are accepted.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "visitor-42")]
    pub user_id: Option<Value>,
}

fn viewer_text(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Recommendation shown inside the widget.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationResponse {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            title: rec.title,
            description: rec.description,
            url: rec.url,
            image: rec.image,
        }
    }
}

fn map_validation_error(err: WidgetValidationError) -> Error {
    match err {
        WidgetValidationError::MissingToken => {
            missing_field_error(FieldName::new("verificationToken"))
        }
        WidgetValidationError::MissingViewer => missing_field_error(FieldName::new("userId")),
        WidgetValidationError::MissingOrigin => Error::invalid_request(err.to_string()),
    }
}

/// Echo `origin` on the response; nothing is added when it is absent.
fn allow_origin(mut response: HttpResponse, origin: Option<HeaderValue>) -> HttpResponse {
    if let Some(origin) = origin {
        let headers: &mut HeaderMap = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    }
    response
}

async fn resolve(
    state: &HttpState,
    origin: Option<&str>,
    body: &[u8],
) -> Result<Option<Recommendation>, Error> {
    let payload: WidgetBody = serde_json::from_slice(body).map_err(invalid_body_error)?;
    let viewer = viewer_text(payload.user_id.as_ref());
    let request = WidgetRequest::try_from_parts(
        payload.verification_token.as_deref(),
        viewer.as_deref(),
        origin,
    )
    .map_err(map_validation_error)?;
    state.widget.recommend(request).await
}

/// Serve one promoted recommendation for the verified website.
#[utoipa::path(
    post,
    path = "/api/widget",
    request_body = WidgetBody,
    params(("Origin" = String, Header, description = "Embedding page origin")),
    responses(
        (status = 200, description = "Recommendation", body = RecommendationResponse),
        (status = 204, description = "Nothing to promote"),
        (status = 400, description = "Missing token, userId or Origin", body = ErrorSchema),
        (status = 403, description = "Invalid token or origin", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["widget"],
    operation_id = "widgetRecommendation"
)]
#[post("/widget")]
pub async fn recommend(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let origin_header = req.headers().get(header::ORIGIN).cloned();
    let origin = origin_header
        .as_ref()
        .and_then(|value| value.to_str().ok());

    let response = match resolve(&state, origin, &body).await {
        Ok(Some(rec)) => HttpResponse::Ok().json(RecommendationResponse::from(rec)),
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(err) => err.error_response(),
    };
    allow_origin(response, origin_header)
}

/// CORS preflight for the widget endpoint.
#[utoipa::path(
    options,
    path = "/api/widget",
    responses((status = 204, description = "Preflight accepted")),
    tags = ["widget"],
    operation_id = "widgetPreflight"
)]
#[options("/widget")]
pub async fn preflight(req: HttpRequest) -> HttpResponse {
    let response = HttpResponse::NoContent()
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, PREFLIGHT_METHODS))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, PREFLIGHT_HEADERS))
        .insert_header((header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE_SECS))
        .finish();
    allow_origin(response, req.headers().get(header::ORIGIN).cloned())
}
