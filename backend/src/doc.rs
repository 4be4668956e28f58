//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the
//! handler DTO schemas, the domain error wrappers and the session cookie
//! security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for client generation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::articles::ArticleRowResponse;
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::promotions::{CreatePromotionBody, PromotionJobResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::wallet::{TransactionResponse, WalletResponse};
use crate::inbound::http::website::ContentItemResponse;
use crate::inbound::http::widget::{RecommendationResponse, WidgetBody};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CredX dashboard API",
        description = "Owner dashboard for content promotion and the public recommendation widget."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::promotions::create_promotion,
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::wallet::get_wallet,
        crate::inbound::http::website::website_content,
        crate::inbound::http::widget::recommend,
        crate::inbound::http::widget::preflight,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        CreatePromotionBody,
        PromotionJobResponse,
        ArticleRowResponse,
        WalletResponse,
        TransactionResponse,
        ContentItemResponse,
        WidgetBody,
        RecommendationResponse,
    )),
    tags(
        (name = "auth", description = "Session login"),
        (name = "dashboard", description = "Owner dashboard, session required"),
        (name = "widget", description = "Public widget, gated by verification token and origin"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn schema_fields(schema: &RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/dashboard/promotions",
            "/api/dashboard/articles",
            "/api/dashboard/wallet",
            "/api/dashboard/website/{websiteId}",
            "/api/widget",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = schema_fields(schemas.get(ERROR_SCHEMA_NAME).expect("Error schema"));

        for field in ["code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[test]
    fn widget_body_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = schema_fields(schemas.get("WidgetBody").expect("WidgetBody schema"));

        assert!(fields.iter().any(|f| f == "verificationToken"));
        assert!(fields.iter().any(|f| f == "userId"));
    }
}
