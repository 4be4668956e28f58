//! Dashboard login.
//!
//! ```text
//! POST /api/auth/login {"email":"owner@example.com","password":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "owner@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyEmail => ("email", "empty_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Authenticate against the identity provider and start a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.sign_in(&user_id)?;
    info!(%user_id, "dashboard login");
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{InMemoryHarness, json_body};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    fn login_request(email: &str, password: &str) -> actix_http::Request {
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(LoginRequest {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .to_request()
    }

    #[actix_web::test]
    async fn valid_credentials_set_session_cookie() {
        let app = test::init_service(InMemoryHarness::new().app()).await;

        let res = test::call_service(&app, login_request("admin", "password")).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.response().cookies().any(|c| c.name() == "session"));
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let app = test::init_service(InMemoryHarness::new().app()).await;

        let res = test::call_service(&app, login_request("admin", "nope")).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("   ", "password", "email", "empty_email")]
    #[case("admin", "", "password", "empty_password")]
    #[actix_web::test]
    async fn blank_fields_are_rejected(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = test::init_service(InMemoryHarness::new().app()).await;

        let res = test::call_service(&app, login_request(email, password)).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn malformed_json_uses_error_envelope() {
        let app = test::init_service(InMemoryHarness::new().app()).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        assert_eq!(body["details"]["code"], "invalid_body");
    }
}
