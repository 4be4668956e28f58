//! Reqwest-backed `LoginService` speaking a GoTrue-style password grant.
//!
//! The adapter owns transport details only: the token endpoint, the
//! project `apikey` header, status mapping and decoding the user id. No
//! token issued by the provider is kept; the session cookie is the only
//! credential the dashboard relies on afterwards.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, UserId};

const TOKEN_PATH: &str = "auth/v1/token";
const INVALID_CREDENTIALS: &str = "invalid credentials";

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
}

/// Identity provider client.
pub struct HttpLoginService {
    client: Client,
    token_endpoint: Url,
    api_key: Zeroizing<String>,
}

impl HttpLoginService {
    /// Build a client for the provider rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` cannot host the token endpoint or the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, IdentityClientError> {
        let token_endpoint = token_endpoint(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| IdentityClientError::Client {
                message: err.to_string(),
            })?;
        Ok(Self {
            client,
            token_endpoint,
            api_key: Zeroizing::new(api_key.into()),
        })
    }
}

/// Construction errors for [`HttpLoginService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityClientError {
    #[error("identity URL is invalid: {message}")]
    InvalidUrl { message: String },
    #[error("failed to build identity HTTP client: {message}")]
    Client { message: String },
}

fn token_endpoint(base_url: &str) -> Result<Url, IdentityClientError> {
    let invalid = |message: String| IdentityClientError::InvalidUrl { message };
    let mut base = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid(format!("{base_url} cannot be a base URL")));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let mut endpoint = base
        .join(TOKEN_PATH)
        .map_err(|err| invalid(err.to_string()))?;
    endpoint
        .query_pairs_mut()
        .append_pair("grant_type", "password");
    Ok(endpoint)
}

fn map_status(status: StatusCode) -> Error {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
            Error::unauthorized(INVALID_CREDENTIALS)
        }
        status if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS => {
            Error::service_unavailable(format!("identity provider answered {status}"))
        }
        status => Error::internal(format!("unexpected identity provider status {status}")),
    }
}

fn parse_user_id(body: &[u8]) -> Result<UserId, Error> {
    let decoded: TokenResponse = serde_json::from_slice(body)
        .map_err(|err| Error::internal(format!("identity response is not a token: {err}")))?;
    UserId::new(&decoded.user.id)
        .map_err(|err| Error::internal(format!("identity provider returned bad user id: {err}")))
}

#[async_trait]
impl LoginService for HttpLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let response = self
            .client
            .post(self.token_endpoint.clone())
            .header("apikey", self.api_key.as_str())
            .json(&PasswordGrant {
                email: credentials.email(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "identity provider unreachable");
                Error::service_unavailable(format!("identity provider unreachable: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "identity provider rejected login");
            return Err(map_status(status));
        }
        let body = response.bytes().await.map_err(|err| {
            Error::service_unavailable(format!("identity response interrupted: {err}"))
        })?;
        parse_user_id(&body)
    }
}
