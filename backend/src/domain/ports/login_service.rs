//! Driving port for login against the identity provider.
//!
//! Inbound adapters call it to turn credentials into an account id without
//! knowing whether a real identity provider or a fixture answers.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Account id issued by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Local authenticator used when no identity provider is configured.
///
/// `admin` / `password` authenticates and yields [`FIXTURE_LOGIN_USER_ID`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.email() == "admin" && credentials.password() == "password" {
            UserId::new(FIXTURE_LOGIN_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
