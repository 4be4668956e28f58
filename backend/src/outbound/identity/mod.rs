//! Identity provider adapters.

mod http_login_service;

pub use http_login_service::{HttpLoginService, IdentityClientError};
