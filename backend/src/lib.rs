//! CredX dashboard backend library.
//!
//! Layout follows a ports-and-adapters split:
//! - [`domain`]: types, ports and services enforcing ownership.
//! - [`inbound`]: the Actix HTTP adapter (dashboard and widget).
//! - [`outbound`]: PostgreSQL persistence and the identity provider client.
//! - [`middleware`]: request tracing shared by every route.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
