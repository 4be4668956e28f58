//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use credx_backend::domain::OriginPolicy;
use credx_backend::inbound::http::session_config::SessionSettings;
use credx_backend::outbound::persistence::DbPool;
use credx_backend::settings::IdentitySettings;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl_hours: i64,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) origin_policy: OriginPolicy,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) identity: Option<IdentitySettings>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    ///
    /// The widget origin policy starts permissive; call
    /// [`ServerConfig::with_origin_policy`] for production.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl_hours,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            session_ttl_hours: ttl_hours,
            bind_addr,
            origin_policy: OriginPolicy::Permissive,
            db_pool: None,
            identity: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    ///
    /// Without one the server answers from fixture repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Authenticate logins against an identity provider instead of the
    /// development account.
    #[must_use]
    pub fn with_identity(mut self, identity: IdentitySettings) -> Self {
        self.identity = Some(identity);
        self
    }

    #[must_use]
    pub fn with_origin_policy(mut self, policy: OriginPolicy) -> Self {
        self.origin_policy = policy;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionSettings {
        SessionSettings {
            key: Key::generate(),
            cookie_secure: true,
            same_site: SameSite::Strict,
            ttl_hours: 2,
        }
    }

    #[test]
    fn defaults_to_fixtures_and_permissive_policy() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("literal addr");
        let config = ServerConfig::new(session(), addr);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.origin_policy, OriginPolicy::Permissive);
        assert_eq!(config.session_ttl_hours, 2);
        assert!(config.db_pool.is_none());
        assert!(config.identity.is_none());
    }

    #[test]
    fn origin_policy_can_be_enforced() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("literal addr");
        let config = ServerConfig::new(session(), addr)
            .with_origin_policy(OriginPolicy::for_environment(true));

        assert_eq!(config.origin_policy, OriginPolicy::Enforce);
    }
}
