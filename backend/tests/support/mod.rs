//! Embedded PostgreSQL helpers shared by the Diesel adapter suites.
//!
//! Each test gets its own freshly migrated database on a cluster shared by
//! the whole test binary. Seeding goes through the synchronous `postgres`
//! client so fixtures never depend on the adapters under test.

use std::sync::OnceLock;

use credx_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::ClusterHandle;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

static CLUSTER: OnceLock<Result<&'static ClusterHandle, String>> = OnceLock::new();

/// Render a `postgres` error with its SQLSTATE and detail.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    CLUSTER
        .get_or_init(|| {
            pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
                .map_err(|err| err.to_string())
        })
        .clone()
}

/// A migrated database with a pool and a runtime to drive the adapters.
pub struct TestDatabase {
    pub runtime: Runtime,
    pub url: String,
    pub pool: DbPool,
}

impl TestDatabase {
    /// Create and migrate a uniquely named database.
    pub fn provision() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster()?;
        let name = format!("credx_test_{}", Uuid::new_v4().simple());
        cluster
            .create_database(name.as_str())
            .map_err(|err| format!("create database: {err:?}"))?;
        let url = cluster.connection().database_url(&name);

        runtime
            .block_on(run_pending_migrations(&url))
            .map_err(|err| err.to_string())?;
        let config = PoolConfig::new(url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self { runtime, url, pool })
    }

    /// Synchronous client for seeding and inspecting rows.
    pub fn client(&self) -> Client {
        Client::connect(&self.url, NoTls)
            .unwrap_or_else(|err| panic!("connect seed client: {}", format_postgres_error(&err)))
    }

    /// Insert a website and return its id.
    pub fn seed_website(&self, owner: Uuid, domain: &str, token: &str) -> Uuid {
        let row = self
            .client()
            .query_one(
                "INSERT INTO websites (owner_id, domain_name, verification_token) \
                 VALUES ($1, $2, $3) RETURNING website_id",
                &[&owner, &domain, &token],
            )
            .unwrap_or_else(|err| panic!("seed website: {}", format_postgres_error(&err)));
        row.get(0)
    }

    /// Insert a content item created `minutes` after a fixed instant.
    pub fn seed_content(&self, website_id: Uuid, title: &str, minutes: i32) -> Uuid {
        let description = format!("About {title}");
        let url = format!("https://example.com/{}", title.to_lowercase().replace(' ', "-"));
        let row = self
            .client()
            .query_one(
                "INSERT INTO content_items \
                 (website_id, title, description, tags, category, original_url, created_at) \
                 VALUES ($1, $2, $3, ARRAY['news'], 'technology', $4, \
                 timestamptz '2026-03-01 09:00:00+00' + make_interval(mins => $5)) \
                 RETURNING content_id",
                &[&website_id, &title, &description, &url, &minutes],
            )
            .unwrap_or_else(|err| panic!("seed content: {}", format_postgres_error(&err)));
        row.get(0)
    }

    /// Number of promotion rows for `article_id`.
    pub fn promotion_count(&self, article_id: Uuid) -> i64 {
        self.client()
            .query_one(
                "SELECT count(*) FROM promotions WHERE article_id = $1",
                &[&article_id],
            )
            .unwrap_or_else(|err| panic!("count promotions: {}", format_postgres_error(&err)))
            .get(0)
    }

    /// Insert a promotion job as the enrichment worker would leave it.
    pub fn seed_promotion(
        &self,
        article_id: Uuid,
        promoter_id: Uuid,
        minutes: i32,
        active: bool,
        status: Option<&str>,
    ) -> i64 {
        self.client()
            .query_one(
                "INSERT INTO promotions \
                 (article_id, promoter_id, title, summary, budget, credits_spent, active, status, \
                  created_at) \
                 VALUES ($1, $2, 'Seeded', 'Seeded summary', 40, 2.5, $3, $4, \
                 timestamptz '2026-03-01 09:00:00+00' + make_interval(mins => $5)) \
                 RETURNING id",
                &[&article_id, &promoter_id, &active, &status, &minutes],
            )
            .unwrap_or_else(|err| panic!("seed promotion: {}", format_postgres_error(&err)))
            .get(0)
    }

    /// Insert a wallet and return its id.
    pub fn seed_wallet(&self, owner: Uuid, balance: &str) -> Uuid {
        self.client()
            .query_one(
                "INSERT INTO wallets (owner_id, balance) VALUES ($1, $2::text::numeric) \
                 RETURNING wallet_id",
                &[&owner, &balance],
            )
            .unwrap_or_else(|err| panic!("seed wallet: {}", format_postgres_error(&err)))
            .get(0)
    }

    /// Insert a ledger row created `minutes` after a fixed instant.
    pub fn seed_transaction(
        &self,
        kind: &str,
        amount: &str,
        from_wallet: Option<Uuid>,
        to_wallet: Option<Uuid>,
        minutes: i32,
    ) -> Uuid {
        self.client()
            .query_one(
                "INSERT INTO transactions \
                 (transaction_type, amount, from_wallet_id, to_wallet_id, created_at) \
                 VALUES ($1, $2::text::numeric, $3, $4, \
                 timestamptz '2026-03-01 09:00:00+00' + make_interval(mins => $5)) \
                 RETURNING transaction_id",
                &[&kind, &amount, &from_wallet, &to_wallet, &minutes],
            )
            .unwrap_or_else(|err| panic!("seed transaction: {}", format_postgres_error(&err)))
            .get(0)
    }
}
