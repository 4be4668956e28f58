//! Port for reading wallets and their ledger.

use async_trait::async_trait;

use crate::domain::{UserId, WalletOverview};

use super::define_port_error;

define_port_error! {
    /// Errors raised by wallet repository adapters.
    pub enum WalletRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "wallet repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "wallet repository query failed: {message}",
    }
}

/// Wallet reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Balance and the newest `limit` transactions of the owner's wallet, or
    /// `None` when the owner has no wallet.
    async fn wallet_overview(
        &self,
        owner: &UserId,
        limit: i64,
    ) -> Result<Option<WalletOverview>, WalletRepositoryError>;
}

/// Fixture implementation without wallets.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWalletRepository;

#[async_trait]
impl WalletRepository for FixtureWalletRepository {
    async fn wallet_overview(
        &self,
        _owner: &UserId,
        _limit: i64,
    ) -> Result<Option<WalletOverview>, WalletRepositoryError> {
        Ok(None)
    }
}
