//! Driving port for the wallet page.

use async_trait::async_trait;

use crate::domain::{Error, UserId, WalletOverview};

/// Wallet balance and history for the authenticated account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletQuery: Send + Sync {
    /// Accounts without a wallet report a zero balance and no history.
    async fn wallet(&self, owner: UserId) -> Result<WalletOverview, Error>;
}
