//! Wallet balance and transaction history for the signed-in account.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{WalletQuery, WalletRepository, WalletRepositoryError};
use crate::domain::{Error, TRANSACTION_HISTORY_LIMIT, UserId, WalletOverview};

fn map_wallet_error(error: WalletRepositoryError) -> Error {
    match error {
        WalletRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("wallet repository unavailable: {message}"))
        }
        WalletRepositoryError::Query { message } => {
            Error::internal(format!("wallet repository error: {message}"))
        }
    }
}

/// Read-only wallet service.
#[derive(Clone)]
pub struct WalletService<R> {
    repo: Arc<R>,
}

impl<R> WalletService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> WalletQuery for WalletService<R>
where
    R: WalletRepository,
{
    async fn wallet(&self, owner: UserId) -> Result<WalletOverview, Error> {
        let overview = self
            .repo
            .wallet_overview(&owner, TRANSACTION_HISTORY_LIMIT)
            .await
            .map_err(map_wallet_error)?;
        Ok(overview.unwrap_or_else(WalletOverview::empty))
    }
}
