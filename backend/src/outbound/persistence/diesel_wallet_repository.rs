//! PostgreSQL-backed `WalletRepository`.
//!
//! Balances and amounts are rendered by PostgreSQL (`numeric::text`) and
//! passed through untouched.

use async_trait::async_trait;
use diesel::OptionalExtension;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{WalletRepository, WalletRepositoryError};
use crate::domain::{ContentId, Transaction, TransactionType, UserId, WalletOverview};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{TransactionRow, WalletRow};
use super::pool::{DbPool, PoolError};

const WALLET_SQL: &str = r#"
SELECT wallet_id, balance::text AS balance
FROM wallets
WHERE owner_id = $1
"#;

const TRANSACTIONS_SQL: &str = r#"
SELECT transaction_id,
       created_at,
       transaction_type,
       amount::text AS amount,
       content_id,
       from_wallet_id,
       to_wallet_id
FROM transactions
WHERE from_wallet_id = $1 OR to_wallet_id = $1
ORDER BY created_at DESC, transaction_id DESC
LIMIT $2
"#;

/// Diesel-backed implementation of the wallet repository port.
#[derive(Clone)]
pub struct DieselWalletRepository {
    pool: DbPool,
}

impl DieselWalletRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> WalletRepositoryError {
    map_basic_pool_error(error, WalletRepositoryError::connection)
}

fn diesel_error(operation: &'static str) -> impl FnOnce(diesel::result::Error) -> WalletRepositoryError {
    move |error| {
        map_basic_diesel_error(
            error,
            operation,
            WalletRepositoryError::query,
            WalletRepositoryError::connection,
        )
    }
}

fn row_to_transaction(row: TransactionRow) -> Result<Transaction, WalletRepositoryError> {
    let transaction_type = TransactionType::parse(&row.transaction_type).ok_or_else(|| {
        warn!(
            transaction_id = %row.transaction_id,
            value = row.transaction_type.as_str(),
            "unknown transaction type"
        );
        WalletRepositoryError::query(format!(
            "unknown transaction type on {}",
            row.transaction_id
        ))
    })?;
    Ok(Transaction {
        transaction_id: row.transaction_id,
        created_at: row.created_at,
        transaction_type,
        amount: row.amount,
        content_id: row.content_id.map(ContentId::from_uuid),
        from_wallet_id: row.from_wallet_id,
        to_wallet_id: row.to_wallet_id,
    })
}

#[async_trait]
impl WalletRepository for DieselWalletRepository {
    async fn wallet_overview(
        &self,
        owner: &UserId,
        limit: i64,
    ) -> Result<Option<WalletOverview>, WalletRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(wallet) = sql_query(WALLET_SQL)
            .bind::<SqlUuid, _>(owner.as_uuid())
            .get_result::<WalletRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error("load wallet"))?
        else {
            return Ok(None);
        };

        let rows = sql_query(TRANSACTIONS_SQL)
            .bind::<SqlUuid, _>(wallet.wallet_id)
            .bind::<BigInt, _>(limit)
            .load::<TransactionRow>(&mut conn)
            .await
            .map_err(diesel_error("load transactions"))?;
        let transactions = rows
            .into_iter()
            .map(row_to_transaction)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(WalletOverview {
            balance: wallet.balance,
            transactions,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(kind: &str) -> TransactionRow {
        TransactionRow {
            transaction_id: Uuid::new_v4(),
            created_at: Utc::now(),
            transaction_type: kind.to_owned(),
            amount: "-0.0100".to_owned(),
            content_id: None,
            from_wallet_id: Some(Uuid::new_v4()),
            to_wallet_id: None,
        }
    }

    #[rstest]
    #[case("impression_fee", TransactionType::ImpressionFee)]
    #[case("host_pay", TransactionType::HostPay)]
    fn known_types_decode(#[case] raw: &str, #[case] expected: TransactionType) {
        let tx = row_to_transaction(row(raw)).expect("known type");
        assert_eq!(tx.transaction_type, expected);
        assert_eq!(tx.amount, "-0.0100");
    }

    #[rstest]
    fn unknown_type_is_a_query_error() {
        let err = row_to_transaction(row("refund")).expect_err("unknown type");
        assert!(matches!(err, WalletRepositoryError::Query { .. }));
    }
}
