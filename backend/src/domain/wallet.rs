//! Credit wallets and their transaction history.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::ContentId;

/// Maximum number of transactions returned for a wallet.
pub const TRANSACTION_HISTORY_LIMIT: i64 = 100;

/// Kind of credit movement recorded by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    ImpressionFee,
    PlatformFee,
    ViewerBonus,
    HostPay,
}

impl TransactionType {
    /// Parse the stored column value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "impression_fee" => Some(Self::ImpressionFee),
            "platform_fee" => Some(Self::PlatformFee),
            "viewer_bonus" => Some(Self::ViewerBonus),
            "host_pay" => Some(Self::HostPay),
            _ => None,
        }
    }
}

/// A single ledger entry.
///
/// `amount` keeps the exact decimal rendering of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub transaction_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub transaction_type: TransactionType,
    pub amount: String,
    pub content_id: Option<ContentId>,
    pub from_wallet_id: Option<Uuid>,
    pub to_wallet_id: Option<Uuid>,
}

/// Balance and recent history of one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletOverview {
    pub balance: String,
    pub transactions: Vec<Transaction>,
}

impl WalletOverview {
    /// Overview reported for accounts without a wallet row.
    pub fn empty() -> Self {
        Self {
            balance: "0".to_owned(),
            transactions: Vec::new(),
        }
    }
}
