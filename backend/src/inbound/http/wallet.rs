//! Wallet balance and recent transactions of the signed-in account.
//!
//! ```text
//! GET /api/dashboard/wallet
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Transaction, TransactionType, WalletOverview};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Wallet overview payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct WalletResponse {
    /// Exact decimal balance as stored.
    #[schema(example = "123.4500")]
    pub balance: String,
    pub transactions: Vec<TransactionResponse>,
}

/// One ledger entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub transaction_id: String,
    pub created_at: String,
    /// `impression_fee`, `platform_fee`, `viewer_bonus` or `host_pay`.
    pub transaction_type: String,
    #[schema(example = "-0.0100")]
    pub amount: String,
    pub content_id: Option<String>,
    pub from_wallet_id: Option<String>,
    pub to_wallet_id: Option<String>,
}

fn type_label(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::ImpressionFee => "impression_fee",
        TransactionType::PlatformFee => "platform_fee",
        TransactionType::ViewerBonus => "viewer_bonus",
        TransactionType::HostPay => "host_pay",
    }
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            transaction_id: tx.transaction_id.to_string(),
            created_at: tx.created_at.to_rfc3339(),
            transaction_type: type_label(tx.transaction_type).to_owned(),
            amount: tx.amount,
            content_id: tx.content_id.map(|id| id.to_string()),
            from_wallet_id: tx.from_wallet_id.map(|id| id.to_string()),
            to_wallet_id: tx.to_wallet_id.map(|id| id.to_string()),
        }
    }
}

impl From<WalletOverview> for WalletResponse {
    fn from(overview: WalletOverview) -> Self {
        Self {
            balance: overview.balance,
            transactions: overview.transactions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Balance and newest transactions of the caller's wallet.
#[utoipa::path(
    get,
    path = "/api/dashboard/wallet",
    responses(
        (status = 200, description = "Wallet overview", body = WalletResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getWallet",
    security(("SessionCookie" = []))
)]
#[get("/dashboard/wallet")]
pub async fn get_wallet(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<WalletResponse>> {
    let owner = session.require_user_id()?;
    let overview = state.wallet.wallet(owner).await?;
    Ok(web::Json(overview.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentId;
    use crate::inbound::http::test_utils::{InMemoryHarness, json_body, login_cookie};
    use crate::test_support::fixture_timestamp;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use uuid::Uuid;

    #[actix_web::test]
    async fn account_without_wallet_gets_zero() {
        let app = test::init_service(InMemoryHarness::new().app()).await;
        let cookie = login_cookie(&app).await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard/wallet")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["balance"], "0");
        assert_eq!(body["transactions"].as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn transactions_keep_exact_amounts() {
        let harness = InMemoryHarness::new();
        let wallet_id = Uuid::new_v4();
        let article = ContentId::from_uuid(Uuid::new_v4());
        harness.store.add_wallet(
            harness.owner,
            "99.9900",
            vec![Transaction {
                transaction_id: Uuid::new_v4(),
                created_at: fixture_timestamp(),
                transaction_type: TransactionType::HostPay,
                amount: "0.0100".to_owned(),
                content_id: Some(article),
                from_wallet_id: None,
                to_wallet_id: Some(wallet_id),
            }],
        );
        let app = test::init_service(harness.app()).await;
        let cookie = login_cookie(&app).await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard/wallet")
            .cookie(cookie)
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;

        assert_eq!(body["balance"], "99.9900");
        let tx = &body["transactions"][0];
        assert_eq!(tx["transaction_type"], "host_pay");
        assert_eq!(tx["amount"], "0.0100");
        assert_eq!(tx["content_id"], article.to_string());
        assert_eq!(tx["to_wallet_id"], wallet_id.to_string());
        assert!(tx["from_wallet_id"].is_null());
    }

    #[actix_web::test]
    async fn anonymous_caller_is_unauthorised() {
        let app = test::init_service(InMemoryHarness::new().app()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/dashboard/wallet")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
