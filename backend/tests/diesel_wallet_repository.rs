//! Diesel wallet and widget adapters against embedded PostgreSQL.

use credx_backend::domain::ports::{WalletRepository, WidgetRepository};
use credx_backend::domain::{TransactionType, UserId, WebsiteId};
use credx_backend::outbound::persistence::{DieselWalletRepository, DieselWidgetRepository};
use rstest::{fixture, rstest};
use uuid::Uuid;

mod support;

use support::{TestDatabase, handle_cluster_setup_failure};

#[fixture]
fn database() -> Option<TestDatabase> {
    match TestDatabase::provision() {
        Ok(db) => Some(db),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn wallet_history_only_touches_the_owner(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: wallet_history_only_touches_the_owner skipped");
        return;
    };
    let owner = Uuid::new_v4();
    let mine = db.seed_wallet(owner, "12.50");
    let theirs = db.seed_wallet(Uuid::new_v4(), "3");
    let outgoing = db.seed_transaction("impression_fee", "-0.0100", Some(mine), Some(theirs), 1);
    let incoming = db.seed_transaction("host_pay", "0.0070", Some(theirs), Some(mine), 2);
    db.seed_transaction("viewer_bonus", "0.0020", Some(theirs), None, 3);
    let repository = DieselWalletRepository::new(db.pool.clone());

    let overview = db
        .runtime
        .block_on(async {
            repository
                .wallet_overview(&UserId::from_uuid(owner), 50)
                .await
        })
        .expect("load wallet")
        .expect("wallet exists");

    assert_eq!(overview.balance, "12.50");
    let ids: Vec<Uuid> = overview
        .transactions
        .iter()
        .map(|tx| tx.transaction_id)
        .collect();
    assert_eq!(ids, vec![incoming, outgoing]);
    assert_eq!(overview.transactions[0].transaction_type, TransactionType::HostPay);
    assert_eq!(overview.transactions[0].amount, "0.0070");
    assert_eq!(overview.transactions[1].amount, "-0.0100");
}

#[rstest]
fn wallet_history_is_capped_newest_first(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: wallet_history_is_capped_newest_first skipped");
        return;
    };
    let owner = Uuid::new_v4();
    let wallet = db.seed_wallet(owner, "0");
    let ids: Vec<Uuid> = (0..5)
        .map(|minute| db.seed_transaction("platform_fee", "-1", Some(wallet), None, minute))
        .collect();
    let repository = DieselWalletRepository::new(db.pool.clone());

    let overview = db
        .runtime
        .block_on(async { repository.wallet_overview(&UserId::from_uuid(owner), 3).await })
        .expect("load wallet")
        .expect("wallet exists");

    let listed: Vec<Uuid> = overview
        .transactions
        .iter()
        .map(|tx| tx.transaction_id)
        .collect();
    assert_eq!(listed, vec![ids[4], ids[3], ids[2]]);
}

#[rstest]
fn missing_wallet_is_none(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: missing_wallet_is_none skipped");
        return;
    };
    let repository = DieselWalletRepository::new(db.pool.clone());

    let overview = db
        .runtime
        .block_on(async { repository.wallet_overview(&UserId::random(), 50).await })
        .expect("load wallet");

    assert!(overview.is_none());
}

#[rstest]
fn widget_serves_newest_active_job_with_budget(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: widget_serves_newest_active_job_with_budget skipped");
        return;
    };
    let owner = Uuid::new_v4();
    let website_id = db.seed_website(owner, "good.com", "tok-good");
    let article = db.seed_content(website_id, "Launch notes", 0);
    db.seed_promotion(article, owner, 1, true, None);
    db.seed_promotion(article, owner, 20, false, None);
    let repository = DieselWidgetRepository::new(db.pool.clone());

    let (site, recommendation) = db.runtime.block_on(async {
        let site = repository
            .find_website_by_token("tok-good")
            .await
            .expect("lookup token")
            .expect("known token");
        let recommendation = repository
            .find_recommendation(&site.website_id)
            .await
            .expect("recommendation query");
        (site, recommendation)
    });

    assert_eq!(site.website_id, WebsiteId::from_uuid(website_id));
    assert_eq!(site.domain_name, "good.com");
    let recommendation = recommendation.expect("active job");
    assert_eq!(recommendation.title, "Seeded");
    assert_eq!(recommendation.description, "Seeded summary");
    assert_eq!(recommendation.url, "https://example.com/launch-notes");
}

#[rstest]
fn unknown_token_finds_no_website(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_token_finds_no_website skipped");
        return;
    };
    let repository = DieselWidgetRepository::new(db.pool.clone());

    let site = db
        .runtime
        .block_on(async { repository.find_website_by_token("tok-missing").await })
        .expect("lookup token");

    assert!(site.is_none());
}
