//! Diesel promotion and content adapters against embedded PostgreSQL.
//!
//! Covers the owner-guarded conditional insert, the numeric casts on the way
//! back out and the article listing snapshot.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use credx_backend::domain::ports::{
    ArticlesQuery, ContentRepository, CreatePromotionRequest, PromotionCommand,
    PromotionRepository,
};
use credx_backend::domain::{
    Budget, ContentId, ErrorCode, NewPromotionJob, PromotionService, PromotionStatus, UserId,
    WebsiteId,
};
use credx_backend::outbound::persistence::{DieselContentRepository, DieselPromotionRepository};
use credx_backend::test_support::FixtureClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

mod support;

use support::{TestDatabase, handle_cluster_setup_failure};

type DieselPromotionService = PromotionService<DieselContentRepository, DieselPromotionRepository>;

struct TestContext {
    db: TestDatabase,
    owner: Uuid,
    website_id: Uuid,
    article_id: Uuid,
}

impl TestContext {
    fn promotions(&self) -> DieselPromotionRepository {
        DieselPromotionRepository::new(self.db.pool.clone())
    }

    fn content(&self) -> DieselContentRepository {
        DieselContentRepository::new(self.db.pool.clone())
    }

    fn service(&self) -> DieselPromotionService {
        PromotionService::new(
            Arc::new(self.content()),
            Arc::new(self.promotions()),
            Arc::new(FixtureClock::default()),
        )
    }

    fn new_job(&self, promoter: Uuid) -> NewPromotionJob {
        NewPromotionJob {
            article_id: ContentId::from_uuid(self.article_id),
            promoter_id: UserId::from_uuid(promoter),
            title: "Launch notes".to_owned(),
            summary: "Processing...".to_owned(),
            tags: vec!["news".to_owned(), "launch".to_owned()],
            category: Some("technology".to_owned()),
            budget: Budget::new(12.5).expect("valid budget"),
            created_at: Utc
                .with_ymd_and_hms(2026, 3, 2, 10, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }
}

fn setup_context() -> Result<TestContext, String> {
    let db = TestDatabase::provision()?;
    let owner = Uuid::new_v4();
    let website_id = db.seed_website(owner, "good.com", "tok-good");
    let article_id = db.seed_content(website_id, "Launch notes", 0);
    Ok(TestContext {
        db,
        owner,
        website_id,
        article_id,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn owner_insert_returns_inactive_job(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: owner_insert_returns_inactive_job skipped");
        return;
    };
    let repository = context.promotions();
    let job = context.new_job(context.owner);

    let stored = context
        .db
        .runtime
        .block_on(async { repository.insert_promotion_job(&job).await })
        .expect("insert promotion")
        .expect("owner passes the predicate");

    assert!(!stored.active);
    assert_eq!(stored.article_id, job.article_id);
    assert_eq!(stored.promoter_id, job.promoter_id);
    assert_eq!(stored.budget.credits(), 12.5);
    assert_eq!(stored.tags, vec!["news", "launch"]);
    assert_eq!(stored.category.as_deref(), Some("technology"));
    assert_eq!(stored.created_at, job.created_at);
    assert_eq!(context.db.promotion_count(context.article_id), 1);
}

#[rstest]
fn foreign_insert_writes_nothing(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: foreign_insert_writes_nothing skipped");
        return;
    };
    let repository = context.promotions();
    let job = context.new_job(Uuid::new_v4());

    let stored = context
        .db
        .runtime
        .block_on(async { repository.insert_promotion_job(&job).await })
        .expect("insert promotion");

    assert!(stored.is_none());
    assert_eq!(context.db.promotion_count(context.article_id), 0);
}

#[rstest]
fn service_rejects_foreign_content_without_writing(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: service_rejects_foreign_content_without_writing skipped");
        return;
    };
    let service = context.service();
    let request = CreatePromotionRequest {
        user_id: UserId::random(),
        content_id: context.article_id.to_string(),
        budget: Some(10.0),
        title: None,
    };

    let error = context
        .db
        .runtime
        .block_on(async { service.create_promotion(request).await })
        .expect_err("foreign content");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(context.db.promotion_count(context.article_id), 0);
}

#[rstest]
fn article_listing_surfaces_the_latest_job(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: article_listing_surfaces_the_latest_job skipped");
        return;
    };
    let db = &context.db;
    let quiet = db.seed_content(context.website_id, "Quiet article", 5);
    db.seed_promotion(context.article_id, context.owner, 1, true, Some("completed"));
    db.seed_promotion(context.article_id, context.owner, 30, true, None);
    db.seed_promotion(context.article_id, context.owner, 10, false, Some("inactive"));
    let service = context.service();

    let rows = db
        .runtime
        .block_on(async {
            service
                .list_articles(
                    WebsiteId::from_uuid(context.website_id),
                    UserId::from_uuid(context.owner),
                )
                .await
        })
        .expect("list articles");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].content_id, ContentId::from_uuid(quiet));
    assert_eq!(rows[0].promotion_status, PromotionStatus::NotPromoted);
    assert_eq!(rows[0].budget, 0.0);
    assert_eq!(rows[1].content_id, ContentId::from_uuid(context.article_id));
    assert_eq!(rows[1].promotion_status, PromotionStatus::Active);
    assert_eq!(rows[1].budget, 40.0);
    assert_eq!(rows[1].spent, 2.5);
}

#[rstest]
fn listing_unknown_website_is_empty(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: listing_unknown_website_is_empty skipped");
        return;
    };
    let repository = context.content();

    let records = context
        .db
        .runtime
        .block_on(async {
            repository
                .list_articles(&WebsiteId::from_uuid(Uuid::new_v4()))
                .await
        })
        .expect("list articles");

    assert!(records.is_empty());
}

#[rstest]
fn recent_content_is_owner_scoped(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: recent_content_is_owner_scoped skipped");
        return;
    };
    let repository = context.content();
    let website = WebsiteId::from_uuid(context.website_id);

    let (own, foreign) = context.db.runtime.block_on(async {
        let own = repository
            .recent_content(&website, &UserId::from_uuid(context.owner), 10)
            .await
            .expect("own content");
        let foreign = repository
            .recent_content(&website, &UserId::random(), 10)
            .await
            .expect("foreign content");
        (own, foreign)
    });

    assert_eq!(own.len(), 1);
    assert_eq!(own[0].title, "Launch notes");
    assert_eq!(own[0].tags, vec!["news"]);
    assert!(foreign.is_empty());
}
