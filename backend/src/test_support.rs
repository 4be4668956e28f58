//! In-memory adapters for unit and integration tests.
//!
//! [`InMemoryDashboardStore`] implements every driven port against a single
//! mutex-guarded state, so ownership predicates and conditional inserts
//! behave like their SQL counterparts without a database.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    ContentRepository, ContentRepositoryError, PromotionRepository, PromotionRepositoryError,
    WalletRepository, WalletRepositoryError, WidgetRepository, WidgetRepositoryError,
};
use crate::domain::{
    ArticleRecord, ContentId, ContentItem, ContentSnapshot, NewPromotionJob, PromotionId,
    PromotionJob, PromotionJobState, Recommendation, Transaction, UserId, VerifiedWebsite,
    WalletOverview, WebsiteId,
};

/// Fixed instant used by fixtures.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    /// Freeze the clock at `utc_now`.
    pub const fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Default for FixtureClock {
    fn default() -> Self {
        Self::at(fixture_timestamp())
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[derive(Debug, Clone)]
struct StoredWebsite {
    website_id: WebsiteId,
    owner_id: UserId,
    domain_name: String,
    verification_token: String,
}

#[derive(Debug, Clone)]
struct StoredPromotion {
    job: PromotionJob,
    status: Option<String>,
    credits_spent: f64,
}

#[derive(Debug, Clone)]
struct StoredWallet {
    owner_id: UserId,
    overview: WalletOverview,
}

#[derive(Debug, Default)]
struct StoreState {
    websites: Vec<StoredWebsite>,
    content: Vec<ContentItem>,
    promotions: Vec<StoredPromotion>,
    wallets: Vec<StoredWallet>,
    next_promotion_id: i64,
    fail_with_connection_error: bool,
}

impl StoreState {
    fn owner_of_website(&self, website_id: &WebsiteId) -> Option<UserId> {
        self.websites
            .iter()
            .find(|site| site.website_id == *website_id)
            .map(|site| site.owner_id)
    }

    fn owned_content(&self, content_id: &ContentId, owner: &UserId) -> Option<&ContentItem> {
        self.content.iter().find(|item| {
            item.content_id == *content_id
                && self.owner_of_website(&item.website_id) == Some(*owner)
        })
    }
}

/// Newest first, ties broken by ascending content id like the SQL adapters.
fn newest_content_first<T: Borrow<ContentItem>>(a: &T, b: &T) -> Ordering {
    let (a, b) = (a.borrow(), b.borrow());
    b.created_at
        .cmp(&a.created_at)
        .then(a.content_id.as_uuid().cmp(b.content_id.as_uuid()))
}

/// Single in-memory store backing every driven port.
#[derive(Debug, Default)]
pub struct InMemoryDashboardStore {
    state: Mutex<StoreState>,
}

impl InMemoryDashboardStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a website and return its id.
    pub fn add_website(&self, owner: UserId, domain_name: &str, token: &str) -> WebsiteId {
        let website_id = WebsiteId::from_uuid(Uuid::new_v4());
        self.lock().websites.push(StoredWebsite {
            website_id,
            owner_id: owner,
            domain_name: domain_name.to_owned(),
            verification_token: token.to_owned(),
        });
        website_id
    }

    /// Add a content item titled `title`. Later items are newer.
    pub fn add_content(&self, website_id: WebsiteId, title: &str) -> ContentId {
        let offset = i64::try_from(self.lock().content.len()).unwrap_or(i64::MAX);
        self.add_content_at(website_id, title, fixture_timestamp() + Duration::minutes(offset))
    }

    /// Add a content item created at `created_at`.
    pub fn add_content_at(
        &self,
        website_id: WebsiteId,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> ContentId {
        let content_id = ContentId::from_uuid(Uuid::new_v4());
        self.lock().content.push(ContentItem {
            content_id,
            website_id,
            title: title.to_owned(),
            description: Some(format!("About {title}")),
            tags: vec!["news".to_owned()],
            category: Some("technology".to_owned()),
            original_url: Some(format!("https://example.com/{content_id}")),
            image_url: None,
            created_at,
        });
        content_id
    }

    /// Add a wallet for `owner`.
    pub fn add_wallet(&self, owner: UserId, balance: &str, transactions: Vec<Transaction>) {
        self.lock().wallets.push(StoredWallet {
            owner_id: owner,
            overview: WalletOverview {
                balance: balance.to_owned(),
                transactions,
            },
        });
    }

    /// Every stored promotion job, oldest first.
    pub fn promotions(&self) -> Vec<PromotionJob> {
        self.lock()
            .promotions
            .iter()
            .map(|stored| stored.job.clone())
            .collect()
    }

    /// Emulate the external worker updating a job.
    pub fn update_promotion(
        &self,
        id: PromotionId,
        active: bool,
        status: Option<&str>,
        credits_spent: f64,
    ) {
        let mut state = self.lock();
        if let Some(stored) = state.promotions.iter_mut().find(|p| p.job.id == id) {
            stored.job.active = active;
            stored.status = status.map(str::to_owned);
            stored.credits_spent = credits_spent;
        }
    }

    /// Transfer a website to another owner.
    pub fn transfer_website(&self, website_id: WebsiteId, new_owner: UserId) {
        let mut state = self.lock();
        if let Some(site) = state
            .websites
            .iter_mut()
            .find(|site| site.website_id == website_id)
        {
            site.owner_id = new_owner;
        }
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn fail_connections(&self) {
        self.lock().fail_with_connection_error = true;
    }

    fn check_connection<E>(&self, connection: impl FnOnce(&'static str) -> E) -> Result<(), E> {
        if self.lock().fail_with_connection_error {
            Err(connection("in-memory store offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentRepository for InMemoryDashboardStore {
    async fn find_owned_content(
        &self,
        content_id: &ContentId,
        owner: &UserId,
    ) -> Result<Option<ContentSnapshot>, ContentRepositoryError> {
        self.check_connection(ContentRepositoryError::connection)?;
        Ok(self
            .lock()
            .owned_content(content_id, owner)
            .map(|item| ContentSnapshot {
                title: item.title.clone(),
                description: item.description.clone(),
                tags: item.tags.clone(),
                category: item.category.clone(),
            }))
    }

    async fn website_owned_by(
        &self,
        website_id: &WebsiteId,
        owner: &UserId,
    ) -> Result<bool, ContentRepositoryError> {
        self.check_connection(ContentRepositoryError::connection)?;
        Ok(self.lock().owner_of_website(website_id) == Some(*owner))
    }

    async fn list_articles(
        &self,
        website_id: &WebsiteId,
    ) -> Result<Vec<ArticleRecord>, ContentRepositoryError> {
        self.check_connection(ContentRepositoryError::connection)?;
        let state = self.lock();
        let mut items: Vec<&ContentItem> = state
            .content
            .iter()
            .filter(|item| item.website_id == *website_id)
            .collect();
        items.sort_by(newest_content_first);

        Ok(items
            .into_iter()
            .map(|item| ArticleRecord {
                content_id: item.content_id,
                title: item.title.clone(),
                jobs: state
                    .promotions
                    .iter()
                    .filter(|stored| stored.job.article_id == item.content_id)
                    .map(|stored| PromotionJobState {
                        id: stored.job.id,
                        active: Some(stored.job.active),
                        status: stored.status.clone(),
                        budget: Some(stored.job.budget.credits()),
                        credits_spent: Some(stored.credits_spent),
                        created_at: stored.job.created_at,
                    })
                    .collect(),
            })
            .collect())
    }

    async fn recent_content(
        &self,
        website_id: &WebsiteId,
        owner: &UserId,
        limit: i64,
    ) -> Result<Vec<ContentItem>, ContentRepositoryError> {
        self.check_connection(ContentRepositoryError::connection)?;
        let state = self.lock();
        if state.owner_of_website(website_id) != Some(*owner) {
            return Ok(Vec::new());
        }
        let mut items: Vec<ContentItem> = state
            .content
            .iter()
            .filter(|item| item.website_id == *website_id)
            .cloned()
            .collect();
        items.sort_by(newest_content_first);
        items.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(items)
    }
}

#[async_trait]
impl PromotionRepository for InMemoryDashboardStore {
    async fn insert_promotion_job(
        &self,
        job: &NewPromotionJob,
    ) -> Result<Option<PromotionJob>, PromotionRepositoryError> {
        self.check_connection(PromotionRepositoryError::connection)?;
        let mut state = self.lock();
        if state.owned_content(&job.article_id, &job.promoter_id).is_none() {
            return Ok(None);
        }
        state.next_promotion_id += 1;
        let created = PromotionJob {
            id: PromotionId::new(state.next_promotion_id),
            article_id: job.article_id,
            promoter_id: job.promoter_id,
            title: job.title.clone(),
            summary: job.summary.clone(),
            tags: job.tags.clone(),
            category: job.category.clone(),
            budget: job.budget,
            active: false,
            created_at: job.created_at,
        };
        state.promotions.push(StoredPromotion {
            job: created.clone(),
            status: None,
            credits_spent: 0.0,
        });
        Ok(Some(created))
    }
}

#[async_trait]
impl WalletRepository for InMemoryDashboardStore {
    async fn wallet_overview(
        &self,
        owner: &UserId,
        limit: i64,
    ) -> Result<Option<WalletOverview>, WalletRepositoryError> {
        self.check_connection(WalletRepositoryError::connection)?;
        Ok(self
            .lock()
            .wallets
            .iter()
            .find(|wallet| wallet.owner_id == *owner)
            .map(|wallet| {
                let mut overview = wallet.overview.clone();
                overview
                    .transactions
                    .sort_by(|a, b| {
                        b.created_at
                            .cmp(&a.created_at)
                            .then(b.transaction_id.cmp(&a.transaction_id))
                    });
                overview
                    .transactions
                    .truncate(usize::try_from(limit).unwrap_or(0));
                overview
            }))
    }
}

#[async_trait]
impl WidgetRepository for InMemoryDashboardStore {
    async fn find_website_by_token(
        &self,
        token: &str,
    ) -> Result<Option<VerifiedWebsite>, WidgetRepositoryError> {
        self.check_connection(WidgetRepositoryError::connection)?;
        Ok(self
            .lock()
            .websites
            .iter()
            .find(|site| site.verification_token == token)
            .map(|site| VerifiedWebsite {
                website_id: site.website_id,
                domain_name: site.domain_name.clone(),
            }))
    }

    async fn find_recommendation(
        &self,
        website_id: &WebsiteId,
    ) -> Result<Option<Recommendation>, WidgetRepositoryError> {
        self.check_connection(WidgetRepositoryError::connection)?;
        let state = self.lock();
        let candidate = state
            .promotions
            .iter()
            .filter(|stored| stored.job.active && stored.job.budget.credits() > stored.credits_spent)
            .filter_map(|stored| {
                state
                    .content
                    .iter()
                    .find(|item| {
                        item.content_id == stored.job.article_id && item.website_id == *website_id
                    })
                    .map(|item| (stored, item))
            })
            .max_by(|(a, _), (b, _)| {
                a.job
                    .created_at
                    .cmp(&b.job.created_at)
                    .then(a.job.id.cmp(&b.job.id))
            });

        Ok(candidate.map(|(stored, item)| {
            Recommendation::new(
                stored.job.title.clone(),
                Some(stored.job.summary.clone()),
                item.original_url.clone(),
                item.image_url.clone(),
            )
        }))
    }
}
