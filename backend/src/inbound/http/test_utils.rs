//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use uuid::Uuid;

use crate::domain::ports::{FIXTURE_LOGIN_USER_ID, FixtureLoginService};
use crate::domain::{
    OriginPolicy, PromotionService, UserId, WalletService, WebsiteId, WidgetService,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_body_config;
use crate::test_support::{FixtureClock, InMemoryDashboardStore};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Read a response body as JSON.
pub async fn json_body<B>(res: ServiceResponse<B>) -> serde_json::Value
where
    B: MessageBody,
{
    let bytes = test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Sign in with the fixture account and return its session cookie.
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({ "email": "admin", "password": "password" }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert!(res.status().is_success(), "fixture login failed");
    session_cookie(&res)
}

/// Full API wired to one shared in-memory store.
///
/// `owner` is the account the fixture login signs in as.
pub struct InMemoryHarness {
    pub store: Arc<InMemoryDashboardStore>,
    pub owner: UserId,
    policy: OriginPolicy,
}

impl InMemoryHarness {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryDashboardStore::new()),
            owner: UserId::new(FIXTURE_LOGIN_USER_ID).expect("fixture user id"),
            policy: OriginPolicy::Enforce,
        }
    }

    pub fn with_policy(mut self, policy: OriginPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn owned_website(&self, domain_name: &str, token: &str) -> WebsiteId {
        self.store.add_website(self.owner, domain_name, token)
    }

    pub fn foreign_website(&self, domain_name: &str, token: &str) -> WebsiteId {
        let stranger = UserId::from_uuid(Uuid::new_v4());
        self.store.add_website(stranger, domain_name, token)
    }

    pub fn promotion_service(
        &self,
    ) -> PromotionService<InMemoryDashboardStore, InMemoryDashboardStore> {
        PromotionService::new(
            self.store.clone(),
            self.store.clone(),
            Arc::new(FixtureClock::default()),
        )
    }

    pub fn state(&self) -> HttpState {
        let promotions = Arc::new(self.promotion_service());
        HttpState {
            login: Arc::new(FixtureLoginService),
            promotions: promotions.clone(),
            articles: promotions.clone(),
            website_content: promotions,
            wallet: Arc::new(WalletService::new(self.store.clone())),
            widget: Arc::new(WidgetService::new(self.store.clone(), self.policy)),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(json_body_config())
            .app_data(web::Data::new(self.state()))
            .service(
                web::scope("/api")
                    .wrap(test_session_middleware())
                    .configure(super::configure),
            )
    }
}
