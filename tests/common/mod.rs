//! Shared router fixture for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use sento::adapters::ai::MockAIProvider;
use sento::adapters::http::{api_router, AppState};
use sento::adapters::memory::{
    InMemoryAnalyticsRepository, InMemoryProfileRepository, InMemoryWebsiteRepository,
};
use sento::adapters::stripe::MockPaymentProvider;
use sento::application::handlers::billing::{CheckoutUrls, PriceTable};
use sento::application::handlers::generation::GenerationSettings;
use sento::domain::foundation::UserId;
use sento::domain::subscription::{Profile, SubscriptionTier, UsageMonth};
use sento::ports::{AIProvider, PaymentProvider};

pub const PAGE: &str = "<!DOCTYPE html><html><body><h1>Bakery</h1></body></html>";

pub struct TestApp {
    pub router: Router,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub websites: Arc<InMemoryWebsiteRepository>,
    pub analytics: Arc<InMemoryAnalyticsRepository>,
    /// The mock wired into the router when built with [`TestApp::new`].
    pub payments: MockPaymentProvider,
}

impl TestApp {
    pub fn new(ai: Option<Arc<MockAIProvider>>) -> Self {
        let payments = MockPaymentProvider::new();
        let mut app = Self::with_payment_provider(ai, Arc::new(payments.clone()));
        app.payments = payments;
        app
    }

    pub fn with_payment_provider(
        ai: Option<Arc<MockAIProvider>>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let websites = Arc::new(InMemoryWebsiteRepository::new());
        let analytics = Arc::new(InMemoryAnalyticsRepository::new());
        let payments = MockPaymentProvider::new();

        let state = AppState {
            profiles: profiles.clone(),
            websites: websites.clone(),
            analytics: analytics.clone(),
            ai_provider: ai.map(|p| p as Arc<dyn AIProvider>),
            payment_provider,
            generation: GenerationSettings::default(),
            prices: PriceTable::new()
                .with_price("price_basic", SubscriptionTier::Basic)
                .with_price("price_pro", SubscriptionTier::Pro)
                .with_price("price_business", SubscriptionTier::Business),
            checkout_urls: CheckoutUrls {
                success_url: "https://sento.test/success".to_string(),
                cancel_url: "https://sento.test/cancel".to_string(),
            },
        };

        Self {
            router: api_router(state),
            profiles,
            websites,
            analytics,
            payments,
        }
    }

    pub fn user_on(&self, id: &str, tier: SubscriptionTier) -> UserId {
        let user = UserId::new(id).unwrap();
        let mut profile = Profile::new_free(user.clone(), None, UsageMonth::current());
        profile.tier = tier;
        self.profiles.insert(profile);
        user
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn json_request(method: &str, uri: &str, user: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// A request carrying `body` verbatim, with an optional content type.
pub fn raw_request(method: &str, uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
