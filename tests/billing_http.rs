//! HTTP tests for checkout, the payment webhook and the tier table.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use common::{body_json, get, json_request, raw_request, TestApp};
use sento::adapters::stripe::{hex_encode, StripeConfig, StripePaymentAdapter};
use sento::domain::foundation::UserId;
use sento::domain::subscription::SubscriptionTier;
use sento::ports::{PaymentError, ProfileRepository};

const WEBHOOK_SECRET: &str = "whsec_integration";

fn stripe_app() -> TestApp {
    let adapter = StripePaymentAdapter::new(StripeConfig::new(
        Some("sk_test_integration".to_string()),
        Some(WEBHOOK_SECRET.to_string()),
    ))
    .unwrap();
    TestApp::with_payment_provider(None, Arc::new(adapter))
}

fn signed_webhook(payload: &str, secret: &str) -> Request<Body> {
    let timestamp = chrono::Utc::now().timestamp();
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    let signature = format!("t={},v1={}", timestamp, hex_encode(&mac.finalize().into_bytes()));

    Request::builder()
        .method("POST")
        .uri("/api/stripe/webhook")
        .header("content-type", "application/json")
        .header("stripe-signature", signature)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn checkout_completed(user: &str, price: &str) -> String {
    json!({
        "id": "evt_checkout",
        "type": "checkout.session.completed",
        "created": 1704067200,
        "data": {"object": {
            "id": "cs_test_1",
            "customer": "cus_test_1",
            "client_reference_id": user,
            "metadata": {"user_id": user, "price_id": price}
        }}
    })
    .to_string()
}

#[tokio::test]
async fn checkout_returns_session_id() {
    let app = TestApp::new(None);

    let response = app
        .send(json_request(
            "POST",
            "/api/stripe",
            None,
            json!({"priceId": "price_pro", "userId": "buyer", "email": "buyer@example.com"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["sessionId"], "cs_mock_1");

    let requests = app.payments.checkout_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].success_url, "https://sento.test/success");
    assert_eq!(requests[0].user_id.as_str(), "buyer");
}

#[tokio::test]
async fn checkout_requires_all_fields() {
    let app = TestApp::new(None);

    let response = app
        .send(json_request(
            "POST",
            "/api/stripe",
            None,
            json!({"priceId": "price_pro", "userId": "buyer"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.payments.checkout_requests().is_empty());
}

#[tokio::test]
async fn checkout_with_empty_body_is_json_bad_request() {
    let app = TestApp::new(None);

    let response = app.send(raw_request("POST", "/api/stripe", None, "")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["error"], "Missing required fields: priceId, userId, email");
    assert!(app.payments.checkout_requests().is_empty());
}

#[tokio::test]
async fn checkout_with_malformed_body_is_json_bad_request() {
    let app = TestApp::new(None);

    let response = app
        .send(raw_request("POST", "/api/stripe", Some("application/json"), "not json"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing required fields: priceId, userId, email");
    assert!(app.payments.checkout_requests().is_empty());
}

#[tokio::test]
async fn checkout_provider_failure_reports_message() {
    let app = TestApp::new(None);
    app.payments.set_error(PaymentError::provider("No such price: 'price_x'"));

    let response = app
        .send(json_request(
            "POST",
            "/api/stripe",
            None,
            json!({"priceId": "price_x", "userId": "buyer", "email": "buyer@example.com"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Error creating checkout session");
    assert_eq!(body["message"], "No such price: 'price_x'");
}

#[tokio::test]
async fn checkout_without_secret_key_is_server_error() {
    let adapter = StripePaymentAdapter::new(StripeConfig::new(None, None)).unwrap();
    let app = TestApp::with_payment_provider(None, Arc::new(adapter));

    let response = app
        .send(json_request(
            "POST",
            "/api/stripe",
            None,
            json!({"priceId": "price_pro", "userId": "buyer", "email": "buyer@example.com"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn checkout_answers_cors_preflight() {
    let app = TestApp::new(None);

    let response = app
        .send(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/stripe")
                .header("origin", "https://elsewhere.example")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn signed_checkout_webhook_upgrades_the_user() {
    let app = stripe_app();

    let response = app
        .send(signed_webhook(&checkout_completed("buyer", "price_pro"), WEBHOOK_SECRET))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"received": true}));

    let profile = app
        .profiles
        .find(&UserId::new("buyer").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.tier, SubscriptionTier::Pro);
    assert_eq!(profile.stripe_customer_id.as_deref(), Some("cus_test_1"));
}

#[tokio::test]
async fn subscription_deleted_downgrades_to_free() {
    let app = stripe_app();
    app.send(signed_webhook(&checkout_completed("buyer", "price_business"), WEBHOOK_SECRET))
        .await;

    let deleted = json!({
        "id": "evt_deleted",
        "type": "customer.subscription.deleted",
        "created": 1704067200,
        "data": {"object": {"id": "sub_1", "customer": "cus_test_1", "status": "canceled"}}
    })
    .to_string();
    let response = app.send(signed_webhook(&deleted, WEBHOOK_SECRET)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let usage = body_json(app.send(get("/api/usage", Some("buyer"))).await).await;
    assert_eq!(usage["tier"], "free");
}

#[tokio::test]
async fn webhook_with_wrong_signature_is_rejected() {
    let app = stripe_app();

    let response = app
        .send(signed_webhook(&checkout_completed("buyer", "price_pro"), "whsec_forged"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.profiles.is_empty());
}

#[tokio::test]
async fn webhook_without_signature_header_is_rejected() {
    let app = stripe_app();

    let response = app
        .send(json_request("POST", "/api/stripe/webhook", None, json!({"id": "evt"})))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_price_is_acknowledged_without_change() {
    let app = stripe_app();

    let response = app
        .send(signed_webhook(&checkout_completed("buyer", "price_unknown"), WEBHOOK_SECRET))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.profiles.is_empty());
}

#[tokio::test]
async fn tier_table_lists_every_tier() {
    let app = TestApp::new(None);

    let body = body_json(app.send(get("/api/tiers", None)).await).await;

    let tiers = body["tiers"].as_array().unwrap();
    assert_eq!(tiers.len(), 4);
    assert_eq!(tiers[0]["tier"], "free");
    assert_eq!(tiers[3]["monthly_generations"], -1);
}
