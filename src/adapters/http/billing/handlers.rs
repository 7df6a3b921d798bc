//! Billing endpoint handlers.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{CheckoutRequest, CheckoutResponse, TiersResponse, WebhookAck};
use crate::adapters::http::error::{ApiError, ErrorResponse};
use crate::adapters::http::state::AppState;
use crate::application::handlers::billing::{
    CreateCheckoutCommand, HandlePaymentWebhookCommand,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::subscription::TierLimits;

const SIGNATURE_HEADER: &str = "stripe-signature";

/// POST /api/stripe
///
/// A missing or unreadable body is reported as missing fields.
pub async fn create_checkout(
    State(state): State<AppState>,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected checkout body");
        ApiError::from(DomainError::validation(
            "body",
            "Missing required fields: priceId, userId, email",
        ))
    })?;
    let handler = state.create_checkout_handler();
    let cmd = CreateCheckoutCommand {
        price_id: request.price_id,
        user_id: request.user_id,
        email: request.email,
    };

    let result = handler.handle(cmd).await.map_err(checkout_error)?;

    Ok(Json(CheckoutResponse {
        session_id: result.session_id,
        url: result.url,
    }))
}

fn checkout_error(err: DomainError) -> ApiError {
    match err.code {
        ErrorCode::PaymentProviderError => {
            tracing::error!(error = %err, "Checkout session creation failed");
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(err.code.to_string(), "Error creating checkout session")
                    .with_message(err.message),
            )
        }
        _ => err.into(),
    }
}

/// POST /api/stripe/webhook
///
/// Takes the raw body: the signature covers the exact bytes sent.
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("VALIDATION_FAILED", "Missing Stripe-Signature header"))?;

    let handler = state.payment_webhook_handler();
    let outcome = handler
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature: signature.to_string(),
        })
        .await?;

    tracing::debug!(outcome = ?outcome, "Webhook processed");
    Ok(Json(WebhookAck { received: true }))
}

/// GET /api/tiers
pub async fn list_tiers() -> impl IntoResponse {
    Json(TiersResponse {
        tiers: TierLimits::all(),
    })
}
