//! Error responses for the HTTP API.
//!
//! Every handler error funnels through [`ApiError`], which picks the status
//! code and renders `{ "error", "code", "message"?, "details"? }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::analytics::AnalyticsError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::generation::GenerationError;
use crate::domain::subscription::SubscriptionError;
use crate::domain::website::WebsiteError;

/// JSON error body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorResponse {
    /// Human-readable summary.
    pub error: String,
    /// Machine-readable code.
    pub code: String,
    /// Extra explanation from a downstream service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            message: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    pub fn bad_request(code: &str, error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorResponse::new(code, error))
    }

    /// 500 with a generic message; the cause is logged, not returned.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(ErrorCode::InternalError.to_string(), "Internal server error"),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<SubscriptionError> for ApiError {
    fn from(err: SubscriptionError) -> Self {
        let code = err.code().to_string();
        match &err {
            SubscriptionError::LimitReached {
                resource,
                limit,
                tier,
            } => Self::new(
                StatusCode::FORBIDDEN,
                ErrorResponse::new(code, err.to_string()).with_details(json!({
                    "resource": resource,
                    "limit": limit,
                    "tier": tier,
                })),
            ),
            SubscriptionError::FeatureNotIncluded {
                feature,
                tier,
                required_tier,
            } => Self::new(
                StatusCode::FORBIDDEN,
                ErrorResponse::new(code, err.to_string()).with_details(json!({
                    "feature": feature,
                    "tier": tier,
                    "requiredTier": required_tier,
                })),
            ),
            SubscriptionError::ValidationFailed { field, .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(code, err.to_string()).with_details(json!({ "field": field })),
            ),
            SubscriptionError::Infrastructure(_) => Self::internal(&err),
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::MissingPrompt => {
                Self::bad_request("VALIDATION_FAILED", err.to_string())
            }
            GenerationError::InvalidOutput { ref preview } => Self::new(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("INVALID_OUTPUT", err.to_string())
                    .with_details(Value::String(preview.clone())),
            ),
            GenerationError::Upstream { status, body } => {
                tracing::warn!(status, "Text generation API returned an error");
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                Self::new(
                    status,
                    ErrorResponse::new(ErrorCode::AIProviderError.to_string(), "Text generation API error")
                        .with_details(Value::String(body)),
                )
            }
            GenerationError::NotConfigured(ref detail) => {
                tracing::error!(detail = %detail, "Generation requested without an API key");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        ErrorCode::ConfigurationError.to_string(),
                        "AI API key not configured",
                    ),
                )
            }
            GenerationError::Provider(cause) => {
                tracing::error!(error = %cause, "Website generation failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        ErrorCode::InternalError.to_string(),
                        "Failed to generate website",
                    ),
                )
            }
            GenerationError::QuotaExceeded(inner) => inner.into(),
        }
    }
}

impl From<WebsiteError> for ApiError {
    fn from(err: WebsiteError) -> Self {
        let code = err.code().to_string();
        match err {
            WebsiteError::NotFound(_) | WebsiteError::PageNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ErrorResponse::new(code, err.message()),
            ),
            WebsiteError::Forbidden => Self::new(
                StatusCode::FORBIDDEN,
                ErrorResponse::new(code, err.message()),
            ),
            WebsiteError::ValidationFailed { ref field, .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(code, err.message()).with_details(json!({ "field": field })),
            ),
            WebsiteError::Subscription(inner) => inner.into(),
            WebsiteError::Infrastructure(_) => Self::internal(err),
        }
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        let code = err.code().to_string();
        match err {
            AnalyticsError::WebsiteNotFound(_) => Self::new(
                StatusCode::NOT_FOUND,
                ErrorResponse::new(code, err.to_string()),
            ),
            AnalyticsError::Forbidden => Self::new(
                StatusCode::FORBIDDEN,
                ErrorResponse::new(code, err.to_string()),
            ),
            AnalyticsError::ValidationFailed { ref field, .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(code, err.to_string()).with_details(json!({ "field": field })),
            ),
            AnalyticsError::Subscription(inner) => inner.into(),
            AnalyticsError::Infrastructure(_) => Self::internal(err),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), err.to_string())
                .with_details(json!({ "field": err.field() })),
        )
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let code = err.code.to_string();
        let status = match err.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound | ErrorCode::ProfileNotFound | ErrorCode::WebsiteNotFound => {
                StatusCode::NOT_FOUND
            }
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden | ErrorCode::LimitReached | ErrorCode::FeatureNotIncluded => {
                StatusCode::FORBIDDEN
            }
            ErrorCode::ConfigurationError => {
                tracing::error!(error = %err, "Service is not configured");
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(code, err.message),
                );
            }
            ErrorCode::PaymentProviderError | ErrorCode::AIProviderError => {
                tracing::error!(error = %err, "Upstream provider failed");
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(code, "Upstream provider error").with_message(err.message),
                );
            }
            ErrorCode::DatabaseError | ErrorCode::InternalError => return Self::internal(err),
        };

        let mut body = ErrorResponse::new(code, err.message);
        if !err.details.is_empty() {
            body = body.with_details(json!(err.details));
        }
        Self::new(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::WebsiteId;
    use crate::domain::subscription::{Limit, SubscriptionTier};

    #[test]
    fn upstream_status_is_passed_through() {
        let err: ApiError = GenerationError::Upstream {
            status: 429,
            body: "slow down".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.body.details, Some(Value::String("slow down".to_string())));
    }

    #[test]
    fn nonsense_upstream_status_becomes_bad_gateway() {
        let err: ApiError = GenerationError::Upstream {
            status: 42,
            body: String::new(),
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn provider_failures_hide_their_cause() {
        let err: ApiError = GenerationError::Provider("socket closed".to_string()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.error, "Failed to generate website");
        assert!(err.body.details.is_none());
    }

    #[test]
    fn quota_errors_are_forbidden_with_details() {
        let err: ApiError = GenerationError::QuotaExceeded(SubscriptionError::limit_reached(
            "monthly generation",
            Limit::Limited(3),
            SubscriptionTier::Free,
        ))
        .into();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.body.code, "LIMIT_REACHED");
        let details = err.body.details.unwrap();
        assert_eq!(details["limit"], 3);
        assert_eq!(details["tier"], "free");
    }

    #[test]
    fn feature_denial_names_required_tier() {
        let err: ApiError = SubscriptionError::feature_not_included(
            "react export",
            SubscriptionTier::Basic,
            Some(SubscriptionTier::Pro),
        )
        .into();
        assert_eq!(err.body.details.unwrap()["requiredTier"], "pro");
    }

    #[test]
    fn website_errors_map_to_statuses() {
        let not_found: ApiError = WebsiteError::not_found(WebsiteId::new()).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let forbidden: ApiError = WebsiteError::forbidden().into();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

        let infra: ApiError = WebsiteError::infrastructure("db down").into();
        assert_eq!(infra.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(infra.body.error, "Internal server error");
    }

    #[test]
    fn domain_validation_is_bad_request() {
        let err: ApiError = DomainError::validation("priceId", "Missing required fields").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.details.unwrap()["field"], "priceId");
    }

    #[test]
    fn payment_failures_carry_provider_message() {
        let err: ApiError =
            DomainError::new(ErrorCode::PaymentProviderError, "No such price: price_x").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.message.as_deref(), Some("No such price: price_x"));
    }
}
