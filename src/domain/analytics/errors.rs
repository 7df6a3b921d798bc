//! Analytics error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, WebsiteId};
use crate::domain::subscription::SubscriptionError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("Website not found: {0}")]
    WebsiteNotFound(WebsiteId),

    #[error("Permission denied")]
    Forbidden,

    #[error(transparent)]
    Subscription(SubscriptionError),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl AnalyticsError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AnalyticsError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AnalyticsError::WebsiteNotFound(_) => ErrorCode::WebsiteNotFound,
            AnalyticsError::Forbidden => ErrorCode::Forbidden,
            AnalyticsError::Subscription(err) => err.code(),
            AnalyticsError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AnalyticsError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<SubscriptionError> for AnalyticsError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::Infrastructure(msg) => AnalyticsError::Infrastructure(msg),
            other => AnalyticsError::Subscription(other),
        }
    }
}

impl From<DomainError> for AnalyticsError {
    fn from(err: DomainError) -> Self {
        AnalyticsError::Infrastructure(err.to_string())
    }
}
