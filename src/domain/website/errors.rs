//! Website-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, WebsiteId};
use crate::domain::subscription::SubscriptionError;

/// Website-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebsiteError {
    /// Website was not found.
    NotFound(WebsiteId),
    /// User does not own the website.
    Forbidden,
    /// Page index out of range.
    PageNotFound { index: usize },
    /// Plan limit or feature denial.
    Subscription(SubscriptionError),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl WebsiteError {
    pub fn not_found(id: WebsiteId) -> Self {
        WebsiteError::NotFound(id)
    }
    pub fn forbidden() -> Self {
        WebsiteError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        WebsiteError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        WebsiteError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            WebsiteError::NotFound(_) => ErrorCode::WebsiteNotFound,
            WebsiteError::Forbidden => ErrorCode::Forbidden,
            WebsiteError::PageNotFound { .. } => ErrorCode::NotFound,
            WebsiteError::Subscription(err) => err.code(),
            WebsiteError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            WebsiteError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            WebsiteError::NotFound(id) => format!("Website not found: {}", id),
            WebsiteError::Forbidden => "Permission denied".to_string(),
            WebsiteError::PageNotFound { index } => format!("Page {} does not exist", index),
            WebsiteError::Subscription(err) => err.to_string(),
            WebsiteError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            WebsiteError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for WebsiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for WebsiteError {}

impl From<SubscriptionError> for WebsiteError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::ValidationFailed { field, message } => {
                WebsiteError::ValidationFailed { field, message }
            }
            SubscriptionError::Infrastructure(msg) => WebsiteError::Infrastructure(msg),
            other => WebsiteError::Subscription(other),
        }
    }
}

impl From<DomainError> for WebsiteError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                WebsiteError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            ErrorCode::Forbidden => WebsiteError::Forbidden,
            _ => WebsiteError::Infrastructure(err.to_string()),
        }
    }
}
