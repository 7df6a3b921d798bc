//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | LimitReached | 403 |
//! | FeatureNotIncluded | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use super::{Limit, SubscriptionTier};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised while gating or updating a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// A counted resource is exhausted for the user's tier.
    #[error("{resource} limit of {limit} reached on the {tier} plan")]
    LimitReached {
        resource: &'static str,
        limit: Limit,
        tier: SubscriptionTier,
    },

    /// The user's tier does not include the feature.
    #[error("{feature} is not included in the {tier} plan")]
    FeatureNotIncluded {
        feature: String,
        tier: SubscriptionTier,
        required_tier: Option<SubscriptionTier>,
    },

    #[error("{field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("{0}")]
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn limit_reached(resource: &'static str, limit: Limit, tier: SubscriptionTier) -> Self {
        SubscriptionError::LimitReached {
            resource,
            limit,
            tier,
        }
    }

    pub fn feature_not_included(
        feature: impl Into<String>,
        tier: SubscriptionTier,
        required_tier: Option<SubscriptionTier>,
    ) -> Self {
        SubscriptionError::FeatureNotIncluded {
            feature: feature.into(),
            tier,
            required_tier,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::LimitReached { .. } => ErrorCode::LimitReached,
            SubscriptionError::FeatureNotIncluded { .. } => ErrorCode::FeatureNotIncluded,
            SubscriptionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SubscriptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SubscriptionError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => SubscriptionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for SubscriptionError {
    fn from(err: ValidationError) -> Self {
        SubscriptionError::validation(err.field().to_string(), err.to_string())
    }
}
