//! Caller identity extractors.
//!
//! Authentication itself happens in front of this service: the hosting auth
//! layer forwards the verified user id in `X-User-Id` (and, when known, the
//! email in `X-User-Email`). These extractors only read those headers.
//!
//! ```ignore
//! async fn my_handler(RequireAuth(caller): RequireAuth) -> impl IntoResponse {
//!     format!("Hello, {}!", caller.user_id)
//! }
//! ```

use axum::{
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::UserId;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Identity of the user making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub email: Option<String>,
}

impl Caller {
    fn from_parts(parts: &Parts) -> Result<Option<Self>, AuthRejection> {
        let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(None);
        };

        let user_id = raw
            .to_str()
            .ok()
            .and_then(|value| UserId::new(value.trim()).ok())
            .ok_or(AuthRejection::InvalidIdentity)?;

        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        Ok(Some(Caller { user_id, email }))
    }
}

/// Extractor that requires a caller identity; 401 without one.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Caller);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            Caller::from_parts(parts)?
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for routes that also serve anonymous callers.
///
/// A present but malformed `X-User-Id` is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<Caller>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move { Caller::from_parts(parts).map(OptionalAuth) })
    }
}

/// Rejection for the auth extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    Unauthenticated,
    InvalidIdentity,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            AuthRejection::Unauthenticated => "Authentication required",
            AuthRejection::InvalidIdentity => "Invalid user identity",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHORIZED"
            })),
        )
            .into_response()
    }
}
