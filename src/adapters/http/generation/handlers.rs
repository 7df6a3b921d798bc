//! Generation endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use super::dto::{GenerateRequest, GenerateResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::generation::GenerateWebsiteCommand;
use crate::domain::generation::GenerationError;

/// POST /api/generate
///
/// Anonymous callers are served without quota accounting. A missing or
/// unreadable body is reported as a missing prompt.
pub async fn generate_website(
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected generate body");
        ApiError::from(GenerationError::MissingPrompt)
    })?;
    let handler = state.generate_website_handler();
    let cmd = GenerateWebsiteCommand {
        prompt: request.prompt.unwrap_or_default(),
        user_id: caller.map(|c| c.user_id),
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(GenerateResponse {
        html_code: result.html.into_string(),
    }))
}
