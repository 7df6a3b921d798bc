//! Analytics endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::dto::{RecordViewRequest, SubmitFormRequest};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::analytics::{GetStatsQuery, RecordViewCommand, SubmitFormCommand};
use crate::domain::foundation::WebsiteId;

/// POST /api/analytics/:website_id/views
///
/// Called from published pages, so no caller identity is required.
pub async fn record_view(
    State(state): State<AppState>,
    Path(website_id): Path<Uuid>,
    body: Option<Json<RecordViewRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.unwrap_or_default();
    let counters = state
        .record_view_handler()
        .handle(RecordViewCommand {
            website_id: WebsiteId::from_uuid(website_id),
            new_visitor: request.new_visitor,
        })
        .await?;

    Ok(Json(counters))
}

/// POST /api/forms/:website_id
pub async fn submit_form(
    State(state): State<AppState>,
    Path(website_id): Path<Uuid>,
    Json(request): Json<SubmitFormRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = state
        .submit_form_handler()
        .handle(SubmitFormCommand {
            website_id: WebsiteId::from_uuid(website_id),
            data: request.data,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(submission)))
}

/// GET /api/analytics/:website_id
pub async fn get_stats(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(website_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .get_stats_handler()
        .handle(GetStatsQuery {
            user_id: caller.user_id,
            website_id: WebsiteId::from_uuid(website_id),
        })
        .await?;

    Ok(Json(stats))
}
