//! Usage endpoint handlers.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::usage::{CheckExportQuery, GetUsageQuery};
use crate::domain::subscription::ExportFormat;

/// GET /api/usage
pub async fn get_usage(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .get_usage_handler()
        .handle(GetUsageQuery {
            user_id: caller.user_id,
            email: caller.email,
        })
        .await?;

    Ok(Json(snapshot))
}

/// GET /api/usage/export/:format
pub async fn check_export(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(format): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let format: ExportFormat = format.parse()?;
    let permission = state
        .check_export_handler()
        .handle(CheckExportQuery {
            user_id: caller.user_id,
            format,
        })
        .await?;

    Ok(Json(permission))
}
