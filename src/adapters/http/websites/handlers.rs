//! Website endpoint handlers.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use super::dto::{
    AddPageRequest, CreateWebsiteRequest, UpdatePageRequest, WebsiteListResponse,
    WebsiteResponse, WebsiteSummary,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::websites::{
    AddPageCommand, CreateWebsiteCommand, DeleteWebsiteCommand, ExportWebsiteQuery,
    GetWebsiteQuery, ListWebsitesQuery, UpdatePageCommand,
};
use crate::domain::foundation::WebsiteId;
use crate::domain::subscription::ExportFormat;

/// GET /api/websites
pub async fn list_websites(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let websites = state
        .list_websites_handler()
        .handle(ListWebsitesQuery {
            user_id: caller.user_id,
        })
        .await?;

    Ok(Json(WebsiteListResponse {
        websites: websites.iter().map(WebsiteSummary::from).collect(),
    }))
}

/// POST /api/websites
pub async fn create_website(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<CreateWebsiteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let website = state
        .create_website_handler()
        .handle(CreateWebsiteCommand {
            user_id: caller.user_id,
            name: request.name,
            prompt: request.prompt,
            html: request.html,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(WebsiteResponse::from(&website))))
}

/// GET /api/websites/:id
pub async fn get_website(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let website = state
        .get_website_handler()
        .handle(GetWebsiteQuery {
            user_id: caller.user_id,
            website_id: WebsiteId::from_uuid(id),
        })
        .await?;

    Ok(Json(WebsiteResponse::from(&website)))
}

/// DELETE /api/websites/:id
pub async fn delete_website(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_website_handler()
        .handle(DeleteWebsiteCommand {
            user_id: caller.user_id,
            website_id: WebsiteId::from_uuid(id),
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/websites/:id/pages
pub async fn add_page(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<AddPageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let website = state
        .add_page_handler()
        .handle(AddPageCommand {
            user_id: caller.user_id,
            website_id: WebsiteId::from_uuid(id),
            path: request.path,
            html: request.html,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(WebsiteResponse::from(&website))))
}

/// PUT /api/websites/:id/pages/:index
pub async fn update_page(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(request): Json<UpdatePageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let website = state
        .update_page_handler()
        .handle(UpdatePageCommand {
            user_id: caller.user_id,
            website_id: WebsiteId::from_uuid(id),
            index,
            html: request.html,
        })
        .await?;

    Ok(Json(WebsiteResponse::from(&website)))
}

/// GET /api/websites/:id/export/:format
///
/// Responds with the document as an attachment.
pub async fn export_website(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((id, format)): Path<(Uuid, String)>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse()?;
    let document = state
        .export_website_handler()
        .handle(ExportWebsiteQuery {
            user_id: caller.user_id,
            website_id: WebsiteId::from_uuid(id),
            format,
        })
        .await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        document.file_name
    ))
    .map_err(ApiError::internal)?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(document.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.content,
    )
        .into_response())
}
