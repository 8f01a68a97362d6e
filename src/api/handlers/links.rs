//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "code": "promo1" }
/// ```
///
/// `code` is optional. Without it a random 6-8 character code is generated.
///
/// # Response Codes
///
/// - **201 Created**: link stored, body is the link
/// - **400 Bad Request**: `invalid_url`, `invalid_code`, `reserved_code`, `invalid_request`
/// - **409 Conflict**: `code_taken`
/// - **503 Service Unavailable**: `storage_unavailable`, `code_space_exhausted`
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(request) = payload?;

    let view = state
        .link_service
        .create_link(request.url.as_deref().unwrap_or_default(), request.code)
        .await?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns one link with its click statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// Reading a link does not count as a click.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let view = state.link_service.get_link(&code).await?;

    Ok(Json(view.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Response Codes
///
/// - **200 OK**: `{"message": "Link deleted"}`
/// - **404 Not Found**: no such code
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteLinkResponse::deleted()))
}
