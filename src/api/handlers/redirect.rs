//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds `302 Found` with the stored URL in `Location`, after the click has
/// been counted. Unknown, reserved and malformed codes get `404` with the
/// standard error body.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.redirect_service.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target.url)]))
}
