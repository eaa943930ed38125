use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};

use super::pdf_response;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::UserRequest;
use crate::state::AppState;

/// POST /api/home/SendDataToDB
///
/// Stores the caller as a user and answers with their registration report.
///
/// Expected Input:
/// ```json
/// { "username": "alice", "password": "..." }
/// ```
///
/// `username` must match the bearer token identity (case-insensitive). On
/// success the body is the PDF, sent as an attachment.
pub async fn send_data_to_db(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    tracing::info!("Token username: {}", identity);

    let Json(request) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;

    let artifact = state.users.register(&identity, &request).await?;
    Ok(pdf_response(artifact))
}
