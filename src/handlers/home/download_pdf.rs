use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use super::pdf_response;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadPdfParams {
    #[serde(default)]
    pub username: String,
}

/// GET /api/home/DownloadPdf?username=<name>
///
/// Name/date sheet for the caller. Any other username is refused.
pub async fn download_pdf(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Query(params): Query<DownloadPdfParams>,
) -> Result<Response, ApiError> {
    let artifact = state
        .users
        .download_summary(&identity, &params.username)
        .await?;
    Ok(pdf_response(artifact))
}
