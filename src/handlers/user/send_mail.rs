use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::mail::OutgoingMail;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMailParams {
    #[serde(default)]
    pub recipient_email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// POST /api/user/SendMail?recipientEmail=..&subject=..&body=..
///
/// Relays an HTML email. The relay outcome is reported through the status
/// code; the response has no body.
pub async fn send_mail(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Query(params): Query<SendMailParams>,
) -> Result<StatusCode, ApiError> {
    if params.recipient_email.trim().is_empty() {
        return Err(ApiError::bad_request("recipientEmail is required"));
    }

    let mail = OutgoingMail {
        recipient: params.recipient_email,
        subject: params.subject,
        body: params.body,
    };

    state.mailer.send(&mail).await.map_err(|e| {
        tracing::error!("Error sending email for {}: {}", identity, e);
        ApiError::from(e)
    })?;

    tracing::info!("Mail sent to {} on behalf of {}", mail.recipient, identity);
    Ok(StatusCode::OK)
}
