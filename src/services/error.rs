use thiserror::Error;

use crate::database::StoreError;
use crate::mail::MailError;
use crate::report::ArtifactError;

/// Everything that can end a request early
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Mail(#[from] MailError),
}
