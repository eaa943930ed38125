// /api/home - registration and report downloads

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

use crate::report::{Artifact, PDF_CONTENT_TYPE};

pub mod download_pdf;
pub mod send_data;

pub use download_pdf::download_pdf;
pub use send_data::send_data_to_db;

/// Serve an artifact as a file download
pub(crate) fn pdf_response(artifact: Artifact) -> Response {
    let disposition = format!("attachment; filename={}", artifact.file_name);
    (
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}
