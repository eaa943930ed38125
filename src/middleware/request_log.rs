use axum::{extract::Request, middleware::Next, response::Response};
use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

/// Logs the start and outcome of every request under a per-request id
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!("request", id = %request_id, method = %method, path = %path);

    async move {
        tracing::info!("Request {} {} started at {}", method, path, Utc::now());

        let response = next.run(request).await;
        let status = response.status();

        if status.is_server_error() {
            tracing::error!("Request {} {} failed with status {}", method, path, status);
        } else {
            tracing::info!(
                "Request {} {} completed with status {} at {}",
                method,
                path,
                status.as_u16(),
                Utc::now()
            );
        }

        response
    }
    .instrument(span)
    .await
}
