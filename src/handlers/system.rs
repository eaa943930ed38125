use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service metadata
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Islemler API",
            "version": version,
            "description": "User registration, PDF reports and mail relay",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "register": "POST /api/home/SendDataToDB (bearer token)",
                "download": "GET /api/home/DownloadPdf?username= (bearer token)",
                "mail": "POST /api/user/SendMail (bearer token)",
            }
        }
    }))
}

/// GET /health - store connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let outcome = match state.users.store() {
        Some(store) => store.ping().await.map_err(|e| e.to_string()),
        None => Err("database not configured".to_string()),
    };

    match outcome {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e
                }
            })),
        ),
    }
}
