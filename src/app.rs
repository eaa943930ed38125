use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::middleware::{jwt_auth_middleware, request_log_middleware};
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.cors_origins);

    Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        // Protected API
        .merge(protected_routes(&state))
        // Global middleware
        .layer(middleware::from_fn(request_log_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    use handlers::{home, user};

    Router::new()
        .route("/api/home/SendDataToDB", post(home::send_data_to_db))
        .route("/api/home/DownloadPdf", get(home::download_pdf))
        .route("/api/user/SendMail", post(user::send_mail))
        .route_layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            jwt_auth_middleware,
        ))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
