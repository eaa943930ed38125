mod common;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use common::{body_json, get, jwt_config, post_json, token_for, TestApp};
use islemler_api::auth::{generate_jwt, Audience, Claims};

#[tokio::test]
async fn root_and_health_are_public() {
    let app = TestApp::new();

    let res = app.send(get("/", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["success"], true);

    let res = app.send(get("/health", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["database"], "ok");
}

#[tokio::test]
async fn health_is_degraded_without_store() {
    let app = TestApp::builder().without_store().build();

    let res = app.send(get("/health", None)).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(res).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = TestApp::new();

    let res = app
        .send(post_json("/api/home/SendDataToDB", None, json!({"username": "alice", "password": "pw"})))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(res).await;
    assert_eq!(body["code"], "UNAUTHORIZED");

    let res = app.send(get("/api/home/DownloadPdf?username=alice", None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    assert!(app.rows().is_empty());
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = TestApp::new();

    let res = app
        .send(get("/api/home/DownloadPdf?username=alice", Some("not-a-jwt")))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_another_audience_is_rejected() {
    let app = TestApp::new();

    let mut other = jwt_config();
    other.audience = "somebody-else".to_string();
    let token = generate_jwt(&Claims::new("alice", &other), &other).unwrap();

    let res = app
        .send(get("/api/home/DownloadPdf?username=alice", Some(&token)))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = TestApp::new();

    let config = jwt_config();
    let claims = Claims::with_lifetime("alice", &config, Duration::seconds(-5)).unwrap();
    let token = generate_jwt(&claims, &config).unwrap();

    let res = app
        .send(get("/api/home/DownloadPdf?username=alice", Some(&token)))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_without_identity_is_unauthenticated() {
    let app = TestApp::new();

    let config = jwt_config();
    let mut claims = Claims::new("alice", &config);
    claims.sub = None;
    claims.name = None;
    let token = generate_jwt(&claims, &config).unwrap();

    let res = app
        .send(post_json(
            "/api/home/SendDataToDB",
            Some(&token),
            json!({"username": "alice", "password": "pw"}),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(app.rows().is_empty());
}

#[tokio::test]
async fn valid_token_passes_the_verifier() {
    let app = TestApp::new();
    let token = token_for("alice");

    let res = app
        .send(get("/api/home/DownloadPdf?username=alice", Some(&token)))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn token_with_audience_list_is_accepted() {
    let app = TestApp::new();

    let config = jwt_config();
    let mut claims = Claims::new("alice", &config);
    claims.aud = Audience::Many(vec!["reporting".to_string(), config.audience.clone()]);
    let token = generate_jwt(&claims, &config).unwrap();

    let res = app
        .send(get("/api/home/DownloadPdf?username=alice", Some(&token)))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}
