#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use tower::ServiceExt;

use islemler_api::app::app;
use islemler_api::auth::{generate_jwt, Claims, JwtVerifier};
use islemler_api::config::{AppConfig, JwtConfig};
use islemler_api::database::{StoreError, UserRecord, UserStore};
use islemler_api::mail::{MailError, MailSender, OutgoingMail};
use islemler_api::observer::{EventNotifier, ObserverError, UserEventObserver};
use islemler_api::report::ReportGenerator;
use islemler_api::services::UserService;
use islemler_api::state::AppState;
use islemler_api::types::UserEvent;

pub const TEST_KEY: &str = "integration-test-signing-key-0123456789";

pub fn test_config() -> AppConfig {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("JWT_KEY", TEST_KEY),
        ("JWT_ISSUER", "islemler-tests"),
        ("JWT_AUDIENCE", "islemler-clients"),
        ("DATABASE_STATEMENT_TIMEOUT_MS", "1000"),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).expect("test config")
}

pub fn jwt_config() -> JwtConfig {
    test_config().jwt
}

/// Valid bearer token for `user`
pub fn token_for(user: &str) -> String {
    let config = jwt_config();
    generate_jwt(&Claims::new(user, &config), &config).expect("token")
}

/// In-memory user table
#[derive(Default)]
pub struct MemoryStore {
    pub rows: Mutex<Vec<UserRecord>>,
    pub fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn rows(&self) -> Vec<UserRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// Records every mail it is asked to send
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

/// Collects published user events
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<UserEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<UserEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl UserEventObserver for RecordingObserver {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn on_user_created(&self, event: &UserEvent) -> Result<(), ObserverError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Option<Arc<MemoryStore>>,
    pub mailer: Arc<RecordingMailer>,
    pub observer: Arc<RecordingObserver>,
}

pub struct TestAppBuilder {
    store: Option<MemoryStore>,
    mailer: RecordingMailer,
}

impl TestAppBuilder {
    pub fn without_store(mut self) -> Self {
        self.store = None;
        self
    }

    pub fn failing_store(mut self) -> Self {
        self.store = Some(MemoryStore::failing());
        self
    }

    pub fn failing_mailer(mut self) -> Self {
        self.mailer.fail = true;
        self
    }

    pub fn build(self) -> TestApp {
        let config = test_config();
        let store = self.store.map(Arc::new);
        let mailer = Arc::new(self.mailer);
        let observer = Arc::new(RecordingObserver::default());

        let notifier = EventNotifier::builder()
            .with_observer(observer.clone())
            .build();

        let users = UserService::new(
            store.clone().map(|s| s as Arc<dyn UserStore>),
            notifier,
            ReportGenerator::default(),
            Duration::from_secs(1),
        );

        let state = AppState {
            verifier: JwtVerifier::new(&config.jwt).expect("verifier"),
            config: Arc::new(config),
            users,
            mailer: mailer.clone(),
        };

        TestApp {
            router: app(state),
            store,
            mailer,
            observer,
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            store: Some(MemoryStore::default()),
            mailer: RecordingMailer::default(),
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn rows(&self) -> Vec<UserRecord> {
        self.store.as_ref().map(|s| s.rows()).unwrap_or_default()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    post_raw(uri, token, body.to_string())
}

pub fn post_raw(uri: &str, token: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

/// Serve the router on a free local port and return its base url
pub async fn spawn_server(app: &TestApp) -> anyhow::Result<String> {
    use anyhow::Context;

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    let router = app.router.clone();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://127.0.0.1:{}", port))
}

/// Strings drawn on the first page of a PDF, in content-stream order
pub fn pdf_text(bytes: &[u8]) -> Vec<String> {
    let doc = lopdf::Document::load_mem(bytes).expect("valid pdf");
    let page_id = *doc.get_pages().get(&1).expect("first page");
    let content = doc.get_page_content(page_id).expect("page content");
    let content = lopdf::content::Content::decode(&content).expect("content stream");

    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(lopdf::Object::String(text, _)) => Some(String::from_utf8_lossy(text).into_owned()),
            _ => None,
        })
        .collect()
}
