use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info};

use crate::database::{StoreError, UserStore};
use crate::observer::EventNotifier;
use crate::report::{Artifact, ArtifactError, ReportGenerator};
use crate::types::UserEvent;

use super::error::RequestError;
use super::validation::{ensure_identity_matches, validate_registration, UserRequest};

/// Authenticated write + report generation.
///
/// Steps run strictly in order: validate, insert, publish, render. A failure
/// at any step ends the request; nothing is retried.
#[derive(Clone)]
pub struct UserService {
    store: Option<Arc<dyn UserStore>>,
    notifier: EventNotifier,
    reports: ReportGenerator,
    store_timeout: Duration,
}

impl UserService {
    pub fn new(
        store: Option<Arc<dyn UserStore>>,
        notifier: EventNotifier,
        reports: ReportGenerator,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            notifier,
            reports,
            store_timeout,
        }
    }

    pub fn store(&self) -> Option<&Arc<dyn UserStore>> {
        self.store.as_ref()
    }

    /// Persist the caller as a user and return their registration report
    pub async fn register(&self, identity: &str, request: &UserRequest) -> Result<Artifact, RequestError> {
        let username = validate_registration(identity, request)?;
        info!("SendDataToDB started with user details: {}", username);

        let store = self.store.as_ref().ok_or_else(|| {
            error!("Database connection string not found");
            RequestError::Configuration("Database connection string is missing".to_string())
        })?;

        let event = UserEvent::registration(username, Local::now());
        info!("Created user event: {:?}", event);

        info!("Opening database connection...");
        match timeout(self.store_timeout, store.insert_user(&event.to_record())).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("Database error: {}", e);
                return Err(e.into());
            }
            Err(_) => {
                error!("Database insert timed out after {:?}", self.store_timeout);
                return Err(StoreError::Timeout(self.store_timeout).into());
            }
        }

        info!("Database operation successful. Triggering event...");
        let report = self.notifier.publish(&event);
        if !report.is_clean() {
            error!("{} observer(s) failed for user '{}'", report.failures.len(), event.username);
        }

        let reports = self.reports.clone();
        let artifact = run_blocking(move || reports.user_report(&event)).await?;

        info!("User {} successfully saved to database", username);
        Ok(artifact)
    }

    /// Name/date sheet for the caller's own username
    pub async fn download_summary(&self, identity: &str, username: &str) -> Result<Artifact, RequestError> {
        ensure_identity_matches(identity, username)?;

        let reports = self.reports.clone();
        let username = username.to_string();
        let artifact = run_blocking(move || reports.download_summary(&username)).await?;
        Ok(artifact)
    }
}

/// Temp-file I/O stays off the async workers
async fn run_blocking<F>(render: F) -> Result<Artifact, ArtifactError>
where
    F: FnOnce() -> Result<Artifact, ArtifactError> + Send + 'static,
{
    tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| ArtifactError::Task(e.to_string()))?
}
