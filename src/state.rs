use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{JwtError, JwtVerifier};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgUserStore, StoreError, UserStore};
use crate::mail::{DisabledMailer, MailSender, SmtpMailer};
use crate::observer::{EventNotifier, UserCreatedLogger};
use crate::report::ReportGenerator;
use crate::services::UserService;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Jwt(#[from] JwtError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything a handler needs, built once at startup and shared by clone
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub verifier: JwtVerifier,
    pub users: UserService,
    pub mailer: Arc<dyn MailSender>,
}

impl AppState {
    /// Wire the production collaborators from configuration
    pub fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        let verifier = JwtVerifier::new(&config.jwt)?;

        let store: Option<Arc<dyn UserStore>> = match &config.database.url {
            Some(url) => {
                let pool = DatabaseManager::connect_lazy(url, &config.database)?;
                Some(Arc::new(PgUserStore::new(pool)))
            }
            None => {
                warn!("DATABASE_URL is not set; SendDataToDB requests will fail");
                None
            }
        };

        let mailer: Arc<dyn MailSender> = match SmtpMailer::from_config(&config.smtp) {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                warn!("Mail relay disabled: {}", e);
                Arc::new(DisabledMailer)
            }
        };

        let notifier = EventNotifier::builder()
            .with_observer(Arc::new(UserCreatedLogger))
            .build();
        info!("Registered {} user event observer(s)", notifier.observer_count());

        let users = UserService::new(
            store,
            notifier,
            ReportGenerator::default(),
            config.database.statement_timeout(),
        );

        Ok(Self {
            config: Arc::new(config),
            verifier,
            users,
            mailer,
        })
    }
}
