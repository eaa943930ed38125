use tracing::info;

use crate::observer::error::ObserverError;
use crate::observer::traits::UserEventObserver;
use crate::types::{UserEvent, DISPLAY_TIMESTAMP};

/// Writes every created user to the log
#[derive(Debug, Default)]
pub struct UserCreatedLogger;

impl UserEventObserver for UserCreatedLogger {
    fn name(&self) -> &'static str {
        "user_created_logger"
    }

    fn on_user_created(&self, event: &UserEvent) -> Result<(), ObserverError> {
        info!(
            username = %event.username,
            email = %event.email,
            age = event.age,
            timestamp = %event.timestamp.format(DISPLAY_TIMESTAMP),
            "New user created"
        );
        Ok(())
    }
}
