// Shared types used across the codebase

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::database::models::UserRecord;

/// Age stored for every registered user; there is no input for it yet.
pub const DEFAULT_AGE: i32 = 33;

/// Timestamp format used in report tables, footers and log lines
pub const DISPLAY_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// In-process description of a user registration.
///
/// Built once per request right before the insert, then reused for the
/// notification and the generated report. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    pub username: String,
    pub email: String,
    pub age: i32,
    pub timestamp: DateTime<Local>,
}

impl UserEvent {
    /// Registration event for a freshly validated username
    pub fn registration(username: &str, timestamp: DateTime<Local>) -> Self {
        Self {
            username: username.to_string(),
            email: String::new(),
            age: DEFAULT_AGE,
            timestamp,
        }
    }

    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            name: self.username.clone(),
            email: self.email.clone(),
            age: self.age,
        }
    }
}
