use crate::observer::error::ObserverError;
use crate::types::UserEvent;

/// Subscriber to user events.
///
/// Invoked synchronously on the publishing task, so implementations must not
/// block on I/O.
pub trait UserEventObserver: Send + Sync {
    /// Observer name for logging and debugging
    fn name(&self) -> &'static str;

    /// Called once per successfully persisted user
    fn on_user_created(&self, event: &UserEvent) -> Result<(), ObserverError>;
}
