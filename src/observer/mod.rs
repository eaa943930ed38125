// Observer system for user lifecycle events.
// Observers are registered once at startup and invoked synchronously, in
// registration order, on the task that publishes.

pub mod error;
pub mod implementations;
pub mod notifier;
pub mod traits;

pub use error::ObserverError;
pub use implementations::UserCreatedLogger;
pub use notifier::{EventNotifier, EventNotifierBuilder, PublishReport};
pub use traits::UserEventObserver;
