use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error};

use crate::observer::error::ObserverError;
use crate::observer::traits::UserEventObserver;
use crate::types::UserEvent;

/// Outcome of a single publish
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    pub failures: Vec<ObserverError>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Collects observers during startup. Consumed by [`EventNotifierBuilder::build`],
/// after which the observer list can no longer change.
#[derive(Default)]
pub struct EventNotifierBuilder {
    observers: Vec<Arc<dyn UserEventObserver>>,
}

impl EventNotifierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: Arc<dyn UserEventObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> EventNotifier {
        EventNotifier {
            observers: self.observers.into(),
        }
    }
}

/// In-process publish point for user events.
///
/// Cheap to clone; the observer list is shared read-only between requests.
#[derive(Clone)]
pub struct EventNotifier {
    observers: Arc<[Arc<dyn UserEventObserver>]>,
}

impl EventNotifier {
    pub fn builder() -> EventNotifierBuilder {
        EventNotifierBuilder::new()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver `event` to every observer in registration order.
    ///
    /// Each observer runs inside its own failure boundary: an error or panic
    /// is logged and recorded in the report, and the remaining observers still
    /// run. Publishing itself never fails.
    pub fn publish(&self, event: &UserEvent) -> PublishReport {
        let mut report = PublishReport::default();

        for observer in self.observers.iter() {
            let name = observer.name();
            let outcome = catch_unwind(AssertUnwindSafe(|| observer.on_user_created(event)));

            let failure = match outcome {
                Ok(Ok(())) => {
                    debug!("Observer '{}' handled user event", name);
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(e)) => e,
                Err(payload) => ObserverError::Panicked {
                    observer: name,
                    message: panic_message(payload.as_ref()),
                },
            };

            error!("User event observer failed: {}", failure);
            report.failures.push(failure);
        }

        report
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::sync::Mutex;

    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl UserEventObserver for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn on_user_created(&self, _event: &UserEvent) -> Result<(), ObserverError> {
            self.log.lock().unwrap().push(self.name);
            Ok(())
        }
    }

    struct Failing;

    impl UserEventObserver for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn on_user_created(&self, _event: &UserEvent) -> Result<(), ObserverError> {
            Err(ObserverError::failed("failing", "sink unavailable"))
        }
    }

    struct Panicking;

    impl UserEventObserver for Panicking {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn on_user_created(&self, _event: &UserEvent) -> Result<(), ObserverError> {
            panic!("observer blew up")
        }
    }

    fn event() -> UserEvent {
        UserEvent::registration("alice", Local::now())
    }

    #[test]
    fn invokes_observers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let notifier = EventNotifier::builder()
            .with_observer(Arc::new(Recording { name: "first", log: log.clone() }))
            .with_observer(Arc::new(Recording { name: "second", log: log.clone() }))
            .with_observer(Arc::new(Recording { name: "third", log: log.clone() }))
            .build();

        let report = notifier.publish(&event());

        assert!(report.is_clean());
        assert_eq!(report.delivered, 3);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failing_observers_do_not_stop_the_rest() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let notifier = EventNotifier::builder()
            .with_observer(Arc::new(Failing))
            .with_observer(Arc::new(Panicking))
            .with_observer(Arc::new(Recording { name: "after", log: log.clone() }))
            .build();

        let report = notifier.publish(&event());

        assert_eq!(report.delivered, 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].observer(), "failing");
        assert_eq!(
            report.failures[1],
            ObserverError::Panicked {
                observer: "panicking",
                message: "observer blew up".to_string()
            }
        );
        assert_eq!(*log.lock().unwrap(), vec!["after"]);
    }

    #[test]
    fn empty_notifier_is_a_no_op() {
        let notifier = EventNotifier::builder().build();
        let report = notifier.publish(&event());
        assert_eq!(report, PublishReport::default());
        assert_eq!(notifier.observer_count(), 0);
    }
}
