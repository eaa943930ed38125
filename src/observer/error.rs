use thiserror::Error;

/// Failures raised by individual observers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObserverError {
    #[error("Observer '{observer}' failed: {message}")]
    Failed { observer: &'static str, message: String },

    #[error("Observer '{observer}' panicked: {message}")]
    Panicked { observer: &'static str, message: String },
}

impl ObserverError {
    pub fn failed(observer: &'static str, message: impl Into<String>) -> Self {
        ObserverError::Failed {
            observer,
            message: message.into(),
        }
    }

    pub fn observer(&self) -> &'static str {
        match self {
            ObserverError::Failed { observer, .. } | ObserverError::Panicked { observer, .. } => observer,
        }
    }
}
