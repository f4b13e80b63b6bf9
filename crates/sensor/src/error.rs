//! Error types for sensor modules.

use thiserror::Error;

/// Errors a sensor module reports from its entry points.
///
/// None of these abort selection: an `init` failure is handed to the
/// [`InitFailurePolicy`](crate::InitFailurePolicy), a `sample` failure is
/// logged and counted.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("{resource} is unavailable: {reason}")]
    Unavailable { resource: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Failed { message: String },
}

impl ModuleError {
    /// Create an unavailable-resource error.
    pub fn unavailable(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed { message: message.into() }
    }
}
