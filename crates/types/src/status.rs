//! Status types for active sensor modules.

use serde::{Deserialize, Serialize};

/// Status of an active module after activation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    /// Module initialized and takes local samples.
    Sampling,
    /// Module failed to initialize but stays registered to receive reports.
    Disabled,
}

impl ModuleStatus {
    /// Derive the status from a module's sampling flag.
    pub fn from_sampling(sampling: bool) -> Self {
        if sampling { ModuleStatus::Sampling } else { ModuleStatus::Disabled }
    }

    /// Get the display icon for this status.
    pub fn icon(&self) -> &'static str {
        match self {
            ModuleStatus::Sampling => "✓",
            ModuleStatus::Disabled => "✗",
        }
    }

    /// Get the display text for this status.
    pub fn display(&self) -> &'static str {
        match self {
            ModuleStatus::Sampling => "Sampling",
            ModuleStatus::Disabled => "Disabled",
        }
    }
}
