use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The role the current process plays in a job.
///
/// Only [`ProcessRole::Coordinator`] is privileged: it aggregates data that
/// other processes report, so it keeps sensors around even when it cannot
/// sample locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessRole {
    /// Head process that collects reports from every other process.
    Coordinator,
    /// Per-node daemon.
    Daemon,
    /// Application process.
    #[default]
    Application,
    /// Short-lived tool attached to a running job.
    Tool,
}

impl ProcessRole {
    /// Whether this role must retain modules that failed to initialize.
    pub fn is_coordinator(&self) -> bool {
        matches!(self, ProcessRole::Coordinator)
    }

    /// Lowercase name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessRole::Coordinator => "coordinator",
            ProcessRole::Daemon => "daemon",
            ProcessRole::Application => "application",
            ProcessRole::Tool => "tool",
        }
    }
}

impl fmt::Display for ProcessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown process role '{0}' (expected coordinator, daemon, application or tool)")]
pub struct ParseRoleError(pub String);

impl FromStr for ProcessRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coordinator" | "hnp" => Ok(ProcessRole::Coordinator),
            "daemon" => Ok(ProcessRole::Daemon),
            "application" | "app" => Ok(ProcessRole::Application),
            "tool" => Ok(ProcessRole::Tool),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
