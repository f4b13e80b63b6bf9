//! Events describing what happened to each provider during selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One decision taken about a provider while the selection pipeline ran.
///
/// The sequence of events recorded for a provider is enough to explain why it
/// is (or is not) active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Provider has no query entry point and was never considered.
    SkippedNoQuery,
    /// Provider declined: no module returned (`priority` is `None`) or a negative priority.
    Declined { priority: Option<i32> },
    /// Provider answered its query and joined the candidates.
    Queried { priority: i32 },
    /// Provider was a candidate but a higher-priority provider with the same capability replaced it.
    Evicted { replaced_by: String, priority: i32 },
    /// Provider lost to an existing candidate with the same capability and an equal or higher priority.
    Duplicate { kept: String, priority: i32 },
    /// Provider was placed at `position` in the final priority order.
    Ordered { position: usize, priority: i32 },
    /// Provider's module initialized successfully.
    Initialized,
    /// Module failed to initialize and stays registered with sampling turned off.
    Disabled { reason: String },
    /// Module failed to initialize and was released.
    Removed { reason: String },
}

impl fmt::Display for SelectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionEvent::SkippedNoQuery => write!(f, "skipped: no query function"),
            SelectionEvent::Declined { priority: None } => write!(f, "declined: query returned no module"),
            SelectionEvent::Declined { priority: Some(priority) } => write!(f, "declined with priority {priority}"),
            SelectionEvent::Queried { priority } => write!(f, "queried with priority {priority}"),
            SelectionEvent::Evicted { replaced_by, priority } => {
                write!(f, "evicted (priority {priority}) by {replaced_by}")
            }
            SelectionEvent::Duplicate { kept, priority } => {
                write!(f, "ignored (priority {priority}): {kept} already measures this")
            }
            SelectionEvent::Ordered { position, priority } => write!(f, "ordered at {position} with priority {priority}"),
            SelectionEvent::Initialized => write!(f, "initialized"),
            SelectionEvent::Disabled { reason } => write!(f, "init failed, sampling disabled: {reason}"),
            SelectionEvent::Removed { reason } => write!(f, "init failed, removed: {reason}"),
        }
    }
}
