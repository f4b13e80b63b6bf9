//! Shared value types for sensord.
//!
//! Everything in this crate is plain data: capability keys, process roles,
//! module status, readings exchanged between processes, and the events
//! recorded while providers are selected. Behavior lives in `sensord-sensor`.

mod capability;
mod event;
mod reading;
mod role;
mod status;

pub use capability::CapabilityKey;
pub use event::SelectionEvent;
pub use reading::{Reading, Report};
pub use role::{ParseRoleError, ProcessRole};
pub use status::ModuleStatus;
