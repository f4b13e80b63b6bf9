//! Sensor provider selection for sensord.
//!
//! Providers register a [`ProviderDescriptor`] in a [`ProviderCatalog`]. Each
//! descriptor names the capability it measures and may offer a query entry
//! point. [`SensorFramework::select`] runs the selection pipeline once:
//!
//! 1. query every descriptor in catalog order, dropping those that decline,
//! 2. keep at most one candidate per capability (strictly higher priority wins,
//!    ties keep the first one seen),
//! 3. order the survivors by descending priority (stable on ties),
//! 4. initialize them in that order, letting an [`InitFailurePolicy`] decide
//!    whether a module that fails to initialize is disabled or removed.
//!
//! The resulting [`ActiveSet`] is owned by the framework for the rest of the
//! process lifetime.

pub mod active;
pub mod catalog;
pub mod config;
pub mod error;
pub mod framework;
pub mod module;
pub mod select;
pub mod trail;

pub use active::{ActiveModule, ActiveModuleInfo, ActiveSet, SampleFailure, SampleRound};
pub use catalog::{ProviderCatalog, ProviderDescriptor, QueryFn, QueryReply};
pub use config::{ComponentFilter, ConfigError, SensorConfig};
pub use error::ModuleError;
pub use framework::{SelectionOutcome, SensorFramework, global};
pub use module::SensorModule;
pub use select::{Discard, FailureAction, InitFailurePolicy, RetainDisabled, RolePolicy, SelectionSummary};
pub use trail::{DecisionRecord, DecisionTrail};

pub use sensord_types::{CapabilityKey, ModuleStatus, ProcessRole, Reading, Report, SelectionEvent};
