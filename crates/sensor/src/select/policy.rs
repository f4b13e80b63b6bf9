//! What to do with a module whose `init` failed.

use crate::ModuleError;
use sensord_types::{CapabilityKey, ProcessRole};

/// Outcome chosen by an [`InitFailurePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Keep the module registered with sampling turned off.
    Disable,
    /// Remove the module from the active set and release it.
    Remove,
}

/// Decides the fate of a module that failed to initialize.
pub trait InitFailurePolicy: Send + Sync {
    fn on_init_failure(&self, provider: &str, capability: &CapabilityKey, error: &ModuleError) -> FailureAction;
}

/// Role-driven policy: the coordinator keeps failed modules so it can still
/// log data other processes report; every other role drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    role: ProcessRole,
}

impl RolePolicy {
    pub fn new(role: ProcessRole) -> Self {
        Self { role }
    }
}

impl InitFailurePolicy for RolePolicy {
    fn on_init_failure(&self, _provider: &str, _capability: &CapabilityKey, _error: &ModuleError) -> FailureAction {
        if self.role.is_coordinator() { FailureAction::Disable } else { FailureAction::Remove }
    }
}

/// Always keep failed modules, disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetainDisabled;

impl InitFailurePolicy for RetainDisabled {
    fn on_init_failure(&self, _provider: &str, _capability: &CapabilityKey, _error: &ModuleError) -> FailureAction {
        FailureAction::Disable
    }
}

/// Always remove failed modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl InitFailurePolicy for Discard {
    fn on_init_failure(&self, _provider: &str, _capability: &CapabilityKey, _error: &ModuleError) -> FailureAction {
        FailureAction::Remove
    }
}

impl<F> InitFailurePolicy for F
where
    F: Fn(&str, &CapabilityKey, &ModuleError) -> FailureAction + Send + Sync,
{
    fn on_init_failure(&self, provider: &str, capability: &CapabilityKey, error: &ModuleError) -> FailureAction {
        self(provider, capability, error)
    }
}
