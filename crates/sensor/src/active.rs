//! The ordered set of modules that survived selection.

use crate::module::SensorModule;
use sensord_types::{CapabilityKey, ModuleStatus, Reading, Report};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};

/// A selected provider's module together with its resolved priority.
pub struct ActiveModule {
    provider: String,
    measures: CapabilityKey,
    priority: i32,
    sampling: bool,
    module: Box<dyn SensorModule>,
}

impl ActiveModule {
    pub(crate) fn new(provider: String, measures: CapabilityKey, priority: i32, module: Box<dyn SensorModule>) -> Self {
        Self {
            provider,
            measures,
            priority,
            sampling: true,
            module,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn measures(&self) -> &CapabilityKey {
        &self.measures
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether the module takes local samples. Cleared when `init` failed but the module was retained.
    pub fn is_sampling(&self) -> bool {
        self.sampling
    }

    pub fn status(&self) -> ModuleStatus {
        ModuleStatus::from_sampling(self.sampling)
    }

    pub(crate) fn module_mut(&mut self) -> &mut dyn SensorModule {
        self.module.as_mut()
    }

    pub(crate) fn disable_sampling(&mut self) {
        self.sampling = false;
    }

    /// Plain-data snapshot of this module.
    pub fn info(&self) -> ActiveModuleInfo {
        ActiveModuleInfo {
            provider: self.provider.clone(),
            capability: self.measures.clone(),
            priority: self.priority,
            sampling: self.sampling,
            status: self.status(),
        }
    }
}

impl fmt::Debug for ActiveModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveModule")
            .field("provider", &self.provider)
            .field("measures", &self.measures)
            .field("priority", &self.priority)
            .field("sampling", &self.sampling)
            .finish_non_exhaustive()
    }
}

/// Snapshot of an [`ActiveModule`] that can leave the framework's lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveModuleInfo {
    pub provider: String,
    pub capability: CapabilityKey,
    pub priority: i32,
    pub sampling: bool,
    pub status: ModuleStatus,
}

/// A `sample` call that returned an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleFailure {
    pub provider: String,
    pub error: String,
}

/// Result of sampling every sampling-enabled module once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleRound {
    pub readings: Vec<Reading>,
    pub failures: Vec<SampleFailure>,
}

/// Active modules in descending priority order.
///
/// The order is fixed once selection finishes; later changes only remove modules.
#[derive(Debug, Default)]
pub struct ActiveSet {
    modules: Vec<ActiveModule>,
}

impl ActiveSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, module: ActiveModule) {
        self.modules.push(module);
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut ActiveModule> {
        self.modules.get_mut(index)
    }

    pub(crate) fn remove(&mut self, index: usize) -> ActiveModule {
        self.modules.remove(index)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ActiveModule> {
        self.modules.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveModule> {
        self.modules.iter()
    }

    /// The module handling a capability, if one was selected.
    pub fn find(&self, capability: &CapabilityKey) -> Option<&ActiveModule> {
        self.modules.iter().find(|module| &module.measures == capability)
    }

    /// Snapshots of every module, in order.
    pub fn infos(&self) -> Vec<ActiveModuleInfo> {
        self.modules.iter().map(ActiveModule::info).collect()
    }

    /// Tell sampling modules to begin monitoring, highest priority first.
    pub fn start_all(&mut self) {
        for active in self.modules.iter_mut().filter(|m| m.is_sampling()) {
            trace!(provider = %active.provider, "starting sensor module");
            active.module.start();
        }
    }

    /// Tell sampling modules to stop monitoring.
    pub fn stop_all(&mut self) {
        for active in self.modules.iter_mut().filter(|m| m.is_sampling()) {
            trace!(provider = %active.provider, "stopping sensor module");
            active.module.stop();
        }
    }

    /// Sample every module whose sampling flag is set.
    pub fn sample_all(&mut self) -> SampleRound {
        let mut round = SampleRound::default();
        for active in self.modules.iter_mut().filter(|m| m.is_sampling()) {
            match active.module.sample() {
                Ok(readings) => {
                    trace!(provider = %active.provider, count = readings.len(), "sampled sensor module");
                    round.readings.extend(readings);
                }
                Err(error) => {
                    warn!(provider = %active.provider, error = %error, "sensor sample failed");
                    round.failures.push(SampleFailure {
                        provider: active.provider.clone(),
                        error: error.to_string(),
                    });
                }
            }
        }
        round
    }

    /// Hand a report from another process to the module owning its capability.
    ///
    /// Disabled modules receive reports too. Returns `false` when no module
    /// measures the report's capability.
    pub fn log(&mut self, report: &Report) -> bool {
        match self.modules.iter_mut().find(|m| m.measures == report.capability) {
            Some(active) => {
                trace!(
                    provider = %active.provider,
                    origin = %report.origin,
                    count = report.readings.len(),
                    "logging reported sensor data"
                );
                active.module.log(report);
                true
            }
            None => {
                debug!(capability = %report.capability, origin = %report.origin, "no active sensor for reported data");
                false
            }
        }
    }

    /// Finalize every module in order and empty the set.
    pub fn finalize_all(&mut self) {
        for mut active in self.modules.drain(..) {
            debug!(provider = %active.provider, "finalizing sensor module");
            active.module.finalize();
        }
    }
}
