//! The runtime entry points every sensor module exposes.

use crate::ModuleError;
use sensord_types::{Reading, Report};

/// Implementation handle returned by a provider's query.
///
/// Every method has a default so a module only implements what it needs. A
/// module without its own `init` is treated as initializing successfully.
pub trait SensorModule: Send {
    /// Prepare the module for sampling. Called once, in priority order, after selection.
    fn init(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Release whatever `init` acquired. Called once at framework shutdown.
    fn finalize(&mut self) {}

    /// Begin monitoring.
    fn start(&mut self) {}

    /// Stop monitoring.
    fn stop(&mut self) {}

    /// Take one round of measurements.
    fn sample(&mut self) -> Result<Vec<Reading>, ModuleError> {
        Ok(Vec::new())
    }

    /// Record readings reported by another process.
    ///
    /// Called even when local sampling is disabled.
    fn log(&mut self, _report: &Report) {}
}
