use crate::active::ActiveModule;
use crate::module::SensorModule;
use sensord_types::CapabilityKey;
use std::fmt;

/// A provider that answered its query, pending conflict resolution.
///
/// The working set is its only owner; losing a conflict drops it.
pub(crate) struct Candidate {
    pub(crate) provider: String,
    pub(crate) measures: CapabilityKey,
    pub(crate) priority: i32,
    pub(crate) module: Box<dyn SensorModule>,
}

impl Candidate {
    pub(crate) fn into_active(self) -> ActiveModule {
        ActiveModule::new(self.provider, self.measures, self.priority, self.module)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("provider", &self.provider)
            .field("measures", &self.measures)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
