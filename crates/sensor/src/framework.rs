//! Process-wide sensor framework: the one-time selection guard and the active set it produces.

use crate::active::{ActiveModuleInfo, ActiveSet, SampleRound};
use crate::catalog::ProviderCatalog;
use crate::select::{self, InitFailurePolicy, SelectionSummary};
use crate::trail::{DEFAULT_TRAIL_CAPACITY, DecisionRecord, DecisionTrail};
use once_cell::sync::Lazy;
use sensord_types::Report;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

static GLOBAL: Lazy<SensorFramework> = Lazy::new(SensorFramework::new);

/// The framework instance shared by the whole process.
pub fn global() -> &'static SensorFramework {
    &GLOBAL
}

/// Result of calling [`SensorFramework::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Selection had already run (or is running); nothing was done.
    AlreadySelected,
    /// This call ran the pipeline.
    Completed(SelectionSummary),
}

impl SelectionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SelectionOutcome::Completed(_))
    }

    pub fn summary(&self) -> Option<&SelectionSummary> {
        match self {
            SelectionOutcome::Completed(summary) => Some(summary),
            SelectionOutcome::AlreadySelected => None,
        }
    }
}

/// Owns the active set and guarantees selection runs at most once.
///
/// Provider queries and `init` calls run without any framework lock held, so a
/// provider may call back into the framework; a nested `select` simply returns
/// [`SelectionOutcome::AlreadySelected`].
#[derive(Debug)]
pub struct SensorFramework {
    selected: AtomicBool,
    active: Mutex<ActiveSet>,
    trail: Mutex<DecisionTrail>,
    trail_capacity: usize,
}

impl Default for SensorFramework {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorFramework {
    pub fn new() -> Self {
        Self::with_trail_capacity(DEFAULT_TRAIL_CAPACITY)
    }

    /// Create a framework whose decision trail keeps at most `capacity` records.
    pub fn with_trail_capacity(capacity: usize) -> Self {
        Self {
            selected: AtomicBool::new(false),
            active: Mutex::new(ActiveSet::default()),
            trail: Mutex::new(DecisionTrail::new(capacity)),
            trail_capacity: capacity,
        }
    }

    /// Whether selection has run or is running.
    pub fn is_selected(&self) -> bool {
        self.selected.load(Ordering::Acquire)
    }

    /// Run the selection pipeline over `catalog`, once per framework.
    ///
    /// The guard is claimed before any provider is queried. Every later call,
    /// including one made while the first is still running, returns
    /// [`SelectionOutcome::AlreadySelected`] without touching the active set.
    pub fn select(&self, catalog: &ProviderCatalog, policy: &dyn InitFailurePolicy) -> SelectionOutcome {
        if self.selected.swap(true, Ordering::AcqRel) {
            debug!("sensor select: already selected");
            return SelectionOutcome::AlreadySelected;
        }

        let mut trail = DecisionTrail::new(self.trail_capacity);
        let (set, summary) = select::run(catalog, policy, &mut trail);

        *lock(&self.active) = set;
        *lock(&self.trail) = trail;
        SelectionOutcome::Completed(summary)
    }

    /// Snapshots of the active modules in priority order.
    pub fn modules(&self) -> Vec<ActiveModuleInfo> {
        lock(&self.active).infos()
    }

    pub fn start(&self) {
        lock(&self.active).start_all();
    }

    pub fn stop(&self) {
        lock(&self.active).stop_all();
    }

    /// Sample every sampling-enabled module once.
    pub fn sample(&self) -> SampleRound {
        lock(&self.active).sample_all()
    }

    /// Route a report from another process to the module measuring its capability.
    pub fn log(&self, report: &Report) -> bool {
        lock(&self.active).log(report)
    }

    /// Finalize and release every active module.
    ///
    /// The selection guard stays claimed, so a framework is never selected twice.
    pub fn shutdown(&self) {
        let mut active = lock(&self.active);
        info!(modules = active.len(), "sensor framework shutting down");
        active.finalize_all();
    }

    /// Every decision recorded by the selection run.
    pub fn trail(&self) -> Vec<DecisionRecord> {
        lock(&self.trail).all()
    }

    /// Decisions recorded about one provider.
    pub fn decisions_for(&self, provider: &str) -> Vec<DecisionRecord> {
        lock(&self.trail).for_provider(provider)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
