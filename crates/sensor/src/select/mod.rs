//! The selection pipeline.
//!
//! Modules:
//! - `query`: ask each provider whether it participates
//! - `conflict`: keep one candidate per capability
//! - `order`: stable descending-priority ordering
//! - `activate`: initialize in order and apply the failure policy
//! - `policy`: injectable init-failure strategies

mod activate;
mod candidate;
mod conflict;
mod order;
mod policy;
mod query;

pub use policy::{Discard, FailureAction, InitFailurePolicy, RetainDisabled, RolePolicy};

use crate::active::ActiveSet;
use crate::catalog::ProviderCatalog;
use crate::trail::DecisionTrail;
use conflict::{Admission, WorkingSet};
use query::QueryOutcome;
use sensord_types::{CapabilityKey, SelectionEvent};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

/// Counts of what happened during one selection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSummary {
    /// Descriptors visited.
    pub considered: usize,
    /// Descriptors without a query entry point.
    pub skipped: usize,
    /// Providers that declined.
    pub declined: usize,
    /// Providers that answered their query with a module and a non-negative priority.
    pub queried: usize,
    /// Newcomers rejected because an equal or higher priority candidate measured the same thing.
    pub duplicates: usize,
    /// Candidates replaced by a higher priority newcomer.
    pub evicted: usize,
    /// Modules whose `init` failed and that were kept with sampling off.
    pub disabled: usize,
    /// Modules whose `init` failed and that were released.
    pub removed: usize,
    /// Modules left in the active set.
    pub active: usize,
}

/// Emits a `tracing` event for each decision, records it in the trail and keeps the counts.
pub(crate) struct Decisions<'a> {
    trail: &'a mut DecisionTrail,
    summary: SelectionSummary,
}

impl<'a> Decisions<'a> {
    fn new(trail: &'a mut DecisionTrail) -> Self {
        Self {
            trail,
            summary: SelectionSummary::default(),
        }
    }

    pub(crate) fn note(&mut self, provider: &str, capability: &CapabilityKey, decision: SelectionEvent) {
        match &decision {
            SelectionEvent::SkippedNoQuery => {
                self.summary.skipped += 1;
                trace!(provider, capability = %capability, "sensor select: skipping component without query function");
            }
            SelectionEvent::Declined { priority } => {
                self.summary.declined += 1;
                trace!(provider, capability = %capability, priority = ?priority, "sensor select: component declined");
            }
            SelectionEvent::Queried { priority } => {
                self.summary.queried += 1;
                trace!(provider, capability = %capability, priority, "sensor select: query set priority");
            }
            SelectionEvent::Evicted { replaced_by, priority } => {
                self.summary.evicted += 1;
                debug!(provider, capability = %capability, priority, replaced_by = %replaced_by, "sensor select: replacing component, both measure the same capability");
            }
            SelectionEvent::Duplicate { kept, priority } => {
                self.summary.duplicates += 1;
                debug!(provider, capability = %capability, priority, kept = %kept, "sensor select: ignoring duplicate component with lower or equal priority");
            }
            SelectionEvent::Ordered { position, priority } => {
                trace!(provider, capability = %capability, priority, position, "sensor select: added module in priority order");
            }
            SelectionEvent::Initialized => {
                trace!(provider, capability = %capability, "sensor select: module initialized");
            }
            SelectionEvent::Disabled { reason } => {
                self.summary.disabled += 1;
                warn!(provider, capability = %capability, error = %reason, "sensor select: init failed, keeping module with sampling disabled");
            }
            SelectionEvent::Removed { reason } => {
                self.summary.removed += 1;
                warn!(provider, capability = %capability, error = %reason, "sensor select: init failed, removing module");
            }
        }
        self.trail.record(provider, capability, decision);
    }
}

/// Run query, conflict resolution, ordering and activation over `catalog`.
///
/// Never fails: every per-provider problem is absorbed and shows up in the
/// summary and the trail instead.
pub(crate) fn run(catalog: &ProviderCatalog, policy: &dyn InitFailurePolicy, trail: &mut DecisionTrail) -> (ActiveSet, SelectionSummary) {
    info!(providers = catalog.len(), "sensor select: auto-selecting components");
    let mut decisions = Decisions::new(trail);
    let mut working = WorkingSet::new();

    for descriptor in catalog.iter() {
        decisions.summary.considered += 1;
        let candidate = match query::query_provider(descriptor) {
            QueryOutcome::NoQuery => {
                decisions.note(descriptor.name(), descriptor.measures(), SelectionEvent::SkippedNoQuery);
                continue;
            }
            QueryOutcome::Declined { priority } => {
                decisions.note(descriptor.name(), descriptor.measures(), SelectionEvent::Declined { priority });
                continue;
            }
            QueryOutcome::Participating(candidate) => candidate,
        };

        let priority = candidate.priority;
        decisions.note(descriptor.name(), descriptor.measures(), SelectionEvent::Queried { priority });

        match working.admit(candidate) {
            Admission::Inserted => {}
            Admission::Replaced { evicted } => {
                decisions.note(
                    &evicted.provider,
                    &evicted.measures,
                    SelectionEvent::Evicted {
                        replaced_by: descriptor.name().to_string(),
                        priority: evicted.priority,
                    },
                );
            }
            Admission::Rejected { incumbent, loser } => {
                decisions.note(
                    &loser.provider,
                    &loser.measures,
                    SelectionEvent::Duplicate {
                        kept: incumbent,
                        priority: loser.priority,
                    },
                );
            }
        }
    }

    let mut active = ActiveSet::new();
    if working.is_empty() {
        debug!("sensor select: no components selected");
        return (active, decisions.summary);
    }

    debug!(candidates = working.len(), "sensor select: ordering candidates by priority");
    for (position, candidate) in order::by_descending_priority(working.into_candidates()).into_iter().enumerate() {
        decisions.note(
            &candidate.provider,
            &candidate.measures,
            SelectionEvent::Ordered {
                position,
                priority: candidate.priority,
            },
        );
        active.push(candidate.into_active());
    }

    activate::activate(&mut active, policy, &mut decisions);

    decisions.summary.active = active.len();
    let summary = decisions.summary;
    info!(
        active = summary.active,
        disabled = summary.disabled,
        removed = summary.removed,
        duplicates = summary.duplicates,
        "sensor select: selection complete"
    );
    (active, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProviderDescriptor, QueryReply};
    use crate::module::SensorModule;
    use crate::ModuleError;
    use sensord_types::ProcessRole;

    struct Idle;
    impl SensorModule for Idle {}

    struct Broken;
    impl SensorModule for Broken {
        fn init(&mut self) -> Result<(), ModuleError> {
            Err(ModuleError::failed("no hardware counters"))
        }
    }

    fn offering(name: &str, measures: &str, priority: i32) -> ProviderDescriptor {
        ProviderDescriptor::new(name, measures).with_query(move || Some(QueryReply::new(Idle, priority)))
    }

    fn names(set: &ActiveSet) -> Vec<(String, i32)> {
        set.iter().map(|m| (m.provider().to_string(), m.priority())).collect()
    }

    #[test]
    fn resolves_the_reference_scenario() {
        let catalog = ProviderCatalog::new()
            .with(offering("A", "cpu", 10))
            .with(offering("B", "cpu", 20))
            .with(offering("C", "mem", 5))
            .with(ProviderDescriptor::new("D", "disk"));
        let mut trail = DecisionTrail::default();

        let (set, summary) = run(&catalog, &RolePolicy::new(ProcessRole::Application), &mut trail);

        assert_eq!(names(&set), vec![("B".to_string(), 20), ("C".to_string(), 5)]);
        assert_eq!(summary.considered, 4);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.queried, 3);
        assert_eq!(summary.evicted, 1);
        assert_eq!(summary.active, 2);
        assert!(matches!(
            trail.last_event("A"),
            Some(SelectionEvent::Evicted { replaced_by, priority: 10 }) if replaced_by == "B"
        ));
        assert_eq!(trail.last_event("D"), Some(&SelectionEvent::SkippedNoQuery));
    }

    #[test]
    fn replacement_keeps_slot_for_tie_order() {
        let catalog = ProviderCatalog::new()
            .with(offering("cpu-low", "cpu", 10))
            .with(offering("mem", "mem", 20))
            .with(offering("cpu-high", "cpu", 20));
        let mut trail = DecisionTrail::default();

        let (set, _) = run(&catalog, &Discard, &mut trail);

        assert_eq!(names(&set), vec![("cpu-high".to_string(), 20), ("mem".to_string(), 20)]);
    }

    #[test]
    fn trail_explains_each_stage_for_a_winner() {
        let catalog = ProviderCatalog::new().with(offering("heartbeat", "heartbeat", 3));
        let mut trail = DecisionTrail::default();

        run(&catalog, &Discard, &mut trail);

        let events: Vec<_> = trail.for_provider("heartbeat").into_iter().map(|r| r.event).collect();
        assert_eq!(
            events,
            vec![
                SelectionEvent::Queried { priority: 3 },
                SelectionEvent::Ordered { position: 0, priority: 3 },
                SelectionEvent::Initialized,
            ]
        );
    }

    #[test]
    fn failed_init_under_discard_is_removed() {
        let catalog = ProviderCatalog::new()
            .with(ProviderDescriptor::new("broken", "cpu").with_query(|| Some(QueryReply::new(Broken, 9))))
            .with(offering("fine", "mem", 1));
        let mut trail = DecisionTrail::default();

        let (set, summary) = run(&catalog, &Discard, &mut trail);

        assert_eq!(names(&set), vec![("fine".to_string(), 1)]);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.active, 1);
        assert!(matches!(trail.last_event("broken"), Some(SelectionEvent::Removed { reason }) if reason == "no hardware counters"));
    }
}
