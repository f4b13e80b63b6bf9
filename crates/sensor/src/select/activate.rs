//! Activation stage: initialize modules in priority order.

use super::Decisions;
use super::policy::{FailureAction, InitFailurePolicy};
use crate::active::ActiveSet;
use sensord_types::SelectionEvent;

/// Initialize every module, highest priority first.
///
/// A failed `init` never stops the loop; the policy decides whether the
/// module stays (sampling off) or leaves the set.
pub(crate) fn activate(set: &mut ActiveSet, policy: &dyn InitFailurePolicy, decisions: &mut Decisions<'_>) {
    let mut index = 0;
    while let Some(active) = set.get_mut(index) {
        let error = match active.module_mut().init() {
            Ok(()) => {
                decisions.note(active.provider(), active.measures(), SelectionEvent::Initialized);
                index += 1;
                continue;
            }
            Err(error) => error,
        };

        let reason = error.to_string();
        match policy.on_init_failure(active.provider(), active.measures(), &error) {
            FailureAction::Disable => {
                active.disable_sampling();
                decisions.note(active.provider(), active.measures(), SelectionEvent::Disabled { reason });
                index += 1;
            }
            FailureAction::Remove => {
                let removed = set.remove(index);
                decisions.note(removed.provider(), removed.measures(), SelectionEvent::Removed { reason });
            }
        }
    }
}
