//! Conflict resolution stage: one candidate per capability.

use super::candidate::Candidate;

/// Result of offering a candidate to the working set.
#[derive(Debug)]
pub(crate) enum Admission {
    /// No other candidate measures the same capability.
    Inserted,
    /// The candidate outranked the incumbent, which is handed back to be dropped.
    Replaced { evicted: Candidate },
    /// The incumbent has an equal or higher priority; the newcomer is handed back.
    Rejected { incumbent: String, loser: Candidate },
}

/// Candidates collected while querying, in discovery order.
#[derive(Debug, Default)]
pub(crate) struct WorkingSet {
    slots: Vec<Candidate>,
}

impl WorkingSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate.
    ///
    /// Eviction needs a strictly greater priority, so equal priorities keep the
    /// first provider discovered. A replacement takes over the evicted
    /// candidate's slot, keeping its position for tie ordering later.
    pub(crate) fn admit(&mut self, candidate: Candidate) -> Admission {
        let Some(index) = self.slots.iter().position(|slot| slot.measures == candidate.measures) else {
            self.slots.push(candidate);
            return Admission::Inserted;
        };

        if self.slots[index].priority < candidate.priority {
            let evicted = std::mem::replace(&mut self.slots[index], candidate);
            Admission::Replaced { evicted }
        } else {
            Admission::Rejected {
                incumbent: self.slots[index].provider.clone(),
                loser: candidate,
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn into_candidates(self) -> Vec<Candidate> {
        self.slots
    }
}
