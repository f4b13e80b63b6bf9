//! Bounded record of selection decisions.

use chrono::{DateTime, Utc};
use sensord_types::{CapabilityKey, SelectionEvent};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of records kept by a [`DecisionTrail`].
pub const DEFAULT_TRAIL_CAPACITY: usize = 256;

/// A single decision about a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// When the decision was taken.
    pub timestamp: DateTime<Utc>,

    /// Provider the decision is about.
    pub provider: String,

    /// Capability the provider measures.
    pub capability: CapabilityKey,

    /// What happened.
    #[serde(flatten)]
    pub event: SelectionEvent,
}

/// Ring buffer of [`DecisionRecord`]s; the oldest record is dropped once full.
#[derive(Debug, Clone)]
pub struct DecisionTrail {
    buffer: VecDeque<DecisionRecord>,
    max_size: usize,
}

impl DecisionTrail {
    /// Create a trail holding at most `max_size` records (at least one).
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            buffer: VecDeque::with_capacity(max_size.min(DEFAULT_TRAIL_CAPACITY)),
            max_size,
        }
    }

    /// Append a decision stamped with the current time.
    pub fn record(&mut self, provider: &str, capability: &CapabilityKey, event: SelectionEvent) {
        if self.buffer.len() >= self.max_size {
            self.buffer.pop_front();
        }
        self.buffer.push_back(DecisionRecord {
            timestamp: Utc::now(),
            provider: provider.to_string(),
            capability: capability.clone(),
            event,
        });
    }

    /// The most recent `count` records, oldest first.
    pub fn recent(&self, count: usize) -> Vec<DecisionRecord> {
        let start = self.buffer.len().saturating_sub(count);
        self.buffer.iter().skip(start).cloned().collect()
    }

    pub fn all(&self) -> Vec<DecisionRecord> {
        self.buffer.iter().cloned().collect()
    }

    /// Every retained record about one provider, in the order they were taken.
    pub fn for_provider(&self, provider: &str) -> Vec<DecisionRecord> {
        self.buffer.iter().filter(|record| record.provider == provider).cloned().collect()
    }

    /// The latest retained event about a provider.
    pub fn last_event(&self, provider: &str) -> Option<&SelectionEvent> {
        self.buffer.iter().rev().find(|record| record.provider == provider).map(|record| &record.event)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for DecisionTrail {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_CAPACITY)
    }
}
