//! Data produced by sampling and exchanged between processes.

use crate::CapabilityKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single measurement taken by a sensor module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Name of the provider that produced the reading.
    pub provider: String,

    /// Capability the reading belongs to.
    pub capability: CapabilityKey,

    /// Metric name within the capability (for example `"rss_pages"`).
    pub metric: String,

    /// Measured value.
    pub value: Value,

    /// When the value was taken.
    pub taken_at: DateTime<Utc>,
}

impl Reading {
    /// Create a reading stamped with the current time.
    pub fn now(provider: impl Into<String>, capability: CapabilityKey, metric: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            provider: provider.into(),
            capability,
            metric: metric.into(),
            value: value.into(),
            taken_at: Utc::now(),
        }
    }
}

/// Readings sent by another process, to be logged by the module that owns the capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Identifier of the reporting process (host name, rank, ...).
    pub origin: String,

    /// Capability the readings belong to; used to route the report.
    pub capability: CapabilityKey,

    /// The readings themselves.
    pub readings: Vec<Reading>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_round_trips_through_json() {
        let report = Report {
            origin: "node-3".into(),
            capability: CapabilityKey::new("heartbeat"),
            readings: vec![Reading::now("heartbeat", CapabilityKey::new("heartbeat"), "beat", 7)],
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.readings[0].value, Value::from(7));
    }
}
