use sensord_sensor::{CapabilityKey, ProviderDescriptor, QueryReply, Reading, Report, SensorModule};
use tracing::debug;

const NAME: &str = "heartbeat";
const PRIORITY: i32 = 10;

pub fn descriptor() -> ProviderDescriptor {
    ProviderDescriptor::new(NAME, NAME).with_query(|| Some(QueryReply::new(Heartbeat::default(), PRIORITY)))
}

/// Emits an increasing beat counter on every sample.
#[derive(Debug, Default)]
struct Heartbeat {
    beats: u64,
}

impl SensorModule for Heartbeat {
    fn sample(&mut self) -> Result<Vec<Reading>, sensord_sensor::ModuleError> {
        self.beats += 1;
        Ok(vec![Reading::now(NAME, CapabilityKey::new(NAME), "beat", self.beats)])
    }

    fn log(&mut self, report: &Report) {
        debug!(origin = %report.origin, beats = report.readings.len(), "heartbeat received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beats_increase() {
        let mut heartbeat = Heartbeat::default();
        heartbeat.init().unwrap();
        let values: Vec<_> = (0..3).map(|_| heartbeat.sample().unwrap()[0].value.clone()).collect();
        assert_eq!(values, vec![serde_json::json!(1), serde_json::json!(2), serde_json::json!(3)]);
    }
}
