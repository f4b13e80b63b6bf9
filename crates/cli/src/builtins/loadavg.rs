use sensord_sensor::{CapabilityKey, ModuleError, ProviderDescriptor, QueryReply, Reading, SensorModule};
use std::fs;
use std::path::PathBuf;

const NAME: &str = "loadavg";
const MEASURES: &str = "procresource";
const PRIORITY: i32 = 5;
const LOADAVG: &str = "/proc/loadavg";

/// Measures the same capability as `resusage` at a lower priority, so it only wins when that one is filtered out.
pub fn descriptor() -> ProviderDescriptor {
    ProviderDescriptor::new(NAME, MEASURES).with_query(|| Some(QueryReply::new(LoadAvg::new(LOADAVG), PRIORITY)))
}

#[derive(Debug)]
struct LoadAvg {
    path: PathBuf,
}

impl LoadAvg {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SensorModule for LoadAvg {
    fn init(&mut self) -> Result<(), ModuleError> {
        fs::metadata(&self.path)?;
        Ok(())
    }

    fn sample(&mut self) -> Result<Vec<Reading>, ModuleError> {
        let content = fs::read_to_string(&self.path)?;
        let capability = CapabilityKey::new(MEASURES);
        let mut readings = Vec::with_capacity(3);
        for (metric, field) in ["load_1m", "load_5m", "load_15m"].into_iter().zip(content.split_whitespace()) {
            let value: f64 = field
                .parse()
                .map_err(|_| ModuleError::failed(format!("unexpected loadavg field: {field}")))?;
            readings.push(Reading::now(NAME, capability.clone(), metric, value));
        }
        Ok(readings)
    }
}
