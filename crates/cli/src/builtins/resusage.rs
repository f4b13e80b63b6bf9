use sensord_sensor::{CapabilityKey, ModuleError, ProviderDescriptor, QueryReply, Reading, Report, SensorModule};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const NAME: &str = "resusage";
const MEASURES: &str = "procresource";
const PRIORITY: i32 = 20;
const STATM: &str = "/proc/self/statm";

pub fn descriptor() -> ProviderDescriptor {
    ProviderDescriptor::new(NAME, MEASURES).with_query(|| Some(QueryReply::new(ResUsage::new(STATM), PRIORITY)))
}

/// Memory usage of this process, read from `statm`.
#[derive(Debug)]
struct ResUsage {
    statm: PathBuf,
}

impl ResUsage {
    fn new(statm: impl Into<PathBuf>) -> Self {
        Self { statm: statm.into() }
    }

    fn read_pages(&self) -> Result<(u64, u64), ModuleError> {
        let content = fs::read_to_string(&self.statm)?;
        let mut fields = content.split_whitespace().map(str::parse::<u64>);
        match (fields.next(), fields.next()) {
            (Some(Ok(size)), Some(Ok(resident))) => Ok((size, resident)),
            _ => Err(ModuleError::failed(format!("unexpected statm contents: {}", content.trim()))),
        }
    }
}

impl SensorModule for ResUsage {
    fn init(&mut self) -> Result<(), ModuleError> {
        if !self.statm.exists() {
            return Err(ModuleError::unavailable(self.statm.display().to_string(), "procfs is not mounted"));
        }
        Ok(())
    }

    fn sample(&mut self) -> Result<Vec<Reading>, ModuleError> {
        let (size, resident) = self.read_pages()?;
        let capability = CapabilityKey::new(MEASURES);
        Ok(vec![
            Reading::now(NAME, capability.clone(), "size_pages", size),
            Reading::now(NAME, capability, "resident_pages", resident),
        ])
    }

    fn log(&mut self, report: &Report) {
        for reading in &report.readings {
            debug!(origin = %report.origin, metric = %reading.metric, value = %reading.value, "resource usage reported");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_fails_without_statm() {
        let dir = tempdir().unwrap();
        let mut module = ResUsage::new(dir.path().join("statm"));
        assert!(matches!(module.init(), Err(ModuleError::Unavailable { .. })));
    }

    #[test]
    fn samples_size_and_resident_pages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("statm");
        fs::write(&path, "1200 300 90 5 0 400 0\n").unwrap();
        let mut module = ResUsage::new(&path);

        module.init().unwrap();
        let readings = module.sample().unwrap();

        let values: Vec<_> = readings.iter().map(|r| (r.metric.as_str(), r.value.clone())).collect();
        assert_eq!(values, vec![("size_pages", serde_json::json!(1200)), ("resident_pages", serde_json::json!(300))]);
    }

    #[test]
    fn garbage_statm_is_a_sample_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("statm");
        fs::write(&path, "n/a").unwrap();
        assert!(ResUsage::new(&path).sample().is_err());
    }
}
