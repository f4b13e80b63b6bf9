use sensord_sensor::{CapabilityKey, ModuleError, ProviderDescriptor, QueryReply, Reading, SensorModule};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::trace;

const NAME: &str = "file";
const PRIORITY: i32 = 15;

/// Environment variable naming the file to watch. The provider declines when it is unset.
pub const FILE_PATH_ENV: &str = "SENSORD_FILE_SENSOR_PATH";

pub fn descriptor() -> ProviderDescriptor {
    ProviderDescriptor::new(NAME, NAME).with_query(query)
}

fn query() -> Option<QueryReply> {
    let path = env::var(FILE_PATH_ENV).ok().filter(|path| !path.trim().is_empty())?;
    trace!(path = %path, "file sensor has a target");
    Some(QueryReply::new(FileWatch::new(path), PRIORITY))
}

/// Reports the size of one file.
#[derive(Debug)]
struct FileWatch {
    path: PathBuf,
}

impl FileWatch {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SensorModule for FileWatch {
    fn sample(&mut self) -> Result<Vec<Reading>, ModuleError> {
        let size = fs::metadata(&self.path)?.len();
        Ok(vec![Reading::now(NAME, CapabilityKey::new(NAME), "size_bytes", size)])
    }
}
