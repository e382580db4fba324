//! Loading the stop directory from the geocoder's JSON output.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{Stop, StopDirectory, StopId};

use super::error::StopDirectoryError;

/// One stop as written by the stop geocoder.
///
/// Extra fields such as `stop_desc` are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopRecord {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

impl StopRecord {
    fn into_stop(self) -> Result<Stop, crate::domain::InvalidStop> {
        let stop_id = StopId::parse(&self.stop_id)?;
        Stop::new(stop_id, self.stop_name, self.stop_lat, self.stop_lon)
    }
}

/// Build a directory from stop records.
///
/// Any invalid record fails the whole load. Duplicate names are kept
/// (the first one wins) and logged.
pub fn build_directory(records: Vec<StopRecord>) -> Result<StopDirectory, StopDirectoryError> {
    let stops = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_stop()
                .map_err(|e| StopDirectoryError::Invalid {
                    index,
                    message: e.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (directory, shadowed) = StopDirectory::new(stops);
    for name in shadowed {
        warn!(stop_name = %name, "duplicate stop name; keeping the first entry");
    }
    Ok(directory)
}

/// Parse a JSON stop list.
pub fn parse_directory(json: &str) -> Result<StopDirectory, StopDirectoryError> {
    let records: Vec<StopRecord> =
        serde_json::from_str(json).map_err(|e| StopDirectoryError::Json {
            message: e.to_string(),
        })?;
    build_directory(records)
}

/// Load a JSON stop list from disk.
pub fn load_directory(path: impl AsRef<Path>) -> Result<StopDirectory, StopDirectoryError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let directory = parse_directory(&contents)?;
    info!(path = %path.display(), stops = directory.len(), "loaded stop directory");
    Ok(directory)
}
