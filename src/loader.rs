//! Loading station coordinates from the JSON file produced by the
//! coordinate fetcher.
//!
//! The file maps station names to their id and WGS84 position:
//!
//! ```json
//! {
//!   "metadata": {"total_stations": 2},
//!   "stations": {
//!     "Kaivopuisto": {"stationId": "001", "lat": 60.155369, "lon": 24.950211},
//!     "Laivasillankatu": {"stationId": "002", "name": "Laivasillankatu", "lat": 60.160989, "lon": 24.956067}
//!   }
//! }
//! ```

use crate::collection::{StationFeatureCollection, build_collection};
use crate::config::Config;
use crate::error::{Result, StationError};
use crate::feature::{StationFeature, build_feature, float_or_numeric_string};
use crate::validation::validate_station;
use serde::Deserialize;
use serde_json::{Map, Value};
use stationmap_types::point::PointGeometry;
use std::collections::BTreeMap;
use std::path::Path;

/// A station with its id, display name and location.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub station_id: String,
    pub name: String,
    pub location: PointGeometry,
}

impl StationRecord {
    pub fn to_feature(&self) -> StationFeature {
        build_feature(
            self.station_id.clone(),
            self.name.clone(),
            self.location,
            None,
        )
    }
}

#[derive(Deserialize)]
struct CoordinatesFile {
    #[serde(default)]
    stations: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationEntry {
    station_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "float_or_numeric_string")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "float_or_numeric_string")]
    lon: Option<f64>,
}

/// Parses a station coordinates document.
///
/// Entries that are malformed or fail validation are skipped with a
/// warning. When two entries share a station id the one read last wins.
/// Records come back ordered by station id.
///
/// # Errors
///
/// `StationError::Parse` if the document itself is not valid JSON or not
/// an object.
pub fn parse_station_coordinates(json: &str, config: &Config) -> Result<Vec<StationRecord>> {
    let file: CoordinatesFile = serde_json::from_str(json)
        .map_err(|e| StationError::parse(json, format!("invalid station coordinates: {}", e)))?;

    let mut stations: BTreeMap<String, StationRecord> = BTreeMap::new();
    let mut skipped = 0usize;

    for (key, value) in file.stations {
        match station_record(&key, value, config) {
            Ok(record) => {
                stations.insert(record.station_id.clone(), record);
            }
            Err(e) => {
                log::warn!("Skipping invalid station {}: {}", key, e);
                skipped += 1;
            }
        }
    }

    log::info!("Loaded {} stations ({} skipped)", stations.len(), skipped);

    Ok(stations.into_values().collect())
}

/// Reads and parses a station coordinates file.
///
/// # Errors
///
/// `StationError::Io` if the file cannot be read, otherwise as
/// [`parse_station_coordinates`].
pub fn load_station_coordinates(
    path: impl AsRef<Path>,
    config: &Config,
) -> Result<Vec<StationRecord>> {
    let path = path.as_ref();
    log::info!("Loading station coordinates from {}", path.display());

    let json = std::fs::read_to_string(path)?;
    parse_station_coordinates(&json, config)
}

/// Station features for a set of records, in record order.
pub fn records_to_collection(records: &[StationRecord]) -> StationFeatureCollection {
    build_collection(records.iter().map(StationRecord::to_feature).collect())
}

fn station_record(key: &str, value: Value, config: &Config) -> Result<StationRecord> {
    let entry: StationEntry = serde_json::from_value(value)
        .map_err(|e| StationError::InputShape(format!("station entry: {}", e)))?;

    let missing = |field: &str| StationError::InvalidStation {
        station_id: entry.station_id.clone(),
        reason: format!("missing {}", field),
    };
    let lat = entry.lat.ok_or_else(|| missing("lat"))?;
    let lon = entry.lon.ok_or_else(|| missing("lon"))?;

    let record = StationRecord {
        name: entry.name.clone().unwrap_or_else(|| key.to_string()),
        location: PointGeometry::new(lon, lat),
        station_id: entry.station_id.clone(),
    };

    validate_station(
        &record.station_id,
        &record.name,
        &record.location,
        config.validate_coordinates,
    )?;

    Ok(record)
}
