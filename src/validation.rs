//! Validation for station coordinates and records.

use crate::error::{Result, StationError};
use stationmap_types::point::PointGeometry;

/// Validates a point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use stationmap::validation::validate_geographic_point;
/// use stationmap::PointGeometry;
///
/// let kaivopuisto = PointGeometry::new(24.9502, 60.1569);
/// assert!(validate_geographic_point(&kaivopuisto).is_ok());
///
/// // Swapped axes put latitude out of range
/// let swapped = PointGeometry::new(60.1569, 124.9502);
/// assert!(validate_geographic_point(&swapped).is_err());
/// ```
pub fn validate_geographic_point(point: &PointGeometry) -> Result<()> {
    let (lon, lat) = (point.lon(), point.lat());

    if !lon.is_finite() {
        return Err(StationError::InvalidCoordinate(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !lat.is_finite() {
        return Err(StationError::InvalidCoordinate(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(StationError::InvalidCoordinate(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(StationError::InvalidCoordinate(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    Ok(())
}

/// Validates the identifying fields and location of a station.
///
/// The id and name must contain something other than whitespace. The
/// location is range-checked only when `check_coordinates` is set.
pub fn validate_station(
    station_id: &str,
    name: &str,
    location: &PointGeometry,
    check_coordinates: bool,
) -> Result<()> {
    let invalid = |reason: String| StationError::InvalidStation {
        station_id: station_id.to_string(),
        reason,
    };

    if station_id.trim().is_empty() {
        return Err(invalid("station_id cannot be empty".to_string()));
    }

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty".to_string()));
    }

    if check_coordinates {
        validate_geographic_point(location).map_err(|e| match e {
            StationError::InvalidCoordinate(reason) => invalid(reason),
            other => other,
        })?;
    }

    Ok(())
}
