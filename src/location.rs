//! Normalizes database geography values into point geometries.
//!
//! Depending on driver configuration a PostGIS geography column comes back
//! either as GeoJSON text or as an already-decoded JSON object. The caller
//! wraps the raw value in a [`GeographyValue`], which makes that distinction
//! explicit before anything is parsed.

use crate::error::{Result, StationError};
use serde_json::{Map, Value};
use stationmap_types::point::PointGeometry;

/// A geography value as handed over by the row source.
#[derive(Debug, Clone, PartialEq)]
pub enum GeographyValue {
    /// JSON-encoded geometry text, e.g. the output of `ST_AsGeoJSON`.
    Text(String),
    /// A geometry object that has already been decoded.
    Structured(Value),
}

impl From<Value> for GeographyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => GeographyValue::Text(text),
            other => GeographyValue::Structured(other),
        }
    }
}

impl From<&str> for GeographyValue {
    fn from(text: &str) -> Self {
        GeographyValue::Text(text.to_string())
    }
}

impl From<String> for GeographyValue {
    fn from(text: String) -> Self {
        GeographyValue::Text(text)
    }
}

/// Parses a geography value into a canonical `PointGeometry`.
///
/// Both representations of the same coordinates produce the same point.
/// A third coordinate (altitude), if present, is dropped.
///
/// # Errors
///
/// `StationError::Parse` when the text is not valid JSON, the value is not
/// an object, `coordinates` is missing or holds fewer than two numbers, or
/// a `type` other than `"Point"` is declared.
///
/// # Examples
///
/// ```
/// use stationmap::location::{parse_location, GeographyValue};
/// use serde_json::json;
///
/// let text = GeographyValue::from(r#"{"type":"Point","coordinates":[24.9,60.2]}"#);
/// let object = GeographyValue::from(json!({"type": "Point", "coordinates": [24.9, 60.2]}));
///
/// assert_eq!(parse_location(&text)?, parse_location(&object)?);
/// # Ok::<(), stationmap::StationError>(())
/// ```
pub fn parse_location(value: &GeographyValue) -> Result<PointGeometry> {
    match value {
        GeographyValue::Text(text) => {
            let decoded: Value = serde_json::from_str(text)
                .map_err(|e| StationError::parse(text, format!("invalid JSON: {}", e)))?;
            point_from_value(&decoded)
        }
        GeographyValue::Structured(decoded) => point_from_value(decoded),
    }
}

fn point_from_value(value: &Value) -> Result<PointGeometry> {
    let object = value
        .as_object()
        .ok_or_else(|| StationError::parse(value.to_string(), "expected a geometry object"))?;

    if let Some(kind) = object.get("type")
        && kind.as_str() != Some("Point")
    {
        return Err(StationError::parse(
            value.to_string(),
            format!("geometry type must be \"Point\", got {}", kind),
        ));
    }

    let [lon, lat] = coordinate_pair(object)
        .map_err(|reason| StationError::parse(value.to_string(), reason))?;

    Ok(PointGeometry::new(lon, lat))
}

fn coordinate_pair(object: &Map<String, Value>) -> std::result::Result<[f64; 2], String> {
    let coords = object
        .get("coordinates")
        .ok_or("missing coordinates")?
        .as_array()
        .ok_or("coordinates must be an array")?;

    if coords.len() < 2 {
        return Err(format!(
            "coordinates must have at least 2 values, got {}",
            coords.len()
        ));
    }

    let lon = coords[0].as_f64().ok_or("longitude must be a number")?;
    let lat = coords[1].as_f64().ok_or("latitude must be a number")?;

    Ok([lon, lat])
}
