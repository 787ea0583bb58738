//! Station features: one GeoJSON Feature per station row.

use crate::error::{Result, StationError};
use crate::location::{GeographyValue, parse_location};
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use stationmap_types::point::PointGeometry;
use stationmap_types::stats::{StationTripStatistics, TripSummary};
use std::fmt::Display;

/// Properties of a station feature.
///
/// `trip_statistics` is left out of the serialized object entirely when
/// absent; it is never written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationProperties {
    station_id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trip_statistics: Option<StationTripStatistics>,
}

impl StationProperties {
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trip_statistics(&self) -> Option<&StationTripStatistics> {
        self.trip_statistics.as_ref()
    }
}

/// A station as a GeoJSON Feature with a Point geometry.
///
/// The feature id is the station id. It is stored once and written to both
/// `id` and `properties.stationId`, so the two cannot diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct StationFeature {
    geometry: PointGeometry,
    properties: StationProperties,
}

impl StationFeature {
    pub fn id(&self) -> &str {
        &self.properties.station_id
    }

    pub fn geometry(&self) -> &PointGeometry {
        &self.geometry
    }

    pub fn properties(&self) -> &StationProperties {
        &self.properties
    }

    /// Convert into a `geojson::Feature`, e.g. to feed the Voronoi generator.
    pub fn to_geojson(&self) -> Result<geojson::Feature> {
        let properties = match serde_json::to_value(&self.properties)? {
            Value::Object(map) => map,
            other => {
                return Err(StationError::InputShape(format!(
                    "station properties serialized to a non-object: {}",
                    other
                )));
            }
        };

        Ok(geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(
                self.geometry.coordinates().to_vec(),
            ))),
            id: Some(geojson::feature::Id::String(self.id().to_string())),
            properties: Some(properties),
            foreign_members: None,
        })
    }
}

impl Serialize for StationFeature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Feature", 4)?;
        state.serialize_field("type", "Feature")?;
        state.serialize_field("id", self.id())?;
        state.serialize_field("geometry", &self.geometry)?;
        state.serialize_field("properties", &self.properties)?;
        state.end()
    }
}

/// Builds a station feature.
///
/// No validation is applied to `station_id` or `name`. Statistics are
/// attached exactly when `trip_statistics` is `Some`.
///
/// # Examples
///
/// ```
/// use stationmap::feature::build_feature;
/// use stationmap::PointGeometry;
///
/// let feature = build_feature("001", "Kaivopuisto", PointGeometry::new(24.9502, 60.1569), None);
/// assert_eq!(feature.id(), feature.properties().station_id());
///
/// let json = serde_json::to_value(&feature)?;
/// assert_eq!(json["id"], "001");
/// assert!(json["properties"].get("tripStatistics").is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn build_feature(
    station_id: impl Into<String>,
    name: impl Into<String>,
    location: PointGeometry,
    trip_statistics: Option<StationTripStatistics>,
) -> StationFeature {
    StationFeature {
        geometry: location,
        properties: StationProperties {
            station_id: station_id.into(),
            name: name.into(),
            trip_statistics,
        },
    }
}

/// One row of the `/stations` query, keys already in camelCase.
///
/// Counts and averages are accepted either as JSON numbers or as numeric
/// strings, which is how the database driver hands back `bigint` and
/// `numeric` columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRow {
    pub station_id: String,
    pub name: String,
    pub location: Value,
    #[serde(default, deserialize_with = "count_or_numeric_string")]
    pub departure_trips_count: Option<u64>,
    #[serde(default, deserialize_with = "float_or_numeric_string")]
    pub departure_duration_seconds_avg: Option<f64>,
    #[serde(default, deserialize_with = "float_or_numeric_string")]
    pub departure_distance_meters_avg: Option<f64>,
    #[serde(default, deserialize_with = "count_or_numeric_string")]
    pub return_trips_count: Option<u64>,
    #[serde(default, deserialize_with = "float_or_numeric_string")]
    pub return_duration_seconds_avg: Option<f64>,
    #[serde(default, deserialize_with = "float_or_numeric_string")]
    pub return_distance_meters_avg: Option<f64>,
}

impl StationRow {
    /// A row with only the required fields set.
    pub fn new(station_id: impl Into<String>, name: impl Into<String>, location: Value) -> Self {
        Self {
            station_id: station_id.into(),
            name: name.into(),
            location,
            departure_trips_count: None,
            departure_duration_seconds_avg: None,
            departure_distance_meters_avg: None,
            return_trips_count: None,
            return_duration_seconds_avg: None,
            return_distance_meters_avg: None,
        }
    }

    /// Decodes a row from its JSON form.
    ///
    /// # Errors
    ///
    /// `StationError::InputShape` when `stationId`, `name` or `location` is
    /// missing, or a field has the wrong type.
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| StationError::InputShape(format!("station row: {}", e)))
    }

    /// Trip statistics for the row, present only when the station has at
    /// least one departure or return.
    pub fn trip_statistics(&self) -> Option<StationTripStatistics> {
        let departures = self.departure_trips_count.unwrap_or(0);
        let returns = self.return_trips_count.unwrap_or(0);

        if departures == 0 && returns == 0 {
            return None;
        }

        Some(StationTripStatistics::new(
            TripSummary::new(
                departures,
                self.departure_duration_seconds_avg,
                self.departure_distance_meters_avg,
            ),
            TripSummary::new(
                returns,
                self.return_duration_seconds_avg,
                self.return_distance_meters_avg,
            ),
        ))
    }

    /// Parses the location and builds the station feature.
    pub fn into_feature(self) -> Result<StationFeature> {
        let trip_statistics = self.trip_statistics();
        let location = parse_location(&GeographyValue::from(self.location))?;
        Ok(build_feature(
            self.station_id,
            self.name,
            location,
            trip_statistics,
        ))
    }
}

/// Decodes an optional float sent as a JSON number or a numeric string.
pub(crate) fn float_or_numeric_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {}", n))),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| {
            D::Error::custom(format!("expected a numeric string, got {:?}", s))
        }),
        Some(other) => Err(D::Error::custom(format!(
            "expected a number or numeric string, got {}",
            other
        ))),
    }
}

/// Decodes an optional trip count. Whole-number floats such as `12.0` are
/// accepted; negative or fractional values are not.
pub(crate) fn count_or_numeric_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let invalid = |value: &dyn Display| {
        D::Error::custom(format!(
            "expected a non-negative whole trip count, got {}",
            value
        ))
    };

    let count = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(whole_count))
            .ok_or_else(|| invalid(&n))?,
        Some(Value::String(s)) => {
            let text = s.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_count))
                .ok_or_else(|| invalid(&format!("{:?}", s)))?
        }
        Some(other) => return Err(invalid(&other)),
    };

    Ok(Some(count))
}

fn whole_count(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn helsinki() -> PointGeometry {
        PointGeometry::new(24.9384, 60.1699)
    }

    fn stats() -> StationTripStatistics {
        StationTripStatistics::new(
            TripSummary::new(12, Some(840.0), Some(2300.0)),
            TripSummary::new(9, Some(780.5), Some(2150.0)),
        )
    }

    #[test]
    fn id_matches_station_id() {
        let feature = build_feature("042", "Rautatientori", helsinki(), None);
        let json = serde_json::to_value(&feature).unwrap();

        assert_eq!(json["type"], "Feature");
        assert_eq!(json["id"], "042");
        assert_eq!(json["properties"]["stationId"], "042");
        assert_eq!(json["geometry"]["coordinates"], json!([24.9384, 60.1699]));
    }

    #[test]
    fn statistics_key_absent_without_statistics() {
        let feature = build_feature("042", "Rautatientori", helsinki(), None);
        let json = serde_json::to_value(&feature).unwrap();
        let props = json["properties"].as_object().unwrap();

        assert!(!props.contains_key("tripStatistics"));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn statistics_included_verbatim() {
        let feature = build_feature("042", "Rautatientori", helsinki(), Some(stats()));
        assert_eq!(feature.properties().trip_statistics(), Some(&stats()));

        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["properties"]["tripStatistics"], serde_json::to_value(stats()).unwrap());
    }

    #[test]
    fn empty_strings_are_accepted() {
        let feature = build_feature("", "", helsinki(), None);
        assert_eq!(feature.id(), "");
    }

    #[test]
    fn row_without_trips_has_no_statistics() {
        let row = StationRow::from_json(json!({
            "stationId": "001",
            "name": "Kaivopuisto",
            "location": {"type": "Point", "coordinates": [24.9502, 60.1569]},
            "departureTripsCount": 0,
            "returnTripsCount": 0
        }))
        .unwrap();

        assert!(row.trip_statistics().is_none());
        let feature = row.into_feature().unwrap();
        assert!(feature.properties().trip_statistics().is_none());
    }

    #[test]
    fn row_with_returns_only_keeps_departure_side_empty() {
        let row = StationRow::from_json(json!({
            "stationId": "001",
            "name": "Kaivopuisto",
            "location": r#"{"type":"Point","coordinates":[24.9502,60.1569]}"#,
            "returnTripsCount": "4",
            "returnDurationSecondsAvg": "615.25",
            "returnDistanceMetersAvg": 1800.0
        }))
        .unwrap();

        let stats = row.trip_statistics().unwrap();
        assert_eq!(stats.departures, TripSummary::new(0, None, None));
        assert_eq!(stats.returns, TripSummary::new(4, Some(615.25), Some(1800.0)));
    }

    #[test]
    fn row_missing_station_id_is_an_input_shape_error() {
        let err = StationRow::from_json(json!({
            "name": "Kaivopuisto",
            "location": {"coordinates": [24.9502, 60.1569]}
        }))
        .unwrap_err();

        assert!(matches!(err, StationError::InputShape(ref msg) if msg.contains("stationId")));
    }

    #[test]
    fn row_with_negative_count_is_rejected() {
        let result = StationRow::from_json(json!({
            "stationId": "001",
            "name": "Kaivopuisto",
            "location": {"coordinates": [24.9502, 60.1569]},
            "departureTripsCount": -3
        }));
        assert!(result.is_err());
    }

    #[test]
    fn whole_number_float_counts_are_accepted() {
        let row = StationRow::from_json(json!({
            "stationId": "001",
            "name": "Kaivopuisto",
            "location": {"coordinates": [24.9502, 60.1569]},
            "departureTripsCount": 12.0,
            "returnTripsCount": "7.0"
        }))
        .unwrap();

        assert_eq!(row.departure_trips_count, Some(12));
        assert_eq!(row.return_trips_count, Some(7));
    }

    #[test]
    fn bad_counts_report_the_offending_value() {
        for (count, shown) in [
            (json!(12.5), "12.5"),
            (json!(-3), "-3"),
            (json!("many"), "many"),
            (json!(true), "true"),
        ] {
            let err = StationRow::from_json(json!({
                "stationId": "001",
                "name": "Kaivopuisto",
                "location": {"coordinates": [24.9502, 60.1569]},
                "departureTripsCount": count
            }))
            .unwrap_err();

            match err {
                StationError::InputShape(msg) => {
                    assert!(msg.contains("trip count"), "{}", msg);
                    assert!(msg.contains(shown), "{}", msg);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn bad_average_reports_the_offending_value() {
        let err = StationRow::from_json(json!({
            "stationId": "001",
            "name": "Kaivopuisto",
            "location": {"coordinates": [24.9502, 60.1569]},
            "departureDurationSecondsAvg": "slow"
        }))
        .unwrap_err();

        assert!(err.to_string().contains("\"slow\""));
    }

    #[test]
    fn row_with_bad_location_is_a_parse_error() {
        let row = StationRow::new("001", "Kaivopuisto", json!("POINT(24.95 60.15)"));
        assert!(matches!(row.into_feature(), Err(StationError::Parse { .. })));
    }

    #[test]
    fn geojson_conversion_keeps_id_and_properties() {
        let feature = build_feature("042", "Rautatientori", helsinki(), Some(stats()));
        let gj = feature.to_geojson().unwrap();

        assert_eq!(gj.id, Some(geojson::feature::Id::String("042".to_string())));
        let props = gj.properties.unwrap_or_default();
        assert_eq!(props["stationId"], "042");
        assert_eq!(props["tripStatistics"]["departures"]["tripsCount"], 12);
    }
}
