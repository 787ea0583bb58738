//! Station feature collections.

use crate::error::Result;
use crate::feature::{StationFeature, StationRow};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use stationmap_types::point::PointGeometry;

/// An ordered GeoJSON FeatureCollection of station features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationFeatureCollection {
    features: Vec<StationFeature>,
}

impl StationFeatureCollection {
    pub fn features(&self) -> &[StationFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Station locations in feature order.
    pub fn locations(&self) -> Vec<PointGeometry> {
        self.features.iter().map(|f| *f.geometry()).collect()
    }

    /// Convert into a `geojson::FeatureCollection`.
    pub fn to_geojson(&self) -> Result<geojson::FeatureCollection> {
        let features = self
            .features
            .iter()
            .map(StationFeature::to_geojson)
            .collect::<Result<Vec<_>>>()?;

        Ok(geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}

impl Serialize for StationFeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FeatureCollection", 2)?;
        state.serialize_field("type", "FeatureCollection")?;
        state.serialize_field("features", &self.features)?;
        state.end()
    }
}

/// Wraps features into a collection, keeping their order.
///
/// Nothing is sorted, deduplicated or validated.
pub fn build_collection(features: Vec<StationFeature>) -> StationFeatureCollection {
    StationFeatureCollection { features }
}

/// Turns query rows into a station collection in row order.
///
/// The first row that fails to convert aborts the whole collection and its
/// error is returned unchanged; skipping bad rows is up to the caller.
///
/// # Examples
///
/// ```
/// use stationmap::collection::collection_from_rows;
/// use stationmap::feature::StationRow;
/// use serde_json::json;
///
/// let rows = vec![
///     StationRow::new("002", "Laivasillankatu", json!({"coordinates": [24.956, 60.161]})),
///     StationRow::new("001", "Kaivopuisto", json!({"coordinates": [24.950, 60.156]})),
/// ];
///
/// let collection = collection_from_rows(rows)?;
/// assert_eq!(collection.features()[0].id(), "002");
/// # Ok::<(), stationmap::StationError>(())
/// ```
pub fn collection_from_rows<I>(rows: I) -> Result<StationFeatureCollection>
where
    I: IntoIterator<Item = StationRow>,
{
    let features = rows
        .into_iter()
        .map(StationRow::into_feature)
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Built station collection with {} features", features.len());

    Ok(build_collection(features))
}
