use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A GeoJSON Point geometry with `[longitude, latitude]` coordinates.
///
/// Coordinates always follow the GeoJSON axis order (lon, lat). The value
/// is immutable once constructed.
///
/// # Examples
///
/// ```
/// use stationmap_types::point::PointGeometry;
///
/// let p = PointGeometry::new(24.9384, 60.1699);
/// assert_eq!(p.coordinates(), [24.9384, 60.1699]);
/// assert_eq!(p.lon(), 24.9384);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointGeometry {
    coordinates: [f64; 2],
}

impl PointGeometry {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self {
            coordinates: [lon, lat],
        }
    }

    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn coordinates(&self) -> [f64; 2] {
        self.coordinates
    }

    /// Convert into a `geo::Point` (x = lon, y = lat).
    pub fn to_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lon(), self.lat())
    }
}

impl From<geo::Point<f64>> for PointGeometry {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.x(), point.y())
    }
}

impl From<geo::Coord<f64>> for PointGeometry {
    fn from(coord: geo::Coord<f64>) -> Self {
        Self::new(coord.x, coord.y)
    }
}

impl Serialize for PointGeometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Point", 2)?;
        state.serialize_field("type", "Point")?;
        state.serialize_field("coordinates", &self.coordinates)?;
        state.end()
    }
}

#[derive(Deserialize)]
struct RawPoint {
    #[serde(rename = "type")]
    kind: String,
    coordinates: [f64; 2],
}

impl<'de> Deserialize<'de> for PointGeometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPoint::deserialize(deserializer)?;
        if raw.kind != "Point" {
            return Err(D::Error::custom(format!(
                "expected geometry type \"Point\", got \"{}\"",
                raw.kind
            )));
        }
        Ok(Self {
            coordinates: raw.coordinates,
        })
    }
}
