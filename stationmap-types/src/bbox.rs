use crate::point::PointGeometry;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// An axis-aligned lon/lat rectangle used to clip Voronoi cells.
///
/// Serializes as the GeoJSON bbox array `[minLon, minLat, maxLon, maxLat]`.
/// Construction does not reorder the corners: a box with `min > max` on
/// either axis is kept as given so the caller's mistake can be reported
/// instead of silently corrected. Use [`BoundingBox::is_well_formed`] (or
/// the main crate's bounds validation) before relying on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    /// Western boundary
    pub min_lon: f64,
    /// Southern boundary
    pub min_lat: f64,
    /// Eastern boundary
    pub max_lon: f64,
    /// Northern boundary
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from its corners.
    ///
    /// # Arguments
    ///
    /// * `min_lon` - Minimum longitude (western boundary)
    /// * `min_lat` - Minimum latitude (southern boundary)
    /// * `max_lon` - Maximum longitude (eastern boundary)
    /// * `max_lat` - Maximum latitude (northern boundary)
    ///
    /// # Examples
    ///
    /// ```
    /// use stationmap_types::bbox::BoundingBox;
    ///
    /// let helsinki = BoundingBox::new(24.6, 60.0, 25.3, 60.4);
    /// assert_eq!(helsinki.to_array(), [24.6, 60.0, 25.3, 60.4]);
    /// ```
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// A zero-size box around a single point.
    pub fn from_point(point: &PointGeometry) -> Self {
        Self::new(point.lon(), point.lat(), point.lon(), point.lat())
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }

    /// True when all corners are finite and `min <= max` on both axes.
    pub fn is_well_formed(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
            && self.min_lon <= self.max_lon
            && self.min_lat <= self.max_lat
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point lies inside the box (edges included).
    pub fn contains(&self, point: &PointGeometry) -> bool {
        point.lon() >= self.min_lon
            && point.lon() <= self.max_lon
            && point.lat() >= self.min_lat
            && point.lat() <= self.max_lat
    }

    /// Move a coordinate onto the nearest location inside the box.
    pub fn clamp(&self, coord: geo::Coord<f64>) -> geo::Coord<f64> {
        geo::coord! {
            x: coord.x.max(self.min_lon).min(self.max_lon),
            y: coord.y.max(self.min_lat).min(self.max_lat)
        }
    }

    /// Expand the box by a given amount in all directions.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.min_lon - amount,
            self.min_lat - amount,
            self.max_lon + amount,
            self.max_lat + amount,
        )
    }

    /// The closed exterior ring of the box, counter-clockwise from the
    /// south-west corner.
    pub fn ring(&self) -> Vec<geo::Coord<f64>> {
        vec![
            geo::coord! { x: self.min_lon, y: self.min_lat },
            geo::coord! { x: self.max_lon, y: self.min_lat },
            geo::coord! { x: self.max_lon, y: self.max_lat },
            geo::coord! { x: self.min_lon, y: self.max_lat },
            geo::coord! { x: self.min_lon, y: self.min_lat },
        ]
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        b.to_array()
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

/// Object form of a bounding box, as sent in a `/stations` query filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsFilter {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl From<BoundsFilter> for BoundingBox {
    fn from(f: BoundsFilter) -> Self {
        Self::new(f.min_lon, f.min_lat, f.max_lon, f.max_lat)
    }
}

impl From<BoundingBox> for BoundsFilter {
    fn from(b: BoundingBox) -> Self {
        Self {
            min_lat: b.min_lat,
            min_lon: b.min_lon,
            max_lat: b.max_lat,
            max_lon: b.max_lon,
        }
    }
}

/// Share of the map viewport covered by floating panels on each side.
///
/// Every value is a fraction of the viewport span on that axis, so
/// `left: 0.3` means the left 30% of the map is hidden behind a panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportPadding {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
}

impl ViewportPadding {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Fraction of the viewport width left unobscured.
    pub fn visible_width(&self) -> f64 {
        1.0 - self.left - self.right
    }

    /// Fraction of the viewport height left unobscured.
    pub fn visible_height(&self) -> f64 {
        1.0 - self.top - self.bottom
    }
}
