//! Voronoi tessellation of station points, clipped to a bounding box.
//!
//! Cells are computed in the plane, treating longitude and latitude as flat
//! Cartesian coordinates. At city scale the distortion is negligible and the
//! result lines up with what a web map draws; a geodesic tessellation would
//! produce visibly different cell shapes, so this is intentional.
//!
//! Each cell starts as the bounding rectangle and is clipped by the
//! perpendicular bisector half-plane of every other station, so unbounded
//! cells end at the box edges and every output ring is finite and closed.
//!
//! Degenerate input is resolved deterministically:
//!
//! - Coincident stations: the first one in input order owns the shared cell.
//!   Every later duplicate gets a collapsed ring, its location (clamped into
//!   the box) repeated four times.
//! - A station whose cell is clipped away entirely, which can only happen
//!   for stations outside the box, gets the same collapsed ring.
//! - Collinear stations need no special handling and produce strip cells.

use crate::bounds::{bounds_for_collection, validate_bounds};
use crate::collection::StationFeatureCollection;
use crate::config::Config;
use crate::error::{Result, StationError};
use geo::{Coord, LineString, Polygon};
use geojson::{Feature, FeatureCollection, Geometry, Value};
use stationmap_types::bbox::BoundingBox;

/// Vertices in a collapsed (zero-area) ring.
const COLLAPSED_RING_LEN: usize = 4;

/// Options for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiOptions {
    /// Clip region, `[minLon, minLat, maxLon, maxLat]`
    pub bounds: BoundingBox,
}

impl VoronoiOptions {
    pub fn new(bounds: BoundingBox) -> Self {
        Self { bounds }
    }
}

/// Computes one clipped Voronoi polygon per station point.
///
/// The output has the same length and order as `stations.features`, and
/// every output feature carries a copy of its station's `properties`. With a
/// single station the cell is the whole bounding box.
///
/// # Errors
///
/// - `StationError::InvalidBounds` if `options.bounds` is inverted or not finite
/// - `StationError::InputShape` if a feature has no Point geometry
///
/// # Examples
///
/// ```
/// use stationmap::voronoi::{generate, VoronoiOptions};
/// use stationmap::BoundingBox;
/// use geojson::FeatureCollection;
///
/// let stations: FeatureCollection = serde_json::from_str(r#"{
///     "type": "FeatureCollection",
///     "features": [
///         {"type": "Feature", "geometry": {"type": "Point", "coordinates": [24.8, 60.1]}, "properties": {"id": "001"}},
///         {"type": "Feature", "geometry": {"type": "Point", "coordinates": [25.0, 60.2]}, "properties": {"id": "002"}}
///     ]
/// }"#)?;
///
/// let cells = generate(&stations, &VoronoiOptions::new(BoundingBox::new(24.6, 60.0, 25.3, 60.4)))?;
/// assert_eq!(cells.features.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate(
    stations: &FeatureCollection,
    options: &VoronoiOptions,
) -> Result<FeatureCollection> {
    let bounds = options.bounds;
    validate_bounds(&bounds)?;

    let seeds = stations
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| seed(index, feature))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Generating Voronoi cells for {} stations within {:?}",
        seeds.len(),
        bounds.to_array()
    );

    let features = stations
        .features
        .iter()
        .enumerate()
        .map(|(index, station)| Feature {
            bbox: None,
            geometry: Some(Geometry::new(polygon_to_value(&cell(
                index, &seeds, &bounds,
            )))),
            id: None,
            properties: station.properties.clone(),
            foreign_members: None,
        })
        .collect();

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Voronoi cells for a station collection, clipped to the stations' own
/// extent grown by the configured padding ratio.
pub fn generate_for_stations(
    stations: &StationFeatureCollection,
    config: &Config,
) -> Result<FeatureCollection> {
    if stations.is_empty() {
        return Ok(FeatureCollection {
            bbox: None,
            features: Vec::new(),
            foreign_members: None,
        });
    }

    let bounds = bounds_for_collection(stations, config.voronoi.padding_ratio)?;
    generate(&stations.to_geojson()?, &VoronoiOptions::new(bounds))
}

fn seed(index: usize, feature: &Feature) -> Result<Coord<f64>> {
    match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Point(coords)) if coords.len() >= 2 => Ok(Coord {
            x: coords[0],
            y: coords[1],
        }),
        Some(other) => Err(StationError::InputShape(format!(
            "feature at index {} must have a 2D Point geometry, got {}",
            index,
            geometry_name(other)
        ))),
        None => Err(StationError::InputShape(format!(
            "feature at index {} has no geometry",
            index
        ))),
    }
}

fn geometry_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn cell(index: usize, seeds: &[Coord<f64>], bounds: &BoundingBox) -> Polygon<f64> {
    if seeds.len() == 1 {
        return Polygon::new(LineString::from(bounds.ring()), vec![]);
    }

    let site = seeds[index];
    let mut ring = bounds.ring();
    ring.pop();

    for (other_index, other) in seeds.iter().enumerate() {
        if other_index == index {
            continue;
        }

        if *other == site {
            if other_index < index {
                log::warn!(
                    "Station at index {} coincides with index {}; emitting a collapsed cell",
                    index,
                    other_index
                );
                return collapsed(site, bounds);
            }
            continue;
        }

        ring = clip_to_half_plane(&ring, site, *other);
        if ring.is_empty() {
            break;
        }
    }

    let mut ring: Vec<Coord<f64>> = ring.into_iter().map(|c| bounds.clamp(c)).collect();
    ring.dedup();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    if ring.len() < 3 {
        log::warn!(
            "Voronoi cell for station at index {} was clipped away; emitting a collapsed cell",
            index
        );
        return collapsed(site, bounds);
    }

    Polygon::new(LineString::from(ring), vec![])
}

/// Keeps the part of a convex polygon closer to `site` than to `other`
/// (Sutherland-Hodgman against the bisector of the two).
fn clip_to_half_plane(
    polygon: &[Coord<f64>],
    site: Coord<f64>,
    other: Coord<f64>,
) -> Vec<Coord<f64>> {
    let (nx, ny) = (other.x - site.x, other.y - site.y);
    let (mx, my) = ((site.x + other.x) / 2.0, (site.y + other.y) / 2.0);
    let side = |p: Coord<f64>| nx * (p.x - mx) + ny * (p.y - my);

    let mut clipped = Vec::with_capacity(polygon.len() + 1);
    for (i, &current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        let (dc, dn) = (side(current), side(next));

        if dc <= 0.0 {
            clipped.push(current);
        }

        if (dc < 0.0 && dn > 0.0) || (dc > 0.0 && dn < 0.0) {
            let t = dc / (dc - dn);
            clipped.push(Coord {
                x: current.x + t * (next.x - current.x),
                y: current.y + t * (next.y - current.y),
            });
        }
    }
    clipped
}

fn collapsed(site: Coord<f64>, bounds: &BoundingBox) -> Polygon<f64> {
    let anchor = bounds.clamp(site);
    Polygon::new(LineString::from(vec![anchor; COLLAPSED_RING_LEN]), vec![])
}

fn polygon_to_value(polygon: &Polygon<f64>) -> Value {
    let exterior: Vec<Vec<f64>> = polygon
        .exterior()
        .coords()
        .map(|coord| vec![coord.x, coord.y])
        .collect();
    Value::Polygon(vec![exterior])
}
