//! Station geometry for a bike-share station viewer.
//!
//! Turns station query rows into GeoJSON FeatureCollections and tessellates
//! station points into Voronoi cells clipped to a bounding box for map
//! overlays. Everything here is a pure function over in-memory values.
//!
//! ```rust
//! use stationmap::collection::collection_from_rows;
//! use stationmap::feature::StationRow;
//! use stationmap::voronoi::{generate, VoronoiOptions};
//! use stationmap::BoundingBox;
//! use serde_json::json;
//!
//! let rows = vec![
//!     StationRow::new("001", "Kaivopuisto", json!(r#"{"type":"Point","coordinates":[24.950,60.155]}"#)),
//!     StationRow::new("002", "Laivasillankatu", json!({"type": "Point", "coordinates": [24.956, 60.161]})),
//! ];
//! let stations = collection_from_rows(rows)?;
//!
//! let bounds = BoundingBox::new(24.9, 60.1, 25.0, 60.2);
//! let cells = generate(&stations.to_geojson()?, &VoronoiOptions::new(bounds))?;
//! assert_eq!(cells.features.len(), 2);
//! # Ok::<(), stationmap::StationError>(())
//! ```

pub mod bounds;
pub mod collection;
pub mod config;
pub mod error;
pub mod feature;
pub mod loader;
pub mod location;
pub mod validation;
pub mod voronoi;

pub use config::{Config, VoronoiConfig};
pub use error::{Result, StationError};

pub use stationmap_types::bbox::{BoundingBox, BoundsFilter, ViewportPadding};
pub use stationmap_types::point::PointGeometry;
pub use stationmap_types::stats::{StationTripStatistics, TripSummary};

pub use bounds::{bounds_from_coordinates, pad_for_viewport, validate_bounds};
pub use collection::{StationFeatureCollection, build_collection, collection_from_rows};
pub use feature::{StationFeature, StationProperties, StationRow, build_feature};
pub use location::{GeographyValue, parse_location};
pub use voronoi::{VoronoiOptions, generate};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{
        BoundingBox, Config, PointGeometry, Result, StationError, StationFeature,
        StationFeatureCollection, StationRow,
    };

    pub use crate::{build_collection, build_feature, collection_from_rows, parse_location};

    pub use crate::voronoi::{VoronoiOptions, generate, generate_for_stations};
}
