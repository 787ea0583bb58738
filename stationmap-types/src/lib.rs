//! # stationmap-types
//!
//! Plain value types shared by the stationmap geometry pipeline:
//!
//! - **Geometry**: `PointGeometry` (a GeoJSON Point in lon/lat order)
//! - **Bounds**: `BoundingBox`, `BoundsFilter`, `ViewportPadding`
//! - **Trip statistics**: `StationTripStatistics`, `TripSummary`
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's primitives where that makes sense.
//!
//! ## Examples
//!
//! ```rust
//! use stationmap_types::bbox::BoundingBox;
//! use stationmap_types::point::PointGeometry;
//!
//! let station = PointGeometry::new(24.9384, 60.1699); // Helsinki
//! let region = BoundingBox::new(24.6, 60.0, 25.3, 60.4);
//! assert!(region.contains(&station));
//! ```

pub mod bbox;
pub mod point;
pub mod stats;
