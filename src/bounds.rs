//! Bounding boxes for clipping and viewport fitting.

use crate::collection::StationFeatureCollection;
use crate::error::{Result, StationError};
use geo::{BoundingRect, MultiPoint};
use stationmap_types::bbox::{BoundingBox, ViewportPadding};

/// Checks that a bounding box is usable as clip bounds.
///
/// # Errors
///
/// `StationError::InvalidBounds` if a corner is not finite or `min > max`
/// on either axis. The box is never corrected.
pub fn validate_bounds(bounds: &BoundingBox) -> Result<()> {
    if !bounds.to_array().iter().all(|v| v.is_finite()) {
        return Err(StationError::bounds(bounds, "all corners must be finite"));
    }

    if bounds.min_lon > bounds.max_lon {
        return Err(StationError::bounds(bounds, "min_lon must be <= max_lon"));
    }

    if bounds.min_lat > bounds.max_lat {
        return Err(StationError::bounds(bounds, "min_lat must be <= max_lat"));
    }

    Ok(())
}

/// The tightest box enclosing all `[lon, lat]` coordinates.
///
/// A single coordinate gives a zero-size box.
///
/// # Errors
///
/// `StationError::InputShape` for an empty slice.
///
/// # Examples
///
/// ```
/// use stationmap::bounds::bounds_from_coordinates;
///
/// let b = bounds_from_coordinates(&[[25.0, 60.3], [24.7, 60.1], [25.2, 60.4], [24.6, 60.0]])?;
/// assert_eq!(b.to_array(), [24.6, 60.0, 25.2, 60.4]);
/// # Ok::<(), stationmap::StationError>(())
/// ```
pub fn bounds_from_coordinates(coords: &[[f64; 2]]) -> Result<BoundingBox> {
    MultiPoint::from(coords.to_vec())
        .bounding_rect()
        .map(BoundingBox::from)
        .ok_or_else(|| {
            StationError::InputShape("cannot compute bounds of zero coordinates".to_string())
        })
}

/// Clip bounds around every station, grown by `padding_ratio` times the
/// extent's width and height on each side.
pub fn bounds_for_collection(
    collection: &StationFeatureCollection,
    padding_ratio: f64,
) -> Result<BoundingBox> {
    if !padding_ratio.is_finite() || padding_ratio < 0.0 {
        return Err(StationError::Config(format!(
            "padding ratio must be finite and non-negative, got {}",
            padding_ratio
        )));
    }

    let coords: Vec<[f64; 2]> = collection
        .locations()
        .iter()
        .map(|p| p.coordinates())
        .collect();
    let extent = bounds_from_coordinates(&coords)?;

    let dx = extent.width() * padding_ratio;
    let dy = extent.height() * padding_ratio;

    Ok(BoundingBox::new(
        extent.min_lon - dx,
        extent.min_lat - dy,
        extent.max_lon + dx,
        extent.max_lat + dy,
    ))
}

/// Grows `bounds` so that, once the map is fitted to the result, the
/// original box lands in the part of the viewport not covered by panels.
///
/// # Errors
///
/// `StationError::InvalidBounds` for a bad box; `StationError::Config` if a
/// padding fraction is negative or the panels cover the whole viewport on
/// an axis.
///
/// # Examples
///
/// ```
/// use stationmap::bounds::pad_for_viewport;
/// use stationmap::{BoundingBox, ViewportPadding};
///
/// // A side panel hides the left half of the map.
/// let padded = pad_for_viewport(
///     &BoundingBox::new(24.0, 60.0, 25.0, 61.0),
///     &ViewportPadding::new(0.0, 0.0, 0.0, 0.5),
/// )?;
/// assert_eq!(padded.to_array(), [23.0, 60.0, 25.0, 61.0]);
/// # Ok::<(), stationmap::StationError>(())
/// ```
pub fn pad_for_viewport(bounds: &BoundingBox, padding: &ViewportPadding) -> Result<BoundingBox> {
    validate_bounds(bounds)?;

    let sides = [padding.top, padding.right, padding.bottom, padding.left];
    if sides.iter().any(|s| !s.is_finite() || *s < 0.0) {
        return Err(StationError::Config(format!(
            "viewport padding fractions must be finite and non-negative: {:?}",
            padding
        )));
    }

    if padding.visible_width() <= 0.0 || padding.visible_height() <= 0.0 {
        return Err(StationError::Config(format!(
            "viewport padding leaves no visible area: {:?}",
            padding
        )));
    }

    let full_width = bounds.width() / padding.visible_width();
    let full_height = bounds.height() / padding.visible_height();

    Ok(BoundingBox::new(
        bounds.min_lon - padding.left * full_width,
        bounds.min_lat - padding.bottom * full_height,
        bounds.max_lon + padding.right * full_width,
        bounds.max_lat + padding.top * full_height,
    ))
}
