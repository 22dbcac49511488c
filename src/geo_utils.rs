//! # Geographic Utilities
//!
//! Distance and bounding-box helpers shared by the coverage matcher and the
//! statistics aggregation.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two points |
//! | [`polyline_length`] | Total length of a polyline in meters |
//! | [`compute_bounds`] | Bounding box of a polyline |
//! | [`bounds_overlap`] | Check if two bounding boxes overlap within a buffer |
//!
//! All functions expect WGS84 coordinates (latitude/longitude in degrees).
//!
//! ## Example
//!
//! ```rust
//! use road_explorer::{GeoPoint, geo_utils};
//!
//! let road = vec![
//!     GeoPoint::new(39.2854, -76.6122),
//!     GeoPoint::new(39.2854, -76.6172),
//!     GeoPoint::new(39.2854, -76.6222),
//! ];
//!
//! let length = geo_utils::polyline_length(&road);
//! assert!(length > 900.0 && length < 1000.0);
//! ```

use geo::{Distance, Haversine, Point};

use crate::{Bounds, GeoPoint};

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two points using the Haversine formula.
///
/// Returns the distance in meters along the Earth's surface (spherical Earth,
/// mean radius ~6,371 km). Symmetric, non-negative, and exactly zero for
/// identical points.
///
/// # Example
///
/// ```rust
/// use road_explorer::{GeoPoint, geo_utils};
///
/// let london = GeoPoint::new(51.5074, -0.1278);
/// let paris = GeoPoint::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343_560.0).abs() < 1000.0);
/// ```
#[inline]
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Total length of a polyline in meters.
///
/// Sums the haversine distance between consecutive points. Empty or
/// single-point polylines have length 0.
pub fn polyline_length(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Bounding Box Functions
// =============================================================================

/// Compute the bounding box of a polyline.
///
/// Returns `None` for empty input.
pub fn compute_bounds(points: &[GeoPoint]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }

    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;

    for p in points {
        min_lat = min_lat.min(p.latitude);
        max_lat = max_lat.max(p.latitude);
        min_lng = min_lng.min(p.longitude);
        max_lng = max_lng.max(p.longitude);
    }

    Some(Bounds {
        min_lat,
        max_lat,
        min_lng,
        max_lng,
    })
}

/// Check if two bounding boxes overlap once expanded by `buffer_degrees`.
///
/// Two polylines with non-overlapping buffered bounds cannot have any pair of
/// points closer than the buffer.
pub fn bounds_overlap(a: &Bounds, b: &Bounds, buffer_degrees: f64) -> bool {
    !(a.max_lat + buffer_degrees < b.min_lat
        || b.max_lat + buffer_degrees < a.min_lat
        || a.max_lng + buffer_degrees < b.min_lng
        || b.max_lng + buffer_degrees < a.min_lng)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_haversine_distance_same_point() {
        let p = GeoPoint::new(39.2854, -76.6122);
        assert_eq!(haversine_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_haversine_distance_symmetric() {
        let a = GeoPoint::new(39.2854, -76.6122);
        let b = GeoPoint::new(39.2904, -76.6222);
        assert_eq!(haversine_distance(&a, &b), haversine_distance(&b, &a));
        assert!(haversine_distance(&a, &b) > 0.0);
    }

    #[test]
    fn test_haversine_distance_known_value() {
        // 0.01 degrees of latitude is roughly 1.1 km anywhere
        let a = GeoPoint::new(39.2854, -76.6172);
        let b = GeoPoint::new(39.2954, -76.6172);
        assert!(approx_eq(haversine_distance(&a, &b), 1112.0, 5.0));
    }

    #[test]
    fn test_polyline_length_empty() {
        assert_eq!(polyline_length(&[]), 0.0);
    }

    #[test]
    fn test_polyline_length_single_point() {
        assert_eq!(polyline_length(&[GeoPoint::new(39.0, -76.0)]), 0.0);
    }

    #[test]
    fn test_polyline_length_sums_segments() {
        let a = GeoPoint::new(39.2854, -76.6122);
        let b = GeoPoint::new(39.2854, -76.6172);
        let c = GeoPoint::new(39.2854, -76.6222);
        let expected = haversine_distance(&a, &b) + haversine_distance(&b, &c);
        assert!(approx_eq(polyline_length(&[a, b, c]), expected, 1e-9));
    }

    #[test]
    fn test_compute_bounds() {
        let track = vec![
            GeoPoint::new(39.28, -76.62),
            GeoPoint::new(39.29, -76.61),
            GeoPoint::new(39.285, -76.615),
        ];
        let bounds = compute_bounds(&track).unwrap();
        assert_eq!(bounds.min_lat, 39.28);
        assert_eq!(bounds.max_lat, 39.29);
        assert_eq!(bounds.min_lng, -76.62);
        assert_eq!(bounds.max_lng, -76.61);
        assert!(compute_bounds(&[]).is_none());
    }

    #[test]
    fn test_bounds_overlap_with_buffer() {
        let a = Bounds {
            min_lat: 39.28,
            max_lat: 39.29,
            min_lng: -76.62,
            max_lng: -76.61,
        };
        let b = Bounds {
            min_lat: 39.2905,
            max_lat: 39.30,
            min_lng: -76.62,
            max_lng: -76.61,
        };
        assert!(!bounds_overlap(&a, &b, 0.0));
        assert!(bounds_overlap(&a, &b, 0.001));
    }
}
