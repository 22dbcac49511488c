//! Point-sampling coverage of a road by a recorded route.
//!
//! A road point counts as covered when at least one route point lies within
//! the exploration threshold of it. The coverage fraction is the share of
//! covered road points. This approximates geometric overlap, so its accuracy
//! depends on how densely both the road and the route are sampled.
//!
//! Cost is O(road_points × route_points) per road. [`crate::RouteIndex`]
//! answers the same question through an R-tree.

use crate::geo_utils::haversine_distance;
use crate::GeoPoint;

/// Whether any route point lies within `threshold` meters of `point`.
pub fn is_point_covered(point: &GeoPoint, route: &[GeoPoint], threshold: f64) -> bool {
    route
        .iter()
        .any(|q| haversine_distance(point, q) <= threshold)
}

/// Fraction of `road` points within `threshold` meters of some `route` point.
///
/// Returns 0 when either polyline is empty.
///
/// # Example
/// ```
/// use road_explorer::{coverage_fraction, GeoPoint};
///
/// let road = vec![GeoPoint::new(39.2854, -76.6122), GeoPoint::new(39.2854, -76.6222)];
/// let route = vec![GeoPoint::new(39.2854, -76.6122)];
///
/// assert_eq!(coverage_fraction(&road, &route, 20.0), 0.5);
/// ```
pub fn coverage_fraction(road: &[GeoPoint], route: &[GeoPoint], threshold: f64) -> f64 {
    if road.is_empty() || route.is_empty() {
        return 0.0;
    }

    let covered = road
        .iter()
        .filter(|p| is_point_covered(p, route, threshold))
        .count();

    covered as f64 / road.len() as f64
}

/// Combine a stored explored fraction with the fraction from a new route.
///
/// Coverage accumulates as a running maximum; it is never averaged or
/// replaced by a lower value. The result stays within `[0, 1]`.
pub fn merge_coverage(previous: f64, fraction: f64) -> f64 {
    previous.max(fraction).clamp(0.0, 1.0)
}
