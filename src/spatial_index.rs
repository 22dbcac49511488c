//! R-tree index over a route's points for coverage queries.
//!
//! The exhaustive matcher compares every road point with every route point.
//! [`RouteIndex`] bulk-loads the route once, then answers each road point with
//! a degree-space radius query followed by an exact haversine check, so the
//! covered/not-covered answer is the same as the exhaustive scan.
//!
//! The degree-space radius comes from `search_reach`, an upper bound on the
//! latitude and longitude difference of any two points within the threshold,
//! taken at the most poleward latitude the threshold can reach. When that
//! latitude enters the polar cap, or the radius crosses the antimeridian,
//! degree distances stop bounding surface distances and the query falls back
//! to the scan.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::coverage;
use crate::geo_utils::{bounds_overlap, compute_bounds, haversine_distance};
use crate::{Bounds, GeoPoint};

/// Widening factor applied to the computed reach to absorb rounding.
const SEARCH_MARGIN: f64 = 1.01;

/// Beyond this latitude the index defers to the exhaustive scan.
const POLAR_LATITUDE: f64 = 85.0;

/// Polar radius of the WGS84 ellipsoid in meters. Smaller than the sphere
/// radius used by [`haversine_distance`], so angles derived from it are
/// never too small.
const MIN_EARTH_RADIUS: f64 = 6_356_752.0;

/// A route point with its position in the route, for R-tree queries
#[derive(Debug, Clone, Copy)]
pub struct IndexedPoint {
    pub idx: usize,
    pub lat: f64,
    pub lng: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lat, self.lng])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.lat - point[0];
        let dlng = self.lng - point[1];
        dlat * dlat + dlng * dlng
    }
}

/// Spatial index over the points of one recorded route.
#[derive(Debug)]
pub struct RouteIndex {
    points: Vec<GeoPoint>,
    tree: RTree<IndexedPoint>,
    bounds: Option<Bounds>,
}

impl RouteIndex {
    /// Build the index from route points.
    pub fn new(points: &[GeoPoint]) -> Self {
        let indexed: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedPoint {
                idx: i,
                lat: p.latitude,
                lng: p.longitude,
            })
            .collect();

        Self {
            points: points.to_vec(),
            tree: RTree::bulk_load(indexed),
            bounds: compute_bounds(points),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the indexed route.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// Quick rejection test: false only if no point inside `road_bounds` can
    /// be within `threshold` meters of any route point.
    pub fn may_cover(&self, road_bounds: &Bounds, threshold: f64) -> bool {
        let Some(route_bounds) = &self.bounds else {
            return false;
        };

        let ref_lat = road_bounds.min_lat.abs().max(road_bounds.max_lat.abs());
        let Some(reach) = search_reach(threshold, ref_lat) else {
            return true;
        };

        if touches_antimeridian(road_bounds, reach.lng)
            || touches_antimeridian(route_bounds, reach.lng)
        {
            return true;
        }

        bounds_overlap(road_bounds, route_bounds, reach.lat.max(reach.lng))
    }

    /// Whether any route point lies within `threshold` meters of `point`.
    ///
    /// Same answer as [`coverage::is_point_covered`] over the route points.
    pub fn is_point_covered(&self, point: &GeoPoint, threshold: f64) -> bool {
        if self.points.is_empty() {
            return false;
        }

        let reach = match search_reach(threshold, point.latitude) {
            Some(reach) if point.longitude.abs() + reach.lng <= 180.0 => reach,
            _ => return coverage::is_point_covered(point, &self.points, threshold),
        };

        let radius = reach.lat.hypot(reach.lng);
        let query = [point.latitude, point.longitude];
        self.tree
            .locate_within_distance(query, radius * radius)
            .any(|candidate| haversine_distance(point, &self.points[candidate.idx]) <= threshold)
    }

    /// Fraction of `road` points covered by the indexed route.
    ///
    /// Same answer as [`coverage::coverage_fraction`].
    pub fn coverage_fraction(&self, road: &[GeoPoint], threshold: f64) -> f64 {
        if road.is_empty() || self.points.is_empty() {
            return 0.0;
        }

        let covered = road
            .iter()
            .filter(|p| self.is_point_covered(p, threshold))
            .count();

        covered as f64 / road.len() as f64
    }
}

/// Largest latitude and longitude difference, in degrees, between a point
/// and anything within some threshold of it.
#[derive(Debug, Clone, Copy)]
struct SearchReach {
    lat: f64,
    lng: f64,
}

/// Reach of `threshold` meters around points with `|latitude|` at most
/// `latitude`.
///
/// Haversine gives `sin²(θ/2) = sin²(Δφ/2) + cos φ1 cos φ2 sin²(Δλ/2)` for a
/// central angle `θ`, so `|Δφ| ≤ θ` and `sin(Δλ/2) ≤ sin(θ/2) / cos φmax`
/// once both latitudes are bounded by `φmax`. Returns `None` when `φmax`
/// enters the polar cap or the longitude bound covers the whole circle.
fn search_reach(threshold: f64, latitude: f64) -> Option<SearchReach> {
    let angle = threshold / MIN_EARTH_RADIUS;
    let lat = angle.to_degrees() * SEARCH_MARGIN;

    let max_lat = latitude.abs() + lat;
    if max_lat >= POLAR_LATITUDE {
        return None;
    }

    let sin_half_lng = (angle / 2.0).sin() / max_lat.to_radians().cos();
    if sin_half_lng >= 1.0 {
        return None;
    }
    let lng = (2.0 * sin_half_lng.asin()).to_degrees() * SEARCH_MARGIN;

    Some(SearchReach { lat, lng })
}

fn touches_antimeridian(bounds: &Bounds, buffer: f64) -> bool {
    bounds.min_lng - buffer < -180.0 || bounds.max_lng + buffer > 180.0
}
