//! Sample road catalog generation.
//!
//! Real catalogs come from outside the library. For demos and tests, roads
//! are generated as straight centerlines interpolated between two endpoints.

use crate::{GeoPoint, Road};

/// Number of interpolation steps used for sample roads.
pub const SAMPLE_ROAD_STEPS: usize = 10;

/// Linearly interpolate `steps + 1` points from `start` to `end`, inclusive.
///
/// ```
/// use road_explorer::{catalog::interpolate_points, GeoPoint};
///
/// let points = interpolate_points(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0), 4);
/// assert_eq!(points.len(), 5);
/// assert_eq!(points[2], GeoPoint::new(0.0, 0.5));
/// ```
pub fn interpolate_points(start: GeoPoint, end: GeoPoint, steps: usize) -> Vec<GeoPoint> {
    if steps == 0 {
        return vec![start];
    }

    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            GeoPoint::new(
                start.latitude + (end.latitude - start.latitude) * t,
                start.longitude + (end.longitude - start.longitude) * t,
            )
        })
        .collect()
}

/// A handful of downtown Baltimore streets, each sampled at
/// [`SAMPLE_ROAD_STEPS`] steps.
pub fn sample_catalog() -> Vec<Road> {
    // (id, name, start, end)
    let roads = [
        ("pratt-st", "Pratt Street", (39.2854, -76.6122), (39.2854, -76.6222)),
        ("lombard-st", "Lombard Street", (39.2880, -76.6122), (39.2880, -76.6222)),
        ("light-st", "Light Street", (39.2800, -76.6135), (39.2900, -76.6135)),
        ("charles-st", "Charles Street", (39.2800, -76.6155), (39.2950, -76.6155)),
        ("calvert-st", "Calvert Street", (39.2860, -76.6120), (39.2960, -76.6120)),
        ("key-hwy", "Key Highway", (39.2770, -76.6100), (39.2810, -76.6020)),
    ];

    roads
        .iter()
        .map(|&(id, name, (lat1, lng1), (lat2, lng2))| {
            Road::new(
                id,
                name,
                interpolate_points(
                    GeoPoint::new(lat1, lng1),
                    GeoPoint::new(lat2, lng2),
                    SAMPLE_ROAD_STEPS,
                ),
            )
        })
        .collect()
}
