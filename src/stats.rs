//! City-wide exploration statistics.
//!
//! [`ExplorationStats`] is a snapshot derived entirely from the current road
//! set; it is recomputed after every route and has no state of its own.

use serde::{Deserialize, Serialize};

use crate::Road;

/// Aggregate exploration statistics over the road catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ExplorationStats {
    /// Number of roads in the catalog
    pub total_roads: u32,
    /// Roads with any exploration (status other than unexplored)
    pub explored_roads: u32,
    /// Roads at or above the fully explored fraction
    pub fully_explored_roads: u32,
    /// Sum of all road lengths in meters
    pub total_distance: f64,
    /// Sum of road length × explored fraction, in meters
    pub explored_distance: f64,
}

impl ExplorationStats {
    /// Share of roads explored, as a percentage in `[0, 100]`.
    ///
    /// Zero for an empty catalog.
    pub fn exploration_percentage(&self) -> f64 {
        if self.total_roads == 0 {
            return 0.0;
        }
        self.explored_roads as f64 / self.total_roads as f64 * 100.0
    }

    /// Share of total road length explored, as a percentage in `[0, 100]`.
    pub fn distance_percentage(&self) -> f64 {
        if self.total_distance <= 0.0 {
            return 0.0;
        }
        self.explored_distance / self.total_distance * 100.0
    }

    /// Exploration percentage rounded for display, e.g. `"33.3%"`.
    pub fn display_percentage(&self) -> String {
        format!("{:.1}%", self.exploration_percentage())
    }
}

/// Recompute statistics from the current roads.
pub fn compute_stats(roads: &[Road]) -> ExplorationStats {
    roads.iter().fold(
        ExplorationStats {
            total_roads: roads.len() as u32,
            ..Default::default()
        },
        |mut stats, road| {
            if road.status().is_explored() {
                stats.explored_roads += 1;
            }
            if road.explored_percentage() >= crate::FULLY_EXPLORED_FRACTION {
                stats.fully_explored_roads += 1;
            }
            stats.total_distance += road.length();
            stats.explored_distance += road.explored_distance();
            stats
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::interpolate_points;
    use crate::GeoPoint;

    fn road(id: &str, offset: f64) -> Road {
        Road::new(
            id,
            id,
            interpolate_points(
                GeoPoint::new(39.2854 + offset, -76.6122),
                GeoPoint::new(39.2854 + offset, -76.6222),
                10,
            ),
        )
    }

    #[test]
    fn test_empty_catalog() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_roads, 0);
        assert_eq!(stats.exploration_percentage(), 0.0);
        assert_eq!(stats.distance_percentage(), 0.0);
        assert_eq!(stats.display_percentage(), "0.0%");
    }

    #[test]
    fn test_one_of_three_explored() {
        let mut roads = vec![road("a", 0.0), road("b", 0.01), road("c", 0.02)];
        roads[0].apply_coverage(0.5);

        let stats = compute_stats(&roads);
        assert_eq!(stats.total_roads, 3);
        assert_eq!(stats.explored_roads, 1);
        assert_eq!(stats.fully_explored_roads, 0);
        assert!((stats.exploration_percentage() - 100.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.display_percentage(), "33.3%");
    }

    #[test]
    fn test_distances() {
        let mut roads = vec![road("a", 0.0), road("b", 0.01)];
        roads[1].apply_coverage(1.0);

        let stats = compute_stats(&roads);
        let expected_total = roads[0].length() + roads[1].length();
        assert!((stats.total_distance - expected_total).abs() < 1e-9);
        assert!((stats.explored_distance - roads[1].length()).abs() < 1e-9);
        assert_eq!(stats.fully_explored_roads, 1);
        assert!((stats.distance_percentage() - 50.0).abs() < 0.1);
    }
}
