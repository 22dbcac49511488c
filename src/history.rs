//! Derived views over the route history.
//!
//! The history itself is only ordered by insertion. These functions build
//! sorted and grouped views for display without touching it.

use serde::{Deserialize, Serialize};

use crate::{ActivityType, ExploredRoute};

/// Route count and recorded distance for one activity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ActivitySummary {
    pub activity_type: ActivityType,
    pub route_count: u32,
    /// Sum of recorded route distances in meters
    pub total_distance: f64,
}

/// The `n` most recent routes by timestamp, newest first.
///
/// Routes with equal timestamps keep their insertion order.
pub fn recent_routes(routes: &[ExploredRoute], n: usize) -> Vec<&ExploredRoute> {
    let mut sorted: Vec<&ExploredRoute> = routes.iter().collect();
    // Stable sort keeps insertion order among ties
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(n);
    sorted
}

/// Per-activity totals, in [`ActivityType::ALL`] order.
///
/// Activity types without any routes are left out.
pub fn activity_summaries(routes: &[ExploredRoute]) -> Vec<ActivitySummary> {
    ActivityType::ALL
        .iter()
        .filter_map(|&activity_type| {
            let matching: Vec<&ExploredRoute> = routes
                .iter()
                .filter(|r| r.activity_type == activity_type)
                .collect();
            if matching.is_empty() {
                return None;
            }
            Some(ActivitySummary {
                activity_type,
                route_count: matching.len() as u32,
                total_distance: matching.iter().map(|r| r.distance()).sum(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;

    fn route(id: &str, activity_type: ActivityType, timestamp: i64) -> ExploredRoute {
        ExploredRoute::new(
            id,
            vec![
                GeoPoint::new(39.2854, -76.6122),
                GeoPoint::new(39.2854, -76.6222),
            ],
            activity_type,
            timestamp,
        )
    }

    #[test]
    fn test_recent_routes_sorted_newest_first() {
        let routes = vec![
            route("a", ActivityType::Walk, 100),
            route("b", ActivityType::Run, 300),
            route("c", ActivityType::Bike, 200),
        ];
        let recent: Vec<&str> = recent_routes(&routes, 2)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(recent, vec!["b", "c"]);
    }

    #[test]
    fn test_recent_routes_ties_keep_insertion_order() {
        let routes = vec![
            route("first", ActivityType::Walk, 100),
            route("second", ActivityType::Walk, 100),
        ];
        let recent: Vec<&str> = recent_routes(&routes, 10)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(recent, vec!["first", "second"]);
    }

    #[test]
    fn test_activity_summaries() {
        let routes = vec![
            route("a", ActivityType::Bike, 1),
            route("b", ActivityType::Walk, 2),
            route("c", ActivityType::Bike, 3),
        ];
        let summaries = activity_summaries(&routes);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].activity_type, ActivityType::Walk);
        assert_eq!(summaries[0].route_count, 1);
        assert_eq!(summaries[1].activity_type, ActivityType::Bike);
        assert_eq!(summaries[1].route_count, 2);
        assert!((summaries[1].total_distance - 2.0 * routes[0].distance()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_history() {
        assert!(recent_routes(&[], 5).is_empty());
        assert!(activity_summaries(&[]).is_empty());
    }
}
