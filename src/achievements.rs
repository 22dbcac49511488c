//! Achievement detection from exploration statistics.
//!
//! Achievements are a pure function of the current [`ExplorationStats`] and
//! the number of recorded routes, so any presentation layer can recompute
//! them at will. Each [`AchievementType`] appears at most once; for tiered
//! milestones only the highest tier reached is reported.
//!
//! ## Example
//! ```rust
//! use road_explorer::{derive_achievements, AchievementType, ExplorationStats};
//!
//! let stats = ExplorationStats {
//!     total_roads: 4,
//!     explored_roads: 2,
//!     fully_explored_roads: 1,
//!     total_distance: 4000.0,
//!     explored_distance: 1500.0,
//! };
//!
//! let achievements = derive_achievements(&stats, 3);
//! assert!(achievements
//!     .iter()
//!     .any(|a| a.achievement_type == AchievementType::CoverageMilestone && a.value == "50%"));
//! ```

use serde::{Deserialize, Serialize};

use crate::ExplorationStats;

/// Type of achievement detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum AchievementType {
    /// First recorded route
    FirstRoute,
    /// First road with any exploration
    FirstRoad,
    /// Reached a recorded route count (10, 25, 50, 100)
    RouteMilestone,
    /// Explored a share of the catalog's roads (25%, 50%, 75%, 100%)
    CoverageMilestone,
    /// Explored a length of road (1km, 5km, 10km, 50km)
    DistanceMilestone,
    /// Every road fully explored
    CityComplete,
}

/// An achievement derived from exploration state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Achievement {
    /// Type of achievement
    pub achievement_type: AchievementType,
    /// Human-readable title
    pub title: String,
    /// Detailed description
    pub description: String,
    /// The value that triggered the achievement (e.g., "50%" or "10km")
    pub value: String,
    /// Importance score (higher = more significant)
    pub importance: u8,
}

/// Route count milestones
const ROUTE_MILESTONES: &[u32] = &[10, 25, 50, 100];

/// Percent of roads explored
const COVERAGE_MILESTONES: &[u32] = &[25, 50, 75, 100];

/// Explored road length in kilometers
const DISTANCE_MILESTONES_KM: &[u32] = &[1, 5, 10, 50];

/// Derive all achievements earned with the given statistics.
///
/// # Returns
/// Achievements sorted by importance, highest first
pub fn derive_achievements(stats: &ExplorationStats, route_count: usize) -> Vec<Achievement> {
    let mut achievements = Vec::new();

    if route_count >= 1 {
        achievements.push(Achievement {
            achievement_type: AchievementType::FirstRoute,
            title: "First Steps".to_string(),
            description: "You recorded your first route!".to_string(),
            value: "1".to_string(),
            importance: 40,
        });
    }

    if stats.explored_roads >= 1 {
        achievements.push(Achievement {
            achievement_type: AchievementType::FirstRoad,
            title: "Explorer".to_string(),
            description: "You explored your first road!".to_string(),
            value: "1".to_string(),
            importance: 50,
        });
    }

    if let Some(milestone) = highest_reached(ROUTE_MILESTONES, route_count as f64) {
        achievements.push(Achievement {
            achievement_type: AchievementType::RouteMilestone,
            title: format!("{} Routes!", milestone),
            description: format!("You've recorded {} routes. Keep it up!", milestone),
            value: milestone.to_string(),
            importance: calculate_route_milestone_importance(milestone),
        });
    }

    if let Some(milestone) = highest_reached(COVERAGE_MILESTONES, stats.exploration_percentage()) {
        achievements.push(Achievement {
            achievement_type: AchievementType::CoverageMilestone,
            title: format!("{}% Explored!", milestone),
            description: format!("You've explored {}% of the city's roads!", milestone),
            value: format!("{}%", milestone),
            importance: calculate_coverage_milestone_importance(milestone),
        });
    }

    if let Some(milestone) =
        highest_reached(DISTANCE_MILESTONES_KM, stats.explored_distance / 1000.0)
    {
        achievements.push(Achievement {
            achievement_type: AchievementType::DistanceMilestone,
            title: format!("{}km Explored!", milestone),
            description: format!("You've explored {} kilometers of road!", milestone),
            value: format!("{}km", milestone),
            importance: calculate_distance_milestone_importance(milestone),
        });
    }

    if stats.total_roads > 0 && stats.fully_explored_roads == stats.total_roads {
        achievements.push(Achievement {
            achievement_type: AchievementType::CityComplete,
            title: "City Complete!".to_string(),
            description: "Every road in the city is fully explored!".to_string(),
            value: format!("{}", stats.total_roads),
            importance: 100,
        });
    }

    // Sort by importance (highest first)
    achievements.sort_by(|a, b| b.importance.cmp(&a.importance));

    achievements
}

// ============================================================================
// Helper Functions
// ============================================================================

fn highest_reached(milestones: &[u32], value: f64) -> Option<u32> {
    milestones
        .iter()
        .copied()
        .filter(|&m| value >= m as f64)
        .max()
}

fn calculate_route_milestone_importance(count: u32) -> u8 {
    match count {
        10 => 45,
        25 => 55,
        50 => 65,
        100 => 80,
        _ => 40,
    }
}

fn calculate_coverage_milestone_importance(percent: u32) -> u8 {
    match percent {
        25 => 60,
        50 => 70,
        75 => 85,
        100 => 95,
        _ => 50,
    }
}

fn calculate_distance_milestone_importance(km: u32) -> u8 {
    match km {
        1 => 45,
        5 => 55,
        10 => 65,
        50 => 80,
        _ => 40,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: u32, explored: u32, fully: u32, explored_distance: f64) -> ExplorationStats {
        ExplorationStats {
            total_roads: total,
            explored_roads: explored,
            fully_explored_roads: fully,
            total_distance: 10_000.0,
            explored_distance,
        }
    }

    fn has(achievements: &[Achievement], kind: AchievementType) -> bool {
        achievements.iter().any(|a| a.achievement_type == kind)
    }

    #[test]
    fn test_nothing_earned() {
        assert!(derive_achievements(&stats(5, 0, 0, 0.0), 0).is_empty());
        assert!(derive_achievements(&ExplorationStats::default(), 0).is_empty());
    }

    #[test]
    fn test_first_route_without_roads() {
        let achievements = derive_achievements(&stats(5, 0, 0, 0.0), 1);
        assert_eq!(achievements.len(), 1);
        assert!(has(&achievements, AchievementType::FirstRoute));
    }

    #[test]
    fn test_highest_tier_only() {
        let achievements = derive_achievements(&stats(10, 8, 2, 12_000.0), 30);

        let routes: Vec<_> = achievements
            .iter()
            .filter(|a| a.achievement_type == AchievementType::RouteMilestone)
            .collect();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].value, "25");

        let coverage = achievements
            .iter()
            .find(|a| a.achievement_type == AchievementType::CoverageMilestone)
            .unwrap();
        assert_eq!(coverage.value, "75%");

        let distance = achievements
            .iter()
            .find(|a| a.achievement_type == AchievementType::DistanceMilestone)
            .unwrap();
        assert_eq!(distance.value, "10km");

        assert!(!has(&achievements, AchievementType::CityComplete));
    }

    #[test]
    fn test_city_complete() {
        let achievements = derive_achievements(&stats(3, 3, 3, 9_000.0), 4);
        assert!(has(&achievements, AchievementType::CityComplete));
        assert_eq!(achievements[0].achievement_type, AchievementType::CityComplete);
    }

    #[test]
    fn test_sorted_by_importance() {
        let achievements = derive_achievements(&stats(4, 4, 1, 60_000.0), 100);
        assert!(achievements
            .windows(2)
            .all(|w| w[0].importance >= w[1].importance));
    }

    #[test]
    fn test_one_third_is_below_first_tier() {
        // 33.3% of roads reaches the 25% tier but not 50%
        let achievements = derive_achievements(&stats(3, 1, 0, 500.0), 1);
        let coverage = achievements
            .iter()
            .find(|a| a.achievement_type == AchievementType::CoverageMilestone)
            .unwrap();
        assert_eq!(coverage.value, "25%");
        assert!(!has(&achievements, AchievementType::DistanceMilestone));
    }
}
