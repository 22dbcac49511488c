//! # Road Explorer
//!
//! Tracks how much of a road network has been explored on foot or by bike.
//!
//! This library provides:
//! - Coverage matching of recorded GPS routes against reference road polylines
//! - Per-road exploration status that only ever rises as routes accumulate
//! - City-wide exploration statistics and derived achievements
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel per-road coverage updates with rayon
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use road_explorer::{
//!     catalog::interpolate_points, ActivityType, ExplorationEngine, ExplorationStatus,
//!     ExploredRoute, GeoPoint, Road,
//! };
//!
//! let points = interpolate_points(
//!     GeoPoint::new(39.2854, -76.6122),
//!     GeoPoint::new(39.2854, -76.6222),
//!     10,
//! );
//! let road = Road::new("pratt-st", "Pratt Street", points.clone());
//! let mut engine = ExplorationEngine::new(vec![road]).unwrap();
//!
//! let route = ExploredRoute::new("walk-1", points, ActivityType::Walk, 1_700_000_000);
//! let update = engine.add_explored_route(route).unwrap();
//!
//! assert_eq!(update.road_changes.len(), 1);
//! assert_eq!(engine.roads()[0].status(), ExplorationStatus::FullyExplored);
//! assert_eq!(engine.stats().exploration_percentage(), 100.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{ExploreError, Result};

// Geographic utilities (distance, bounds)
pub mod geo_utils;

// Engine configuration
pub mod config;
pub use config::ExplorationConfig;

// Road catalog entries and recorded routes
pub mod road;
pub use road::{ExploredRoute, Road};

// Point-sampling coverage matching
pub mod coverage;
pub use coverage::{coverage_fraction, merge_coverage};

// R-tree accelerated coverage matching
pub mod spatial_index;
pub use spatial_index::RouteIndex;

// Aggregate statistics
pub mod stats;
pub use stats::{compute_stats, ExplorationStats};

// Stateful exploration engine
pub mod engine;
pub use engine::{
    ExplorationEngine, ExplorationUpdate, RoadCoverageChange, SharedExplorationEngine,
};

// Derived views over the route history
pub mod history;
pub use history::{activity_summaries, recent_routes, ActivitySummary};

// Achievements derived from statistics
pub mod achievements;
pub use achievements::{derive_achievements, Achievement, AchievementType};

// Sample road catalog generation
pub mod catalog;

// FFI bindings for mobile platforms (iOS/Android)
#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
pub(crate) fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("RoadExplorerRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
pub(crate) fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// Fraction of a road's sampled points that must be covered for the road to
/// count as fully explored.
pub const FULLY_EXPLORED_FRACTION: f64 = 0.8;

/// A geographic coordinate with latitude and longitude in degrees (WGS84).
///
/// # Example
/// ```
/// use road_explorer::GeoPoint;
/// let point = GeoPoint::new(39.2854, -76.6122); // Baltimore
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box of a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Kind of tracked activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Walk,
    Run,
    Bike,
}

impl ActivityType {
    /// All activity types, in display order.
    pub const ALL: [ActivityType; 3] = [ActivityType::Walk, ActivityType::Run, ActivityType::Bike];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Walk => "walk",
            ActivityType::Run => "run",
            ActivityType::Bike => "bike",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" | "walking" => Ok(ActivityType::Walk),
            "run" | "running" => Ok(ActivityType::Run),
            "bike" | "biking" | "ride" | "cycling" => Ok(ActivityType::Bike),
            _ => Err(ExploreError::UnknownActivityType {
                value: s.to_string(),
            }),
        }
    }
}

/// How much of a road has been explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
#[serde(rename_all = "snake_case")]
pub enum ExplorationStatus {
    Unexplored,
    PartiallyExplored,
    FullyExplored,
}

impl ExplorationStatus {
    /// Classify an explored fraction in `[0, 1]`.
    ///
    /// `0` is unexplored, anything below [`FULLY_EXPLORED_FRACTION`] is
    /// partial, and the rest is fully explored.
    ///
    /// ```
    /// use road_explorer::ExplorationStatus;
    /// assert_eq!(ExplorationStatus::from_fraction(0.0), ExplorationStatus::Unexplored);
    /// assert_eq!(ExplorationStatus::from_fraction(0.5), ExplorationStatus::PartiallyExplored);
    /// assert_eq!(ExplorationStatus::from_fraction(0.8), ExplorationStatus::FullyExplored);
    /// ```
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction <= 0.0 {
            ExplorationStatus::Unexplored
        } else if fraction < FULLY_EXPLORED_FRACTION {
            ExplorationStatus::PartiallyExplored
        } else {
            ExplorationStatus::FullyExplored
        }
    }

    /// Whether any part of the road has been explored.
    pub fn is_explored(&self) -> bool {
        !matches!(self, ExplorationStatus::Unexplored)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(39.2854, -76.6122).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(
            ExplorationStatus::from_fraction(0.0),
            ExplorationStatus::Unexplored
        );
        assert_eq!(
            ExplorationStatus::from_fraction(1e-9),
            ExplorationStatus::PartiallyExplored
        );
        assert_eq!(
            ExplorationStatus::from_fraction(0.7999),
            ExplorationStatus::PartiallyExplored
        );
        assert_eq!(
            ExplorationStatus::from_fraction(0.8),
            ExplorationStatus::FullyExplored
        );
        assert_eq!(
            ExplorationStatus::from_fraction(1.0),
            ExplorationStatus::FullyExplored
        );
    }

    #[test]
    fn test_status_is_explored() {
        assert!(!ExplorationStatus::Unexplored.is_explored());
        assert!(ExplorationStatus::PartiallyExplored.is_explored());
        assert!(ExplorationStatus::FullyExplored.is_explored());
    }

    #[test]
    fn test_activity_type_parse() {
        assert_eq!("Walk".parse::<ActivityType>().unwrap(), ActivityType::Walk);
        assert_eq!(" running ".parse::<ActivityType>().unwrap(), ActivityType::Run);
        assert_eq!("cycling".parse::<ActivityType>().unwrap(), ActivityType::Bike);
        assert!(matches!(
            "swim".parse::<ActivityType>(),
            Err(ExploreError::UnknownActivityType { .. })
        ));
    }

    #[test]
    fn test_activity_type_serde() {
        let json = serde_json::to_string(&ActivityType::Bike).unwrap();
        assert_eq!(json, "\"bike\"");
        let status = serde_json::to_string(&ExplorationStatus::PartiallyExplored).unwrap();
        assert_eq!(status, "\"partially_explored\"");
    }
}
