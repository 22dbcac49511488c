//! Road catalog entries and recorded routes.

use serde::{Deserialize, Serialize};

use crate::coverage::merge_coverage;
use crate::geo_utils::{compute_bounds, polyline_length};
use crate::{ActivityType, Bounds, ExplorationStatus, ExploreError, GeoPoint, Result};

/// A reference road from the catalog.
///
/// Geometry is fixed at construction. Only the engine mutates the coverage
/// fields, and only upwards.
#[derive(Debug, Clone, Serialize)]
pub struct Road {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Sampled centerline, in order
    pub points: Vec<GeoPoint>,
    /// Polyline length in meters
    length: f64,
    #[serde(skip)]
    bounds: Option<Bounds>,
    status: ExplorationStatus,
    explored_percentage: f64,
}

impl Road {
    /// Create an unexplored road.
    pub fn new(id: impl Into<String>, name: impl Into<String>, points: Vec<GeoPoint>) -> Self {
        let length = polyline_length(&points);
        let bounds = compute_bounds(&points);
        Self {
            id: id.into(),
            name: name.into(),
            points,
            length,
            bounds,
            status: ExplorationStatus::Unexplored,
            explored_percentage: 0.0,
        }
    }

    /// Polyline length in meters.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Bounding box of the centerline (`None` for a road without points).
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn status(&self) -> ExplorationStatus {
        self.status
    }

    /// Explored fraction in `[0, 1]`.
    pub fn explored_percentage(&self) -> f64 {
        self.explored_percentage
    }

    /// Length of road considered explored, in meters.
    pub fn explored_distance(&self) -> f64 {
        self.length * self.explored_percentage
    }

    /// Reject roads with non-finite or out-of-range coordinates.
    pub fn validate(&self) -> Result<()> {
        validate_points(&self.id, &self.points)
    }

    pub(crate) fn reset_coverage(&mut self) {
        self.status = ExplorationStatus::Unexplored;
        self.explored_percentage = 0.0;
    }

    /// Raise the explored fraction to `fraction` if it is higher.
    ///
    /// Returns true when the stored percentage changed.
    pub(crate) fn apply_coverage(&mut self, fraction: f64) -> bool {
        let merged = merge_coverage(self.explored_percentage, fraction);
        if merged <= self.explored_percentage {
            return false;
        }
        self.explored_percentage = merged;
        self.status = ExplorationStatus::from_fraction(merged);
        true
    }
}

/// A completed, recorded activity.
///
/// Points are kept exactly as recorded; they are never resampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ExploredRoute {
    pub id: String,
    pub points: Vec<GeoPoint>,
    pub activity_type: ActivityType,
    /// Unix timestamp (seconds since epoch) of creation
    pub timestamp: i64,
    /// Optional user-supplied name
    pub name: Option<String>,
}

impl ExploredRoute {
    /// Create an unnamed route.
    pub fn new(
        id: impl Into<String>,
        points: Vec<GeoPoint>,
        activity_type: ActivityType,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            points,
            activity_type,
            timestamp,
            name: None,
        }
    }

    /// Attach a user-supplied name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Recorded distance in meters.
    pub fn distance(&self) -> f64 {
        polyline_length(&self.points)
    }

    /// Reject malformed routes: invalid coordinates or a negative timestamp.
    pub fn validate(&self) -> Result<()> {
        if self.timestamp < 0 {
            return Err(ExploreError::InvalidTimestamp {
                route_id: self.id.clone(),
                timestamp: self.timestamp,
            });
        }
        validate_points(&self.id, &self.points)
    }
}

fn validate_points(entity_id: &str, points: &[GeoPoint]) -> Result<()> {
    match points.iter().position(|p| !p.is_valid()) {
        Some(index) => Err(ExploreError::InvalidCoordinates {
            entity_id: entity_id.to_string(),
            index,
            latitude: points[index].latitude,
            longitude: points[index].longitude,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_road() -> Road {
        Road::new(
            "r1",
            "Pratt Street",
            vec![
                GeoPoint::new(39.2854, -76.6122),
                GeoPoint::new(39.2854, -76.6172),
                GeoPoint::new(39.2854, -76.6222),
            ],
        )
    }

    #[test]
    fn test_new_road_is_unexplored() {
        let road = straight_road();
        assert_eq!(road.status(), ExplorationStatus::Unexplored);
        assert_eq!(road.explored_percentage(), 0.0);
        assert!(road.length() > 800.0);
        assert!(road.bounds().is_some());
    }

    #[test]
    fn test_apply_coverage_only_raises() {
        let mut road = straight_road();
        assert!(road.apply_coverage(0.5));
        assert_eq!(road.status(), ExplorationStatus::PartiallyExplored);

        assert!(!road.apply_coverage(0.3));
        assert_eq!(road.explored_percentage(), 0.5);

        assert!(road.apply_coverage(0.9));
        assert_eq!(road.status(), ExplorationStatus::FullyExplored);
        assert!((road.explored_distance() - road.length() * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_zero_coverage_is_not_a_change() {
        let mut road = straight_road();
        assert!(!road.apply_coverage(0.0));
        assert_eq!(road.status(), ExplorationStatus::Unexplored);
    }

    #[test]
    fn test_road_without_points() {
        let road = Road::new("empty", "Nowhere Lane", vec![]);
        assert_eq!(road.length(), 0.0);
        assert!(road.bounds().is_none());
        assert!(road.validate().is_ok());
    }

    #[test]
    fn test_route_validation() {
        let route = ExploredRoute::new(
            "walk-1",
            vec![GeoPoint::new(39.2854, -76.6122)],
            ActivityType::Walk,
            1_700_000_000,
        );
        assert!(route.validate().is_ok());

        let bad_time = ExploredRoute {
            timestamp: -1,
            ..route.clone()
        };
        assert!(matches!(
            bad_time.validate(),
            Err(ExploreError::InvalidTimestamp { .. })
        ));

        let bad_point = ExploredRoute {
            points: vec![GeoPoint::new(39.0, -76.0), GeoPoint::new(f64::NAN, -76.0)],
            ..route
        };
        assert!(matches!(
            bad_point.validate(),
            Err(ExploreError::InvalidCoordinates { index: 1, .. })
        ));
    }

    #[test]
    fn test_route_name_and_distance() {
        let route = ExploredRoute::new("r", vec![], ActivityType::Run, 0).with_name("Morning run");
        assert_eq!(route.name.as_deref(), Some("Morning run"));
        assert_eq!(route.distance(), 0.0);
    }
}
