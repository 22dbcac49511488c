//! # Exploration Engine
//!
//! Stateful container for the road catalog and the recorded route history.
//!
//! ## Architecture
//!
//! The engine owns:
//! - The road catalog, with per-road coverage that only ever rises
//! - The append-only history of recorded routes
//! - The current aggregate statistics
//!
//! Every [`ExplorationEngine::add_explored_route`] call recomputes coverage for
//! all roads against the new route, then recomputes the statistics, before
//! returning an [`ExplorationUpdate`] describing what changed. Callers that
//! display state react to that value instead of observing fields.
//!
//! ## Cost
//!
//! One call costs O(R × Pr × Pq) distance computations with the exhaustive
//! matcher (R roads, Pr points per road, Pq points per route). With the
//! spatial index enabled, roads whose bounds are out of reach are skipped
//! and each road point costs one R-tree query. Long activities against large
//! catalogs can still take noticeable time; run the call off any interactive
//! thread.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use log::{debug, info, warn};
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::coverage::coverage_fraction;
use crate::history::{self, ActivitySummary};
use crate::{
    compute_stats, derive_achievements, Achievement, ExplorationConfig, ExplorationStats,
    ExplorationStatus, ExploreError, ExploredRoute, GeoPoint, Result, Road, RouteIndex,
};

// ============================================================================
// Update Types
// ============================================================================

/// Coverage change of one road caused by a new route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct RoadCoverageChange {
    pub road_id: String,
    pub previous_percentage: f64,
    pub new_percentage: f64,
    pub previous_status: ExplorationStatus,
    pub new_status: ExplorationStatus,
}

impl RoadCoverageChange {
    /// Whether the road moved to a different status.
    pub fn status_changed(&self) -> bool {
        self.previous_status != self.new_status
    }
}

/// Result of adding a route: what changed and the statistics afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ExplorationUpdate {
    pub route_id: String,
    /// Roads whose explored percentage rose, in catalog order
    pub road_changes: Vec<RoadCoverageChange>,
    pub stats: ExplorationStats,
}

// ============================================================================
// Exploration Engine
// ============================================================================

/// The main stateful exploration engine.
#[derive(Debug)]
pub struct ExplorationEngine {
    roads: Vec<Road>,
    // road id -> position in `roads`
    road_lookup: HashMap<String, usize>,
    routes: Vec<ExploredRoute>,
    stats: ExplorationStats,
    config: ExplorationConfig,
}

impl ExplorationEngine {
    /// Create an engine over a road catalog with default configuration.
    pub fn new(roads: Vec<Road>) -> Result<Self> {
        Self::with_config(roads, ExplorationConfig::default())
    }

    /// Create an engine over a road catalog with custom configuration.
    ///
    /// Every road starts unexplored. Fails on an invalid configuration, a
    /// road with invalid coordinates, or a repeated road id.
    pub fn with_config(mut roads: Vec<Road>, config: ExplorationConfig) -> Result<Self> {
        config.validate()?;

        let mut road_lookup = HashMap::with_capacity(roads.len());
        for (i, road) in roads.iter_mut().enumerate() {
            road.validate()?;
            if road_lookup.insert(road.id.clone(), i).is_some() {
                return Err(ExploreError::DuplicateRoad {
                    road_id: road.id.clone(),
                });
            }
            road.reset_coverage();
        }

        let stats = compute_stats(&roads);
        info!(
            "[ExplorationEngine] Loaded {} roads ({:.0}m total)",
            stats.total_roads, stats.total_distance
        );

        Ok(Self {
            roads,
            road_lookup,
            routes: Vec::new(),
            stats,
            config,
        })
    }

    // ========================================================================
    // Route Management
    // ========================================================================

    /// Record a finished route and update road coverage and statistics.
    ///
    /// Each road's explored percentage becomes the maximum of its previous
    /// value and this route's coverage fraction. A route with no points is
    /// recorded but changes no road.
    ///
    /// Malformed routes (invalid coordinates or a negative timestamp) are
    /// rejected and leave the engine untouched.
    pub fn add_explored_route(&mut self, route: ExploredRoute) -> Result<ExplorationUpdate> {
        if let Err(e) = route.validate() {
            warn!("[ExplorationEngine] Rejected route: {}", e);
            return Err(e);
        }

        if self.routes.iter().any(|r| r.id == route.id) {
            debug!(
                "[ExplorationEngine] Route '{}' already in history, recording again",
                route.id
            );
        }

        let start = Instant::now();
        let fractions = self.route_coverage(&route.points);

        let mut road_changes = Vec::new();
        for (road, fraction) in self.roads.iter_mut().zip(fractions) {
            let previous_percentage = road.explored_percentage();
            let previous_status = road.status();
            if !road.apply_coverage(fraction) {
                continue;
            }

            let change = RoadCoverageChange {
                road_id: road.id.clone(),
                previous_percentage,
                new_percentage: road.explored_percentage(),
                previous_status,
                new_status: road.status(),
            };
            if change.status_changed() {
                debug!(
                    "[ExplorationEngine] Road '{}' {:?} -> {:?}",
                    road.name, change.previous_status, change.new_status
                );
            }
            road_changes.push(change);
        }

        self.stats = compute_stats(&self.roads);

        info!(
            "[ExplorationEngine] Added {} route '{}' ({} points): {} roads changed in {:?}",
            route.activity_type,
            route.id,
            route.points.len(),
            road_changes.len(),
            start.elapsed()
        );

        let route_id = route.id.clone();
        self.routes.push(route);

        Ok(ExplorationUpdate {
            route_id,
            road_changes,
            stats: self.stats,
        })
    }

    /// Coverage fraction of every road (in catalog order) for one route.
    fn route_coverage(&self, route: &[GeoPoint]) -> Vec<f64> {
        let threshold = self.config.exploration_threshold;
        let index = self.config.use_spatial_index.then(|| RouteIndex::new(route));

        let coverage = |road: &Road| -> f64 {
            match &index {
                Some(index) => match road.bounds() {
                    Some(bounds) if index.may_cover(bounds, threshold) => {
                        index.coverage_fraction(&road.points, threshold)
                    }
                    _ => 0.0,
                },
                None => coverage_fraction(&road.points, route, threshold),
            }
        };

        #[cfg(feature = "parallel")]
        let fractions = self.roads.par_iter().map(coverage).collect();
        #[cfg(not(feature = "parallel"))]
        let fractions = self.roads.iter().map(coverage).collect();

        fractions
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// All roads, in catalog order.
    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Look up a road by id.
    pub fn road(&self, id: &str) -> Option<&Road> {
        self.road_lookup.get(id).map(|&i| &self.roads[i])
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// Route history, in the order routes were added.
    pub fn routes(&self) -> &[ExploredRoute] {
        &self.routes
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Current statistics snapshot.
    pub fn stats(&self) -> ExplorationStats {
        self.stats
    }

    pub fn config(&self) -> &ExplorationConfig {
        &self.config
    }

    // ========================================================================
    // Derived Views
    // ========================================================================

    /// The `n` most recent routes by timestamp, newest first.
    pub fn recent_routes(&self, n: usize) -> Vec<&ExploredRoute> {
        history::recent_routes(&self.routes, n)
    }

    /// Route count and recorded distance per activity type.
    pub fn activity_summaries(&self) -> Vec<ActivitySummary> {
        history::activity_summaries(&self.routes)
    }

    /// Achievements earned with the current statistics and history.
    pub fn achievements(&self) -> Vec<Achievement> {
        derive_achievements(&self.stats, self.routes.len())
    }

    // ========================================================================
    // JSON Export
    // ========================================================================

    /// Get roads as JSON string (for efficient FFI).
    pub fn roads_json(&self) -> String {
        serde_json::to_string(&self.roads).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get statistics as JSON string, including the derived percentage.
    pub fn stats_json(&self) -> String {
        #[derive(Serialize)]
        struct StatsView<'a> {
            #[serde(flatten)]
            stats: &'a ExplorationStats,
            exploration_percentage: f64,
        }

        serde_json::to_string(&StatsView {
            stats: &self.stats,
            exploration_percentage: self.stats.exploration_percentage(),
        })
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Get route history as JSON string.
    pub fn routes_json(&self) -> String {
        serde_json::to_string(&self.routes).unwrap_or_else(|_| "[]".to_string())
    }
}

// ============================================================================
// Shared Engine
// ============================================================================

/// Thread-safe handle to an engine.
///
/// All access goes through one mutex, so the read-then-raise update of each
/// road's coverage in [`ExplorationEngine::add_explored_route`] runs as a
/// single critical section.
#[derive(Debug, Clone)]
pub struct SharedExplorationEngine {
    inner: Arc<Mutex<ExplorationEngine>>,
}

impl SharedExplorationEngine {
    pub fn new(engine: ExplorationEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ExplorationEngine) -> R,
    {
        // Coverage is applied only after every fraction is computed, so a
        // poisoned lock still guards a consistent engine
        let mut engine = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }

    /// Record a route under the lock.
    pub fn add_explored_route(&self, route: ExploredRoute) -> Result<ExplorationUpdate> {
        self.with_engine(|e| e.add_explored_route(route))
    }

    pub fn stats(&self) -> ExplorationStats {
        self.with_engine(|e| e.stats())
    }
}

// ============================================================================
// Tests
// ============================================================================
