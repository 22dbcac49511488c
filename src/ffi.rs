//! FFI bindings for mobile platforms (iOS/Android).
//!
//! This module provides the UniFFI bindings that expose the exploration
//! engine to Kotlin and Swift. The engine is a UniFFI object owned by the
//! caller; every call locks it, so the app may call from any thread.

use std::sync::Arc;

use log::info;

use crate::geo_utils::haversine_distance;
use crate::{
    derive_achievements, init_logging, Achievement, ActivitySummary, ExplorationConfig,
    ExplorationEngine, ExplorationStats, ExplorationUpdate, ExploreError, ExploredRoute, GeoPoint,
    Road, SharedExplorationEngine,
};

/// A road as supplied by the app when loading the catalog.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCatalogRoad {
    pub id: String,
    pub name: String,
    pub points: Vec<GeoPoint>,
}

/// Live road state for display.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRoadState {
    pub id: String,
    pub name: String,
    pub status: crate::ExplorationStatus,
    pub explored_percentage: f64,
    pub length: f64,
}

// ============================================================================
// Engine Object
// ============================================================================

/// Exploration engine handle for mobile callers.
#[derive(uniffi::Object)]
pub struct FfiExplorationEngine {
    shared: SharedExplorationEngine,
}

#[uniffi::export]
impl FfiExplorationEngine {
    /// Load the road catalog. Call once at app startup.
    #[uniffi::constructor]
    pub fn new(
        roads: Vec<FfiCatalogRoad>,
        config: ExplorationConfig,
    ) -> Result<Arc<Self>, ExploreError> {
        init_logging();
        let roads: Vec<Road> = roads
            .into_iter()
            .map(|r| Road::new(r.id, r.name, r.points))
            .collect();
        let engine = ExplorationEngine::with_config(roads, config)?;
        Ok(Arc::new(Self {
            shared: SharedExplorationEngine::new(engine),
        }))
    }

    /// Record a finished route.
    pub fn add_route(&self, route: ExploredRoute) -> Result<ExplorationUpdate, ExploreError> {
        self.shared.add_explored_route(route)
    }

    /// Current statistics snapshot.
    pub fn stats(&self) -> ExplorationStats {
        self.shared.stats()
    }

    /// Share of roads explored, 0-100.
    pub fn exploration_percentage(&self) -> f64 {
        self.shared.stats().exploration_percentage()
    }

    /// All roads with their live coverage, in catalog order.
    pub fn road_states(&self) -> Vec<FfiRoadState> {
        self.shared.with_engine(|e| {
            e.roads()
                .iter()
                .map(|r| FfiRoadState {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    status: r.status(),
                    explored_percentage: r.explored_percentage(),
                    length: r.length(),
                })
                .collect()
        })
    }

    /// Roads with geometry as JSON.
    pub fn roads_json(&self) -> String {
        self.shared.with_engine(|e| e.roads_json())
    }

    pub fn route_count(&self) -> u32 {
        self.shared.with_engine(|e| e.route_count() as u32)
    }

    /// The `count` most recent routes, newest first.
    pub fn recent_routes(&self, count: u32) -> Vec<ExploredRoute> {
        self.shared.with_engine(|e| {
            e.recent_routes(count as usize)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn activity_summaries(&self) -> Vec<ActivitySummary> {
        self.shared.with_engine(|e| e.activity_summaries())
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        let achievements = self.shared.with_engine(|e| e.achievements());
        info!("[Achievements] {} achievements earned", achievements.len());
        achievements
    }
}

// ============================================================================
// Standalone Functions
// ============================================================================

/// Great-circle distance in meters between two points.
#[uniffi::export]
pub fn ffi_geo_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_distance(&a, &b)
}

/// Achievements for arbitrary statistics.
#[uniffi::export]
pub fn ffi_derive_achievements(stats: ExplorationStats, route_count: u32) -> Vec<Achievement> {
    let achievements = derive_achievements(&stats, route_count as usize);
    info!(
        "[Achievements] Derived {} achievements for {} routes",
        achievements.len(),
        route_count
    );
    achievements
}
