//! Configuration for the exploration engine.

use serde::{Deserialize, Serialize};

use crate::{ExploreError, Result};

/// Configuration for coverage matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ExplorationConfig {
    /// Maximum distance between a road point and a route point for the route
    /// to count as having passed that road point.
    /// Default: 20.0 meters
    pub exploration_threshold: f64,

    /// Answer proximity queries through an R-tree over route points instead of
    /// scanning every route point. Results are identical either way.
    /// Default: true
    pub use_spatial_index: bool,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            exploration_threshold: 20.0,
            use_spatial_index: true,
        }
    }
}

impl ExplorationConfig {
    /// Check that the configuration can be used for matching.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_threshold.is_finite() || self.exploration_threshold <= 0.0 {
            return Err(ExploreError::ConfigError {
                message: format!(
                    "exploration_threshold must be a positive number of meters, got {}",
                    self.exploration_threshold
                ),
            });
        }
        Ok(())
    }
}
