// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View configuration: world bounds, clustering, LOD thresholds, and evaluation cadence.
//!
//! Every field has a default, so an empty JSON object is a valid configuration:
//!
//! ```
//! use vsm_view::ViewConfig;
//!
//! let cfg = ViewConfig::from_json(r#"{ "cluster_threshold": 4, "lod": { "low": 25.0 } }"#).unwrap();
//! assert_eq!(cfg.cluster_threshold, 4);
//! assert_eq!(cfg.lod.medium, 8.0);
//! assert_eq!(cfg.lod.low, 25.0);
//! assert_eq!(cfg.evaluate_every, 2);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vsm_index::Aabb2D;
use vsm_index::spatial::{DEFAULT_CAPACITY, DEFAULT_WORLD_HALF_EXTENT};

use crate::cluster::{ClusterGrouper, DEFAULT_CLUSTER_RADIUS, DEFAULT_CLUSTER_THRESHOLD};
use crate::lod::LodThresholds;
use crate::viewport::{DEFAULT_PADDING_RATIO, ViewportCalculator};

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading a [`ViewConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value outside its allowed range.
    #[error("invalid config field {field}: {reason}")]
    Invalid {
        /// Field name, dotted for nested fields.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The configuration is not valid JSON for this schema.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables of a [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Half side of the square world indexed by the quadtree.
    pub world_half_extent: f64,
    /// Quadtree leaf capacity.
    pub quadtree_capacity: usize,
    /// Grouping radius for clusters.
    pub cluster_radius: f64,
    /// Groups need more members than this to become clusters.
    pub cluster_threshold: usize,
    /// Distances at which the level of detail drops.
    pub lod: LodThresholds,
    /// Viewport padding as a fraction of its larger side.
    pub viewport_padding: f64,
    /// Run a visibility evaluation every this many ticks.
    pub evaluate_every: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            world_half_extent: DEFAULT_WORLD_HALF_EXTENT,
            quadtree_capacity: DEFAULT_CAPACITY,
            cluster_radius: DEFAULT_CLUSTER_RADIUS,
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            lod: LodThresholds::default(),
            viewport_padding: DEFAULT_PADDING_RATIO,
            evaluate_every: 2,
        }
    }
}

impl ViewConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.world_half_extent.is_finite() || self.world_half_extent <= 0.0 {
            return Err(invalid(
                "world_half_extent",
                format!("must be positive and finite, got {}", self.world_half_extent),
            ));
        }
        if self.quadtree_capacity == 0 {
            return Err(invalid("quadtree_capacity", "must be at least 1".into()));
        }
        if !non_negative(self.cluster_radius) {
            return Err(invalid(
                "cluster_radius",
                format!("must be non-negative, got {}", self.cluster_radius),
            ));
        }
        if !non_negative(self.lod.medium) {
            return Err(invalid(
                "lod.medium",
                format!("must be non-negative, got {}", self.lod.medium),
            ));
        }
        if self.lod.low.is_nan() || self.lod.low < self.lod.medium {
            return Err(invalid(
                "lod.low",
                format!(
                    "must not be below lod.medium ({}), got {}",
                    self.lod.medium, self.lod.low
                ),
            ));
        }
        if !non_negative(self.viewport_padding) {
            return Err(invalid(
                "viewport_padding",
                format!("must be non-negative, got {}", self.viewport_padding),
            ));
        }
        if self.evaluate_every == 0 {
            return Err(invalid("evaluate_every", "must be at least 1".into()));
        }
        Ok(())
    }

    /// World bounds for the spatial index.
    pub fn world_bounds(&self) -> Aabb2D<f64> {
        Aabb2D::centered(self.world_half_extent)
    }

    /// Cluster grouper with the configured radius and threshold.
    pub fn grouper(&self) -> ClusterGrouper {
        ClusterGrouper::new(self.cluster_radius, self.cluster_threshold)
    }

    /// Viewport calculator with the configured padding.
    pub fn viewport(&self) -> ViewportCalculator {
        ViewportCalculator::new(self.viewport_padding)
    }
}

fn non_negative(v: f64) -> bool {
    v >= 0.0
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        let cfg = ViewConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ViewConfig::default());
        assert_eq!(cfg.world_bounds(), Aabb2D::new(-1000.0, -1000.0, 1000.0, 1000.0));
        assert_eq!(cfg.quadtree_capacity, 4);
        assert_eq!(cfg.grouper(), ClusterGrouper::default());
    }

    #[test]
    fn out_of_range_fields_are_named() {
        let cases = [
            (r#"{ "quadtree_capacity": 0 }"#, "quadtree_capacity"),
            (r#"{ "cluster_radius": -1.0 }"#, "cluster_radius"),
            (r#"{ "lod": { "medium": 20.0 } }"#, "lod.low"),
            (r#"{ "viewport_padding": -0.5 }"#, "viewport_padding"),
            (r#"{ "evaluate_every": 0 }"#, "evaluate_every"),
            (r#"{ "world_half_extent": 0.0 }"#, "world_half_extent"),
        ];
        for (json, expected) in cases {
            match ViewConfig::from_json(json) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "{json}"),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ViewConfig::from_json(r#"{ "evaluate_every": "often" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn survives_a_json_round_trip() {
        let cfg = ViewConfig {
            cluster_threshold: 3,
            evaluate_every: 1,
            ..ViewConfig::default()
        };
        assert_eq!(ViewConfig::from_json(&cfg.to_json().unwrap()).unwrap(), cfg);
    }
}
