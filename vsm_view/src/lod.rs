// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level-of-detail selection with change detection.
//!
//! ## Usage
//!
//! 1) Each evaluation, pass the camera distance to [`LodController::evaluate`].
//! 2) It returns a [`LodTransition`] only when the level differs from the one it holds.
//! 3) Apply the visual side effect for the new level; do nothing on `None`.
//!
//! ```
//! use vsm_view::lod::{LodController, LodLevel};
//!
//! let mut lod = LodController::default();
//! assert_eq!(lod.evaluate(20.0).map(|t| t.to), Some(LodLevel::Low));
//! assert_eq!(lod.evaluate(18.0), None);
//! assert_eq!(lod.evaluate(10.0).map(|t| t.to), Some(LodLevel::Medium));
//! assert_eq!(lod.evaluate(5.0).map(|t| t.to), Some(LodLevel::Full));
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

/// Discrete rendering fidelity tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LodLevel {
    /// Every node with its label, scaled by distance.
    Full,
    /// Every node at reduced size, labels hidden.
    Medium,
    /// Dense areas collapsed into clusters.
    Low,
}

impl fmt::Display for LodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "Full",
            Self::Medium => "Medium",
            Self::Low => "Low",
        })
    }
}

/// Distances above which coarser levels kick in.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodThresholds {
    /// Beyond this distance the view drops to [`LodLevel::Medium`].
    pub medium: f64,
    /// Beyond this distance the view drops to [`LodLevel::Low`].
    pub low: f64,
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self {
            medium: 8.0,
            low: 15.0,
        }
    }
}

impl LodThresholds {
    /// Level for a camera `distance`. Both comparisons are strict.
    pub fn level_for(&self, distance: f64) -> LodLevel {
        if distance > self.low {
            LodLevel::Low
        } else if distance > self.medium {
            LodLevel::Medium
        } else {
            LodLevel::Full
        }
    }
}

/// A change of level reported by [`LodController::evaluate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LodTransition {
    /// Previous level; `None` on the first evaluation.
    pub from: Option<LodLevel>,
    /// New level.
    pub to: LodLevel,
}

/// Holds the current level and reports changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LodController {
    thresholds: LodThresholds,
    current: Option<LodLevel>,
}

impl LodController {
    /// Create a controller with no level yet.
    pub fn new(thresholds: LodThresholds) -> Self {
        Self {
            thresholds,
            current: None,
        }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }

    /// Current level, `None` before the first evaluation.
    pub fn current(&self) -> Option<LodLevel> {
        self.current
    }

    /// Select the level for `distance`, returning the transition if it changed.
    pub fn evaluate(&mut self, distance: f64) -> Option<LodTransition> {
        let to = self.thresholds.level_for(distance);
        if self.current == Some(to) {
            return None;
        }
        let from = self.current.replace(to);
        Some(LodTransition { from, to })
    }

    /// Forget the current level so the next evaluation reports a transition.
    pub fn reset(&mut self) -> Option<LodLevel> {
        self.current.take()
    }
}
