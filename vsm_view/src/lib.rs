// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! VSM View: viewport culling, level of detail, and proximity clustering for a VSM network.
//!
//! ## Overview
//!
//! This crate decides what a camera should see of a [`Network`](vsm_network::Network) and
//! when the scene has to change. It does not render anything.
//! Instead, it calls into a [`LodEffects`] implementation supplied by the caller, which
//! applies the visual changes to whatever scene graph is in use.
//!
//! ## Pieces
//!
//! - [`ViewportCalculator`] turns a [`Camera`] into the padded world box it sees.
//! - [`LodController`] maps camera distance to a [`LodLevel`] and reports changes only.
//! - [`ClusterGrouper`] collapses dense groups of nodes in view into [`Cluster`]s.
//! - [`Session`] owns a network together with its spatial index and LOD state, and runs
//!   the whole evaluation once per call (or every few frames through [`Session::tick`]).
//! - [`SceneState`] is an in-memory [`LodEffects`] that records the resulting visuals.
//!
//! ## Levels
//!
//! Beyond `lod.low` (15 by default) the view is [`LodLevel::Low`]: the spatial index is
//! rebuilt, the nodes in view are grouped, and groups of more than `cluster_threshold`
//! nodes are shown as a single cluster. Between `lod.medium` and `lod.low` every node is
//! shown in simplified form. Closer than `lod.medium` every node is shown in full, and
//! per-node scale and label visibility follow the distance to the camera target.
//!
//! ## Example
//!
//! ```rust
//! use vsm_network::{Network, Tag};
//! use vsm_view::{Camera, LodLevel, SceneState, Session};
//!
//! let mut network = Network::new();
//! network.create_seed().unwrap();
//! network.add_children(Tag::SEED, 6).unwrap();
//!
//! let mut session = Session::new(network);
//! let mut scene = SceneState::new();
//!
//! let report = session.update_visibility(&Camera::default(), &mut scene);
//! assert_eq!(report.level, LodLevel::Full);
//! assert_eq!(report.to_string(), "Visible: 7 / Total: 7 (LOD: Full)");
//!
//! let report = session.update_visibility(&Camera::default().at_distance(12.0), &mut scene);
//! assert_eq!(report.level, LodLevel::Medium);
//! assert!(report.transition.is_some());
//! ```
//!
//! ## Logging
//!
//! Level changes and clustering passes are logged at `info`, per-evaluation counts at
//! `debug`, and nodes dropped from the spatial index for lying outside the world at `warn`.

pub mod adapters;
pub mod cluster;
pub mod config;
pub mod effects;
pub mod lod;
pub mod session;
pub mod viewport;

pub use cluster::{Cluster, ClusterGrouper, ClusterPartition};
pub use config::{ConfigError, ConfigResult, ViewConfig};
pub use effects::{
    ClusterVisual, LodEffects, NodeVisibility, NodeVisual, SceneState, VisibilityFrame,
    VisualFlags,
};
pub use lod::{LodController, LodLevel, LodThresholds, LodTransition};
pub use session::{Session, VisibilityReport};
pub use viewport::{Camera, ViewportBounds, ViewportCalculator};
