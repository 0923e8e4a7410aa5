// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One active view over a network: spatial index, LOD state, clusters, and visible set.

use core::fmt;
use std::collections::HashSet;

use tracing::{debug, info};
use vsm_index::SpatialIndex;
use vsm_network::{Network, Tag};

use crate::adapters::network::{all_tags, rebuild_index, tags_in_bounds, visibility_frame};
use crate::cluster::{Cluster, ClusterGrouper};
use crate::config::{ConfigResult, ViewConfig};
use crate::effects::LodEffects;
use crate::lod::{LodController, LodLevel, LodTransition};
use crate::viewport::{Camera, ViewportBounds, ViewportCalculator};

/// Outcome of one visibility evaluation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisibilityReport {
    /// Level after the evaluation.
    pub level: LodLevel,
    /// Level change applied during the evaluation, if any.
    pub transition: Option<LodTransition>,
    /// Nodes inside the viewport.
    pub visible: usize,
    /// Nodes in the network.
    pub total: usize,
    /// Clusters currently shown.
    pub clusters: usize,
}

impl fmt::Display for VisibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Visible: {} / Total: {} (LOD: {})",
            self.visible, self.total, self.level
        )
    }
}

/// A network together with the state needed to view it.
///
/// Drive it from the frame loop with [`Session::tick`], or call
/// [`Session::update_visibility`] directly. Visual changes are pushed into the
/// [`LodEffects`] passed to each call.
pub struct Session {
    config: ViewConfig,
    network: Network,
    index: SpatialIndex<Tag>,
    viewport: ViewportCalculator,
    lod: LodController,
    grouper: ClusterGrouper,
    clusters: Vec<Cluster<Tag>>,
    visible: Vec<Tag>,
    bounds: Option<ViewportBounds>,
    ticks: u64,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("nodes", &self.network.len())
            .field("level", &self.lod.current())
            .field("clusters", &self.clusters.len())
            .field("visible", &self.visible.len())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with the default configuration.
    pub fn new(network: Network) -> Self {
        Self::build(network, ViewConfig::default())
    }

    /// Create a session after validating `config`.
    pub fn with_config(network: Network, config: ViewConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(network, config))
    }

    fn build(network: Network, config: ViewConfig) -> Self {
        Self {
            index: SpatialIndex::new(config.world_bounds(), config.quadtree_capacity),
            viewport: config.viewport(),
            lod: LodController::new(config.lod),
            grouper: config.grouper(),
            config,
            network,
            clusters: Vec::new(),
            visible: Vec::new(),
            bounds: None,
            ticks: 0,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The viewed network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable access for structural edits; follow up with [`Session::refresh`].
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Consume the session, returning the network.
    pub fn into_network(self) -> Network {
        self.network
    }

    /// Spatial index as of the last clustering pass.
    pub fn index(&self) -> &SpatialIndex<Tag> {
        &self.index
    }

    /// Current level, `None` before the first evaluation.
    pub fn level(&self) -> Option<LodLevel> {
        self.lod.current()
    }

    /// Clusters currently shown (empty outside [`LodLevel::Low`]).
    pub fn clusters(&self) -> &[Cluster<Tag>] {
        &self.clusters
    }

    /// Nodes inside the viewport at the last evaluation, in network order.
    pub fn visible(&self) -> &[Tag] {
        &self.visible
    }

    /// Viewport of the last evaluation.
    pub fn bounds(&self) -> Option<ViewportBounds> {
        self.bounds
    }

    /// Ticks seen so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one frame; evaluates on the first tick and then every `evaluate_every` ticks.
    pub fn tick(
        &mut self,
        camera: &Camera,
        effects: &mut impl LodEffects<Tag>,
    ) -> Option<VisibilityReport> {
        let due = self.ticks % u64::from(self.config.evaluate_every) == 0;
        self.ticks += 1;
        due.then(|| self.update_visibility(camera, effects))
    }

    /// Evaluate the level of detail and the visible set for `camera`.
    ///
    /// A level change triggers the matching `apply_*` callback. While at
    /// [`LodLevel::Full`], per-node visibility is pushed on every call.
    pub fn update_visibility(
        &mut self,
        camera: &Camera,
        effects: &mut impl LodEffects<Tag>,
    ) -> VisibilityReport {
        self.evaluate(camera, effects, false)
    }

    /// Evaluate as usual, re-applying the current level when it did not change.
    ///
    /// Call after structural edits so new or removed nodes are reflected even when the
    /// level stays the same. A level change applies only the new level.
    pub fn refresh(
        &mut self,
        camera: &Camera,
        effects: &mut impl LodEffects<Tag>,
    ) -> VisibilityReport {
        self.evaluate(camera, effects, true)
    }

    fn evaluate(
        &mut self,
        camera: &Camera,
        effects: &mut impl LodEffects<Tag>,
        reapply: bool,
    ) -> VisibilityReport {
        let transition = self.lod.evaluate(camera.distance);
        if let Some(t) = transition {
            info!(
                from = ?t.from,
                to = %t.to,
                distance = camera.distance,
                "level of detail changed"
            );
            self.apply_level(t.to, camera, effects);
        } else if reapply && let Some(level) = self.lod.current() {
            self.apply_level(level, camera, effects);
        }
        let level = self.lod.thresholds().level_for(camera.distance);

        let bounds = self.viewport.bounds(camera);
        self.visible = tags_in_bounds(&self.network, &bounds);
        self.bounds = Some(bounds);
        if level == LodLevel::Full {
            effects.update_visibility(&visibility_frame(&self.network, camera, bounds));
        }

        let report = VisibilityReport {
            level,
            transition,
            visible: self.visible.len(),
            total: self.network.len(),
            clusters: self.clusters.len(),
        };
        debug!(%report, "visibility updated");
        report
    }

    fn apply_level(
        &mut self,
        level: LodLevel,
        camera: &Camera,
        effects: &mut impl LodEffects<Tag>,
    ) {
        match level {
            LodLevel::Full => {
                self.clusters.clear();
                effects.apply_full(&all_tags(&self.network));
            }
            LodLevel::Medium => {
                self.clusters.clear();
                effects.apply_medium(&all_tags(&self.network));
            }
            LodLevel::Low => {
                let remainder = self.recluster(camera);
                effects.apply_clustered(&self.clusters, &remainder);
            }
        }
    }

    /// Rebuild the index, cluster the nodes in view, and return every node left out.
    fn recluster(&mut self, camera: &Camera) -> Vec<Tag> {
        rebuild_index(&mut self.index, &self.network);
        let bounds = self.viewport.bounds(camera);
        let in_view = self.index.query(&bounds.to_aabb());
        debug!(in_view = in_view.len(), "clustering nodes in view");

        let partition = self.grouper.cluster(in_view);
        self.clusters = partition.clusters;
        let captured: HashSet<&Tag> = self
            .clusters
            .iter()
            .flat_map(|c| c.members.iter())
            .collect();
        let remainder = self
            .network
            .tags()
            .filter(|t| !captured.contains(t))
            .cloned()
            .collect();
        info!(clusters = self.clusters.len(), "clustered view");
        remainder
    }
}
