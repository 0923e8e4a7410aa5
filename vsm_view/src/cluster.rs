// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy proximity clustering of the nodes in view.
//!
//! Grouping is a single pass in input order: each item not yet assigned opens a group and
//! pulls in every later unassigned item within `radius` of it. Distances are measured from
//! the group's first item only, so grouping is not transitive and the result depends on
//! the input order. Feed the same order to get the same clusters.

use kurbo::Point;
use vsm_index::SpatialItem;

/// Default grouping radius.
pub const DEFAULT_CLUSTER_RADIUS: f64 = 2.0;

/// Default minimum group size, exclusive: a group needs more members than this.
pub const DEFAULT_CLUSTER_THRESHOLD: usize = 10;

/// An aggregate standing in for several nearby nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster<P> {
    /// Arithmetic mean of the member positions.
    pub centroid: Point,
    /// Member payloads in grouping order.
    pub members: Vec<P>,
}

impl<P> Cluster<P> {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Count label shown in place of the members, e.g. `"12 nodes"`.
    pub fn label(&self) -> String {
        format!("{} nodes", self.members.len())
    }
}

/// Result of [`ClusterGrouper::partition`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterPartition<P> {
    /// Groups large enough to collapse.
    pub clusters: Vec<Cluster<P>>,
    /// Payloads of every item left outside a cluster, in grouping order.
    pub remainder: Vec<P>,
}

impl<P> Default for ClusterPartition<P> {
    fn default() -> Self {
        Self {
            clusters: Vec::new(),
            remainder: Vec::new(),
        }
    }
}

/// Groups nearby items and decides which groups become clusters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClusterGrouper {
    radius: f64,
    threshold: usize,
}

impl Default for ClusterGrouper {
    fn default() -> Self {
        Self::new(DEFAULT_CLUSTER_RADIUS, DEFAULT_CLUSTER_THRESHOLD)
    }
}

impl ClusterGrouper {
    /// Create a grouper. Groups need more than `threshold` members to become clusters.
    pub fn new(radius: f64, threshold: usize) -> Self {
        Self { radius, threshold }
    }

    /// Grouping radius (inclusive).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Exclusive minimum cluster size.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Split `items` into proximity groups. Every item ends up in exactly one group.
    pub fn group<P>(&self, items: Vec<SpatialItem<f64, P>>) -> Vec<Vec<SpatialItem<f64, P>>> {
        let n = items.len();
        let mut assigned = vec![false; n];
        let mut index_groups: Vec<Vec<usize>> = Vec::new();
        for i in 0..n {
            if assigned[i] {
                continue;
            }
            assigned[i] = true;
            let seed = &items[i];
            let mut members = vec![i];
            for j in (i + 1)..n {
                if assigned[j] {
                    continue;
                }
                let other = &items[j];
                if (other.x - seed.x).hypot(other.y - seed.y) <= self.radius {
                    assigned[j] = true;
                    members.push(j);
                }
            }
            index_groups.push(members);
        }

        let mut slots: Vec<Option<SpatialItem<f64, P>>> = items.into_iter().map(Some).collect();
        index_groups
            .into_iter()
            .map(|members| members.into_iter().filter_map(|i| slots[i].take()).collect())
            .collect()
    }

    /// Turn groups with more than `threshold` members into clusters.
    pub fn partition<P>(&self, groups: Vec<Vec<SpatialItem<f64, P>>>) -> ClusterPartition<P> {
        let mut out = ClusterPartition::default();
        for group in groups {
            if group.len() > self.threshold {
                out.clusters.push(cluster_of(group));
            } else {
                out.remainder.extend(group.into_iter().map(|item| item.payload));
            }
        }
        out
    }

    /// [`group`](Self::group) followed by [`partition`](Self::partition).
    pub fn cluster<P>(&self, items: Vec<SpatialItem<f64, P>>) -> ClusterPartition<P> {
        self.partition(self.group(items))
    }
}

fn cluster_of<P>(group: Vec<SpatialItem<f64, P>>) -> Cluster<P> {
    #[allow(
        clippy::cast_precision_loss,
        reason = "cluster sizes are far below 2^52."
    )]
    let n = group.len() as f64;
    let (mut sx, mut sy) = (0.0, 0.0);
    let mut members = Vec::with_capacity(group.len());
    for item in group {
        sx += item.x;
        sy += item.y;
        members.push(item.payload);
    }
    Cluster {
        centroid: Point::new(sx / n, sy / n),
        members,
    }
}
