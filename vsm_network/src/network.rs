// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core network implementation: structure, growth, removal, queries, records.

use std::collections::{BTreeMap, HashMap, HashSet};

use kurbo::Point;
use tracing::{debug, info, warn};

use crate::error::{NetworkError, NetworkResult};
use crate::geometry::{edge_length, polygon_vertices};
use crate::record::NodeRecord;
use crate::types::{GrowthSettings, Node, NodeId, Tag};

/// A tree of tagged nodes.
///
/// Nodes live in generational slots; iteration follows slot order, which is creation
/// order until removed slots get reused. Parent and child links are stored as tags and
/// kept consistent in both directions by every edit.
#[derive(Clone, Default)]
pub struct Network {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    by_tag: HashMap<Tag, NodeId>,
    settings: GrowthSettings,
}

impl core::fmt::Debug for Network {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Network")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.by_tag.len())
            .field("free_list", &self.free_list.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Network {
    /// Create an empty network with default growth settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty network with the given growth settings.
    pub fn with_settings(settings: GrowthSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Growth settings in use.
    pub fn settings(&self) -> &GrowthSettings {
        &self.settings
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// True if the network has no nodes.
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Look up the id of a tag.
    pub fn id_of(&self, tag: &str) -> Option<NodeId> {
        self.by_tag.get(tag).copied()
    }

    /// Look up a node by tag.
    pub fn get(&self, tag: &str) -> Option<&Node> {
        self.id_of(tag).and_then(|id| self.node(id))
    }

    /// Look up a node by id; `None` if the id is stale.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let node = self.nodes.get(id.idx())?.as_ref()?;
        (self.generations[id.idx()] == id.1).then_some(node)
    }

    /// Iterate live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter_map(Option::as_ref)
    }

    /// Iterate live tags in slot order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> + '_ {
        self.iter().map(|n| &n.tag)
    }

    /// Project every node to `(tag, x, y)` for a spatial index rebuild.
    pub fn spatial_entries(&self) -> impl Iterator<Item = (Tag, f64, f64)> + '_ {
        self.iter()
            .map(|n| (n.tag.clone(), n.position.x, n.position.y))
    }

    /// Create the seed node `"0/0/1"` at the origin.
    pub fn create_seed(&mut self) -> NetworkResult<NodeId> {
        let mut record = NodeRecord::new(Tag::SEED, Point::ORIGIN, 0);
        record.poly_order = self.settings.seed_poly_order;
        let id = self.insert(record)?;
        info!(tag = Tag::SEED, "created seed node");
        Ok(id)
    }

    /// Insert a node from a record.
    ///
    /// The parent, if named, must already exist; the node is appended to its children
    /// unless already listed there. Child tags listed in the record are ignored: children
    /// link themselves when they are inserted.
    pub fn insert(&mut self, record: NodeRecord) -> NetworkResult<NodeId> {
        if self.by_tag.contains_key(&record.tag) {
            return Err(NetworkError::DuplicateTag { tag: record.tag });
        }
        if let Some(parent) = &record.parent
            && !self.by_tag.contains_key(parent)
        {
            return Err(NetworkError::UnknownParent {
                tag: record.tag,
                parent: parent.clone(),
            });
        }
        let name = if record.name.is_empty() {
            record.tag.as_str().to_owned()
        } else {
            record.name
        };
        let node = Node {
            position: Point::new(record.position[0], record.position[1]),
            tag: record.tag,
            name,
            layer: record.layer,
            poly_order: record.poly_order,
            parent: record.parent,
            children: Vec::new(),
        };
        let id = self.alloc(node);
        let (tag, parent) = {
            let n = self.slot(id);
            (n.tag.clone(), n.parent.clone())
        };
        if let Some(parent) = parent
            && let Some(pid) = self.id_of(parent.as_str())
        {
            let p = self.slot_mut(pid);
            if !p.children.contains(&tag) {
                p.children.push(tag.clone());
            }
        }
        debug!(%tag, "inserted node");
        Ok(id)
    }

    /// Spawn `count` children of `parent` on a regular polygon around it.
    ///
    /// Child tags continue after the parent's existing children, skipping any tag already
    /// in use. The children sit one layer deeper and the parent's polygon order becomes
    /// `count`.
    pub fn add_children(&mut self, parent: &str, count: u32) -> NetworkResult<Vec<NodeId>> {
        self.check_poly_order(count)?;
        let pid = self.require(parent)?;
        let (parent_tag, center, layer, existing) = {
            let p = self.slot(pid);
            (p.tag.clone(), p.position, p.layer, p.children.len())
        };
        let edge = edge_length(layer, &self.settings);
        let vertices = polygon_vertices(center, edge, count);

        #[allow(
            clippy::cast_possible_truncation,
            reason = "child counts are bounded by the polygon order limits."
        )]
        let mut k = existing as u32;
        let mut ids = Vec::with_capacity(vertices.len());
        for vertex in vertices {
            let tag = loop {
                k += 1;
                let candidate = parent_tag.child(k);
                if !self.by_tag.contains_key(&candidate) {
                    break candidate;
                }
            };
            let mut record =
                NodeRecord::new(tag, vertex, layer + 1).with_parent(parent_tag.clone());
            record.poly_order = self.settings.seed_poly_order;
            ids.push(self.insert(record)?);
        }
        self.slot_mut(pid).poly_order = count;
        info!(parent = %parent_tag, count, "added child nodes");
        Ok(ids)
    }

    /// Replace all children of `parent` (and their subtrees) with `count` fresh children.
    pub fn set_child_count(&mut self, parent: &str, count: u32) -> NetworkResult<Vec<NodeId>> {
        self.check_poly_order(count)?;
        let pid = self.require(parent)?;
        let children = self.slot(pid).children.clone();
        for child in children {
            self.remove(child.as_str())?;
        }
        self.add_children(parent, count)
    }

    /// Remove a node and its whole subtree.
    ///
    /// Descendants are removed depth-first before the node itself; the returned tags are in
    /// removal order. The node is unlinked from its parent's children.
    pub fn remove(&mut self, tag: &str) -> NetworkResult<Vec<Tag>> {
        let id = self.require(tag)?;
        if let Some(parent) = self.slot(id).parent.clone()
            && let Some(pid) = self.id_of(parent.as_str())
        {
            self.slot_mut(pid).children.retain(|c| c.as_str() != tag);
        }
        let mut removed = Vec::new();
        self.remove_subtree(id, &mut removed);
        info!(%tag, removed = removed.len(), "removed subtree");
        Ok(removed)
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.generations.clear();
        self.free_list.clear();
        self.by_tag.clear();
    }

    /// Change the display name of a node.
    pub fn rename(&mut self, tag: &str, name: impl Into<String>) -> NetworkResult<()> {
        let id = self.require(tag)?;
        self.slot_mut(id).name = name.into();
        Ok(())
    }

    /// Move a node. Its children are not moved.
    pub fn set_position(&mut self, tag: &str, position: Point) -> NetworkResult<()> {
        let id = self.require(tag)?;
        self.slot_mut(id).position = position;
        Ok(())
    }

    /// True if `ancestor` lies strictly above `tag` in the tree.
    pub fn is_descendant_of(&self, tag: &str, ancestor: &str) -> bool {
        let mut current = self.get(tag).and_then(Node::parent);
        while let Some(parent) = current {
            if parent.as_str() == ancestor {
                return true;
            }
            current = self.get(parent.as_str()).and_then(Node::parent);
        }
        false
    }

    /// Tags from the root down to `tag` (inclusive), or `None` if `tag` is unknown.
    pub fn path_to_root(&self, tag: &str) -> Option<Vec<Tag>> {
        let mut node = self.get(tag)?;
        let mut out = vec![node.tag.clone()];
        while let Some(parent) = node.parent.as_ref() {
            node = self.get(parent.as_str())?;
            out.push(node.tag.clone());
        }
        out.reverse();
        Some(out)
    }

    /// `tag` followed by all of its descendants in pre-order.
    pub fn subtree(&self, tag: &str) -> Option<Vec<Tag>> {
        let root = self.get(tag)?;
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            out.push(node.tag.clone());
            for child in node.children.iter().rev() {
                if let Some(c) = self.get(child.as_str()) {
                    stack.push(c);
                }
            }
        }
        Some(out)
    }

    /// Nodes whose tag or name contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&Node> {
        let needle = term.to_lowercase();
        self.iter()
            .filter(|n| {
                n.tag.as_str().to_lowercase().contains(&needle)
                    || n.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Check that parent and child links agree in both directions.
    pub fn validate(&self) -> NetworkResult<()> {
        for node in self.iter() {
            if let Some(parent) = &node.parent {
                let Some(p) = self.get(parent.as_str()) else {
                    return Err(inconsistent(&node.tag, format!("parent {parent} is missing")));
                };
                if !p.children.contains(&node.tag) {
                    return Err(inconsistent(
                        &node.tag,
                        format!("not listed among the children of {parent}"),
                    ));
                }
            }
            let mut seen = HashSet::new();
            for child in &node.children {
                if !seen.insert(child) {
                    return Err(inconsistent(&node.tag, format!("child {child} listed twice")));
                }
                match self.get(child.as_str()) {
                    Some(c) if c.parent.as_ref() == Some(&node.tag) => {}
                    Some(_) => {
                        return Err(inconsistent(
                            &node.tag,
                            format!("child {child} points at another parent"),
                        ));
                    }
                    None => {
                        return Err(inconsistent(&node.tag, format!("child {child} is missing")));
                    }
                }
            }
        }
        Ok(())
    }

    /// Snapshot every node as a record, in slot order.
    pub fn to_records(&self) -> Vec<NodeRecord> {
        self.iter().map(NodeRecord::from).collect()
    }

    /// Build a network from records given in any order.
    ///
    /// Nodes are inserted parents-first, walking each root's subtree in pre-order and
    /// following the children order listed by each parent record. Child tags without a
    /// record are dropped with a warning.
    pub fn from_records<I>(records: I) -> NetworkResult<Self>
    where
        I: IntoIterator<Item = NodeRecord>,
    {
        Self::from_records_with_settings(records, GrowthSettings::default())
    }

    /// [`Network::from_records`] with explicit growth settings.
    pub fn from_records_with_settings<I>(
        records: I,
        settings: GrowthSettings,
    ) -> NetworkResult<Self>
    where
        I: IntoIterator<Item = NodeRecord>,
    {
        let mut order: Vec<Tag> = Vec::new();
        let mut by_tag: HashMap<Tag, NodeRecord> = HashMap::new();
        for record in records {
            if by_tag.contains_key(&record.tag) {
                return Err(NetworkError::DuplicateTag { tag: record.tag });
            }
            order.push(record.tag.clone());
            by_tag.insert(record.tag.clone(), record);
        }

        let mut roots: Vec<Tag> = Vec::new();
        let mut kids: HashMap<Tag, Vec<Tag>> = HashMap::new();
        for tag in &order {
            let record = &by_tag[tag];
            match &record.parent {
                None => roots.push(tag.clone()),
                Some(parent) if by_tag.contains_key(parent) => {
                    kids.entry(parent.clone()).or_default().push(tag.clone());
                }
                Some(parent) => {
                    return Err(NetworkError::UnknownParent {
                        tag: tag.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        for (parent, children) in &mut kids {
            let listed = &by_tag[parent].children;
            children.sort_by_key(|c| listed.iter().position(|l| l == c).unwrap_or(usize::MAX));
        }
        for record in by_tag.values() {
            for child in &record.children {
                if !by_tag.contains_key(child) {
                    warn!(parent = %record.tag, %child, "dropping child without a record");
                }
            }
        }

        let mut network = Self::with_settings(settings);
        let mut stack: Vec<Tag> = roots.into_iter().rev().collect();
        while let Some(tag) = stack.pop() {
            if let Some(children) = kids.remove(&tag) {
                stack.extend(children.into_iter().rev());
            }
            if let Some(mut record) = by_tag.remove(&tag) {
                record.children.clear();
                network.insert(record)?;
            }
        }
        if let Some(tag) = order.into_iter().find(|t| by_tag.contains_key(t)) {
            return Err(inconsistent(&tag, "unreachable from any root (parent cycle)".into()));
        }
        info!(nodes = network.len(), "loaded network from records");
        Ok(network)
    }

    /// Serialize as a JSON object keyed by tag.
    pub fn to_json(&self) -> NetworkResult<String> {
        let map: BTreeMap<&str, NodeRecord> = self
            .iter()
            .map(|n| (n.tag.as_str(), NodeRecord::from(n)))
            .collect();
        Ok(serde_json::to_string_pretty(&map)?)
    }

    /// Parse a JSON object keyed by tag, see [`Network::to_json`].
    pub fn from_json(json: &str) -> NetworkResult<Self> {
        let map: BTreeMap<String, NodeRecord> = serde_json::from_str(json)?;
        for (key, record) in &map {
            if key != record.tag.as_str() {
                return Err(inconsistent(
                    &record.tag,
                    format!("stored under mismatched key {key}"),
                ));
            }
        }
        Self::from_records(map.into_values())
    }

    // --- internals ---

    fn alloc(&mut self, node: Node) -> NodeId {
        let tag = node.tag.clone();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node);
            (idx, generation)
        } else {
            self.nodes.push(Some(node));
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(idx as u32, generation);
        self.by_tag.insert(tag, id);
        id
    }

    fn remove_subtree(&mut self, id: NodeId, removed: &mut Vec<Tag>) {
        let children: Vec<NodeId> = self
            .slot(id)
            .children
            .iter()
            .filter_map(|c| self.id_of(c.as_str()))
            .collect();
        for child in children {
            self.remove_subtree(child, removed);
        }
        if let Some(node) = self.nodes[id.idx()].take() {
            self.by_tag.remove(&node.tag);
            self.free_list.push(id.idx());
            removed.push(node.tag);
        }
    }

    fn require(&self, tag: &str) -> NetworkResult<NodeId> {
        self.id_of(tag)
            .ok_or_else(|| NetworkError::UnknownNode { tag: tag.into() })
    }

    fn check_poly_order(&self, order: u32) -> NetworkResult<()> {
        let (min, max) = (self.settings.min_poly_order, self.settings.max_poly_order);
        if (min..=max).contains(&order) {
            Ok(())
        } else {
            Err(NetworkError::InvalidPolyOrder { order, min, max })
        }
    }

    /// Live node for an id obtained from `by_tag`; panics on a stale id.
    fn slot(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }
}

fn inconsistent(tag: &Tag, reason: String) -> NetworkError {
    NetworkError::Inconsistent {
        tag: tag.clone(),
        reason,
    }
}
