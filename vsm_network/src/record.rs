// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain node records: the persisted form of a network.
//!
//! A saved network is a JSON object keyed by tag:
//!
//! ```json
//! {
//!   "0/0/1": { "tag": "0/0/1", "position": [0.0, 0.0], "layer": 0, "polyOrder": 6,
//!              "parent": null, "name": "0/0/1", "children": ["0/0/1-1"] },
//!   "0/0/1-1": { "tag": "0/0/1-1", "position": [2.25, 0.0], "layer": 1, "polyOrder": 6,
//!                "parent": "0/0/1", "name": "0/0/1-1", "children": [] }
//! }
//! ```

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::types::{Node, Tag};

/// Serializable snapshot of a single node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Unique tag.
    pub tag: Tag,
    /// Position as `[x, y]`.
    pub position: [f64; 2],
    /// Depth in the tree.
    #[serde(default)]
    pub layer: u32,
    /// Branching factor used to place children.
    #[serde(default = "default_poly_order")]
    pub poly_order: u32,
    /// Parent tag, `null` for a root.
    #[serde(default)]
    pub parent: Option<Tag>,
    /// Display name; an empty name falls back to the tag.
    #[serde(default)]
    pub name: String,
    /// Child tags in placement order.
    #[serde(default)]
    pub children: Vec<Tag>,
}

fn default_poly_order() -> u32 {
    6
}

impl NodeRecord {
    /// A record with no parent, no children, and the name set to the tag.
    pub fn new(tag: impl Into<Tag>, position: Point, layer: u32) -> Self {
        let tag = tag.into();
        Self {
            name: tag.as_str().to_owned(),
            tag,
            position: [position.x, position.y],
            layer,
            poly_order: default_poly_order(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Set the parent tag.
    pub fn with_parent(mut self, parent: impl Into<Tag>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Position as a point.
    pub fn point(&self) -> Point {
        Point::new(self.position[0], self.position[1])
    }
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            tag: node.tag.clone(),
            position: [node.position.x, node.position.y],
            layer: node.layer,
            poly_order: node.poly_order,
            parent: node.parent.clone(),
            name: node.name.clone(),
            children: node.children.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_and_fills_defaults() {
        let json = r#"{ "tag": "0/0/1-2", "position": [1.0, -2.0], "polyOrder": 4, "parent": "0/0/1" }"#;
        let record: NodeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tag.as_str(), "0/0/1-2");
        assert_eq!(record.point(), Point::new(1.0, -2.0));
        assert_eq!(record.poly_order, 4);
        assert_eq!(record.layer, 0);
        assert_eq!(record.parent, Some(Tag::from("0/0/1")));
        assert!(record.name.is_empty());
        assert!(record.children.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let record = NodeRecord::new("0/0/1", Point::ORIGIN, 0);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["polyOrder"], 6);
        assert_eq!(value["name"], "0/0/1");
        assert!(value["parent"].is_null());
    }
}
