// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for network edits and record loading.

use thiserror::Error;

use crate::types::Tag;

/// Result type alias for network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur while editing or loading a network.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// A node with this tag already exists.
    #[error("node already exists: {tag}")]
    DuplicateTag {
        /// The conflicting tag.
        tag: Tag,
    },

    /// No node carries this tag.
    #[error("node not found: {tag}")]
    UnknownNode {
        /// The missing tag.
        tag: Tag,
    },

    /// A node names a parent that does not exist.
    #[error("parent {parent} of node {tag} not found")]
    UnknownParent {
        /// The node being inserted.
        tag: Tag,
        /// The missing parent.
        parent: Tag,
    },

    /// A child count outside the configured polygon orders.
    #[error("invalid polygon order {order} (must be within {min}..={max})")]
    InvalidPolyOrder {
        /// Requested order.
        order: u32,
        /// Smallest allowed order.
        min: u32,
        /// Largest allowed order.
        max: u32,
    },

    /// Parent and child links disagree, or records form a cycle.
    #[error("inconsistent node {tag}: {reason}")]
    Inconsistent {
        /// The offending node.
        tag: Tag,
        /// What is wrong with it.
        reason: String,
    },

    /// Node record (de)serialization failed.
    #[error("node record serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
