//! Snapshot-to-snapshot diff computation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{TopologyEdge, TopologyNode, TopologySnapshot};

/// One add/remove/update bucket triple of a diff. Every identity lands in
/// exactly one list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet<T> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
    /// Present in both snapshots. Values are taken from the previous
    /// snapshot; consumers use them to know which rendered identities
    /// survive and re-read fresh attributes from the current snapshot.
    pub updated: Vec<T>,
}

impl<T> ChangeSet<T> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// Total number of entries across all three buckets.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.updated.len()
    }
}

impl<T> Default for ChangeSet<T> {
    fn default() -> Self {
        ChangeSet {
            added: Vec::new(),
            removed: Vec::new(),
            updated: Vec::new(),
        }
    }
}

/// The add/remove/update partition between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyDiff {
    pub nodes: ChangeSet<TopologyNode>,
    pub edges: ChangeSet<TopologyEdge>,
}

impl TopologyDiff {
    /// Check if this diff is empty (no changes).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Compute the difference between the current snapshot and the previous one.
///
/// With no previous snapshot, everything in `current` is an add. Otherwise
/// node identity is the node's `id` field (id-less nodes are invisible to
/// diffing) and edge identity is the raw map key. Pure and deterministic:
/// bucket order follows the producer's map order.
pub fn compute_diff(
    current: &TopologySnapshot,
    previous: Option<&TopologySnapshot>,
) -> TopologyDiff {
    let mut diff = TopologyDiff::default();

    let Some(previous) = previous else {
        diff.nodes.added = current.nodes.values().cloned().collect();
        diff.edges.added = current.edges.values().cloned().collect();
        return diff;
    };

    let ids = id_index(current);
    let prev_ids = id_index(previous);

    for (id, prev_node) in &prev_ids {
        if ids.contains_key(id) {
            diff.nodes.updated.push((*prev_node).clone());
        } else {
            diff.nodes.removed.push((*prev_node).clone());
        }
    }
    for (id, node) in &ids {
        if !prev_ids.contains_key(id) {
            diff.nodes.added.push((*node).clone());
        }
    }

    for (key, prev_edge) in &previous.edges {
        if current.edges.contains_key(key) {
            diff.edges.updated.push(prev_edge.clone());
        } else {
            diff.edges.removed.push(prev_edge.clone());
        }
    }
    for (key, edge) in &current.edges {
        if !previous.edges.contains_key(key) {
            diff.edges.added.push(edge.clone());
        }
    }

    diff
}

/// Index a snapshot's nodes by their `id` field, dropping id-less nodes.
/// On duplicate ids the last value wins, at the first insertion's position.
fn id_index(snapshot: &TopologySnapshot) -> IndexMap<&str, &TopologyNode> {
    let mut index = IndexMap::new();
    for node in snapshot.nodes.values() {
        if !node.id.is_empty() {
            index.insert(node.id.as_str(), node);
        }
    }
    index
}
