//! Stateful topology store: snapshot rotation, diffing, filter pruning

use tracing::{debug, trace};

use crate::diff::{TopologyDiff, compute_diff};
use crate::filters::ExpansionFilters;
use crate::model::{NodeKind, TopologySnapshot};

/// Holds the two most recent snapshots, the diff between them, and the
/// user's expansion state.
///
/// Designed to be driven by a single sequential event stream (snapshot
/// arrivals interleaved with expand/collapse clicks on one control
/// thread); concurrent callers must serialize access externally.
#[derive(Debug, Default)]
pub struct TopologyStore {
    current: Option<TopologySnapshot>,
    previous: Option<TopologySnapshot>,
    diff: Option<TopologyDiff>,
    filters: ExpansionFilters,
    revision: u64,
}

impl TopologyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest snapshot, if one has been applied.
    pub fn current(&self) -> Option<&TopologySnapshot> {
        self.current.as_ref()
    }

    /// Snapshot before the latest one.
    pub fn previous(&self) -> Option<&TopologySnapshot> {
        self.previous.as_ref()
    }

    /// Diff between `previous()` and `current()`.
    pub fn diff(&self) -> Option<&TopologyDiff> {
        self.diff.as_ref()
    }

    pub fn filters(&self) -> &ExpansionFilters {
        &self.filters
    }

    /// Number of snapshots applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the current snapshot, recompute the diff, and prune the
    /// expansion state of nodes that disappeared.
    pub fn apply_snapshot(&mut self, snapshot: TopologySnapshot) {
        self.previous = self.current.take();
        self.current = Some(snapshot);
        self.revision += 1;
        self.recompute_diff();
        self.prune_filters();
    }

    fn recompute_diff(&mut self) {
        if let Some(current) = &self.current {
            let diff = compute_diff(current, self.previous.as_ref());
            debug!(
                revision = self.revision,
                nodes_added = diff.nodes.added.len(),
                nodes_removed = diff.nodes.removed.len(),
                nodes_updated = diff.nodes.updated.len(),
                edges_added = diff.edges.added.len(),
                edges_removed = diff.edges.removed.len(),
                "applied topology snapshot"
            );
            self.diff = Some(diff);
        }
    }

    /// If the latest snapshot no longer has a node that was expanded,
    /// drop it from the filters. Starts at the top of the hierarchy and
    /// works down the tree.
    fn prune_filters(&mut self) {
        let Some(diff) = &self.diff else { return };
        let removed: Vec<(String, NodeKind)> = diff
            .nodes
            .removed
            .iter()
            .map(|node| (node.id.clone(), node.kind))
            .collect();
        for (node_id, kind) in removed {
            trace!(%node_id, kind = %kind, "pruning expansion state");
            self.collapse(&node_id, kind);
        }
    }

    /// Record a node as expanded. Idempotent; kinds outside the expandable
    /// hierarchy are silently ignored.
    pub fn expand(&mut self, node_id: &str, kind: NodeKind) {
        if self.filters.contains(kind, node_id) {
            return;
        }
        if let Some(bucket) = self.filters.bucket_mut(kind) {
            bucket.push(node_id.to_owned());
        }
    }

    /// Collapse a node, cascading to its expanded descendants.
    ///
    /// Children are looked up in the current snapshot, so a descendant
    /// that already vanished simply fails the lookup, and a descendant
    /// that was never expanded terminates its branch of the cascade.
    pub fn collapse(&mut self, node_id: &str, kind: NodeKind) {
        match self.filters.bucket_mut(kind) {
            Some(bucket) if bucket.iter().any(|id| id == node_id) => {
                bucket.retain(|id| id != node_id);
            }
            _ => return,
        }
        for &child_kind in kind.cascade_children().unwrap_or(&[]) {
            let children: Vec<String> = match &self.current {
                Some(snapshot) => snapshot
                    .children_of_kind(node_id, child_kind)
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
                None => Vec::new(),
            };
            for child_id in children {
                self.collapse(&child_id, child_kind);
            }
        }
    }

    /// Whether a node is currently expanded.
    pub fn is_expanded(&self, node_id: &str, kind: NodeKind) -> bool {
        self.filters.contains(kind, node_id)
    }
}
