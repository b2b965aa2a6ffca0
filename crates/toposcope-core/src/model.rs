//! Core data structures for the topology graph

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Discriminates what kind of infrastructure entity a node represents.
///
/// Kinds form a fixed containment hierarchy:
///
/// ```text
/// cloud_provider
///    cloud_region
///      host
///        process
///        container
///          process
///    kubernetes_cluster
///      host
///        pod
///          container
///            process
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Synthetic root bucket for ungrouped nodes.
    #[default]
    Pseudo,
    CloudProvider,
    CloudRegion,
    KubernetesCluster,
    Host,
    Pod,
    Container,
    Process,
}

impl NodeKind {
    /// Expansion hierarchy as data: the child kinds collapsed along with a
    /// node of this kind. `None` means the kind is not expandable at all;
    /// an empty slice means expandable but terminal.
    ///
    /// A cloud provider fans out to both regions and clusters; its tree
    /// contains regions and, orthogonally, clusters. Containers and
    /// processes are never independently expandable.
    pub fn cascade_children(self) -> Option<&'static [NodeKind]> {
        match self {
            NodeKind::CloudProvider => {
                Some(&[NodeKind::CloudRegion, NodeKind::KubernetesCluster])
            }
            NodeKind::CloudRegion | NodeKind::KubernetesCluster => Some(&[NodeKind::Host]),
            NodeKind::Host | NodeKind::Pod => Some(&[]),
            NodeKind::Pseudo | NodeKind::Container | NodeKind::Process => None,
        }
    }

    /// Whether nodes of this kind can be expanded to reveal children.
    pub fn is_expandable(self) -> bool {
        self.cascade_children().is_some()
    }

    /// Wire name as it appears in snapshot payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Pseudo => "pseudo",
            NodeKind::CloudProvider => "cloud_provider",
            NodeKind::CloudRegion => "cloud_region",
            NodeKind::KubernetesCluster => "kubernetes_cluster",
            NodeKind::Host => "host",
            NodeKind::Pod => "pod",
            NodeKind::Container => "container",
            NodeKind::Process => "process",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a kind string is not part of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node kind: {0:?}")]
pub struct UnknownNodeKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "pseudo" => NodeKind::Pseudo,
            "cloud_provider" => NodeKind::CloudProvider,
            "cloud_region" => NodeKind::CloudRegion,
            "kubernetes_cluster" => NodeKind::KubernetesCluster,
            "host" => NodeKind::Host,
            "pod" => NodeKind::Pod,
            "container" => NodeKind::Container,
            "process" => NodeKind::Process,
            other => return Err(UnknownNodeKind(other.to_string())),
        })
    }
}

/// A single node in a topology snapshot.
///
/// Display attributes (resource usage, labels for columns, ...) ride along
/// in `metadata` and are opaque to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    /// Stable identity. A node with an empty id is carried for display but
    /// is invisible to diffing.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    /// Direct structural parent; empty for roots.
    #[serde(default)]
    pub immediate_parent_id: String,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Remaining wire fields, untouched by the engine.
    #[serde(flatten)]
    pub metadata: HashMap<String, Value>,
}

/// A connection between two nodes.
///
/// Identity is the snapshot map key assigned by the producer, never the
/// endpoint pair. Two snapshots agree on what a key means only because
/// the producer is consistent about assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyEdge {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    /// Connection attributes (byte/request counts, ...), opaque to the engine.
    #[serde(flatten)]
    pub metadata: HashMap<String, Value>,
}

/// One complete observation of the topology graph at a point in time.
///
/// Nodes and edges are keyed by producer-assigned string keys in an ordered
/// map, so iteration follows the order the producer emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    #[serde(default)]
    pub nodes: IndexMap<String, TopologyNode>,
    #[serde(default)]
    pub edges: IndexMap<String, TopologyEdge>,
}

impl TopologySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Ids of the nodes directly under `parent_id` with the given kind.
    ///
    /// Linear scan over the node map; id-less nodes are skipped.
    pub fn children_of_kind(&self, parent_id: &str, kind: NodeKind) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|node| {
                !node.id.is_empty()
                    && node.immediate_parent_id == parent_id
                    && node.kind == kind
            })
            .map(|node| node.id.as_str())
            .collect()
    }
}
