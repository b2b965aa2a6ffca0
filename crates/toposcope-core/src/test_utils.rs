//! Test fixtures for building topology snapshots

use crate::model::{NodeKind, TopologyEdge, TopologyNode, TopologySnapshot};

/// Build a node at the given position in the hierarchy.
pub fn node(id: &str, kind: NodeKind, parent: &str) -> TopologyNode {
    TopologyNode {
        id: id.to_owned(),
        kind,
        immediate_parent_id: parent.to_owned(),
        label: Some(id.to_owned()),
        metadata: Default::default(),
    }
}

/// Build an edge between two node ids.
pub fn edge(source: &str, target: &str) -> TopologyEdge {
    TopologyEdge {
        source: source.to_owned(),
        target: target.to_owned(),
        metadata: Default::default(),
    }
}

/// Build a snapshot with each node keyed by its id.
pub fn snapshot(nodes: impl IntoIterator<Item = TopologyNode>) -> TopologySnapshot {
    let mut snap = TopologySnapshot::new();
    for n in nodes {
        snap.nodes.insert(n.id.clone(), n);
    }
    snap
}

/// Three-level fixture: provider `p1` → region `r1` → host `h1`.
pub fn provider_region_host() -> TopologySnapshot {
    snapshot([
        node("p1", NodeKind::CloudProvider, ""),
        node("r1", NodeKind::CloudRegion, "p1"),
        node("h1", NodeKind::Host, "r1"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_snapshot_keys_by_id() {
        let snap = provider_region_host();
        assert_eq!(snap.node_count(), 3);
        assert_eq!(snap.nodes["r1"].immediate_parent_id, "p1");
    }
}
