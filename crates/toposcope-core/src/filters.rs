//! Expansion filter state, bucketed by node kind

use serde::{Deserialize, Serialize};

use crate::model::NodeKind;

/// Which nodes are currently expanded, one ordered bucket per expandable
/// kind. An id lives in at most one bucket, determined by its kind. The
/// fetch collaborator serializes this whole struct into the next topology
/// request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpansionFilters {
    pub cloud_providers: Vec<String>,
    pub cloud_regions: Vec<String>,
    pub kubernetes_clusters: Vec<String>,
    pub hosts: Vec<String>,
    pub pods: Vec<String>,
}

impl ExpansionFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bucket backing a kind, or `None` for kinds that never expand.
    pub fn bucket(&self, kind: NodeKind) -> Option<&[String]> {
        match kind {
            NodeKind::CloudProvider => Some(&self.cloud_providers),
            NodeKind::CloudRegion => Some(&self.cloud_regions),
            NodeKind::KubernetesCluster => Some(&self.kubernetes_clusters),
            NodeKind::Host => Some(&self.hosts),
            NodeKind::Pod => Some(&self.pods),
            NodeKind::Pseudo | NodeKind::Container | NodeKind::Process => None,
        }
    }

    pub(crate) fn bucket_mut(&mut self, kind: NodeKind) -> Option<&mut Vec<String>> {
        match kind {
            NodeKind::CloudProvider => Some(&mut self.cloud_providers),
            NodeKind::CloudRegion => Some(&mut self.cloud_regions),
            NodeKind::KubernetesCluster => Some(&mut self.kubernetes_clusters),
            NodeKind::Host => Some(&mut self.hosts),
            NodeKind::Pod => Some(&mut self.pods),
            NodeKind::Pseudo | NodeKind::Container | NodeKind::Process => None,
        }
    }

    /// Whether `node_id` is recorded as expanded for `kind`. Always false
    /// for non-expandable kinds.
    pub fn contains(&self, kind: NodeKind, node_id: &str) -> bool {
        self.bucket(kind)
            .is_some_and(|bucket| bucket.iter().any(|id| id == node_id))
    }

    /// Total number of expanded nodes across all buckets.
    pub fn len(&self) -> usize {
        self.cloud_providers.len()
            + self.cloud_regions.len()
            + self.kubernetes_clusters.len()
            + self.hosts.len()
            + self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
