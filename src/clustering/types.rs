use serde::Serialize;
use std::collections::HashMap;

use crate::document::Document;

/// Struct representing one group of similar articles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Id of the member the forest resolved to; one consistent member, nothing more
    pub representative: String,
    /// Members in admission order
    pub members: Vec<Document>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(Document::id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|doc| doc.id() == id)
    }
}

/// Result of one clustering run: a partition of the admitted batch.
///
/// Clusters are listed in order of their first member's admission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Clustering {
    clusters: Vec<Cluster>,
    #[serde(skip)]
    by_representative: HashMap<String, usize>,
    #[serde(skip)]
    by_document: HashMap<String, usize>,
}

impl Clustering {
    pub(crate) fn from_clusters(clusters: Vec<Cluster>) -> Self {
        let mut by_representative = HashMap::with_capacity(clusters.len());
        let mut by_document = HashMap::new();

        for (idx, cluster) in clusters.iter().enumerate() {
            by_representative.insert(cluster.representative.clone(), idx);
            for id in cluster.member_ids() {
                by_document.insert(id.to_string(), idx);
            }
        }

        Self {
            clusters,
            by_representative,
            by_document,
        }
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Total number of documents across all clusters
    pub fn document_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    /// Cluster keyed by its representative id
    pub fn get(&self, representative: &str) -> Option<&Cluster> {
        self.by_representative
            .get(representative)
            .map(|&idx| &self.clusters[idx])
    }

    /// Cluster containing the given document id
    pub fn cluster_of(&self, document_id: &str) -> Option<&Cluster> {
        self.by_document
            .get(document_id)
            .map(|&idx| &self.clusters[idx])
    }

    /// Member ids per cluster, each group and the outer list sorted.
    ///
    /// Two clusterings with equal partitions give equal output here even
    /// when their representatives differ.
    pub fn partition(&self) -> Vec<Vec<String>> {
        let mut groups: Vec<Vec<String>> = self
            .clusters
            .iter()
            .map(|c| {
                let mut ids: Vec<String> = c.member_ids().map(str::to_string).collect();
                ids.sort();
                ids
            })
            .collect();
        groups.sort();
        groups
    }

    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }
}

impl<'a> IntoIterator for &'a Clustering {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}
