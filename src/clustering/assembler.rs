use std::collections::HashMap;

use super::types::{Cluster, Clustering};
use super::union_find::DisjointSet;
use crate::document::Document;
use crate::error::Result;

/// Groups documents by their resolved representative.
///
/// Documents are visited in admission order, so members keep that order and
/// clusters appear in order of their earliest member.
pub fn assemble(forest: &mut DisjointSet<String>, documents: Vec<Document>) -> Result<Clustering> {
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut slot_for_root: HashMap<String, usize> = HashMap::new();

    for document in documents {
        let root = forest.find(&document.id().to_string())?;
        match slot_for_root.get(&root) {
            Some(&slot) => clusters[slot].members.push(document),
            None => {
                slot_for_root.insert(root.clone(), clusters.len());
                clusters.push(Cluster {
                    representative: root,
                    members: vec![document],
                });
            }
        }
    }

    Ok(Clustering::from_clusters(clusters))
}
