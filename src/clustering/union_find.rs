//! Disjoint-set forest over document ids.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Result, SiftError};

/// Union-find with path compression, keyed by document id.
///
/// Each id maps to a parent id; roots are their own parent and act as the
/// representative of their set. `union(x, y)` always hangs the root of `y`
/// under the root of `x`.
#[derive(Debug, Clone)]
pub struct DisjointSet<K> {
    parent: HashMap<K, K>,
    sets: usize,
}

impl<K> DisjointSet<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Creates one singleton set per id.
    ///
    /// Fails with `InvariantViolation` if an id repeats.
    pub fn new<I>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
    {
        let mut parent = HashMap::new();
        for id in ids {
            if parent.insert(id.clone(), id.clone()).is_some() {
                return Err(SiftError::InvariantViolation(format!(
                    "duplicate document id {:?}",
                    id
                )));
            }
        }
        let sets = parent.len();
        Ok(Self { parent, sets })
    }

    /// Number of ids tracked
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets currently in the forest
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Resolves `x` to its representative, repointing every node on the
    /// path directly at the root.
    pub fn find(&mut self, x: &K) -> Result<K> {
        let mut root = self
            .parent
            .get(x)
            .ok_or_else(|| SiftError::InvariantViolation(format!("unknown document id {:?}", x)))?
            .clone();

        // First pass: walk up to the self-loop
        let mut current = x.clone();
        while root != current {
            current = root;
            root = self.parent[&current].clone();
        }

        // Second pass: compress
        let mut node = x.clone();
        while node != root {
            let next = self.parent[&node].clone();
            self.parent.insert(node, root.clone());
            node = next;
        }

        Ok(root)
    }

    /// Merges the sets holding `x` and `y`.
    ///
    /// Returns `false` when they were already in the same set.
    pub fn union(&mut self, x: &K, y: &K) -> Result<bool> {
        let root_x = self.find(x)?;
        let root_y = self.find(y)?;

        if root_x == root_y {
            return Ok(false);
        }

        self.parent.insert(root_y, root_x);
        self.sets -= 1;
        Ok(true)
    }

    /// Whether `x` and `y` currently share a representative.
    pub fn connected(&mut self, x: &K, y: &K) -> Result<bool> {
        Ok(self.find(x)? == self.find(y)?)
    }

    /// Parent link of `x` without resolving it.
    pub fn parent_of(&self, x: &K) -> Option<&K> {
        self.parent.get(x)
    }
}
