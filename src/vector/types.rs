use serde::Serialize;

/// Sparse TF-IDF vector over a batch vocabulary.
///
/// `entries` holds `(term index, weight)` pairs sorted by index with no
/// zero weights; `dimension` is the vocabulary size of the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub(crate) fn from_sorted(dimension: usize, entries: Vec<(usize, f64)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        debug_assert!(entries.iter().all(|(idx, _)| *idx < dimension));
        Self { dimension, entries }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero weights
    pub fn active_dimensions(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn magnitude(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product via a merge over the two sorted index lists.
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let (a, b) = (&self.entries, &other.entries);
        let mut sum = 0.0;

        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for &(idx, weight) in &self.entries {
            dense[idx] = weight;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_dot_matches_dense() {
        let a = FeatureVector::from_sorted(5, vec![(0, 1.0), (2, 2.0), (4, 3.0)]);
        let b = FeatureVector::from_sorted(5, vec![(1, 5.0), (2, 4.0), (4, 1.0)]);

        let dense: f64 = a
            .to_dense()
            .iter()
            .zip(b.to_dense().iter())
            .map(|(x, y)| x * y)
            .sum();

        assert_eq!(a.dot(&b), 11.0);
        assert_eq!(a.dot(&b), dense);
        assert_eq!(a.active_dimensions(), 3);
        assert_eq!(a.to_dense(), vec![1.0, 0.0, 2.0, 0.0, 3.0]);
    }

    #[test]
    fn test_zero_vector() {
        let zero = FeatureVector::from_sorted(3, Vec::new());
        assert!(zero.is_zero());
        assert_eq!(zero.magnitude(), 0.0);
        assert_eq!(zero.to_dense(), vec![0.0; 3]);
    }
}
