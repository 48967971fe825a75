use tracing::debug;

use super::types::FeatureVector;
use crate::error::{Result, SiftError};
use crate::TARGET_VECTOR;

/// Magnitudes below this are treated as zero vectors
const MIN_MAGNITUDE: f64 = 1e-12;

/// Cosine similarity of two sparse feature vectors, clamped to [0, 1].
///
/// A vector with no magnitude is dissimilar to everything.
pub fn feature_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    similarity_with_magnitudes(a, b, a.magnitude(), b.magnitude())
}

/// Same as [`feature_similarity`] with the magnitudes already known.
fn similarity_with_magnitudes(a: &FeatureVector, b: &FeatureVector, mag_a: f64, mag_b: f64) -> f64 {
    if mag_a < MIN_MAGNITUDE || mag_b < MIN_MAGNITUDE {
        return 0.0;
    }
    (a.dot(b) / (mag_a * mag_b)).clamp(0.0, 1.0)
}

/// All-pairs similarity for a batch, stored once per unordered pair.
///
/// Only the strict upper triangle is kept, row-major: pair (i, j) with
/// i < j lives at `i * (2n - i - 1) / 2 + (j - i - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes cosine similarity for every pair of vectors, in document order.
    pub fn build(vectors: &[FeatureVector]) -> Self {
        let size = vectors.len();
        let magnitudes: Vec<f64> = vectors.iter().map(FeatureVector::magnitude).collect();
        let mut scores = Vec::with_capacity(pair_count(size));
        let mut nonzero = 0usize;

        for i in 0..size {
            for j in (i + 1)..size {
                let score =
                    similarity_with_magnitudes(&vectors[i], &vectors[j], magnitudes[i], magnitudes[j]);
                if score > 0.0 {
                    nonzero += 1;
                }
                scores.push(score);
            }
        }

        debug!(
            target: TARGET_VECTOR,
            "Computed {} pairwise similarities for {} documents ({} non-zero)",
            scores.len(),
            size,
            nonzero
        );

        SimilarityMatrix { size, scores }
    }

    /// Wraps scores computed elsewhere: the strict upper triangle in row-major order.
    pub fn from_upper_triangle(size: usize, scores: Vec<f64>) -> Result<Self> {
        if scores.len() != pair_count(size) {
            return Err(SiftError::InvariantViolation(format!(
                "Expected {} pair scores for {} documents, got {}",
                pair_count(size),
                size,
                scores.len()
            )));
        }

        if let Some(bad) = scores.iter().find(|s| !(0.0..=1.0).contains(*s)) {
            return Err(SiftError::InvariantViolation(format!(
                "Similarity score {} outside [0, 1]",
                bad
            )));
        }

        Ok(SimilarityMatrix { size, scores })
    }

    /// Number of documents covered
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity of documents `i` and `j`, in either order. Self-similarity is 1.
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "index out of range");
        if i == j {
            return 1.0;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.scores[self.offset(lo, hi)]
    }

    /// Iterates `(i, j, score)` for every pair with i < j, in document order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.size).flat_map(move |i| {
            ((i + 1)..self.size).map(move |j| (i, j, self.scores[self.offset(i, j)]))
        })
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        i * (2 * self.size - i - 1) / 2 + (j - i - 1)
    }
}

fn pair_count(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::TfIdfVectorizer;

    #[test]
    fn test_feature_similarity() {
        let (_, vectors) =
            TfIdfVectorizer::fit_transform(&["apple pie", "apple pie", "whale song", "and the"]).unwrap();

        assert!((feature_similarity(&vectors[0], &vectors[1]) - 1.0).abs() < 1e-12);
        assert_eq!(feature_similarity(&vectors[0], &vectors[2]), 0.0);
        // Stop-word-only document has no magnitude
        assert_eq!(feature_similarity(&vectors[3], &vectors[0]), 0.0);
    }

    #[test]
    fn test_matrix_is_symmetric_and_in_range() {
        let texts = [
            "Central bank raises interest rates again",
            "Interest rates climb as central bank acts",
            "Local team wins championship final",
            "Championship final ends in dramatic win for local team",
            "and the of",
        ];
        let (_, vectors) = TfIdfVectorizer::fit_transform(&texts).unwrap();
        let matrix = SimilarityMatrix::build(&vectors);

        assert_eq!(matrix.len(), 5);
        for i in 0..5 {
            assert_eq!(matrix.get(i, i), 1.0);
            for j in 0..5 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!((0.0..=1.0).contains(&matrix.get(i, j)));
            }
        }

        // Zero vector is dissimilar to everything
        for i in 0..4 {
            assert_eq!(matrix.get(i, 4), 0.0);
        }
    }

    #[test]
    fn test_matrix_agrees_with_dense_cosine() {
        let texts = ["red apple pie", "green apple tart", "blue whale song"];
        let (_, vectors) = TfIdfVectorizer::fit_transform(&texts).unwrap();
        let matrix = SimilarityMatrix::build(&vectors);

        for (i, j, score) in matrix.pairs() {
            let (a, b) = (vectors[i].to_dense(), vectors[j].to_dense());
            let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
            let norms = a.iter().map(|x| x * x).sum::<f64>().sqrt() * b.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((score - dot / norms).abs() < 1e-12);
            assert!((score - feature_similarity(&vectors[i], &vectors[j])).abs() < 1e-12);
        }
    }

    #[test]
    fn test_matrix_matches_feature_similarity() {
        let texts = ["storm floods the coast", "coast floods after storm", "and the", "budget vote delayed"];
        let (_, vectors) = TfIdfVectorizer::fit_transform(&texts).unwrap();
        let matrix = SimilarityMatrix::build(&vectors);

        for (i, j, score) in matrix.pairs() {
            assert_eq!(score, feature_similarity(&vectors[i], &vectors[j]));
        }
        assert_eq!(matrix.get(0, 2), 0.0);
        assert!(matrix.get(0, 1) > 0.5);
    }

    #[test]
    fn test_pairs_enumerate_upper_triangle_in_order() {
        let matrix = SimilarityMatrix::from_upper_triangle(4, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6])
            .unwrap();
        let pairs: Vec<(usize, usize)> = matrix.pairs().map(|(i, j, _)| (i, j)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(matrix.get(2, 1), 0.4);
        assert_eq!(matrix.get(3, 2), 0.6);
    }

    #[test]
    fn test_from_upper_triangle_validates() {
        assert!(SimilarityMatrix::from_upper_triangle(3, vec![0.1, 0.2]).is_err());
        assert!(SimilarityMatrix::from_upper_triangle(2, vec![1.5]).is_err());
        assert!(SimilarityMatrix::from_upper_triangle(2, vec![f64::NAN]).is_err());

        let single = SimilarityMatrix::from_upper_triangle(1, Vec::new()).unwrap();
        assert_eq!(single.pairs().count(), 0);
    }
}
