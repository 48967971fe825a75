use tracing::debug;

use super::union_find::DisjointSet;
use crate::error::{Result, SiftError};
use crate::vector::SimilarityMatrix;
use crate::TARGET_CLUSTER;

/// Builds the forest for `ids` and unions every pair (i < j, document order)
/// whose similarity reaches `threshold`.
///
/// # Arguments
/// * `ids` - Document ids, in the same order as the matrix rows
/// * `matrix` - Pairwise similarities for those documents
/// * `threshold` - Minimum similarity for a merge
///
/// # Returns
/// * `Ok(DisjointSet)` - Forest with all qualifying pairs merged
/// * `Err` - If ids repeat or do not line up with the matrix
pub fn partition(ids: &[String], matrix: &SimilarityMatrix, threshold: f64) -> Result<DisjointSet<String>> {
    let pairs = matrix.pairs().map(|(i, j, _)| (i, j));
    partition_in_order(ids, matrix, threshold, pairs)
}

/// Same as [`partition`] but visits pairs in the order given.
///
/// The resulting set partition does not depend on that order; only which
/// member ends up as representative can change.
pub fn partition_in_order<P>(
    ids: &[String],
    matrix: &SimilarityMatrix,
    threshold: f64,
    pairs: P,
) -> Result<DisjointSet<String>>
where
    P: IntoIterator<Item = (usize, usize)>,
{
    if ids.len() != matrix.len() {
        return Err(SiftError::InvariantViolation(format!(
            "{} ids for a similarity matrix over {} documents",
            ids.len(),
            matrix.len()
        )));
    }

    let mut forest = DisjointSet::new(ids.iter().cloned())?;
    let mut merges = 0usize;

    for (i, j) in pairs {
        if i == j || i >= ids.len() || j >= ids.len() {
            continue;
        }
        if matrix.get(i, j) >= threshold && forest.union(&ids[i], &ids[j])? {
            merges += 1;
        }
    }

    debug!(
        target: TARGET_CLUSTER,
        "Applied {} merges at threshold {:.2}; {} sets remain",
        merges,
        threshold,
        forest.set_count()
    );

    Ok(forest)
}
