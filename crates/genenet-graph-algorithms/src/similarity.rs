//! Set distances between gene sets, computed pairwise into a dense matrix.

use ndarray::Array2;
use rayon::prelude::*;

/// Distance between two member sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetDistance {
    /// `1 - |A ∩ B| / |A ∪ B|`
    Jaccard,
    /// `1 - |A ∩ B| / min(|A|, |B|)`
    Overlap,
}

impl SetDistance {
    /// Distance between two sorted, duplicate-free slices. Identical sets (including two
    /// empty sets) are at distance 0.
    pub fn distance(&self, a: &[u32], b: &[u32]) -> f64 {
        let shared = intersection_size(a, b);
        let denom = match self {
            SetDistance::Jaccard => a.len() + b.len() - shared,
            SetDistance::Overlap => a.len().min(b.len()),
        };
        if denom == 0 {
            return if a.len() == b.len() { 0.0 } else { 1.0 };
        }
        1.0 - shared as f64 / denom as f64
    }
}

fn intersection_size(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Symmetric, zero-diagonal distance matrix over `sets`.
///
/// Each unordered pair is computed exactly once; rows of the upper triangle are
/// distributed across the rayon pool and mirrored afterwards.
pub fn distance_matrix(sets: &[Vec<u32>], method: SetDistance) -> Array2<f64> {
    let n = sets.len();
    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| method.distance(&sets[i], &sets[j]))
                .collect()
        })
        .collect();

    let mut matrix = Array2::zeros((n, n));
    for (i, row) in upper.into_iter().enumerate() {
        for (offset, d) in row.into_iter().enumerate() {
            let j = i + 1 + offset;
            matrix[[i, j]] = d;
            matrix[[j, i]] = d;
        }
    }
    matrix
}
