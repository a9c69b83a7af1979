use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;

/// Cosine of the angle between two vectors.
///
/// No fallback is applied: a zero-norm or non-finite input gives NaN.
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    dot / (norm_a * norm_b)
}

/// Symmetric N×N pairwise cosine similarity between document vectors.
///
/// The diagonal is never computed and stays zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticMatrix {
    values: Array2<f64>,
}

impl SemanticMatrix {
    /// Compare every pair of rows of a document × term weight matrix
    pub fn from_weights(weights: &Array2<f64>) -> Self {
        let n = weights.nrows();

        // Upper triangle, one row per task
        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| cosine_similarity(weights.row(i), weights.row(j)))
                    .collect()
            })
            .collect();

        let mut values = Array2::zeros((n, n));
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, similarity) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                values[[i, j]] = similarity;
                values[[j, i]] = similarity;
            }
        }

        let undefined = values.iter().filter(|v| !v.is_finite()).count() / 2;
        log::info!(
            "Computed semantic similarity for {} units ({} undefined pairs)",
            n,
            undefined
        );

        Self { values }
    }

    /// Wrap precomputed similarities, e.g. restored from a cache
    pub fn from_values(values: Array2<f64>) -> Self {
        Self { values }
    }

    pub fn size(&self) -> usize {
        self.values.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values.get((i, j)).copied().unwrap_or(0.0)
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn into_values(self) -> Array2<f64> {
        self.values
    }
}
