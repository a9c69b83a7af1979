//! Score arithmetic over the relation and similarity matrices.

use ndarray::{Array1, Array2, Axis};

/// Copy of `matrix` with every NaN or infinity replaced by 0.0
pub fn replace_non_finite(matrix: &Array2<f64>) -> Array2<f64> {
    matrix.mapv(|value| if value.is_finite() { value } else { 0.0 })
}

/// Rescale every entry into [0, 1] using the single global minimum and
/// maximum. A matrix with one distinct value (or no entries) becomes all
/// zeros.
pub fn min_max_scale(matrix: &Array2<f64>) -> Array2<f64> {
    let (min, max) = matrix
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &value| {
            (min.min(value), max.max(value))
        });

    let range = max - min;
    if matrix.is_empty() || range == 0.0 || !range.is_finite() {
        return Array2::zeros(matrix.raw_dim());
    }
    matrix.mapv(|value| (value - min) / range)
}

/// Calls + References, element-wise
pub fn structural_matrix(calls: &Array2<f64>, references: &Array2<f64>) -> Array2<f64> {
    calls + references
}

/// Column sums of the average of the rescaled structural matrix and the
/// semantic matrix. Inputs must already be free of non-finite values.
pub fn fdr_scores(
    calls: &Array2<f64>,
    references: &Array2<f64>,
    semantic: &Array2<f64>,
) -> Array1<f64> {
    let structural = min_max_scale(&structural_matrix(calls, references));
    let average = (structural + semantic) / 2.0;
    average.sum_axis(Axis(0))
}

/// `1 - 1 / (1 + s)`: zero for no incoming relations, approaching one as
/// they grow
pub fn centrality(incoming: f64) -> f64 {
    1.0 - 1.0 / (1.0 + incoming)
}

/// Centrality of each unit from its raw incoming Calls + References
pub fn cs_scores(calls: &Array2<f64>, references: &Array2<f64>) -> Array1<f64> {
    structural_matrix(calls, references)
        .sum_axis(Axis(0))
        .mapv(centrality)
}
