use crate::document::Corpus;
use ndarray::{Array1, Array2, Axis};

/// Document × term raw counts, the first stage of the TF-IDF pipeline.
///
/// A cell whose document ordinal equals its term ordinal is never written
/// and stays zero; the per-document totals count only written cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCounts {
    counts: Array2<f64>,
    totals: Vec<usize>,
}

impl RawCounts {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut counts = Array2::zeros((corpus.len(), corpus.vocabulary.len()));
        let mut totals = vec![0usize; corpus.len()];

        for (row, profile) in corpus.profiles.iter().enumerate() {
            for (term, count) in profile.terms() {
                let Some(column) = corpus.vocabulary.ordinal(term) else {
                    continue;
                };
                if row != column {
                    counts[[row, column]] = count as f64;
                    totals[row] += count;
                }
            }
        }

        Self { counts, totals }
    }

    pub fn counts(&self) -> &Array2<f64> {
        &self.counts
    }

    /// Tokens written per document
    pub fn totals(&self) -> &[usize] {
        &self.totals
    }

    /// `ln(N / (df + 1))` per term, where `df` counts documents with a
    /// non-zero cell for the term. Not clamped: common terms go negative.
    pub fn inverse_document_frequency(&self) -> Array1<f64> {
        let documents = self.counts.nrows() as f64;
        self.counts
            .map_axis(Axis(0), |column| {
                column.iter().filter(|&&count| count != 0.0).count() as f64
            })
            .mapv(|df| (documents / (df + 1.0)).ln())
    }

    /// Each count divided by its document's total.
    ///
    /// A document with no tokens yields a row of NaN.
    pub fn term_frequency(&self) -> Array2<f64> {
        let mut tf = self.counts.clone();
        for (mut row, &total) in tf.axis_iter_mut(Axis(0)).zip(&self.totals) {
            let total = total as f64;
            row.mapv_inplace(|count| count / total);
        }
        tf
    }
}

/// Term weights per document after the three TF-IDF passes
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfModel {
    pub weights: Array2<f64>,
    pub idf: Array1<f64>,
    pub token_totals: Vec<usize>,
}

impl TfIdfModel {
    /// Raw counts, then IDF, then term frequency, then TF × IDF.
    ///
    /// Term frequency is computed from the raw counts, never from a
    /// partially weighted matrix.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let raw = RawCounts::from_corpus(corpus);
        let idf = raw.inverse_document_frequency();
        let weights = apply_idf(raw.term_frequency(), &idf);

        let undefined_rows = raw.totals().iter().filter(|&&total| total == 0).count();
        log::info!(
            "Computed TF-IDF weights: {} documents x {} terms ({} without tokens)",
            weights.nrows(),
            weights.ncols(),
            undefined_rows
        );

        Self {
            weights,
            idf,
            token_totals: raw.totals,
        }
    }

    pub fn documents(&self) -> usize {
        self.weights.nrows()
    }

    pub fn terms(&self) -> usize {
        self.weights.ncols()
    }
}

/// Scale every column by its IDF weight
pub fn apply_idf(mut tf: Array2<f64>, idf: &Array1<f64>) -> Array2<f64> {
    for mut row in tf.axis_iter_mut(Axis(0)) {
        row.zip_mut_with(idf, |weight, &factor| *weight *= factor);
    }
    tf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentProfile, VocabularyIndex};

    fn corpus(documents: &[&[&str]]) -> Corpus {
        let profiles: Vec<DocumentProfile> = documents
            .iter()
            .map(|terms| DocumentProfile::from_tokens(terms.iter().map(|t| t.to_string())))
            .collect();
        let vocabulary = VocabularyIndex::from_profiles(&profiles);
        Corpus {
            profiles,
            vocabulary,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn raw_counts_skip_cells_where_document_and_term_ordinals_match() {
        // vocabulary: alpha=0, beta=1, gamma=2
        let corpus = corpus(&[&["alpha", "alpha", "beta"], &["beta", "gamma"], &["gamma"]]);
        let raw = RawCounts::from_corpus(&corpus);

        assert_eq!(raw.counts()[[0, 0]], 0.0);
        assert_eq!(raw.counts()[[0, 1]], 1.0);
        assert_eq!(raw.counts()[[1, 1]], 0.0);
        assert_eq!(raw.counts()[[1, 2]], 1.0);
        assert_eq!(raw.counts()[[2, 2]], 0.0);
        assert_eq!(raw.totals(), &[1, 1, 0]);
    }

    #[test]
    fn idf_counts_documents_with_written_cells() {
        // vocabulary: apple=0, kiwi=1, pear=2
        let corpus = corpus(&[&["pear"], &["pear", "apple"], &["pear", "apple"], &["kiwi"]]);
        let raw = RawCounts::from_corpus(&corpus);
        let idf = raw.inverse_document_frequency();

        assert!(close(idf[0], (4.0f64 / 3.0).ln()));
        assert!(close(idf[1], (4.0f64 / 2.0).ln()));
        // pear is not written for document 2, so df = 2
        assert!(close(idf[2], (4.0f64 / 3.0).ln()));
    }

    #[test]
    fn idf_goes_negative_for_terms_in_every_document() {
        // vocabulary: alpha=0, beta=1, gamma=2
        let corpus = corpus(&[&["alpha", "gamma"], &["beta", "gamma"]]);
        let idf = RawCounts::from_corpus(&corpus).inverse_document_frequency();
        assert!(close(idf[2], (2.0f64 / 3.0).ln()));
        assert!(idf[2] < 0.0);
    }

    #[test]
    fn term_frequency_divides_raw_counts_by_document_total() {
        let corpus = corpus(&[&["zeta"], &["alpha", "alpha", "alpha", "zeta"]]);
        let tf = RawCounts::from_corpus(&corpus).term_frequency();

        // document 1 keeps alpha (column 0) but not zeta (column 1)
        assert!(close(tf[[1, 0]], 1.0));
        assert_eq!(tf[[1, 1]], 0.0);
        // document 0 has zeta at column 1
        assert!(close(tf[[0, 1]], 1.0));
    }

    #[test]
    fn empty_documents_produce_undefined_rows() {
        let corpus = corpus(&[&["alpha", "beta"], &[]]);
        let model = TfIdfModel::from_corpus(&corpus);
        assert!(model.weights.row(1).iter().all(|w| w.is_nan()));
        assert!(model.weights.row(0).iter().all(|w| w.is_finite()));
        assert_eq!(model.token_totals, vec![1, 0]);
    }

    #[test]
    fn weights_are_term_frequency_times_idf() {
        // vocabulary: alpha=0, beta=1, gamma=2, omega=3
        let corpus = corpus(&[
            &["omega", "beta", "beta"],
            &["alpha", "gamma"],
            &["alpha", "omega"],
            &["alpha"],
        ]);
        let model = TfIdfModel::from_corpus(&corpus);

        // document 0: beta tf = 2/3, beta df = 1
        let beta = 2.0 / 3.0 * (4.0f64 / 2.0).ln();
        assert!(close(model.weights[[0, 1]], beta));
        // document 3: alpha tf = 1, alpha df = 3
        let alpha = (4.0f64 / 4.0).ln();
        assert!(close(model.weights[[3, 0]], alpha));
        assert_eq!(model.documents(), 4);
        assert_eq!(model.terms(), 4);
    }
}
