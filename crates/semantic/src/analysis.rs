use crate::document::{Corpus, DocumentModelBuilder};
use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::similarity::SemanticMatrix;
use crate::tfidf::TfIdfModel;
use trace_code_model::{CodeUnitIndex, UnitDeclaration};

/// Every intermediate product of the semantic relation, kept for inspection
#[derive(Debug, Clone)]
pub struct SemanticAnalysis {
    pub corpus: Corpus,
    pub tfidf: TfIdfModel,
    pub similarity: SemanticMatrix,
}

impl SemanticAnalysis {
    /// Documents, then TF-IDF weights, then pairwise cosine similarity
    pub fn build(
        index: &CodeUnitIndex,
        units: &[UnitDeclaration],
        lexicon: &Lexicon,
    ) -> Result<Self> {
        let corpus = DocumentModelBuilder::new(lexicon).build(index, units)?;
        let tfidf = TfIdfModel::from_corpus(&corpus);
        let similarity = SemanticMatrix::from_weights(&tfidf.weights);
        Ok(Self {
            corpus,
            tfidf,
            similarity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_code_model::SourceModel;

    #[test]
    fn related_vocabulary_scores_higher_than_unrelated() {
        let model = SourceModel::from_units(vec![
            UnitDeclaration::new("shop.Cart").with_comment("basket holding product items"),
            UnitDeclaration::new("shop.Checkout").with_comment("checkout basket product payment"),
            UnitDeclaration::new("util.Strings").with_comment("trimming whitespace padding"),
            UnitDeclaration::new("util.Clock").with_comment("timer elapsed duration"),
        ]);
        let analysis =
            SemanticAnalysis::build(model.index(), model.units(), &Lexicon::java()).unwrap();

        let cart = model.index().ordinal("shop.Cart").unwrap();
        let checkout = model.index().ordinal("shop.Checkout").unwrap();
        let strings = model.index().ordinal("util.Strings").unwrap();

        assert_eq!(analysis.corpus.len(), 4);
        assert_eq!(analysis.similarity.size(), 4);
        assert!(analysis.similarity.get(cart, checkout) > 0.0);
        assert_eq!(analysis.similarity.get(cart, strings), 0.0);
    }

    #[test]
    fn unit_without_tokens_has_undefined_similarity() {
        let model = SourceModel::from_units(vec![
            UnitDeclaration::new("a.Empty"),
            UnitDeclaration::new("a.Full").with_comment("ledger account"),
            UnitDeclaration::new("a.Other").with_comment("ledger balance"),
        ]);
        let analysis =
            SemanticAnalysis::build(model.index(), model.units(), &Lexicon::java()).unwrap();

        assert!(analysis.similarity.get(0, 1).is_nan());
        assert!(analysis.similarity.get(0, 2).is_nan());
        assert_eq!(analysis.similarity.get(0, 0), 0.0);
    }
}
