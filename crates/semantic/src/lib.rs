//! # Trace Semantic
//!
//! Vocabulary-based relatedness between code units.
//!
//! Each unit becomes a document built from its comments and identifiers.
//! Documents are weighted with TF-IDF and compared pairwise with cosine
//! similarity.
//!
//! ## Pipeline
//!
//! ```text
//! UnitDeclaration (comments + identifiers)
//!     │
//!     ├─ normalize ─> tokenize ─> split camelCase
//!     ├─ length filter + strip ─> stop words ─> keywords ─> stem
//!     │
//!     ├──> Corpus (DocumentProfile per ordinal, sorted VocabularyIndex)
//!     ├──> TfIdfModel (raw counts ─> idf ─> tf ─> tf × idf)
//!     └──> SemanticMatrix (N×N cosine, symmetric, zero diagonal)
//! ```
//!
//! Documents without surviving tokens produce NaN similarities. They are
//! left as-is here and handled by the classifier.

mod analysis;
mod document;
mod error;
mod lexicon;
mod similarity;
pub mod text;
mod tfidf;

pub use analysis::SemanticAnalysis;
pub use document::{Corpus, DocumentModelBuilder, DocumentProfile, VocabularyIndex};
pub use error::{Result, SemanticError};
pub use lexicon::{Lexicon, SnowballStemmer, Stemmer, WordList};
pub use similarity::{cosine_similarity, SemanticMatrix};
pub use tfidf::{apply_idf, RawCounts, TfIdfModel};
