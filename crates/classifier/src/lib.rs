//! # Trace Classifier
//!
//! Flags utility traces: code units that many others rely on but whose
//! vocabulary says little about any particular feature.
//!
//! ## Scores
//!
//! ```text
//! Calls, References, Semantic   (non-finite entries -> 0.0)
//!     │
//!     ├──> FDR[i] = Σ column i of (minmax(Calls + References) + Semantic) / 2
//!     └──> CS[i]  = 1 - 1 / (1 + Σ column i of (Calls + References))
//!
//! utility trace  <=>  FDR > alpha  &&  CS > beta
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ndarray::arr2;
//! use trace_classifier::{ClassifierConfig, UtilityTraceClassifier};
//! use trace_code_model::CodeUnitIndex;
//!
//! let index = CodeUnitIndex::from_names(["app.Main", "util.Strings"]);
//! let calls = arr2(&[[0.0, 12.0], [0.0, 0.0]]);
//! let none = arr2(&[[0.0, 0.0], [0.0, 0.0]]);
//!
//! let classifier = UtilityTraceClassifier::new(ClassifierConfig::new(0.4, 0.9)).unwrap();
//! let report = classifier.classify(&index, &calls, &none, &none).unwrap();
//! assert!(report.is_utility("util.Strings"));
//! ```

mod classifier;
mod config;
mod error;
pub mod scores;

pub use classifier::{UnitScore, UtilityTraceClassifier, UtilityTraceReport};
pub use config::ClassifierConfig;
pub use error::{ClassifierError, Result};
