//! # Trace CLI
//!
//! Orchestration for the utility-trace analysis: runs the structural and
//! semantic pipelines over a resolved snapshot, classifies the units and
//! caches the matrices between runs.
//!
//! ```text
//! snapshot.json ──> SourceModel
//!                     │
//!        ┌────────────┴────────────┐   (rayon::join)
//!   GraphBuilder            SemanticAnalysis
//!   Calls / References      documents ─> TF-IDF ─> cosine
//!        └────────────┬────────────┘
//!                     │      MatrixCache (keyed by snapshot fingerprint)
//!          UtilityTraceClassifier
//!                     │
//!          UtilityTraceReport ──> text | JSON
//! ```

pub mod cache;
pub mod config;
pub mod pipeline;
pub mod report;

pub use cache::{fingerprint, CachedMatrices, MatrixCache};
pub use config::{AppConfig, ConfigOverrides};
pub use pipeline::{classify_matrices, run_analysis, Analysis};
pub use report::render_text;
