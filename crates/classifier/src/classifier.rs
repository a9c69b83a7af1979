use crate::config::ClassifierConfig;
use crate::error::{ClassifierError, Result};
use crate::scores;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trace_code_model::CodeUnitIndex;

/// Scores of one code unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitScore {
    pub name: String,
    pub ordinal: usize,

    /// Incoming structural and semantic affinity
    pub fdr: f64,

    /// Saturating incoming relation volume, in [0, 1)
    pub cs: f64,

    pub utility: bool,
}

/// Outcome of one classification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityTraceReport {
    pub config: ClassifierConfig,

    /// One entry per unit, in ordinal order
    pub scores: Vec<UnitScore>,

    /// Names of the units whose scores exceed both thresholds
    pub utility_traces: BTreeSet<String>,
}

impl UtilityTraceReport {
    pub fn unit_count(&self) -> usize {
        self.scores.len()
    }

    pub fn score(&self, name: &str) -> Option<&UnitScore> {
        self.scores.iter().find(|score| score.name == name)
    }

    pub fn is_utility(&self, name: &str) -> bool {
        self.utility_traces.contains(name)
    }
}

/// Flags units that are heavily relied upon and semantically unremarkable
#[derive(Debug, Clone, Default)]
pub struct UtilityTraceClassifier {
    config: ClassifierConfig,
}

impl UtilityTraceClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Score every unit of `index` from its Calls, References and semantic
    /// similarity matrices. All three must be N×N for N indexed units.
    pub fn classify(
        &self,
        index: &CodeUnitIndex,
        calls: &Array2<f64>,
        references: &Array2<f64>,
        semantic: &Array2<f64>,
    ) -> Result<UtilityTraceReport> {
        let size = index.len();
        check_shape("Calls", calls, size)?;
        check_shape("References", references, size)?;
        check_shape("Semantic", semantic, size)?;

        let calls = scores::replace_non_finite(calls);
        let references = scores::replace_non_finite(references);
        let semantic = scores::replace_non_finite(semantic);

        let fdr = scores::fdr_scores(&calls, &references, &semantic);
        let cs = scores::cs_scores(&calls, &references);

        let scores: Vec<UnitScore> = index
            .iter()
            .map(|(ordinal, name)| UnitScore {
                name: name.to_string(),
                ordinal,
                fdr: fdr[ordinal],
                cs: cs[ordinal],
                utility: self.config.is_utility(fdr[ordinal], cs[ordinal]),
            })
            .collect();

        let utility_traces: BTreeSet<String> = scores
            .iter()
            .filter(|score| score.utility)
            .map(|score| score.name.clone())
            .collect();

        log::info!(
            "Classified {} units: {} utility traces (alpha={}, beta={})",
            size,
            utility_traces.len(),
            self.config.alpha,
            self.config.beta
        );

        Ok(UtilityTraceReport {
            config: self.config,
            scores,
            utility_traces,
        })
    }
}

fn check_shape(matrix: &'static str, values: &Array2<f64>, expected: usize) -> Result<()> {
    let (rows, cols) = values.dim();
    if rows != expected || cols != expected {
        return Err(ClassifierError::ShapeMismatch {
            matrix,
            rows,
            cols,
            expected,
        });
    }
    Ok(())
}
