use crate::error::{ClassifierError, Result};
use serde::{Deserialize, Serialize};

/// Thresholds a unit must exceed to be reported as a utility trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// FDR cutoff
    pub alpha: f64,

    /// CS cutoff
    pub beta: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            alpha: 0.95,
            beta: 0.95,
        }
    }
}

impl ClassifierConfig {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() {
                return Err(ClassifierError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }

    /// Both comparisons are strict: a score equal to its threshold fails
    pub fn is_utility(&self, fdr: f64, cs: f64) -> bool {
        fdr > self.alpha && cs > self.beta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_thresholds() {
        let config = ClassifierConfig::default();
        assert_eq!(config.alpha, 0.95);
        assert_eq!(config.beta, 0.95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ClassifierConfig = serde_json::from_str(r#"{"alpha": 0.5}"#).unwrap();
        assert_eq!(config, ClassifierConfig::new(0.5, 0.95));
    }

    #[test]
    fn non_finite_thresholds_are_rejected() {
        let err = ClassifierConfig::new(f64::NAN, 0.9).validate().unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidThreshold { name: "alpha", .. }));

        let err = ClassifierConfig::new(0.9, f64::INFINITY).validate().unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidThreshold { name: "beta", .. }));
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let config = ClassifierConfig::new(0.9, 0.8);
        assert!(!config.is_utility(0.9, 0.85));
        assert!(!config.is_utility(0.95, 0.8));
        assert!(config.is_utility(0.9000001, 0.8000001));
    }
}
