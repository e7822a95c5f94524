//! Run configuration for scoring and precomputation

use crate::axis::{corpus_max_log_diff, DEFAULT_MAX_LOG_DIFF};
use crate::weights::SimilarityWeights;
use budgetsim_core::{Error, Project, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of recommendations kept per project
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialConfig {
    /// Log-difference at which financial similarity reaches 0
    pub max_log_diff: f64,
    /// Derive `max_log_diff` from the corpus cost range instead
    pub derive_from_corpus: bool,
}

impl Default for FinancialConfig {
    fn default() -> Self {
        Self {
            max_log_diff: DEFAULT_MAX_LOG_DIFF,
            derive_from_corpus: false,
        }
    }
}

impl FinancialConfig {
    /// Effective constant for a corpus
    ///
    /// Falls back to the fixed value when derivation is off or the corpus
    /// has fewer than two distinct costs.
    pub fn resolve(&self, corpus: &[Project]) -> f64 {
        if self.derive_from_corpus {
            if let Some(derived) = corpus_max_log_diff(corpus) {
                return derived;
            }
        }
        self.max_log_diff
    }
}

/// Similarity configuration, usually read from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimilarityConfig {
    pub weights: SimilarityWeights,
    pub top_n: usize,
    pub financial: FinancialConfig,
    /// Run the pipeline's outer loop on the rayon pool
    pub parallel: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            weights: SimilarityWeights::default(),
            top_n: DEFAULT_TOP_N,
            financial: FinancialConfig::default(),
            parallel: true,
        }
    }
}

impl SimilarityConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.financial.max_log_diff.is_finite() || self.financial.max_log_diff <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "financial.maxLogDiff must be positive, got {}",
                self.financial.max_log_diff
            )));
        }
        Ok(())
    }
}
