//! Explainability for pairwise similarity
//!
//! Shows how a combined score was assembled from the four axes.

use crate::scorer::SimilarityScorer;
use crate::weights::{Axis, AxisScores};
use budgetsim_core::Project;
use serde::Serialize;

/// A pairwise score with its per-axis breakdown
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainedPair {
    pub source_id: String,
    pub target_id: String,
    /// Overall weighted similarity score
    pub score: f64,
    /// Raw axis scores, each in [0, 1]
    pub axes: AxisScores,
    /// Per-axis contributions (already weighted)
    pub explain: AxisScores,
    /// Axis that contributed most to the score
    pub top_contributing_axis: Axis,
}

impl ExplainedPair {
    pub fn compute(scorer: &SimilarityScorer, source: &Project, target: &Project) -> Self {
        let axes = scorer.axis_scores(source, target);
        let explain = axes.scaled_by(scorer.weights().as_scores());
        Self {
            source_id: source.id.clone(),
            target_id: target.id.clone(),
            score: scorer.weights().combine(&axes),
            axes,
            explain,
            top_contributing_axis: explain.top_axis(),
        }
    }
}
