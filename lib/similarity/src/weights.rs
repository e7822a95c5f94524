//! Axis weights and the weighted combiner
//!
//! The four axis scores are merged by a plain weighted sum. Weights must form
//! a convex combination so the combined score stays inside [0, 1]; anything
//! else is rejected when the weights are built or deserialized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance on the weight sum
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// The four similarity axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Hierarchy,
    Text,
    Financial,
    Attribute,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Hierarchy, Axis::Text, Axis::Financial, Axis::Attribute];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Hierarchy => "hierarchy",
            Axis::Text => "text",
            Axis::Financial => "financial",
            Axis::Attribute => "attribute",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-axis values: raw scores, weights, or weighted contributions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisScores {
    pub hierarchy: f64,
    pub text: f64,
    pub financial: f64,
    pub attribute: f64,
}

impl AxisScores {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Hierarchy => self.hierarchy,
            Axis::Text => self.text,
            Axis::Financial => self.financial,
            Axis::Attribute => self.attribute,
        }
    }

    pub fn sum(&self) -> f64 {
        self.hierarchy + self.text + self.financial + self.attribute
    }

    /// Element-wise product
    pub fn scaled_by(&self, other: &AxisScores) -> AxisScores {
        AxisScores {
            hierarchy: self.hierarchy * other.hierarchy,
            text: self.text * other.text,
            financial: self.financial * other.financial,
            attribute: self.attribute * other.attribute,
        }
    }

    /// Axis with the largest value; ties go to the earlier axis
    pub fn top_axis(&self) -> Axis {
        let mut best = Axis::Hierarchy;
        for axis in Axis::ALL {
            if self.get(axis) > self.get(best) {
                best = axis;
            }
        }
        best
    }
}

/// Errors that can occur during weight validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("Axis '{0}' has negative weight")]
    Negative(Axis),

    #[error("Axis '{0}' has a non-finite weight")]
    NonFinite(Axis),

    #[error("Weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

/// Validated weights of the four axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AxisScores", into = "AxisScores")]
pub struct SimilarityWeights(AxisScores);

impl SimilarityWeights {
    pub const DEFAULT: AxisScores = AxisScores {
        hierarchy: 0.35,
        text: 0.30,
        financial: 0.20,
        attribute: 0.15,
    };

    pub fn new(hierarchy: f64, text: f64, financial: f64, attribute: f64) -> Result<Self, WeightError> {
        Self::try_from(AxisScores {
            hierarchy,
            text,
            financial,
            attribute,
        })
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> f64 {
        self.0.get(axis)
    }

    #[inline]
    pub fn as_scores(&self) -> &AxisScores {
        &self.0
    }

    /// Weighted sum of the axis scores, clamped to [0, 1]
    pub fn combine(&self, scores: &AxisScores) -> f64 {
        scores.scaled_by(&self.0).sum().clamp(0.0, 1.0)
    }
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<AxisScores> for SimilarityWeights {
    type Error = WeightError;

    fn try_from(raw: AxisScores) -> Result<Self, Self::Error> {
        for axis in Axis::ALL {
            let w = raw.get(axis);
            if !w.is_finite() {
                return Err(WeightError::NonFinite(axis));
            }
            if w < 0.0 {
                return Err(WeightError::Negative(axis));
            }
        }

        let sum = raw.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightError::BadSum(sum));
        }

        Ok(Self(raw))
    }
}

impl From<SimilarityWeights> for AxisScores {
    fn from(weights: SimilarityWeights) -> Self {
        weights.0
    }
}

/// Free-function form of [`SimilarityWeights::combine`]
pub fn combine(
    hierarchy: f64,
    text: f64,
    financial: f64,
    attribute: f64,
    weights: &SimilarityWeights,
) -> f64 {
    weights.combine(&AxisScores {
        hierarchy,
        text,
        financial,
        attribute,
    })
}
