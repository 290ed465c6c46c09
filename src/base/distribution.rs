//! Fitness-effect distributions for mutation types.
//!
//! SLiM draws each new mutation's selection coefficient from a distribution
//! declared with the mutation type. The kinds here mirror the simulator's
//! distribution codes: "f" (fixed), "n" (normal), "g" (gamma), "e"
//! (exponential).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distribution of fitness effects attached to a mutation type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EffectDistribution {
    /// Every draw returns the same selection coefficient.
    Fixed { coeff: f64 },
    /// Normal distribution with mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
    /// Gamma distribution parameterized by mean and shape.
    Gamma { mean: f64, shape: f64 },
    /// Exponential distribution with the given mean.
    Exponential { mean: f64 },
}

impl EffectDistribution {
    /// Neutral fixed effect (selection coefficient 0).
    pub fn neutral() -> Self {
        Self::Fixed { coeff: 0.0 }
    }

    /// The simulator's one-letter distribution code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fixed { .. } => "f",
            Self::Normal { .. } => "n",
            Self::Gamma { .. } => "g",
            Self::Exponential { .. } => "e",
        }
    }

    /// Distribution parameters in declaration order.
    pub fn params(&self) -> Vec<f64> {
        match self {
            Self::Fixed { coeff } => vec![*coeff],
            Self::Normal { mean, std_dev } => vec![*mean, *std_dev],
            Self::Gamma { mean, shape } => vec![*mean, *shape],
            Self::Exponential { mean } => vec![*mean],
        }
    }

    /// Expected selection coefficient of a draw.
    pub fn mean_effect(&self) -> f64 {
        match self {
            Self::Fixed { coeff } => *coeff,
            Self::Normal { mean, .. } => *mean,
            Self::Gamma { mean, .. } => *mean,
            Self::Exponential { mean } => *mean,
        }
    }
}

impl fmt::Display for EffectDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params()
            .iter()
            .map(|p| crate::base::fmt_float(*p))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "\"{}\", {}", self.code(), params)
    }
}
