//! Named scoring constants, overridable from config.

use serde::{Deserialize, Serialize};

/// Bonus magnitudes used by [`super::Scorer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Baseline every meal starts from.
    pub base: f64,
    /// Healthier/comfort bias and the meal carries that tag.
    pub bias_match: f64,
    /// Balanced bias and the meal is tagged "balanced".
    pub balanced_tag: f64,
    /// Balanced bias and the meal is not tagged "balanced".
    pub balanced_other: f64,
    pub keyword_per_hit: f64,
    /// Upper bound on the total keyword contribution.
    pub keyword_cap: f64,
    pub liked: f64,
    /// Jitter is drawn uniformly from `[0, jitter)`.
    pub jitter: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 1.0,
            bias_match: 1.1,
            balanced_tag: 0.7,
            balanced_other: 0.2,
            keyword_per_hit: 0.6,
            keyword_cap: 1.6,
            liked: 1.4,
            jitter: 0.08,
        }
    }
}

impl ScoringWeights {
    /// Weights with jitter disabled, for reproducible comparisons.
    pub fn without_jitter(self) -> Self {
        Self {
            jitter: 0.0,
            ..self
        }
    }

    /// Clamp every field to be non-negative so no meal can score below zero.
    pub fn sanitized(self) -> Self {
        let nn = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            base: nn(self.base),
            bias_match: nn(self.bias_match),
            balanced_tag: nn(self.balanced_tag),
            balanced_other: nn(self.balanced_other),
            keyword_per_hit: nn(self.keyword_per_hit),
            keyword_cap: nn(self.keyword_cap),
            liked: nn(self.liked),
            jitter: nn(self.jitter),
        }
    }
}
