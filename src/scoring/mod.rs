//! Meal scoring — turns preference state into a selection weight per meal.
//!
//! weight = base + bias bonus + capped keyword bonus + liked bonus + jitter
//!
//! Every term is non-negative, so every meal keeps a weight of at least
//! `base` and stays selectable.

pub mod weights;

pub use weights::ScoringWeights;

use crate::catalog::Meal;
use crate::preference::{Bias, PreferenceState};
use crate::selection::RandomSource;

/// Scores meals against a [`PreferenceState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights: weights.sanitized(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Bonus from the active bias.
    pub fn bias_bonus(&self, meal: &Meal, bias: Bias) -> f64 {
        match bias {
            Bias::Balanced if meal.has_tag(Bias::Balanced.tag()) => self.weights.balanced_tag,
            Bias::Balanced => self.weights.balanced_other,
            Bias::Healthier | Bias::Comfort if meal.has_tag(bias.tag()) => self.weights.bias_match,
            Bias::Healthier | Bias::Comfort => 0.0,
        }
    }

    /// Number of keywords found as substrings of the meal's name and tags.
    pub fn keyword_hits(meal: &Meal, keywords: &[String]) -> usize {
        if keywords.is_empty() {
            return 0;
        }
        let haystack = meal.search_text();
        keywords
            .iter()
            .filter(|k| !k.is_empty() && haystack.contains(&k.to_lowercase()))
            .count()
    }

    /// Capped keyword bonus.
    pub fn keyword_bonus(&self, meal: &Meal, keywords: &[String]) -> f64 {
        let hits = Self::keyword_hits(meal, keywords);
        (hits as f64 * self.weights.keyword_per_hit).min(self.weights.keyword_cap)
    }

    /// Weight without jitter. Deterministic for a given state.
    pub fn base_weight(&self, meal: &Meal, state: &PreferenceState) -> f64 {
        let mut weight = self.weights.base;
        weight += self.bias_bonus(meal, state.bias);
        weight += self.keyword_bonus(meal, &state.keywords);
        if state.is_liked(&meal.id) {
            weight += self.weights.liked;
        }
        weight
    }

    /// Full weight including a small random tie-breaker.
    pub fn weight(&self, meal: &Meal, state: &PreferenceState, rng: &mut dyn RandomSource) -> f64 {
        let jitter = if self.weights.jitter > 0.0 {
            rng.next_f64() * self.weights.jitter
        } else {
            0.0
        };
        self.base_weight(meal, state) + jitter
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::ScriptedRandom;
    use assert_approx_eq::assert_approx_eq;

    fn state_with(bias: Bias, keywords: &[&str]) -> PreferenceState {
        PreferenceState {
            bias,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ..PreferenceState::default()
        }
    }

    #[test]
    fn plain_meal_scores_base_plus_balanced_other() {
        let scorer = Scorer::default();
        let meal = Meal::new("x", "Plain toast", &[]);
        assert_approx_eq!(scorer.base_weight(&meal, &PreferenceState::new()), 1.2);
    }

    #[test]
    fn balanced_tag_gets_larger_bonus() {
        let scorer = Scorer::default();
        let meal = Meal::new("x", "Rice bowl", &["balanced"]);
        assert_approx_eq!(scorer.base_weight(&meal, &PreferenceState::new()), 1.7);
    }

    #[test]
    fn matching_bias_tag_adds_bonus() {
        let scorer = Scorer::default();
        let comfy = Meal::new("c", "Mac and cheese", &["comfort"]);
        let healthy = Meal::new("h", "Salad", &["healthier"]);
        let state = state_with(Bias::Comfort, &[]);
        assert_approx_eq!(scorer.base_weight(&comfy, &state), 2.1);
        assert_approx_eq!(scorer.base_weight(&healthy, &state), 1.0);
    }

    #[test]
    fn keyword_bonus_is_capped() {
        let scorer = Scorer::default();
        let meal = Meal::new("t", "Chicken taco rice bowl", &["mexican"]);
        let one = state_with(Bias::Healthier, &["taco"]);
        let many = state_with(Bias::Healthier, &["taco", "chicken", "rice", "bowl", "mex"]);
        assert_approx_eq!(scorer.keyword_bonus(&meal, &one.keywords), 0.6);
        assert_approx_eq!(scorer.keyword_bonus(&meal, &many.keywords), 1.6);
    }

    #[test]
    fn keyword_matches_tags_case_insensitively() {
        let meal = Meal::new("q", "Quesadillas", &["Mexican"]);
        assert_eq!(Scorer::keyword_hits(&meal, &["mexican".into()]), 1);
        assert_eq!(Scorer::keyword_hits(&meal, &["QUESA".into()]), 1);
        assert_eq!(Scorer::keyword_hits(&meal, &["pasta".into()]), 0);
    }

    #[test]
    fn liked_meal_scores_strictly_higher() {
        let scorer = Scorer::default();
        let meal = Meal::new("m", "Meatball subs", &["comfort"]);
        let mut state = state_with(Bias::Comfort, &["meat"]);
        let before = scorer.base_weight(&meal, &state);
        state.liked_meals.insert(meal.id.clone());
        let after = scorer.base_weight(&meal, &state);
        assert_approx_eq!(after - before, 1.4);
    }

    #[test]
    fn jitter_stays_below_configured_bound() {
        let scorer = Scorer::default();
        let meal = Meal::new("x", "Plain", &[]);
        let state = PreferenceState::new();
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.999]);
        let w0 = scorer.weight(&meal, &state, &mut rng);
        let w1 = scorer.weight(&meal, &state, &mut rng);
        let w2 = scorer.weight(&meal, &state, &mut rng);
        assert_approx_eq!(w0, 1.2);
        assert_approx_eq!(w1, 1.24);
        assert!(w2 < 1.2 + 0.08);
    }

    #[test]
    fn negative_weights_are_clamped() {
        let scorer = Scorer::new(ScoringWeights {
            base: -5.0,
            balanced_other: -1.0,
            ..ScoringWeights::default()
        });
        let meal = Meal::new("x", "Plain", &[]);
        assert!(scorer.base_weight(&meal, &PreferenceState::new()) >= 0.0);
    }
}
