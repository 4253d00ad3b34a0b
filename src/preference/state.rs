//! Preference state — the single persisted record of a user's choices.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::MealId;

/// Coarse preference nudge applied during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    #[default]
    Balanced,
    Healthier,
    Comfort,
}

impl Bias {
    pub const ALL: [Bias; 3] = [Bias::Balanced, Bias::Healthier, Bias::Comfort];

    /// The catalog tag this bias favors.
    pub fn tag(self) -> &'static str {
        match self {
            Bias::Balanced => "balanced",
            Bias::Healthier => "healthier",
            Bias::Comfort => "comfort",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Bias {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bias::ALL
            .into_iter()
            .find(|b| b.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown bias `{s}` (expected balanced, healthier or comfort)"))
    }
}

/// Two distinct meals offered side by side. Serialized as a 2-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPair(MealId, MealId);

impl MealPair {
    /// Returns `None` when both ids are the same meal.
    pub fn new(first: MealId, second: MealId) -> Option<Self> {
        (first != second).then_some(Self(first, second))
    }

    pub fn first(&self) -> &MealId {
        &self.0
    }

    pub fn second(&self) -> &MealId {
        &self.1
    }

    pub fn contains(&self, id: &MealId) -> bool {
        &self.0 == id || &self.1 == id
    }

    pub fn is_distinct(&self) -> bool {
        self.0 != self.1
    }

    /// Both ids in offer order.
    pub fn ids(&self) -> [&MealId; 2] {
        [&self.0, &self.1]
    }
}

/// Persisted user state. Missing fields load as their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferenceState {
    pub bias: Bias,
    /// Lowercased, trimmed, unique, in insertion order.
    pub keywords: Vec<String>,
    /// Meals explicitly locked as enjoyed.
    pub liked_meals: BTreeSet<MealId>,
    pub refreshes_used: u32,
    pub current_pair: Option<MealPair>,
    pub last_result: Option<MealId>,
}

impl PreferenceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_liked(&self, id: &MealId) -> bool {
        self.liked_meals.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state() {
        let state = PreferenceState::new();
        assert_eq!(state.bias, Bias::Balanced);
        assert!(state.keywords.is_empty());
        assert!(state.liked_meals.is_empty());
        assert_eq!(state.refreshes_used, 0);
        assert!(state.current_pair.is_none());
        assert!(state.last_result.is_none());
    }

    #[test]
    fn pair_requires_distinct_ids() {
        assert!(MealPair::new("a".into(), "a".into()).is_none());
        let pair = MealPair::new("a".into(), "b".into()).unwrap();
        assert!(pair.contains(&"b".into()));
        assert!(!pair.contains(&"c".into()));
    }

    #[test]
    fn json_uses_camel_case_and_array_pair() {
        let mut state = PreferenceState::new();
        state.bias = Bias::Comfort;
        state.current_pair = MealPair::new("a".into(), "b".into());
        state.liked_meals.insert("a".into());

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["bias"], "comfort");
        assert_eq!(json["currentPair"], serde_json::json!(["a", "b"]));
        assert_eq!(json["likedMeals"], serde_json::json!(["a"]));
        assert_eq!(json["refreshesUsed"], 0);
        assert!(json["lastResult"].is_null());
    }

    #[test]
    fn missing_fields_fill_from_defaults() {
        let state: PreferenceState = serde_json::from_str(r#"{"bias":"healthier"}"#).unwrap();
        assert_eq!(state.bias, Bias::Healthier);
        assert!(state.keywords.is_empty());
        assert_eq!(state.refreshes_used, 0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let state: PreferenceState =
            serde_json::from_str(r#"{"keywords":["tacos"],"theme":"dark"}"#).unwrap();
        assert_eq!(state.keywords, vec!["tacos"]);
    }

    #[test]
    fn bias_parses_case_insensitively() {
        assert_eq!("Comfort".parse::<Bias>().unwrap(), Bias::Comfort);
        assert_eq!(" healthier ".parse::<Bias>().unwrap(), Bias::Healthier);
        assert!("spicy".parse::<Bias>().is_err());
    }
}
