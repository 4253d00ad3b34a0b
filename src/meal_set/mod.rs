//! Week meal set — a small batch of meals to shop for, from which tonight is
//! picked, plus the grocery list that goes with it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{MealCatalog, MealId};

/// Key of the meal set record.
pub const MEAL_SET_KEY: &str = "fh_meal_set_v1";

/// Persisted meal set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealSet {
    pub meals: Vec<MealId>,
    /// Tonight was decided without touching the week set.
    pub tonight_only: bool,
}

impl MealSet {
    pub fn new(meals: Vec<MealId>) -> Self {
        Self {
            meals,
            tonight_only: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Whether the set still holds at least `size` meals.
    pub fn is_complete(&self, size: usize) -> bool {
        !self.meals.is_empty() && self.meals.len() >= size
    }

    /// Drop ids unknown to `catalog` and repeated ids.
    pub fn reconcile(mut self, catalog: &MealCatalog) -> Self {
        let mut seen = Vec::with_capacity(self.meals.len());
        self.meals.retain(|id| {
            if catalog.contains(id) && !seen.contains(id) {
                seen.push(id.clone());
                true
            } else {
                false
            }
        });
        self
    }

    /// Grocery items of every meal in the set, deduplicated ignoring case and
    /// sorted alphabetically. The first spelling seen wins.
    pub fn grocery_list(&self, catalog: &MealCatalog) -> Vec<String> {
        let mut items: BTreeMap<String, String> = BTreeMap::new();
        for meal in self.meals.iter().filter_map(|id| catalog.get(id)) {
            for item in &meal.groceries {
                let item = item.trim();
                if item.is_empty() {
                    continue;
                }
                items
                    .entry(item.to_lowercase())
                    .or_insert_with(|| item.to_string());
            }
        }
        items.into_values().collect()
    }

    /// Plain-text grocery list suitable for sharing.
    pub fn grocery_text(&self, catalog: &MealCatalog) -> String {
        let names: Vec<&str> = self
            .meals
            .iter()
            .filter_map(|id| catalog.get(id))
            .map(|m| m.name.as_str())
            .collect();
        let mut text = format!("Meals: {}\n\nGroceries:\n", names.join(" • "));
        for item in self.grocery_list(catalog) {
            text.push_str("- ");
            text.push_str(&item);
            text.push('\n');
        }
        text
    }
}
