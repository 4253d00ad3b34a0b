//! Meal catalog — the fixed set of meals the engine can offer.
//!
//! The catalog is read-only once built. Lookups by id return `Option` and
//! callers treat a missing id as "skip".

pub mod builtin;
pub mod loader;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub use builtin::builtin_catalog;
pub use loader::{load_catalog, load_catalog_or_builtin};

/// Stable identifier of a catalog meal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealId(pub String);

impl MealId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MealId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MealId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A single meal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    /// Category labels, e.g. "balanced", "comfort", "mexican".
    #[serde(default)]
    pub tags: Vec<String>,
    /// Short time/equipment summary shown under the name.
    #[serde(default)]
    pub meta: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub groceries: Vec<String>,
}

impl Meal {
    /// Create a meal with only the fields scoring needs.
    pub fn new(id: &str, name: &str, tags: &[&str]) -> Self {
        Self {
            id: MealId::from(id),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            meta: String::new(),
            steps: Vec::new(),
            groceries: Vec::new(),
        }
    }

    /// Whether the meal carries `tag` (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Lowercased name and tags joined, the text keywords are matched against.
    pub fn search_text(&self) -> String {
        let mut text = self.name.to_lowercase();
        for tag in &self.tags {
            text.push(' ');
            text.push_str(&tag.to_lowercase());
        }
        text
    }
}

/// Ordered, read-only collection of meals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealCatalog {
    meals: Vec<Meal>,
}

impl MealCatalog {
    /// Build a catalog without validation. An empty or tiny catalog is
    /// allowed; selection degrades instead of failing.
    pub fn new(meals: Vec<Meal>) -> Self {
        Self { meals }
    }

    /// Build a catalog that has at least two meals and unique ids.
    pub fn validated(meals: Vec<Meal>) -> Result<Self, CatalogError> {
        if meals.len() < 2 {
            return Err(CatalogError::TooFewMeals(meals.len()));
        }
        let mut seen = HashSet::new();
        for meal in &meals {
            if !seen.insert(&meal.id) {
                return Err(CatalogError::DuplicateId(meal.id.clone()));
            }
        }
        Ok(Self { meals })
    }

    pub fn get(&self, id: &MealId) -> Option<&Meal> {
        self.meals.iter().find(|m| &m.id == id)
    }

    pub fn contains(&self, id: &MealId) -> bool {
        self.get(id).is_some()
    }

    /// All meals in catalog order.
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn first(&self) -> Option<&Meal> {
        self.meals.first()
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}
