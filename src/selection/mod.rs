//! Weighted meal selection — roulette-wheel sampling without replacement.
//!
//! Selection always produces an answer when the catalog has any meal at all:
//! an exhausted candidate pool falls back to the first catalog entry.

pub mod random;

pub use random::{RandomSource, ScriptedRandom};

use crate::catalog::{MealCatalog, MealId};
use crate::preference::{MealPair, PreferenceState};
use crate::scoring::Scorer;

/// Draws meals from a catalog using scores for the given state.
#[derive(Debug, Clone, Copy)]
pub struct Selector<'a> {
    catalog: &'a MealCatalog,
    scorer: &'a Scorer,
}

impl<'a> Selector<'a> {
    pub fn new(catalog: &'a MealCatalog, scorer: &'a Scorer) -> Self {
        Self { catalog, scorer }
    }

    /// Draw one meal not in `exclude`, proportionally to its weight.
    ///
    /// Returns the first catalog meal when every meal is excluded, and `None`
    /// only for an empty catalog.
    pub fn select_one(
        &self,
        state: &PreferenceState,
        exclude: &[MealId],
        rng: &mut dyn RandomSource,
    ) -> Option<MealId> {
        let weighted: Vec<(&MealId, f64)> = self
            .catalog
            .meals()
            .iter()
            .filter(|m| !exclude.contains(&m.id))
            .map(|m| (&m.id, self.scorer.weight(m, state, &mut *rng)))
            .collect();

        if weighted.is_empty() {
            return self.catalog.first().map(|m| m.id.clone());
        }

        let total: f64 = weighted.iter().map(|(_, w)| w).sum();
        if total <= 0.0 || !total.is_finite() {
            return Some(weighted[0].0.clone());
        }

        let mut remainder = rng.next_f64() * total;
        for (id, w) in &weighted {
            remainder -= w;
            if remainder <= 0.0 {
                return Some((*id).clone());
            }
        }
        // Float rounding can leave a sliver past the last candidate.
        weighted.last().map(|(id, _)| (*id).clone())
    }

    /// Draw two distinct meals. `None` when the catalog has fewer than two.
    pub fn select_pair(&self, state: &PreferenceState, rng: &mut dyn RandomSource) -> Option<MealPair> {
        let first = self.select_one(state, &[], rng)?;
        let mut second = self.select_one(state, std::slice::from_ref(&first), rng)?;
        if second == first {
            second = self
                .catalog
                .meals()
                .iter()
                .find(|m| m.id != first)
                .map(|m| m.id.clone())?;
        }
        MealPair::new(first, second)
    }

    /// Draw up to `count` distinct meals, stopping early if the catalog runs out.
    pub fn select_many(
        &self,
        state: &PreferenceState,
        count: usize,
        rng: &mut dyn RandomSource,
    ) -> Vec<MealId> {
        let mut picked: Vec<MealId> = Vec::with_capacity(count);
        while picked.len() < count.min(self.catalog.len()) {
            match self.select_one(state, &picked, rng) {
                Some(id) if !picked.contains(&id) => picked.push(id),
                _ => break,
            }
        }
        picked
    }
}

/// Uniform pick from a slice.
pub fn pick_uniform<'t, T>(items: &'t [T], rng: &mut dyn RandomSource) -> Option<&'t T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_index(items.len()))
}
