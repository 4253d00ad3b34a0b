//! Week planning on top of the decision engine: a persisted meal set to shop
//! for, with tonight picked from it.

use super::DecisionEngine;
use crate::catalog::MealId;
use crate::error::Rejection;
use crate::meal_set::MealSet;
use crate::selection::Selector;

impl DecisionEngine {
    pub fn meal_set(&self) -> &MealSet {
        &self.meal_set
    }

    /// Decide the week and tonight in one go.
    ///
    /// Keeps the saved set unless it is short or `force_reroll` is set, in
    /// which case a new set is drawn by weight. Tonight is a uniform pick
    /// from the set and finalizes the session.
    pub fn decide_week(&mut self, force_reroll: bool) -> Result<MealId, Rejection> {
        let size = self.config.meal_set_size.max(1);
        if force_reroll || !self.meal_set.is_complete(size) {
            let meals = Selector::new(&self.catalog, &self.scorer).select_many(
                &self.state,
                size,
                self.rng.as_mut(),
            );
            if meals.is_empty() {
                return Err(Rejection::NoMealAvailable);
            }
            tracing::debug!(count = meals.len(), force_reroll, "new meal set drawn");
            self.meal_set = MealSet::new(meals);
        }
        self.meal_set.tonight_only = false;

        let tonight = self.pick_from_set().ok_or(Rejection::NoMealAvailable)?;
        self.finalize_without_offer(tonight.clone());
        self.persist_meal_set();
        Ok(tonight)
    }

    /// Decide tonight only, leaving the week set as it is.
    ///
    /// Picks uniformly from the saved set, or draws one meal by weight when
    /// there is no set.
    pub fn decide_tonight_from_set(&mut self) -> Result<MealId, Rejection> {
        let tonight = match self.pick_from_set() {
            Some(id) => id,
            None => self.draw_one().ok_or(Rejection::NoMealAvailable)?,
        };
        self.meal_set.tonight_only = true;
        self.finalize_without_offer(tonight.clone());
        self.persist_meal_set();
        Ok(tonight)
    }

    /// Grocery items for the current meal set.
    pub fn grocery_list(&self) -> Vec<String> {
        self.meal_set.grocery_list(&self.catalog)
    }

    /// Shareable grocery text for the current meal set.
    pub fn grocery_text(&self) -> String {
        self.meal_set.grocery_text(&self.catalog)
    }

    fn finalize_without_offer(&mut self, id: MealId) {
        self.state.current_pair = None;
        self.state.refreshes_used = 0;
        self.finalize(id);
    }
}
