//! Decision engine — the session state machine over preference state.
//!
//! Idle → Offering (start) → Finalized (choose / pick for me). Refreshes are
//! bounded per session. Every accepted operation writes the state back to the
//! store before returning; a rejected one leaves state and store untouched.
//!
//! The engine owns its catalog, store, and random source. Storage failures are
//! logged and never surface to the caller.

pub mod phase;
pub mod week;

pub use phase::{Phase, PickMode};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{Meal, MealCatalog, MealId};
use crate::config::EngineConfig;
use crate::error::Rejection;
use crate::meal_set::{MealSet, MEAL_SET_KEY};
use crate::preference::{self, Bias, MealPair, PreferenceState, StateStore, STATE_KEY};
use crate::scoring::Scorer;
use crate::selection::{pick_uniform, RandomSource, Selector};

/// Owns the preference state and funnels every mutation through the
/// documented operations.
pub struct DecisionEngine {
    catalog: MealCatalog,
    config: EngineConfig,
    scorer: Scorer,
    state: PreferenceState,
    meal_set: MealSet,
    store: Box<dyn StateStore>,
    rng: Box<dyn RandomSource>,
}

impl DecisionEngine {
    /// Create an engine, loading and reconciling any saved state from `store`.
    pub fn new(
        catalog: MealCatalog,
        config: EngineConfig,
        store: impl StateStore + 'static,
        rng: impl RandomSource + 'static,
    ) -> Self {
        let state = preference::load_state(
            &store,
            &catalog,
            config.refresh_limit,
            config.keyword_limit,
        );
        let meal_set = preference::load_record::<MealSet>(&store, MEAL_SET_KEY).reconcile(&catalog);
        tracing::debug!(phase = %Phase::of(&state), meals = catalog.len(), "decision engine loaded");
        Self {
            scorer: Scorer::new(config.weights),
            catalog,
            config,
            state,
            meal_set,
            store: Box::new(store),
            rng: Box::new(rng),
        }
    }

    /// Create an engine drawing from a ChaCha RNG seeded with `seed`.
    pub fn with_seed(
        catalog: MealCatalog,
        config: EngineConfig,
        store: impl StateStore + 'static,
        seed: u64,
    ) -> Self {
        Self::new(catalog, config, store, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &PreferenceState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> PreferenceState {
        self.state.clone()
    }

    pub fn phase(&self) -> Phase {
        Phase::of(&self.state)
    }

    pub fn catalog(&self) -> &MealCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn meal(&self, id: &MealId) -> Option<&Meal> {
        self.catalog.get(id)
    }

    pub fn refresh_limit(&self) -> u32 {
        self.config.refresh_limit
    }

    pub fn refreshes_used(&self) -> u32 {
        self.state.refreshes_used
    }

    pub fn refreshes_remaining(&self) -> u32 {
        self.config.refresh_limit.saturating_sub(self.state.refreshes_used)
    }

    pub fn current_pair(&self) -> Option<&MealPair> {
        self.state.current_pair.as_ref()
    }

    pub fn last_result(&self) -> Option<&MealId> {
        self.state.last_result.as_ref()
    }

    /// Begin a new decision session and offer a fresh pair.
    pub fn start_decision(&mut self) -> Result<MealPair, Rejection> {
        let pair = self.draw_pair().ok_or(Rejection::NoMealAvailable)?;
        self.state.refreshes_used = 0;
        self.state.last_result = None;
        self.state.current_pair = Some(pair.clone());
        tracing::debug!(first = %pair.first(), second = %pair.second(), "decision started");
        self.persist();
        Ok(pair)
    }

    /// Swap the offered pair for a new one, consuming one refresh.
    pub fn refresh(&mut self) -> Result<MealPair, Rejection> {
        if self.phase() != Phase::Offering {
            return Err(Rejection::NoActiveOffer);
        }
        if self.state.refreshes_used >= self.config.refresh_limit {
            tracing::debug!(limit = self.config.refresh_limit, "refresh refused at limit");
            return Err(Rejection::RefreshLimitReached {
                limit: self.config.refresh_limit,
            });
        }
        let pair = self.draw_pair().ok_or(Rejection::NoMealAvailable)?;
        self.state.refreshes_used += 1;
        self.state.current_pair = Some(pair.clone());
        tracing::debug!(
            used = self.state.refreshes_used,
            first = %pair.first(),
            second = %pair.second(),
            "pair refreshed"
        );
        self.persist();
        Ok(pair)
    }

    /// Finalize on one of the two offered meals.
    pub fn choose_explicit(&mut self, id: &MealId) -> Result<MealId, Rejection> {
        let pair = self.offered_pair()?;
        if !pair.contains(id) {
            return Err(Rejection::NotInPair(id.clone()));
        }
        Ok(self.finalize(id.clone()))
    }

    /// Let the engine decide. By default a coin flip between the offered
    /// meals; with [`PickMode::WholeCatalog`] a fresh weighted draw.
    pub fn pick_for_me(&mut self) -> Result<MealId, Rejection> {
        let pair = self.offered_pair()?.clone();
        let id = match self.config.pick_mode {
            PickMode::OfferedPair => {
                let ids = pair.ids();
                ids[self.rng.next_index(ids.len())].clone()
            }
            PickMode::WholeCatalog => self.draw_one().ok_or(Rejection::NoMealAvailable)?,
        };
        Ok(self.finalize(id))
    }

    /// Remember tonight's meal as liked. Returns whether it was newly added.
    pub fn lock_liked(&mut self, id: &MealId) -> Result<bool, Rejection> {
        if self.state.last_result.as_ref() != Some(id) {
            return Err(Rejection::NotLastResult(id.clone()));
        }
        let added = self.state.liked_meals.insert(id.clone());
        if added {
            tracing::info!(meal = %id, "meal locked as liked");
            self.persist();
        }
        Ok(added)
    }

    pub fn change_bias(&mut self, bias: Bias) {
        self.state.bias = bias;
        tracing::debug!(%bias, "bias changed");
        self.preferences_changed();
    }

    /// Save a keyword. Returns the normalized form.
    pub fn add_keyword(&mut self, raw: &str) -> Result<String, Rejection> {
        let k = preference::add_keyword(&mut self.state.keywords, raw, self.config.keyword_limit)?;
        tracing::debug!(keyword = %k, "keyword added");
        self.preferences_changed();
        Ok(k)
    }

    /// Forget a keyword. Returns the removed form.
    pub fn remove_keyword(&mut self, raw: &str) -> Result<String, Rejection> {
        let k = preference::remove_keyword(&mut self.state.keywords, raw)?;
        tracing::debug!(keyword = %k, "keyword removed");
        self.preferences_changed();
        Ok(k)
    }

    /// Restore defaults and clear everything this engine stored.
    pub fn reset(&mut self) {
        match preference::reset_state(self.store.as_mut()) {
            Ok(fresh) => self.state = fresh,
            Err(e) => {
                tracing::warn!(error = %e, "could not clear saved state");
                self.state = PreferenceState::new();
            }
        }
        if let Err(e) = self.store.remove(MEAL_SET_KEY) {
            tracing::warn!(error = %e, "could not clear saved meal set");
        }
        self.meal_set = MealSet::default();
        tracing::info!("state reset to defaults");
    }

    fn offered_pair(&self) -> Result<&MealPair, Rejection> {
        match (&self.state.current_pair, &self.state.last_result) {
            (Some(pair), None) => Ok(pair),
            _ => Err(Rejection::NoActiveOffer),
        }
    }

    fn finalize(&mut self, id: MealId) -> MealId {
        tracing::info!(meal = %id, "tonight decided");
        self.state.last_result = Some(id.clone());
        self.persist();
        id
    }

    fn draw_pair(&mut self) -> Option<MealPair> {
        Selector::new(&self.catalog, &self.scorer).select_pair(&self.state, self.rng.as_mut())
    }

    fn draw_one(&mut self) -> Option<MealId> {
        Selector::new(&self.catalog, &self.scorer).select_one(&self.state, &[], self.rng.as_mut())
    }

    fn pick_from_set(&mut self) -> Option<MealId> {
        pick_uniform(&self.meal_set.meals, self.rng.as_mut()).cloned()
    }

    /// Regenerate the offer so it reflects new preferences, without
    /// charging a refresh, then persist.
    fn preferences_changed(&mut self) {
        if self.phase() == Phase::Offering {
            if let Some(pair) = self.draw_pair() {
                tracing::debug!(first = %pair.first(), second = %pair.second(), "offer regenerated");
                self.state.current_pair = Some(pair);
            }
        }
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = preference::save_state(self.store.as_mut(), &self.state) {
            tracing::warn!(key = STATE_KEY, error = %e, "could not save state");
        }
    }

    fn persist_meal_set(&mut self) {
        if let Err(e) = preference::save_record(self.store.as_mut(), MEAL_SET_KEY, &self.meal_set) {
            tracing::warn!(key = MEAL_SET_KEY, error = %e, "could not save meal set");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::preference::MemoryStore;
    use crate::selection::ScriptedRandom;

    fn engine() -> DecisionEngine {
        DecisionEngine::with_seed(builtin_catalog(), EngineConfig::default(), MemoryStore::new(), 42)
    }

    #[test]
    fn fresh_engine_is_idle() {
        let engine = engine();
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.refreshes_remaining(), 2);
        assert_eq!(engine.state(), &PreferenceState::new());
    }

    #[test]
    fn start_offers_distinct_pair() {
        let mut engine = engine();
        let pair = engine.start_decision().unwrap();
        assert_ne!(pair.first(), pair.second());
        assert_eq!(engine.phase(), Phase::Offering);
        assert_eq!(engine.current_pair(), Some(&pair));
    }

    #[test]
    fn refresh_requires_offer() {
        let mut engine = engine();
        assert_eq!(engine.refresh(), Err(Rejection::NoActiveOffer));
    }

    #[test]
    fn refresh_stops_at_limit() {
        let mut engine = engine();
        engine.start_decision().unwrap();
        engine.refresh().unwrap();
        let second = engine.refresh().unwrap();
        assert_eq!(engine.refreshes_remaining(), 0);
        assert_eq!(engine.refresh(), Err(Rejection::RefreshLimitReached { limit: 2 }));
        assert_eq!(engine.refreshes_used(), 2);
        assert_eq!(engine.current_pair(), Some(&second));
    }

    #[test]
    fn start_resets_refreshes_and_result() {
        let mut engine = engine();
        engine.start_decision().unwrap();
        engine.refresh().unwrap();
        engine.pick_for_me().unwrap();
        engine.start_decision().unwrap();
        assert_eq!(engine.refreshes_used(), 0);
        assert!(engine.last_result().is_none());
    }

    #[test]
    fn choose_rejects_meal_outside_pair() {
        let mut engine = engine();
        let pair = engine.start_decision().unwrap();
        let outsider = engine
            .catalog()
            .meals()
            .iter()
            .map(|m| m.id.clone())
            .find(|id| !pair.contains(id))
            .unwrap();
        assert_eq!(
            engine.choose_explicit(&outsider),
            Err(Rejection::NotInPair(outsider.clone()))
        );
        assert_eq!(engine.phase(), Phase::Offering);
    }

    #[test]
    fn choose_finalizes() {
        let mut engine = engine();
        let pair = engine.start_decision().unwrap();
        let chosen = engine.choose_explicit(pair.second()).unwrap();
        assert_eq!(&chosen, pair.second());
        assert_eq!(engine.phase(), Phase::Finalized);
        assert_eq!(engine.last_result(), Some(pair.second()));
        assert_eq!(engine.choose_explicit(pair.first()), Err(Rejection::NoActiveOffer));
    }

    #[test]
    fn pick_for_me_uses_coin_flip() {
        let catalog = builtin_catalog();
        let mut engine = DecisionEngine::new(
            catalog,
            EngineConfig::default(),
            MemoryStore::new(),
            ScriptedRandom::new(vec![0.9]),
        );
        let pair = engine.start_decision().unwrap();
        let picked = engine.pick_for_me().unwrap();
        assert_eq!(&picked, pair.second());
    }

    #[test]
    fn whole_catalog_pick_may_leave_the_pair() {
        let config = EngineConfig {
            pick_mode: PickMode::WholeCatalog,
            ..EngineConfig::default()
        };
        let mut engine = DecisionEngine::with_seed(builtin_catalog(), config, MemoryStore::new(), 5);
        engine.start_decision().unwrap();
        let picked = engine.pick_for_me().unwrap();
        assert!(engine.catalog().contains(&picked));
        assert_eq!(engine.phase(), Phase::Finalized);
    }

    #[test]
    fn lock_requires_last_result() {
        let mut engine = engine();
        let pair = engine.start_decision().unwrap();
        assert_eq!(
            engine.lock_liked(pair.first()),
            Err(Rejection::NotLastResult(pair.first().clone()))
        );
        engine.choose_explicit(pair.first()).unwrap();
        assert_eq!(engine.lock_liked(pair.first()), Ok(true));
        assert_eq!(engine.lock_liked(pair.first()), Ok(false));
        assert_eq!(engine.state().liked_meals.len(), 1);
        assert_eq!(engine.phase(), Phase::Finalized);
    }

    #[test]
    fn preference_change_regenerates_offer_without_charging_refresh() {
        let mut engine = engine();
        engine.start_decision().unwrap();
        engine.refresh().unwrap();
        engine.change_bias(Bias::Comfort);
        engine.add_keyword("pasta").unwrap();
        assert_eq!(engine.refreshes_used(), 1);
        assert_eq!(engine.phase(), Phase::Offering);
        assert_eq!(engine.state().bias, Bias::Comfort);
        let pair = engine.current_pair().unwrap();
        assert_ne!(pair.first(), pair.second());
    }

    #[test]
    fn preference_change_keeps_finalized_result() {
        let mut engine = engine();
        let pair = engine.start_decision().unwrap();
        engine.choose_explicit(pair.first()).unwrap();
        engine.change_bias(Bias::Healthier);
        assert_eq!(engine.current_pair(), Some(&pair));
        assert_eq!(engine.last_result(), Some(pair.first()));
    }

    #[test]
    fn keyword_rejections_leave_state_alone() {
        let mut engine = engine();
        engine.add_keyword("Tacos").unwrap();
        assert_eq!(
            engine.add_keyword("tacos"),
            Err(Rejection::DuplicateKeyword("tacos".into()))
        );
        assert_eq!(
            engine.remove_keyword("rice"),
            Err(Rejection::UnknownKeyword("rice".into()))
        );
        assert_eq!(engine.state().keywords, vec!["tacos"]);
        assert_eq!(engine.remove_keyword("TACOS").unwrap(), "tacos");
        assert!(engine.state().keywords.is_empty());
    }

    #[test]
    fn tiny_catalog_cannot_start() {
        let catalog = MealCatalog::new(vec![Meal::new("solo", "Solo", &[])]);
        let mut engine =
            DecisionEngine::with_seed(catalog, EngineConfig::default(), MemoryStore::new(), 1);
        assert_eq!(engine.start_decision(), Err(Rejection::NoMealAvailable));
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn reset_restores_defaults_and_clears_store() {
        let store = MemoryStore::new();
        let mut engine =
            DecisionEngine::with_seed(builtin_catalog(), EngineConfig::default(), store.clone(), 9);
        engine.change_bias(Bias::Comfort);
        let pair = engine.start_decision().unwrap();
        engine.choose_explicit(pair.first()).unwrap();
        engine.lock_liked(pair.first()).unwrap();
        assert!(!store.is_empty());

        engine.reset();
        assert_eq!(engine.snapshot(), PreferenceState::new());
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(store.is_empty());
    }
}
