//! Preference persistence — JSON load/save/reset through a [`StateStore`].
//!
//! Loading never fails: a missing record yields defaults, a corrupt record is
//! logged and replaced by defaults wholesale.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::keywords::sanitize_keywords;
use super::state::PreferenceState;
use super::store::StateStore;
use crate::catalog::MealCatalog;
use crate::error::StoreError;

/// Key of the preference record.
pub const STATE_KEY: &str = "fh_state_v1";

/// Read and decode the record under `key`, or `T::default()`.
pub fn load_record<T: DeserializeOwned + Default>(store: &dyn StateStore, key: &str) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored record, using defaults");
            return T::default();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "stored record is corrupt, using defaults");
        T::default()
    })
}

/// Encode `value` as JSON and write it under `key`.
pub fn save_record<T: Serialize>(
    store: &mut dyn StateStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Load the preference state and reconcile it against `catalog`.
pub fn load_state(
    store: &dyn StateStore,
    catalog: &MealCatalog,
    refresh_limit: u32,
    keyword_limit: usize,
) -> PreferenceState {
    let state: PreferenceState = load_record(store, STATE_KEY);
    reconcile(state, catalog, refresh_limit, keyword_limit)
}

pub fn save_state(store: &mut dyn StateStore, state: &PreferenceState) -> Result<(), StoreError> {
    save_record(store, STATE_KEY, state)
}

/// Remove the stored record and return a fresh state.
pub fn reset_state(store: &mut dyn StateStore) -> Result<PreferenceState, StoreError> {
    store.remove(STATE_KEY)?;
    Ok(PreferenceState::new())
}

/// Repair a loaded state so every invariant holds for `catalog`.
pub fn reconcile(
    mut state: PreferenceState,
    catalog: &MealCatalog,
    refresh_limit: u32,
    keyword_limit: usize,
) -> PreferenceState {
    state.keywords = sanitize_keywords(&state.keywords, keyword_limit);

    let before = state.liked_meals.len();
    state.liked_meals.retain(|id| catalog.contains(id));
    if state.liked_meals.len() != before {
        tracing::debug!(
            dropped = before - state.liked_meals.len(),
            "dropped liked meals missing from catalog"
        );
    }

    state.refreshes_used = state.refreshes_used.min(refresh_limit);

    state.current_pair = state
        .current_pair
        .filter(|p| p.is_distinct() && catalog.contains(p.first()) && catalog.contains(p.second()));

    state.last_result = state.last_result.filter(|id| catalog.contains(id));
    state
}
