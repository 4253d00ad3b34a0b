//! Preference state — bias, keywords, liked meals, and the live decision
//! session, persisted as one JSON record.

pub mod keywords;
pub mod persistence;
pub mod state;
pub mod store;

pub use keywords::{add_keyword, normalize_keyword, remove_keyword, sanitize_keywords};
pub use persistence::{
    load_record, load_state, reconcile, reset_state, save_record, save_state, STATE_KEY,
};
pub use state::{Bias, MealPair, PreferenceState};
pub use store::{FileStore, MemoryStore, StateStore};
