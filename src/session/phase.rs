//! Decision phases and the "pick for me" mode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::preference::PreferenceState;

/// Where the current decision session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No decision in progress.
    Idle,
    /// A pair of meals is on offer.
    Offering,
    /// Tonight's meal is decided.
    Finalized,
}

impl Phase {
    /// Derive the phase from persisted state: a result means finalized, a
    /// pair without a result means offering.
    pub fn of(state: &PreferenceState) -> Self {
        if state.last_result.is_some() {
            Phase::Finalized
        } else if state.current_pair.is_some() {
            Phase::Offering
        } else {
            Phase::Idle
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Offering => "offering",
            Phase::Finalized => "finalized",
        };
        f.write_str(s)
    }
}

/// What "pick for me" chooses from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickMode {
    /// Coin flip between the two offered meals.
    #[default]
    OfferedPair,
    /// Fresh weighted draw over the whole catalog.
    WholeCatalog,
}
