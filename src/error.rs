//! Error types for storage, catalog loading, and refused decision transitions.

use std::io;

use thiserror::Error;

use crate::catalog::MealId;

/// A failure reading or writing the persisted key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A custom catalog that could not be used.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("catalog needs at least 2 meals, found {0}")]
    TooFewMeals(usize),

    #[error("duplicate meal id `{0}`")]
    DuplicateId(MealId),
}

/// A state transition the engine refused. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no refreshes left ({limit} used)")]
    RefreshLimitReached { limit: u32 },

    #[error("no meals are being offered right now")]
    NoActiveOffer,

    #[error("`{0}` is not one of the offered meals")]
    NotInPair(MealId),

    #[error("`{0}` is not tonight's meal")]
    NotLastResult(MealId),

    #[error("keyword is empty")]
    EmptyKeyword,

    #[error("keyword `{0}` is already saved")]
    DuplicateKeyword(String),

    #[error("keyword limit of {limit} reached")]
    KeywordLimitReached { limit: usize },

    #[error("keyword `{0}` is not saved")]
    UnknownKeyword(String),

    #[error("the catalog has no meals to offer")]
    NoMealAvailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_name_the_meal() {
        let err = Rejection::NotInPair(MealId::from("meatball_subs"));
        assert_eq!(err.to_string(), "`meatball_subs` is not one of the offered meals");
    }

    #[test]
    fn refresh_limit_message() {
        let err = Rejection::RefreshLimitReached { limit: 2 };
        assert_eq!(err.to_string(), "no refreshes left (2 used)");
    }

    #[test]
    fn store_error_keeps_source() {
        let err = StoreError::Io {
            key: "fh_state_v1".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("fh_state_v1"));
    }
}
