//! Custom catalog loading from YAML.

use std::path::Path;

use serde::Deserialize;

use super::{builtin_catalog, Meal, MealCatalog};
use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    meals: Vec<Meal>,
}

/// Parse a YAML catalog document (`meals: [...]`).
pub fn parse_catalog(yaml: &str) -> Result<MealCatalog, CatalogError> {
    let file: CatalogFile = serde_yaml::from_str(yaml)?;
    MealCatalog::validated(file.meals)
}

/// Load and validate a YAML catalog file.
pub fn load_catalog(path: &Path) -> Result<MealCatalog, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Load the catalog at `path`, falling back to the built-in catalog when no
/// path is given or the file is unusable.
pub fn load_catalog_or_builtin(path: Option<&Path>) -> MealCatalog {
    let Some(path) = path else {
        return builtin_catalog();
    };
    match load_catalog(path) {
        Ok(catalog) => {
            tracing::debug!(path = %path.display(), meals = catalog.len(), "loaded custom catalog");
            catalog
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "custom catalog rejected, using built-in");
            builtin_catalog()
        }
    }
}
