//! Built-in catalog — the meals shipped with the app.

use super::{Meal, MealCatalog, MealId};

fn meal(
    id: &str,
    name: &str,
    tags: &[&str],
    meta: &str,
    steps: &[&str],
    groceries: &[&str],
) -> Meal {
    Meal {
        id: MealId::from(id),
        name: name.to_string(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        meta: meta.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        groceries: groceries.iter().map(|s| s.to_string()).collect(),
    }
}

/// The default catalog used when no custom catalog is configured.
pub fn builtin_catalog() -> MealCatalog {
    MealCatalog::new(vec![
        meal(
            "chicken_rice_bowl",
            "Chicken & rice bowl",
            &["balanced", "bowl", "one-pan"],
            "~12 minutes • one pan • low cleanup",
            &["Heat rice", "Warm chicken", "Add veg", "Eat"],
            &["Microwave rice", "Cooked chicken", "Frozen veg"],
        ),
        meal(
            "egg_veggie_scramble",
            "Egg & veggie scramble",
            &["healthier", "eggs", "one-pan"],
            "~10 minutes • one pan • low cleanup",
            &["Whisk eggs", "Add veg", "Scramble", "Eat"],
            &["Eggs", "Spinach", "Cherry tomatoes"],
        ),
        meal(
            "yogurt_fruit_crunch",
            "Yogurt + fruit + crunch",
            &["healthier", "no-cook"],
            "~2 minutes • no cook • zero effort",
            &["Scoop yogurt", "Add fruit", "Add granola", "Eat"],
            &["Greek yogurt", "Berries", "Granola"],
        ),
        meal(
            "chicken_quesadillas",
            "Chicken quesadillas",
            &["comfort", "mexican"],
            "≤12 min • pan + plate",
            &["Add tortilla", "Cheese + chicken", "Flip", "Eat"],
            &["Tortillas", "Shredded cheese", "Cooked chicken"],
        ),
        meal(
            "chicken_pesto_pasta",
            "Chicken pesto pasta",
            &["comfort", "pasta"],
            "≤15 min • pot + bowl",
            &["Boil pasta", "Add pesto", "Add chicken", "Eat"],
            &["Pasta", "Pesto", "Cooked chicken"],
        ),
        meal(
            "meatball_subs",
            "Meatball subs (lazy)",
            &["comfort"],
            "≤12 min • tray + plate",
            &["Heat meatballs", "Add marinara", "Toast roll", "Eat"],
            &["Frozen meatballs", "Marinara", "Sub rolls"],
        ),
        meal(
            "tacos_simple",
            "Tacos (simple)",
            &["comfort", "mexican"],
            "~15 min • pan + plate",
            &["Brown meat", "Season", "Warm shells", "Fill and eat"],
            &["Ground beef", "Taco seasoning", "Taco shells", "Salsa"],
        ),
        meal(
            "salmon_greens",
            "Sheet-pan salmon & greens",
            &["healthier", "balanced", "sheet-pan"],
            "~20 min • one tray",
            &["Oil tray", "Salmon + greens", "Roast", "Eat"],
            &["Salmon fillets", "Green beans", "Lemon"],
        ),
        meal(
            "turkey_wrap",
            "Turkey & hummus wrap",
            &["balanced", "no-cook"],
            "~5 min • no cook",
            &["Spread hummus", "Add turkey", "Add greens", "Roll"],
            &["Tortillas", "Sliced turkey", "Hummus", "Spinach"],
        ),
        meal(
            "fried_rice",
            "Leftover fried rice",
            &["balanced", "comfort", "one-pan"],
            "~12 min • one pan",
            &["Heat oil", "Add rice", "Add egg + veg", "Soy sauce"],
            &["Microwave rice", "Eggs", "Frozen veg", "Soy sauce"],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog();
        assert!(MealCatalog::validated(catalog.meals().to_vec()).is_ok());
    }

    #[test]
    fn every_bias_has_a_matching_meal() {
        let catalog = builtin_catalog();
        for tag in ["balanced", "healthier", "comfort"] {
            assert!(
                catalog.meals().iter().any(|m| m.has_tag(tag)),
                "no meal tagged {tag}"
            );
        }
    }

    #[test]
    fn every_meal_has_groceries() {
        for meal in builtin_catalog().meals() {
            assert!(!meal.groceries.is_empty(), "{} has no groceries", meal.id);
        }
    }
}
