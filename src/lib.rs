//! Food Handled — picks tonight's meal with a small weighted decision engine.

pub mod catalog;
pub mod config;
pub mod error;
pub mod meal_set;
pub mod preference;
pub mod scoring;
pub mod selection;
pub mod session;
