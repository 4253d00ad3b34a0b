//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use food_handled::preference::Bias;

#[derive(Debug, Parser)]
#[command(name = "food-handled", version, about = "Decides what's for dinner tonight")]
pub struct Cli {
    /// Directory for saved state (defaults to ~/.food-handled)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to ~/.food-handled/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed the random source for reproducible picks
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log engine transitions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show preferences and the current decision
    Status,
    /// List the meal catalog
    Meals,
    /// Start deciding tonight: offer two meals
    Decide,
    /// Swap the offered meals for two new ones
    Refresh,
    /// Choose one of the offered meals
    Choose {
        /// Meal id from the current offer
        meal: String,
    },
    /// Let the app pick between the offered meals
    Pick,
    /// Remember tonight's meal as one you liked
    Lock,
    /// Set the bias (balanced, healthier, comfort)
    Bias { bias: Bias },
    /// Manage preference keywords
    Keyword {
        #[command(subcommand)]
        action: KeywordCommand,
    },
    /// Decide the week's meal set and tonight's meal
    Week {
        /// Draw a new set even if one is saved
        #[arg(long)]
        reroll: bool,
    },
    /// Decide tonight from the week's set without changing it
    Tonight,
    /// Print the grocery list for the week's set
    Groceries,
    /// Forget everything and start over
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum KeywordCommand {
    /// Add one or more keywords
    Add { keywords: Vec<String> },
    /// Remove one or more keywords
    Remove { keywords: Vec<String> },
}
