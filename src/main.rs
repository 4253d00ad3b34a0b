//! Food Handled — command-line front end for the decision engine.

mod cli;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use food_handled::catalog::{load_catalog_or_builtin, MealId};
use food_handled::config::{default_data_dir, EngineConfig};
use food_handled::error::Rejection;
use food_handled::preference::{FileStore, MealPair};
use food_handled::session::{DecisionEngine, Phase};

use cli::{Cli, Command, KeywordCommand};

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {e}");
    }
}

fn print_pair(engine: &DecisionEngine, pair: &MealPair) {
    println!("Tonight, one of these:");
    for id in pair.ids() {
        match engine.meal(id) {
            Some(meal) => println!("  [{id}] {} — {}", meal.name, meal.meta),
            None => println!("  [{id}]"),
        }
    }
    println!(
        "{} of {} refreshes remaining",
        engine.refreshes_remaining(),
        engine.refresh_limit()
    );
}

fn print_result(engine: &DecisionEngine, id: &MealId) {
    let Some(meal) = engine.meal(id) else {
        println!("Tonight: {id}");
        return;
    };
    println!("Tonight: {}", meal.name);
    if !meal.meta.is_empty() {
        println!("  {}", meal.meta);
    }
    for (i, step) in meal.steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
}

fn print_status(engine: &DecisionEngine) {
    let state = engine.state();
    println!("bias: {}", state.bias);
    println!("keywords: {}", state.keywords.join(", "));
    let liked: Vec<&str> = state.liked_meals.iter().map(|id| id.as_str()).collect();
    println!("liked: {}", liked.join(", "));
    println!("phase: {}", engine.phase());
    match engine.phase() {
        Phase::Idle => {}
        Phase::Offering => {
            if let Some(pair) = engine.current_pair() {
                print_pair(engine, pair);
            }
        }
        Phase::Finalized => {
            if let Some(id) = engine.last_result() {
                print_result(engine, id);
            }
        }
    }
}

fn run(engine: &mut DecisionEngine, command: Command) -> Result<(), Rejection> {
    match command {
        Command::Status => print_status(engine),
        Command::Meals => {
            for meal in engine.catalog().meals() {
                println!("{:<22} {} [{}]", meal.id, meal.name, meal.tags.join(", "));
            }
        }
        Command::Decide => {
            let pair = engine.start_decision()?;
            print_pair(engine, &pair);
        }
        Command::Refresh => {
            let pair = engine.refresh()?;
            print_pair(engine, &pair);
        }
        Command::Choose { meal } => {
            let id = engine.choose_explicit(&MealId::from(meal))?;
            print_result(engine, &id);
        }
        Command::Pick => {
            let id = engine.pick_for_me()?;
            print_result(engine, &id);
        }
        Command::Lock => match engine.last_result().cloned() {
            Some(id) => {
                if engine.lock_liked(&id)? {
                    println!("Locked {id} as a favorite.");
                } else {
                    println!("{id} is already a favorite.");
                }
            }
            None => println!("Nothing decided yet. Run `food-handled decide` first."),
        },
        Command::Bias { bias } => {
            engine.change_bias(bias);
            println!("bias: {bias}");
            if let Some(pair) = engine.current_pair().filter(|_| engine.phase() == Phase::Offering) {
                print_pair(engine, pair);
            }
        }
        Command::Keyword { action } => {
            match action {
                KeywordCommand::Add { keywords } => {
                    for k in keywords {
                        match engine.add_keyword(&k) {
                            Ok(k) => println!("added {k}"),
                            Err(e) => eprintln!("{e}"),
                        }
                    }
                }
                KeywordCommand::Remove { keywords } => {
                    for k in keywords {
                        match engine.remove_keyword(&k) {
                            Ok(k) => println!("removed {k}"),
                            Err(e) => eprintln!("{e}"),
                        }
                    }
                }
            }
            println!("keywords: {}", engine.state().keywords.join(", "));
        }
        Command::Week { reroll } => {
            let id = engine.decide_week(reroll)?;
            let names: Vec<&str> = engine
                .meal_set()
                .meals
                .iter()
                .filter_map(|id| engine.meal(id))
                .map(|m| m.name.as_str())
                .collect();
            println!("This week: {}", names.join(" • "));
            print_result(engine, &id);
        }
        Command::Tonight => {
            let id = engine.decide_tonight_from_set()?;
            print_result(engine, &id);
        }
        Command::Groceries => {
            if engine.meal_set().is_empty() {
                println!("No meal set yet. Run `food-handled week` first.");
            } else {
                print!("{}", engine.grocery_text());
            }
        }
        Command::Reset => {
            engine.reset();
            println!("Everything reset.");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    let catalog = load_catalog_or_builtin(config.catalog_path.as_deref());
    let store = FileStore::new(cli.data_dir.clone().unwrap_or_else(default_data_dir));

    let mut engine = match cli.seed {
        Some(seed) => DecisionEngine::with_seed(catalog, config, store, seed),
        None => DecisionEngine::new(catalog, config, store, ChaCha8Rng::from_entropy()),
    };

    if let Err(rejection) = run(&mut engine, cli.command) {
        eprintln!("{rejection}");
        std::process::exit(2);
    }
}
