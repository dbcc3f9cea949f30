use std::path::Path;

use colored::Colorize;
use mm_core::{DocumentStore, Item, ItemStats};
use mm_rules::{CostSettings, Outcome, PresetPresenter, Workshop};

pub fn run(path: &Path, power: &str, actor: Option<&str>) -> Result<(), String> {
    let mut store = super::load_store(path)?;
    let id = super::find_item(&store, actor, power)?;
    let item = store.get_item(id).map_err(|e| e.to_string())?;
    if !matches!(item.stats, ItemStats::Power(_)) {
        return Err(format!("{} is a {}, not a power", item.name, item.kind()));
    }

    let settings = CostSettings::default();
    let mut presenter = PresetPresenter::cancelling();
    let outcome = Workshop::new(&mut store, &mut presenter, &settings)
        .link_scroll(id)
        .map_err(|e| e.to_string())?;
    finish(&store, path, outcome)
}

pub fn attach(path: &Path, scroll: &str, power: &str, actor: &str) -> Result<(), String> {
    let mut store = super::load_store(path)?;
    let scroll = super::find_item(&store, Some(actor), scroll)?;
    let power = super::find_item(&store, Some(actor), power)?;

    let settings = CostSettings::default();
    let mut presenter = PresetPresenter::cancelling();
    let outcome = Workshop::new(&mut store, &mut presenter, &settings)
        .attach_scroll(scroll, power)
        .map_err(|e| e.to_string())?;
    finish(&store, path, outcome)
}

fn finish(store: &mm_core::MemoryStore, path: &Path, outcome: Outcome) -> Result<(), String> {
    match outcome {
        Outcome::Scrolled { power, scroll } => {
            super::save_store(store, path)?;
            print_scrolled(&power, &scroll);
            Ok(())
        }
        Outcome::Enchanted { item } => Err(format!("{} was enchanted, not scrolled", item.name)),
        Outcome::Cancelled => {
            println!("  No changes made.");
            Ok(())
        }
    }
}

pub fn print_scrolled(power: &Item, scroll: &Item) {
    println!(
        "  {} {} (price {})",
        "Scroll ready:".green().bold(),
        scroll.name.bold(),
        scroll.price
    );
    if let ItemStats::Power(stats) = &power.stats {
        println!("    casting trait: {}", stats.casting_trait);
        println!("    power points:  {} ({}/{})", stats.arcane, stats.pp, stats.pp);
    }
}
