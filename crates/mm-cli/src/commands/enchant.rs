use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use mm_rules::{ChoiceRequest, Outcome, PresetPresenter, Workshop};

/// Arguments of `mm enchant`.
pub struct Request<'a> {
    pub item: &'a str,
    pub actor: Option<&'a str>,
    pub choice: Option<String>,
    pub trait_name: Option<String>,
    pub settings: Option<&'a Path>,
}

pub fn run(path: &Path, req: Request<'_>) -> Result<(), String> {
    let mut store = super::load_store(path)?;
    let settings = super::load_settings(req.settings)?;
    let id = super::find_item(&store, req.actor, req.item)?;

    let mut presenter = match req.choice {
        Some(choice) => PresetPresenter::new(choice),
        None => PresetPresenter::cancelling(),
    };
    if let Some(trait_name) = req.trait_name {
        presenter = presenter.with_trait(trait_name);
    }

    let outcome = Workshop::new(&mut store, &mut presenter, &settings)
        .make_magic(id)
        .map_err(|e| e.to_string())?;

    match outcome {
        Outcome::Enchanted { item } => {
            super::save_store(&store, path)?;
            println!(
                "  {} {} (price {})",
                "Enchanted".green().bold(),
                item.name.bold(),
                item.price
            );
            for effect in &item.effects {
                println!("    effect: {}", effect.name);
            }
        }
        Outcome::Scrolled { power, scroll } => {
            super::save_store(&store, path)?;
            super::scroll::print_scrolled(&power, &scroll);
        }
        Outcome::Cancelled => {
            for request in presenter.seen() {
                print_request(request);
            }
            println!("  No changes made. Pick one with --option, or --form and --trait.");
        }
    }

    Ok(())
}

fn print_request(request: &ChoiceRequest) {
    println!("  {}", request.title.bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Option", "Label"]);
    for option in &request.options {
        table.add_row(vec![option.id.as_str(), option.label.as_str()]);
    }
    println!("{table}");

    if let Some(traits) = &request.traits {
        println!();
        println!("  Traits: {}", traits.join(", "));
    }
    println!();
}
