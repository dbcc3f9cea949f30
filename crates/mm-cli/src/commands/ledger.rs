use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path, actor: &str) -> Result<(), String> {
    let store = super::load_store(path)?;
    let id = super::find_actor(&store, actor)?;
    let actor = store
        .actors()
        .find(|a| a.id == id)
        .ok_or_else(|| format!("actor not found: \"{actor}\""))?;

    println!("  {} [{}]", actor.name.bold(), actor.kind.to_string().dimmed());
    println!();

    if actor.power_points.is_empty() {
        println!("  No power points.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Source", "Power Points"]);
    for (key, pool) in &actor.power_points {
        table.add_row(vec![key.clone(), pool.to_string()]);
    }
    println!("{table}");

    Ok(())
}
