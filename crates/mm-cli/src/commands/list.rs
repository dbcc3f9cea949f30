use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path, actor: Option<&str>) -> Result<(), String> {
    let store = super::load_store(path)?;
    let owner = actor.map(|a| super::find_actor(&store, a)).transpose()?;

    let items: Vec<_> = store
        .items()
        .filter(|i| owner.is_none_or(|o| i.owner == Some(o)))
        .collect();

    if items.is_empty() {
        println!("  No items found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Kind", "Owner", "Price", "Stats", "Magic"]);

    for item in &items {
        let magic = match (item.markers.is_magic, item.markers.is_scroll) {
            (_, true) => "scroll",
            (true, false) => "yes",
            (false, false) => "",
        };
        table.add_row(vec![
            item.name.clone(),
            item.kind().to_string(),
            super::owner_name(&store, item),
            item.price.to_string(),
            super::stats_summary(&item.stats),
            magic.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} items", items.len());

    Ok(())
}
