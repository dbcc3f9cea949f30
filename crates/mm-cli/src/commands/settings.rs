use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use mm_rules::CostKey;

pub fn run(path: Option<&Path>) -> Result<(), String> {
    let settings = super::load_settings(path)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Setting", "Cost", "Hint"]);
    for key in CostKey::ALL {
        table.add_row(vec![
            key.key().to_string(),
            key.label().to_string(),
            settings.cost(key).to_string(),
            key.hint().to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
