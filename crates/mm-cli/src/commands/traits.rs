use std::path::Path;

use mm_rules::traits::{resolve, trait_choices};

pub fn run(path: &Path) -> Result<(), String> {
    let store = super::load_store(path)?;
    let choices = trait_choices(&store).map_err(|e| e.to_string())?;

    for name in &choices {
        let kind = if resolve(name).is_attribute() {
            "attribute"
        } else {
            "skill"
        };
        println!("  {name:<20} {kind}");
    }
    println!();
    println!("  {} traits", choices.len());

    Ok(())
}
