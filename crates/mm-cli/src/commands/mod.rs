pub mod add;
pub mod enchant;
pub mod init;
pub mod ledger;
pub mod list;
pub mod scroll;
pub mod settings;
pub mod show;
pub mod traits;

use std::path::Path;

use mm_core::{ActorId, Item, ItemId, ItemStats, MemoryStore};
use mm_rules::CostSettings;

/// Load the state file.
fn load_store(path: &Path) -> Result<MemoryStore, String> {
    if !path.exists() {
        return Err(format!(
            "state file '{}' not found (run `mm init` first)",
            path.display()
        ));
    }
    MemoryStore::load(path).map_err(|e| format!("cannot read '{}': {e}", path.display()))
}

/// Write the state file back.
fn save_store(store: &MemoryStore, path: &Path) -> Result<(), String> {
    store
        .save(path)
        .map_err(|e| format!("cannot write '{}': {e}", path.display()))
}

/// Load cost settings, falling back to the defaults.
fn load_settings(path: Option<&Path>) -> Result<CostSettings, String> {
    match path {
        Some(path) => CostSettings::load(path).map_err(|e| e.to_string()),
        None => Ok(CostSettings::default()),
    }
}

fn find_actor(store: &MemoryStore, name: &str) -> Result<ActorId, String> {
    store
        .find_actor(name)
        .map(|a| a.id)
        .ok_or_else(|| format!("actor not found: \"{name}\""))
}

/// Find an item by name, optionally within one actor's inventory.
fn find_item(store: &MemoryStore, actor: Option<&str>, name: &str) -> Result<ItemId, String> {
    let owner = actor.map(|a| find_actor(store, a)).transpose()?;
    store
        .find_item(owner, name)
        .map(|i| i.id)
        .ok_or_else(|| match actor {
            Some(actor) => format!("item not found: \"{name}\" on {actor}"),
            None => format!("item not found: \"{name}\""),
        })
}

/// Name of an item's owner, or "—".
fn owner_name(store: &MemoryStore, item: &Item) -> String {
    item.owner
        .and_then(|id| store.actors().find(|a| a.id == id))
        .map_or_else(|| "—".to_string(), |a| a.name.clone())
}

/// One-line summary of an item's stats.
fn stats_summary(stats: &ItemStats) -> String {
    match stats {
        ItemStats::Weapon(w) => {
            let mut s = format!("damage {}, min str {}", w.damage, w.min_str);
            if w.trait_mod > 0 {
                s.push_str(&format!(", trait +{}", w.trait_mod));
            }
            s
        }
        ItemStats::Armor(a) => format!("armor {}, min str {}", a.armor, a.min_str),
        ItemStats::Shield(s) => format!("parry +{}, min str {}", s.parry, s.min_str),
        ItemStats::Power(p) => format!("{}, {} pp", p.rank, p.pp),
        ItemStats::Consumable(c) => format!(
            "quantity {}, uses {}/{}",
            c.quantity, c.uses.value, c.uses.max
        ),
        ItemStats::Gear(g) => match &g.arcane_device {
            Some(device) => format!("arcane device, {} pp", device.power_points),
            None => String::new(),
        },
        ItemStats::Skill(s) => s.die.to_string(),
    }
}
