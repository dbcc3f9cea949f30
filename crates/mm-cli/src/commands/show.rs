use std::path::Path;

use colored::Colorize;
use mm_core::{DocumentStore, ItemStats};

pub fn run(path: &Path, name: &str, actor: Option<&str>) -> Result<(), String> {
    let store = super::load_store(path)?;
    let id = super::find_item(&store, actor, name)?;
    let item = store.get_item(id).map_err(|e| e.to_string())?;

    // Header
    println!("  {} [{}]", item.name.bold(), item.kind().to_string().dimmed());
    println!();

    println!("  owner:      {}", super::owner_name(&store, &item));
    println!("  price:      {}", item.price);
    println!("  weight:     {}", item.weight);
    if !item.swid.is_empty() {
        println!("  swid:       {}", item.swid);
    }

    match &item.stats {
        ItemStats::Weapon(w) => {
            println!("  damage:     {}", w.damage);
            println!("  trait mod:  +{}", w.trait_mod);
            println!("  min str:    {}", w.min_str);
        }
        ItemStats::Armor(a) => {
            println!("  armor:      {}", a.armor);
            println!("  min str:    {}", a.min_str);
        }
        ItemStats::Shield(s) => {
            println!("  parry:      +{}", s.parry);
            println!("  min str:    {}", s.min_str);
        }
        ItemStats::Power(p) => {
            println!("  rank:       {}", p.rank);
            println!("  pp:         {}", p.pp);
            if !p.arcane.is_empty() {
                println!("  arcane:     {}", p.arcane);
            }
            if !p.casting_trait.is_empty() {
                println!("  trait:      {}", p.casting_trait);
            }
        }
        ItemStats::Consumable(c) => {
            println!("  quantity:   {}", c.quantity);
            println!("  uses:       {}/{}", c.uses.value, c.uses.max);
        }
        ItemStats::Gear(g) => {
            if let Some(device) = &g.arcane_device {
                println!("  device pp:  {}", device.power_points);
            }
        }
        ItemStats::Skill(s) => println!("  die:        {}", s.die),
    }

    if item.markers.is_magic {
        println!("  magic:      {}", "yes".green());
    }
    if item.markers.is_scroll {
        println!("  scroll:     {}", "yes".green());
    }
    println!();

    if !item.description.is_empty() {
        println!("  {}", item.description);
        println!();
    }

    if !item.grants.is_empty() {
        println!("  {}:", "Granted by".bold());
        for grant in &item.grants {
            let name = store
                .get_item(*grant)
                .map_or_else(|_| grant.to_string(), |i| i.name);
            println!("    {name}");
        }
        println!();
    }

    if !item.effects.is_empty() {
        println!("  {}:", "Effects".bold());
        for effect in &item.effects {
            println!("    {}", effect.name);
            for change in &effect.changes {
                println!("      {} {:+}", change.key, change.value);
            }
        }
        println!();
    }

    Ok(())
}
