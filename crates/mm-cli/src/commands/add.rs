use std::path::Path;

use colored::Colorize;
use mm_core::{
    ArcaneDevice, ConsumableStats, DocumentStore, GearStats, Grant, Item, ItemStats, PowerPool,
};
use mm_rules::{CostSettings, HostEvent, Outcome, PresetPresenter, Prompt, Workshop};
use tracing::debug;

pub fn scroll(
    path: &Path,
    actor: &str,
    name: &str,
    price: u32,
    power: Option<&str>,
) -> Result<(), String> {
    let mut store = super::load_store(path)?;
    let owner = super::find_actor(&store, actor)?;

    let blank = Item::new(name, ItemStats::Consumable(ConsumableStats::default()))
        .with_swid("scroll")
        .with_price(price);
    let blank = store
        .create_item(owner, blank)
        .map_err(|e| e.to_string())?;

    let settings = CostSettings::default();
    let mut presenter = power.map_or_else(PresetPresenter::cancelling, PresetPresenter::new);
    let prompts = Workshop::new(&mut store, &mut presenter, &settings)
        .dispatch(&HostEvent::ItemCreated { item: blank.id })
        .map_err(|e| e.to_string())?;
    super::save_store(&store, path)?;
    println!("  Added {} to {actor}", blank.name.bold());

    let mut scrolled = None;
    if power.is_some() {
        let mut workshop = Workshop::new(&mut store, &mut presenter, &settings);
        for prompt in prompts {
            debug!(?prompt, "resolving");
            if let Prompt::AttachScrollPower { .. } = prompt {
                match workshop.resolve_prompt(prompt).map_err(|e| e.to_string())? {
                    Outcome::Scrolled { power, scroll } => scrolled = Some((power, scroll)),
                    Outcome::Enchanted { .. } | Outcome::Cancelled => {}
                }
            }
        }
    }

    match scrolled {
        Some((power, scroll)) => {
            super::save_store(&store, path)?;
            super::scroll::print_scrolled(&power, &scroll);
        }
        None => println!("  The scroll is blank. Inscribe it with `mm attach`."),
    }
    Ok(())
}

pub fn device(
    path: &Path,
    actor: &str,
    name: &str,
    arcane: &str,
    pp: u32,
    power: &str,
) -> Result<(), String> {
    let mut store = super::load_store(path)?;
    let owner = super::find_actor(&store, actor)?;

    let device = Item::new(
        name,
        ItemStats::Gear(GearStats {
            arcane_device: Some(ArcaneDevice {
                power_points: PowerPool::full(pp),
                grants: vec![Grant {
                    name: power.to_string(),
                    arcane: Some(arcane.to_string()),
                }],
            }),
        }),
    );
    let device = store
        .create_item(owner, device)
        .map_err(|e| e.to_string())?;

    let settings = CostSettings::default();
    let mut presenter = PresetPresenter::cancelling();
    Workshop::new(&mut store, &mut presenter, &settings)
        .dispatch(&HostEvent::ItemCreated { item: device.id })
        .map_err(|e| e.to_string())?;
    super::save_store(&store, path)?;

    println!("  Added {} to {actor}", device.name.bold());
    match store.get_actor(owner).map_err(|e| e.to_string())?.pool(arcane) {
        Some(pool) => println!("    power points: {arcane} ({pool})"),
        None => println!("    no power points (the device holds none)"),
    }
    Ok(())
}
