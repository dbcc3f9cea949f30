use std::path::Path;

use mm_core::{
    Actor, ActorKind, ArmorStats, CompendiumEntry, CompendiumPack, ConsumableStats, DieStep,
    GearStats, Item, ItemStats, MemoryStore, PackKind, PowerStats, Rank, ShieldStats, SkillStats,
    WeaponStats,
};

pub fn run(path: &Path, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let store = sample_store().map_err(|e| format!("cannot build sample state: {e}"))?;
    super::save_store(&store, path)?;

    println!("Created sample state in {}", path.display());
    println!("  {} actors, {} items", store.actors().count(), store.item_count());
    println!();
    println!("Get started:");
    println!("  mm list                          # List all items");
    println!("  mm enchant \"Long Sword\"          # Show the enchantment options");
    println!("  mm enchant \"Long Sword\" -o plus1 # Make it a +1 sword");
    println!("  mm scroll Fireball               # Turn a power into a scroll");

    Ok(())
}

fn owned(actor: &Actor, mut item: Item) -> Item {
    item.owner = Some(actor.id);
    item
}

fn skill(name: &str, die: DieStep) -> Item {
    Item::new(name, ItemStats::Skill(SkillStats { die }))
}

fn power(name: &str, rank: Rank, pp: u32) -> Item {
    Item::new(
        name,
        ItemStats::Power(PowerStats {
            rank,
            pp,
            arcane: String::new(),
            casting_trait: String::new(),
        }),
    )
}

fn sample_store() -> mm_core::CoreResult<MemoryStore> {
    let mut store = MemoryStore::new();

    let valeria = Actor::new(ActorKind::Character, "Valeria");
    let aldric = Actor::new(ActorKind::Npc, "Brother Aldric");
    let wagon = Actor::new(ActorKind::Vehicle, "Supply Wagon");

    let items = vec![
        owned(&valeria, skill("Spellcasting", DieStep::D8)),
        owned(&valeria, skill("Fighting", DieStep::D6)),
        owned(
            &valeria,
            Item::new(
                "Long Sword",
                ItemStats::Weapon(WeaponStats {
                    trait_mod: 0,
                    damage: "@str+d8".into(),
                    min_str: "d8".into(),
                }),
            )
            .with_price(300),
        ),
        owned(
            &valeria,
            Item::new(
                "Plate Corselet",
                ItemStats::Armor(ArmorStats {
                    armor: 4,
                    min_str: "d10".into(),
                }),
            )
            .with_price(1200),
        ),
        owned(
            &valeria,
            Item::new(
                "Medium Shield",
                ItemStats::Shield(ShieldStats {
                    parry: 2,
                    min_str: "d8".into(),
                }),
            )
            .with_price(50),
        ),
        owned(&valeria, power("Fireball", Rank::Veteran, 3)),
        owned(
            &valeria,
            Item::new("Silver Ring", ItemStats::Gear(GearStats::default()))
                .with_swid("magic-jewelry")
                .with_price(20),
        ),
        owned(&aldric, skill("Faith", DieStep::D10)),
        owned(&aldric, power("Healing", Rank::Novice, 3)),
        owned(
            &aldric,
            Item::new("Scroll", ItemStats::Consumable(ConsumableStats::default()))
                .with_swid("scroll")
                .with_price(10),
        ),
        owned(
            &wagon,
            Item::new(
                "Mounted Crossbow",
                ItemStats::Weapon(WeaponStats {
                    trait_mod: 0,
                    damage: "2d6".into(),
                    min_str: "d6".into(),
                }),
            )
            .with_price(500),
        ),
    ];

    store.add_actor(valeria)?;
    store.add_actor(aldric)?;
    store.add_actor(wagon)?;
    for item in items {
        store.add_item(item)?;
    }

    store.add_pack(CompendiumPack {
        name: "swade-core-rules.swade-skills".into(),
        kind: PackKind::Item,
        entries: [
            "Athletics",
            "Common Knowledge",
            "Faith",
            "Fighting",
            "Notice",
            "Persuasion",
            "Shooting",
            "Spellcasting",
            "Stealth",
        ]
        .into_iter()
        .map(|name| CompendiumEntry::new(name, "skill"))
        .collect(),
    });
    store.add_pack(CompendiumPack {
        name: "world.extra-skills".into(),
        kind: PackKind::Item,
        entries: vec![
            CompendiumEntry::new("Fighting", "skill"),
            CompendiumEntry::new("Weird Science", "skill"),
            CompendiumEntry::new("Rope", "gear"),
        ],
    });

    Ok(store)
}
