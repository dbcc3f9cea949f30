//! Integration tests for the enchanting flow.
use mm_core::{
    Actor, ActorId, ActorKind, ActorUpdate, ArcaneDevice, CoreError, CoreResult, DocumentStore,
    Effect, EffectId, GearStats, Grant, Item, ItemId, ItemStats, ItemUpdate, MemoryStore,
    PowerPool, PowerStats, Rank, SkillStats, WeaponStats,
};
use mm_rules::{
    CostKey, CostSettings, HostEvent, Outcome, PresetPresenter, RulesError, Workshop,
};
use tempfile::TempDir;

/// Store wrapper that fails chosen operations.
struct FlakyStore {
    inner: MemoryStore,
    fail_update_of: Option<ItemId>,
    fail_delete: bool,
}

impl FlakyStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_update_of: None,
            fail_delete: false,
        }
    }
}

impl DocumentStore for FlakyStore {
    fn get_item(&self, id: ItemId) -> CoreResult<Item> {
        self.inner.get_item(id)
    }

    fn get_actor(&self, id: ActorId) -> CoreResult<Actor> {
        self.inner.get_actor(id)
    }

    fn items_of(&self, actor: ActorId) -> CoreResult<Vec<Item>> {
        self.inner.items_of(actor)
    }

    fn update_item(
        &mut self,
        id: ItemId,
        expected_version: u64,
        update: &ItemUpdate,
    ) -> CoreResult<Item> {
        if self.fail_update_of == Some(id) {
            return Err(CoreError::Validation("update refused".into()));
        }
        self.inner.update_item(id, expected_version, update)
    }

    fn create_item(&mut self, owner: ActorId, item: Item) -> CoreResult<Item> {
        self.inner.create_item(owner, item)
    }

    fn delete_item(&mut self, id: ItemId) -> CoreResult<Item> {
        if self.fail_delete {
            return Err(CoreError::Validation("delete refused".into()));
        }
        self.inner.delete_item(id)
    }

    fn update_actor(
        &mut self,
        id: ActorId,
        expected_version: u64,
        update: &ActorUpdate,
    ) -> CoreResult<Actor> {
        self.inner.update_actor(id, expected_version, update)
    }

    fn create_effect(&mut self, item: ItemId, effect: Effect) -> CoreResult<Effect> {
        self.inner.create_effect(item, effect)
    }

    fn delete_effect(&mut self, item: ItemId, effect: EffectId) -> CoreResult<Effect> {
        self.inner.delete_effect(item, effect)
    }

    fn list_compendium_skill_names(&self) -> CoreResult<Vec<String>> {
        self.inner.list_compendium_skill_names()
    }
}

/// A character with Spellcasting and a Veteran Fireball (3 pp).
fn wizard() -> (MemoryStore, ActorId, ItemId) {
    let mut store = MemoryStore::new();
    let actor = store
        .add_actor(Actor::new(ActorKind::Character, "Valeria"))
        .unwrap();

    let mut skill = Item::new(
        "Spellcasting",
        ItemStats::Skill(SkillStats {
            die: mm_core::DieStep::D8,
        }),
    );
    skill.owner = Some(actor);
    store.add_item(skill).unwrap();

    let mut fireball = Item::new(
        "Fireball",
        ItemStats::Power(PowerStats {
            rank: Rank::Veteran,
            pp: 3,
            arcane: String::new(),
            casting_trait: String::new(),
        }),
    );
    fireball.owner = Some(actor);
    let power = store.add_item(fireball).unwrap();
    (store, actor, power)
}

fn link<S: DocumentStore>(store: &mut S, power: ItemId) -> Result<Outcome, RulesError> {
    let settings = CostSettings::default();
    let mut presenter = PresetPresenter::cancelling();
    Workshop::new(store, &mut presenter, &settings).make_magic(power)
}

#[test]
fn fireball_becomes_scroll() {
    let (mut store, actor, power) = wizard();

    let Outcome::Scrolled { power, scroll } = link(&mut store, power).unwrap() else {
        panic!("expected a scroll");
    };

    assert_eq!(power.name, "Fireball Scroll");
    assert!(power.markers.is_scroll);
    let ItemStats::Power(stats) = &power.stats else {
        panic!("power changed category");
    };
    assert_eq!(stats.arcane, "Fireball Scroll");
    assert_eq!(stats.casting_trait, "Spellcasting");

    assert_eq!(scroll.name, "Fireball Scroll");
    assert_eq!(scroll.price, 450);
    assert_eq!(scroll.weight, 0);
    assert_eq!(scroll.grants, vec![power.id]);
    assert_eq!(scroll.owner, Some(actor));
    let ItemStats::Consumable(consumable) = &scroll.stats else {
        panic!("scroll is not a consumable");
    };
    assert_eq!(consumable.quantity, 1);
    assert_eq!((consumable.uses.value, consumable.uses.max), (1, 1));
    assert!(consumable.consume_on_use);

    let actor = store.get_actor(actor).unwrap();
    assert_eq!(
        actor.pool("Fireball Scroll"),
        Some(PowerPool { max: 3, value: 3 })
    );
}

#[test]
fn second_link_is_rejected_without_writes() {
    let (mut store, actor, power) = wizard();
    link(&mut store, power).unwrap();
    let items_before = store.item_count();
    let actor_version = store.get_actor(actor).unwrap().version;

    let again = link(&mut store, power);
    assert!(matches!(again, Err(RulesError::AlreadyLinked(_))));
    assert_eq!(store.item_count(), items_before);
    assert_eq!(store.get_actor(actor).unwrap().version, actor_version);
}

#[test]
fn failed_power_update_rolls_back() {
    let (inner, actor, power) = wizard();
    let mut store = FlakyStore::new(inner);
    store.fail_update_of = Some(power);
    let items_before = store.inner.item_count();

    let result = link(&mut store, power);
    assert!(matches!(
        result,
        Err(RulesError::Store(CoreError::Validation(_)))
    ));
    assert_eq!(store.inner.item_count(), items_before);
    let actor = store.get_actor(actor).unwrap();
    assert!(actor.pool("Fireball Scroll").is_none());
    let power = store.get_item(power).unwrap();
    assert_eq!(power.name, "Fireball");
    assert!(!power.markers.is_scroll);
}

#[test]
fn failed_rollback_is_reported() {
    let (inner, _, power) = wizard();
    let mut store = FlakyStore::new(inner);
    store.fail_update_of = Some(power);
    store.fail_delete = true;

    let result = link(&mut store, power);
    assert!(matches!(
        result,
        Err(RulesError::RollbackFailed { ref cause, ref rollback })
            if cause.contains("update refused") && rollback.contains("delete refused")
    ));
}

#[test]
fn arcane_device_fills_ledger_on_creation() {
    let (mut store, actor, _) = wizard();
    let mut wand = Item::new(
        "Wand of Bolts",
        ItemStats::Gear(GearStats {
            arcane_device: Some(ArcaneDevice {
                power_points: PowerPool { max: 10, value: 4 },
                grants: vec![Grant {
                    name: "Bolt".into(),
                    arcane: Some("Wand of Bolts".into()),
                }],
            }),
        }),
    );
    wand.owner = Some(actor);
    let wand = store.add_item(wand).unwrap();

    let settings = CostSettings::default();
    let mut presenter = PresetPresenter::cancelling();
    let prompts = Workshop::new(&mut store, &mut presenter, &settings)
        .dispatch(&HostEvent::ItemCreated { item: wand })
        .unwrap();
    assert!(prompts.is_empty());
    assert_eq!(
        store.get_actor(actor).unwrap().pool("Wand of Bolts"),
        Some(PowerPool::full(10))
    );
}

#[test]
fn custom_settings_change_prices() {
    let (mut store, actor, _) = wizard();
    let mut sword = Item::new(
        "Dagger",
        ItemStats::Weapon(WeaponStats {
            trait_mod: 0,
            damage: "@str+d4".into(),
            min_str: "d4".into(),
        }),
    )
    .with_price(25);
    sword.owner = Some(actor);
    let sword = store.add_item(sword).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "plus1weapon": 500 }"#).unwrap();
    let settings = CostSettings::load(&path).unwrap();
    assert_eq!(settings.cost(CostKey::Plus1Weapon), 500);
    assert_eq!(settings.cost(CostKey::Plus2Weapon), 8000);

    let mut presenter = PresetPresenter::new("plus1");
    let Outcome::Enchanted { item } = Workshop::new(&mut store, &mut presenter, &settings)
        .make_magic(sword)
        .unwrap()
    else {
        panic!("expected enchantment");
    };
    assert_eq!(item.name, "Dagger +1");
    assert_eq!(item.price, 525);
}

#[test]
fn linked_state_survives_save_and_load() {
    let (mut store, actor, power) = wizard();
    link(&mut store, power).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    store.save(&path).unwrap();
    let mut reloaded = MemoryStore::load(&path).unwrap();

    assert!(reloaded.get_item(power).unwrap().markers.is_scroll);
    assert!(reloaded.get_actor(actor).unwrap().pool("Fireball Scroll").is_some());
    assert!(matches!(
        link(&mut reloaded, power),
        Err(RulesError::AlreadyLinked(_))
    ));
}
