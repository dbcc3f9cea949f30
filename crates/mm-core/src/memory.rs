use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorId};
use crate::compendium::CompendiumPack;
use crate::effect::{Effect, EffectId};
use crate::error::{CoreError, CoreResult};
use crate::item::{Item, ItemId};
use crate::store::{ActorUpdate, DocumentStore, ItemUpdate};

/// Serializable form of a [`MemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// All actors, in insertion order.
    #[serde(default)]
    pub actors: Vec<Actor>,
    /// All items, in insertion order.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Compendium packs.
    #[serde(default)]
    pub compendium: Vec<CompendiumPack>,
}

/// An in-process document store with optimistic versioning.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    actors: HashMap<ActorId, Actor>,
    items: HashMap<ItemId, Item>,
    compendium: Vec<CompendiumPack>,

    // Insertion order, for stable listing and persistence
    actor_order: Vec<ActorId>,
    item_order: Vec<ItemId>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    /// Add an actor. Returns its ID.
    pub fn add_actor(&mut self, actor: Actor) -> CoreResult<ActorId> {
        if self.actors.contains_key(&actor.id) {
            return Err(CoreError::Validation(format!(
                "actor {} already exists",
                actor.id
            )));
        }
        let id = actor.id;
        self.actor_order.push(id);
        self.actors.insert(id, actor);
        Ok(id)
    }

    /// Add an item without going through the create path (no version reset,
    /// no owner check beyond existence). Returns its ID.
    pub fn add_item(&mut self, item: Item) -> CoreResult<ItemId> {
        if self.items.contains_key(&item.id) {
            return Err(CoreError::Validation(format!(
                "item {} already exists",
                item.id
            )));
        }
        if let Some(owner) = item.owner {
            if !self.actors.contains_key(&owner) {
                return Err(CoreError::ActorNotFound(owner));
            }
        }
        let id = item.id;
        self.item_order.push(id);
        self.items.insert(id, item);
        Ok(id)
    }

    /// Add a compendium pack.
    pub fn add_pack(&mut self, pack: CompendiumPack) {
        self.compendium.push(pack);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All actors in insertion order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actor_order.iter().filter_map(|id| self.actors.get(id))
    }

    /// All items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.item_order.iter().filter_map(|id| self.items.get(id))
    }

    /// Find an actor by name (case-insensitive).
    pub fn find_actor(&self, name: &str) -> Option<&Actor> {
        let lower = name.to_lowercase();
        self.actors().find(|a| a.name.to_lowercase() == lower)
    }

    /// Find an item by name (case-insensitive), optionally restricted to one
    /// owner.
    pub fn find_item(&self, owner: Option<ActorId>, name: &str) -> Option<&Item> {
        let lower = name.to_lowercase();
        self.items().find(|i| {
            i.name.to_lowercase() == lower && owner.is_none_or(|o| i.owner == Some(o))
        })
    }

    /// Compendium packs.
    pub fn packs(&self) -> &[CompendiumPack] {
        &self.compendium
    }

    /// Number of items in the store.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Build a store from a snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> CoreResult<Self> {
        let mut store = Self::new();
        for actor in snapshot.actors {
            store.add_actor(actor)?;
        }
        for item in snapshot.items {
            store.add_item(item)?;
        }
        store.compendium = snapshot.compendium;
        Ok(store)
    }

    /// Capture the store's contents.
    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            actors: self.actors().cloned().collect(),
            items: self.items().cloned().collect(),
            compendium: self.compendium.clone(),
        }
    }

    /// Parse a store from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Self::from_snapshot(serde_json::from_str(json)?)
    }

    /// Serialize the store as pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    /// Load a store from a JSON file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Write the store to a JSON file.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    fn item_mut(&mut self, id: ItemId) -> CoreResult<&mut Item> {
        self.items.get_mut(&id).ok_or(CoreError::ItemNotFound(id))
    }
}

impl DocumentStore for MemoryStore {
    fn get_item(&self, id: ItemId) -> CoreResult<Item> {
        self.items.get(&id).cloned().ok_or(CoreError::ItemNotFound(id))
    }

    fn get_actor(&self, id: ActorId) -> CoreResult<Actor> {
        self.actors
            .get(&id)
            .cloned()
            .ok_or(CoreError::ActorNotFound(id))
    }

    fn items_of(&self, actor: ActorId) -> CoreResult<Vec<Item>> {
        if !self.actors.contains_key(&actor) {
            return Err(CoreError::ActorNotFound(actor));
        }
        Ok(self
            .items()
            .filter(|i| i.owner == Some(actor))
            .cloned()
            .collect())
    }

    fn update_item(
        &mut self,
        id: ItemId,
        expected_version: u64,
        update: &ItemUpdate,
    ) -> CoreResult<Item> {
        let item = self.item_mut(id)?;
        if item.version != expected_version {
            return Err(CoreError::Conflict {
                expected: expected_version,
                found: item.version,
            });
        }
        update.apply_to(item)?;
        Ok(item.clone())
    }

    fn create_item(&mut self, owner: ActorId, mut item: Item) -> CoreResult<Item> {
        if !self.actors.contains_key(&owner) {
            return Err(CoreError::ActorNotFound(owner));
        }
        if item.name.trim().is_empty() {
            return Err(CoreError::Validation("item name is empty".to_string()));
        }
        let now = Utc::now();
        item.owner = Some(owner);
        item.version = 0;
        item.created_at = now;
        item.updated_at = now;
        self.add_item(item.clone())?;
        Ok(item)
    }

    fn delete_item(&mut self, id: ItemId) -> CoreResult<Item> {
        let item = self.items.remove(&id).ok_or(CoreError::ItemNotFound(id))?;
        self.item_order.retain(|i| *i != id);
        Ok(item)
    }

    fn update_actor(
        &mut self,
        id: ActorId,
        expected_version: u64,
        update: &ActorUpdate,
    ) -> CoreResult<Actor> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or(CoreError::ActorNotFound(id))?;
        if actor.version != expected_version {
            return Err(CoreError::Conflict {
                expected: expected_version,
                found: actor.version,
            });
        }
        update.apply_to(actor)?;
        Ok(actor.clone())
    }

    fn create_effect(&mut self, item: ItemId, effect: Effect) -> CoreResult<Effect> {
        let target = self.item_mut(item)?;
        if target.effects.iter().any(|e| e.id == effect.id) {
            return Err(CoreError::Validation(format!(
                "effect {} already exists on '{}'",
                effect.id, target.name
            )));
        }
        target.effects.push(effect.clone());
        Ok(effect)
    }

    fn delete_effect(&mut self, item: ItemId, effect: EffectId) -> CoreResult<Effect> {
        let target = self.item_mut(item)?;
        let pos = target
            .effects
            .iter()
            .position(|e| e.id == effect)
            .ok_or(CoreError::EffectNotFound { item, effect })?;
        Ok(target.effects.remove(pos))
    }

    fn list_compendium_skill_names(&self) -> CoreResult<Vec<String>> {
        Ok(self
            .compendium
            .iter()
            .flat_map(|pack| pack.skill_names())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorKind, PowerPool};
    use crate::compendium::{CompendiumEntry, PackKind};
    use crate::effect::{ChangeMode, EffectChange, EffectKey};
    use crate::item::{ItemStats, ShieldStats};

    fn shield() -> Item {
        Item::new(
            "Medium Shield",
            ItemStats::Shield(ShieldStats {
                parry: 2,
                min_str: "d6".into(),
            }),
        )
        .with_price(50)
    }

    fn seeded() -> (MemoryStore, ActorId, ItemId) {
        let mut store = MemoryStore::new();
        let actor = store
            .add_actor(Actor::new(ActorKind::Character, "Valeria"))
            .unwrap();
        let item = store.create_item(actor, shield()).unwrap();
        (store, actor, item.id)
    }

    #[test]
    fn create_sets_owner_and_version() {
        let (store, actor, id) = seeded();
        let item = store.get_item(id).unwrap();
        assert_eq!(item.owner, Some(actor));
        assert_eq!(item.version, 0);
        assert_eq!(store.items_of(actor).unwrap().len(), 1);
    }

    #[test]
    fn create_on_missing_actor_fails() {
        let mut store = MemoryStore::new();
        let err = store.create_item(ActorId::new(), shield()).unwrap_err();
        assert!(matches!(err, CoreError::ActorNotFound(_)));
    }

    #[test]
    fn stale_item_update_conflicts() {
        let (mut store, _, id) = seeded();
        store
            .update_item(id, 0, &ItemUpdate::new().price(60))
            .unwrap();
        let err = store
            .update_item(id, 0, &ItemUpdate::new().price(70))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Conflict {
                expected: 0,
                found: 1
            }
        ));
        assert_eq!(store.get_item(id).unwrap().price, 60);
    }

    #[test]
    fn stale_actor_update_conflicts() {
        let (mut store, actor, _) = seeded();
        let update = ActorUpdate::SetPowerPoints {
            key: "Magic".into(),
            pool: PowerPool::full(10),
        };
        store.update_actor(actor, 0, &update).unwrap();
        assert!(store.update_actor(actor, 0, &update).is_err());
    }

    #[test]
    fn delete_item_removes_from_listing() {
        let (mut store, actor, id) = seeded();
        store.delete_item(id).unwrap();
        assert!(store.items_of(actor).unwrap().is_empty());
        assert!(matches!(
            store.get_item(id),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn effects_round_trip() {
        let (mut store, _, id) = seeded();
        let effect = Effect {
            id: EffectId::new(),
            name: "Vigor Increase".into(),
            icon: None,
            origin: "Item.x".into(),
            disabled: false,
            transfer: true,
            favorite: true,
            changes: vec![EffectChange {
                key: EffectKey::SkillDie("Fighting".into()),
                mode: ChangeMode::Add,
                value: 2,
                priority: 20,
            }],
        };
        store.create_effect(id, effect.clone()).unwrap();
        assert!(store.create_effect(id, effect.clone()).is_err());
        assert_eq!(store.get_item(id).unwrap().effects.len(), 1);
        // effects do not bump the item version
        assert_eq!(store.get_item(id).unwrap().version, 0);

        store.delete_effect(id, effect.id).unwrap();
        assert!(store.get_item(id).unwrap().effects.is_empty());
        assert!(store.delete_effect(id, effect.id).is_err());
    }

    #[test]
    fn compendium_skill_names_keep_duplicates() {
        let mut store = MemoryStore::new();
        store.add_pack(CompendiumPack {
            name: "Core".into(),
            kind: PackKind::Item,
            entries: vec![
                CompendiumEntry::new("Stealth", "skill"),
                CompendiumEntry::new("Fighting", "skill"),
            ],
        });
        store.add_pack(CompendiumPack {
            name: "Extra".into(),
            kind: PackKind::Item,
            entries: vec![CompendiumEntry::new("Fighting", "skill")],
        });
        let names = store.list_compendium_skill_names().unwrap();
        assert_eq!(names, vec!["Stealth", "Fighting", "Fighting"]);
    }

    #[test]
    fn json_round_trip_preserves_order() {
        let (mut store, actor, _) = seeded();
        store
            .create_item(actor, Item::new("Small Shield", shield().stats))
            .unwrap();
        let json = store.to_json().unwrap();
        let loaded = MemoryStore::from_json(&json).unwrap();
        let names: Vec<&str> = loaded.items().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Medium Shield", "Small Shield"]);
        assert!(loaded.find_item(Some(actor), "small shield").is_some());
        assert!(loaded.find_actor("VALERIA").is_some());
    }

    #[test]
    fn save_and_load_file() {
        let (store, _, id) = seeded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        store.save(&path).unwrap();
        let loaded = MemoryStore::load(&path).unwrap();
        assert_eq!(loaded.get_item(id).unwrap().name, "Medium Shield");
    }
}
