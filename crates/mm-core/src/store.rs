//! The document store contract.
//!
//! Writes are expressed as typed operations rather than field paths. Every
//! update names the version it was computed from; a store rejects stale
//! writes with [`CoreError::Conflict`].

use chrono::Utc;

use crate::actor::{Actor, ActorId, PowerPool};
use crate::effect::{Effect, EffectId};
use crate::error::{CoreError, CoreResult};
use crate::item::{Item, ItemId, ItemStats, Markers};

/// A partial replacement of an item's fields.
///
/// `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<u32>,
    /// New stats; must keep the item's category.
    pub stats: Option<ItemStats>,
    /// New markers; markers can be set but never cleared.
    pub markers: Option<Markers>,
    /// New "granted by" list.
    pub grants: Option<Vec<ItemId>>,
}

impl ItemUpdate {
    /// An empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// An update that writes every field back to `item`'s values.
    pub fn restore(item: &Item) -> Self {
        Self {
            name: Some(item.name.clone()),
            description: Some(item.description.clone()),
            price: Some(item.price),
            stats: Some(item.stats.clone()),
            markers: Some(item.markers),
            grants: Some(item.grants.clone()),
        }
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the price.
    pub fn price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the stats.
    pub fn stats(mut self, stats: ItemStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set the markers.
    pub fn markers(mut self, markers: Markers) -> Self {
        self.markers = Some(markers);
        self
    }

    /// Set the "granted by" list.
    pub fn grants(mut self, grants: Vec<ItemId>) -> Self {
        self.grants = Some(grants);
        self
    }

    /// Returns true if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the update against the current item without applying it.
    pub fn validate(&self, item: &Item) -> CoreResult<()> {
        if let Some(stats) = &self.stats {
            if stats.kind() != item.kind() {
                return Err(CoreError::Validation(format!(
                    "cannot change {} '{}' into a {}",
                    item.kind(),
                    item.name,
                    stats.kind()
                )));
            }
        }
        if let Some(markers) = &self.markers {
            if (item.markers.is_magic && !markers.is_magic)
                || (item.markers.is_scroll && !markers.is_scroll)
            {
                return Err(CoreError::Validation(format!(
                    "markers on '{}' cannot be cleared",
                    item.name
                )));
            }
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CoreError::Validation("item name is empty".to_string()));
            }
        }
        Ok(())
    }

    /// Validate and apply the update, bumping the item's version.
    pub fn apply_to(&self, item: &mut Item) -> CoreResult<()> {
        self.validate(item)?;
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(stats) = &self.stats {
            item.stats = stats.clone();
        }
        if let Some(markers) = self.markers {
            item.markers = markers;
        }
        if let Some(grants) = &self.grants {
            item.grants = grants.clone();
        }
        item.version += 1;
        item.updated_at = Utc::now();
        Ok(())
    }
}

/// A named mutation of an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorUpdate {
    /// Insert or replace a power-point ledger entry.
    SetPowerPoints {
        /// Ledger key.
        key: String,
        /// New pool.
        pool: PowerPool,
    },
    /// Remove a power-point ledger entry.
    RemovePowerPoints {
        /// Ledger key.
        key: String,
    },
}

impl ActorUpdate {
    /// Apply the update, bumping the actor's version.
    pub fn apply_to(&self, actor: &mut Actor) -> CoreResult<()> {
        match self {
            Self::SetPowerPoints { key, pool } => {
                if key.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "power-point ledger key is empty".to_string(),
                    ));
                }
                actor.power_points.insert(key.clone(), *pool);
            }
            Self::RemovePowerPoints { key } => {
                actor.power_points.remove(key);
            }
        }
        actor.version += 1;
        actor.updated_at = Utc::now();
        Ok(())
    }
}

/// Persistence service for actors, items and effects.
///
/// Reads return owned snapshots; writes return the committed document.
pub trait DocumentStore {
    /// Fetch an item snapshot.
    fn get_item(&self, id: ItemId) -> CoreResult<Item>;

    /// Fetch an actor snapshot.
    fn get_actor(&self, id: ActorId) -> CoreResult<Actor>;

    /// Fetch every item owned by an actor.
    fn items_of(&self, actor: ActorId) -> CoreResult<Vec<Item>>;

    /// Apply `update` to an item if its version still equals
    /// `expected_version`.
    fn update_item(
        &mut self,
        id: ItemId,
        expected_version: u64,
        update: &ItemUpdate,
    ) -> CoreResult<Item>;

    /// Create `item` owned by `owner`. The item's pre-assigned ID is kept.
    fn create_item(&mut self, owner: ActorId, item: Item) -> CoreResult<Item>;

    /// Delete an item, returning its last snapshot.
    fn delete_item(&mut self, id: ItemId) -> CoreResult<Item>;

    /// Apply `update` to an actor if its version still equals
    /// `expected_version`.
    fn update_actor(
        &mut self,
        id: ActorId,
        expected_version: u64,
        update: &ActorUpdate,
    ) -> CoreResult<Actor>;

    /// Embed an effect in an item.
    fn create_effect(&mut self, item: ItemId, effect: Effect) -> CoreResult<Effect>;

    /// Remove an embedded effect.
    fn delete_effect(&mut self, item: ItemId, effect: EffectId) -> CoreResult<Effect>;

    /// Names of every skill entry across all item compendium packs.
    /// May contain duplicates.
    fn list_compendium_skill_names(&self) -> CoreResult<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorKind;
    use crate::item::{ArmorStats, ShieldStats};

    fn armor() -> Item {
        Item::new(
            "Chain Mail",
            ItemStats::Armor(ArmorStats {
                armor: 3,
                min_str: "d8".into(),
            }),
        )
    }

    #[test]
    fn apply_replaces_fields_and_bumps_version() {
        let mut item = armor();
        ItemUpdate::new()
            .name("Chain Mail +1")
            .price(3300)
            .apply_to(&mut item)
            .unwrap();
        assert_eq!(item.name, "Chain Mail +1");
        assert_eq!(item.price, 3300);
        assert_eq!(item.version, 1);
    }

    #[test]
    fn category_change_rejected() {
        let mut item = armor();
        let update = ItemUpdate::new().stats(ItemStats::Shield(ShieldStats {
            parry: 1,
            min_str: String::new(),
        }));
        assert!(matches!(
            update.apply_to(&mut item),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(item.version, 0);
    }

    #[test]
    fn markers_cannot_be_cleared() {
        let mut item = armor();
        item.markers.is_magic = true;
        let update = ItemUpdate::new().markers(Markers::default());
        assert!(update.apply_to(&mut item).is_err());
    }

    #[test]
    fn restore_is_full() {
        let item = armor();
        let update = ItemUpdate::restore(&item);
        assert!(!update.is_empty());
        assert_eq!(update.name.as_deref(), Some("Chain Mail"));
        assert!(ItemUpdate::new().is_empty());
    }

    #[test]
    fn actor_ledger_updates() {
        let mut actor = Actor::new(ActorKind::Character, "Valeria");
        ActorUpdate::SetPowerPoints {
            key: "Fireball Scroll".into(),
            pool: PowerPool::full(3),
        }
        .apply_to(&mut actor)
        .unwrap();
        assert_eq!(actor.pool("Fireball Scroll"), Some(PowerPool::full(3)));

        ActorUpdate::RemovePowerPoints {
            key: "Fireball Scroll".into(),
        }
        .apply_to(&mut actor)
        .unwrap();
        assert_eq!(actor.pool("Fireball Scroll"), None);
        assert_eq!(actor.version, 2);
    }
}
