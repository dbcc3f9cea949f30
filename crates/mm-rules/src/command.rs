//! Store commands and their compensating executor.
//!
//! Rule code never writes to the store directly. It plans a list of
//! [`Command`]s and hands them to [`execute`], which applies them in order
//! and undoes the applied prefix if a later command fails.

use std::fmt;

use mm_core::{
    Actor, ActorId, ActorUpdate, DocumentStore, Effect, EffectId, Item, ItemId, ItemUpdate,
};
use tracing::{debug, error, warn};

use crate::error::{RulesError, RulesResult};

/// One store write.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an item with a pre-assigned ID.
    CreateItem {
        /// Owning actor.
        owner: ActorId,
        /// The item to create.
        item: Item,
    },
    /// Apply a versioned item update.
    UpdateItem {
        /// Target item.
        id: ItemId,
        /// Version the update was computed from.
        expected_version: u64,
        /// The update.
        update: ItemUpdate,
    },
    /// Apply a versioned actor update.
    UpdateActor {
        /// Target actor.
        id: ActorId,
        /// Version the update was computed from.
        expected_version: u64,
        /// The update.
        update: ActorUpdate,
    },
    /// Embed an effect in an item.
    CreateEffect {
        /// Target item.
        item: ItemId,
        /// The effect.
        effect: Effect,
    },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateItem { owner, item } => {
                write!(f, "create item '{}' ({}) for actor {owner}", item.name, item.id)
            }
            Self::UpdateItem {
                id,
                expected_version,
                ..
            } => write!(f, "update item {id} at v{expected_version}"),
            Self::UpdateActor {
                id,
                expected_version,
                update,
            } => match update {
                ActorUpdate::SetPowerPoints { key, pool } => {
                    write!(f, "set '{key}' = {pool} on actor {id} at v{expected_version}")
                }
                ActorUpdate::RemovePowerPoints { key } => {
                    write!(f, "remove '{key}' from actor {id} at v{expected_version}")
                }
            },
            Self::CreateEffect { item, effect } => {
                write!(f, "add effect '{}' to item {item}", effect.name)
            }
        }
    }
}

/// A committed write.
#[derive(Debug, Clone, PartialEq)]
pub enum Committed {
    /// A created or updated item.
    Item(Item),
    /// An updated actor.
    Actor(Actor),
    /// A created effect.
    Effect(Effect),
}

/// How to undo one committed write.
#[derive(Debug)]
enum Undo {
    DeleteItem(ItemId),
    RestoreItem { version: u64, previous: Item },
    RestoreLedger {
        actor: ActorId,
        version: u64,
        update: ActorUpdate,
    },
    DeleteEffect { item: ItemId, effect: EffectId },
}

/// Apply `commands` in order.
///
/// If a command fails, the writes already applied are undone in reverse
/// order and the original error is returned. If undoing fails as well the
/// result is [`RulesError::RollbackFailed`].
pub fn execute<S: DocumentStore>(
    store: &mut S,
    commands: Vec<Command>,
) -> RulesResult<Vec<Committed>> {
    let mut undo_log = Vec::with_capacity(commands.len());
    let mut committed = Vec::with_capacity(commands.len());

    for command in commands {
        debug!(%command, "applying");
        match apply(store, command) {
            Ok((done, undo)) => {
                committed.push(done);
                undo_log.push(undo);
            }
            Err(cause) => {
                if undo_log.is_empty() {
                    return Err(cause);
                }
                warn!(%cause, writes = undo_log.len(), "rolling back");
                return match rollback(store, undo_log) {
                    Ok(()) => Err(cause),
                    Err(rollback) => {
                        error!(%cause, %rollback, "rollback failed");
                        Err(RulesError::RollbackFailed {
                            cause: cause.to_string(),
                            rollback: rollback.to_string(),
                        })
                    }
                };
            }
        }
    }
    Ok(committed)
}

fn apply<S: DocumentStore>(store: &mut S, command: Command) -> RulesResult<(Committed, Undo)> {
    match command {
        Command::CreateItem { owner, item } => {
            let created = store.create_item(owner, item)?;
            let undo = Undo::DeleteItem(created.id);
            Ok((Committed::Item(created), undo))
        }
        Command::UpdateItem {
            id,
            expected_version,
            update,
        } => {
            let previous = store.get_item(id)?;
            let updated = store.update_item(id, expected_version, &update)?;
            let undo = Undo::RestoreItem {
                version: updated.version,
                previous,
            };
            Ok((Committed::Item(updated), undo))
        }
        Command::UpdateActor {
            id,
            expected_version,
            update,
        } => {
            let previous = store.get_actor(id)?;
            let updated = store.update_actor(id, expected_version, &update)?;
            let key = match &update {
                ActorUpdate::SetPowerPoints { key, .. } | ActorUpdate::RemovePowerPoints { key } => {
                    key.clone()
                }
            };
            let inverse = match previous.pool(&key) {
                Some(pool) => ActorUpdate::SetPowerPoints { key, pool },
                None => ActorUpdate::RemovePowerPoints { key },
            };
            let undo = Undo::RestoreLedger {
                actor: id,
                version: updated.version,
                update: inverse,
            };
            Ok((Committed::Actor(updated), undo))
        }
        Command::CreateEffect { item, effect } => {
            let created = store.create_effect(item, effect)?;
            let undo = Undo::DeleteEffect {
                item,
                effect: created.id,
            };
            Ok((Committed::Effect(created), undo))
        }
    }
}

fn rollback<S: DocumentStore>(store: &mut S, undo_log: Vec<Undo>) -> RulesResult<()> {
    for undo in undo_log.into_iter().rev() {
        match undo {
            Undo::DeleteItem(id) => {
                store.delete_item(id)?;
            }
            Undo::RestoreItem { version, previous } => {
                store.update_item(previous.id, version, &ItemUpdate::restore(&previous))?;
            }
            Undo::RestoreLedger {
                actor,
                version,
                update,
            } => {
                store.update_actor(actor, version, &update)?;
            }
            Undo::DeleteEffect { item, effect } => {
                store.delete_effect(item, effect)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::{ActorKind, ArmorStats, CoreError, ItemStats, MemoryStore, PowerPool};

    fn setup() -> (MemoryStore, Actor, Item) {
        let mut store = MemoryStore::new();
        let actor = Actor::new(ActorKind::Character, "Valeria");
        let actor_id = store.add_actor(actor).unwrap();
        let mut armor = Item::new(
            "Leather",
            ItemStats::Armor(ArmorStats {
                armor: 2,
                min_str: "d6".into(),
            }),
        );
        armor.owner = Some(actor_id);
        let armor_id = store.add_item(armor).unwrap();
        let actor = store.get_actor(actor_id).unwrap();
        let armor = store.get_item(armor_id).unwrap();
        (store, actor, armor)
    }

    fn set_pool(actor: &Actor, key: &str) -> Command {
        Command::UpdateActor {
            id: actor.id,
            expected_version: actor.version,
            update: ActorUpdate::SetPowerPoints {
                key: key.into(),
                pool: PowerPool::full(2),
            },
        }
    }

    #[test]
    fn applies_in_order() {
        let (mut store, actor, armor) = setup();
        let committed = execute(
            &mut store,
            vec![
                set_pool(&actor, "Bolt Scroll"),
                Command::UpdateItem {
                    id: armor.id,
                    expected_version: armor.version,
                    update: ItemUpdate::new().name("Leather +1"),
                },
            ],
        )
        .unwrap();
        assert_eq!(committed.len(), 2);
        assert!(matches!(&committed[1], Committed::Item(i) if i.name == "Leather +1"));
        assert_eq!(
            store.get_actor(actor.id).unwrap().pool("Bolt Scroll"),
            Some(PowerPool::full(2))
        );
    }

    #[test]
    fn failure_undoes_applied_prefix() {
        let (mut store, actor, armor) = setup();
        let scroll = Item::new("Bolt Scroll", ItemStats::Consumable(Default::default()));
        let scroll_id = scroll.id;
        let err = execute(
            &mut store,
            vec![
                Command::CreateItem {
                    owner: actor.id,
                    item: scroll,
                },
                set_pool(&actor, "Bolt Scroll"),
                Command::UpdateItem {
                    id: armor.id,
                    expected_version: armor.version + 5,
                    update: ItemUpdate::new().name("Leather +1"),
                },
            ],
        )
        .unwrap_err();

        assert!(matches!(err, RulesError::Store(CoreError::Conflict { .. })));
        assert!(store.get_item(scroll_id).is_err());
        let actor = store.get_actor(actor.id).unwrap();
        assert!(actor.power_points.is_empty());
        assert_eq!(store.get_item(armor.id).unwrap().name, "Leather");
    }

    #[test]
    fn restores_previous_ledger_entry() {
        let (mut store, actor, armor) = setup();
        let actor = store
            .update_actor(
                actor.id,
                actor.version,
                &ActorUpdate::SetPowerPoints {
                    key: "Bolt Scroll".into(),
                    pool: PowerPool { max: 5, value: 1 },
                },
            )
            .unwrap();

        let result = execute(
            &mut store,
            vec![
                set_pool(&actor, "Bolt Scroll"),
                Command::UpdateItem {
                    id: armor.id,
                    expected_version: 99,
                    update: ItemUpdate::new().price(1),
                },
            ],
        );
        assert!(result.is_err());
        assert_eq!(
            store.get_actor(actor.id).unwrap().pool("Bolt Scroll"),
            Some(PowerPool { max: 5, value: 1 })
        );
    }

    #[test]
    fn first_failure_needs_no_rollback() {
        let (mut store, _, armor) = setup();
        let err = execute(
            &mut store,
            vec![Command::UpdateItem {
                id: armor.id,
                expected_version: 3,
                update: ItemUpdate::new().price(1),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, RulesError::Store(CoreError::Conflict { .. })));
    }

    #[test]
    fn display_names_the_write() {
        let (_, actor, _) = setup();
        let text = set_pool(&actor, "Bolt Scroll").to_string();
        assert!(text.contains("'Bolt Scroll' = 2/2"));
    }
}
