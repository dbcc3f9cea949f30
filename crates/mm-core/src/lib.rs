//! Core document model for Make Magic: items, actors, effects, and the
//! document store they live in.
//!
//! The rules engine never touches host storage directly. It reads snapshots
//! through [`DocumentStore`] and writes back through typed update operations.
//! [`MemoryStore`] is the in-process implementation, persistable as JSON.

/// Actors, actor kinds, and the power-point ledger.
pub mod actor;
/// Compendium packs (read-only catalogs of item templates).
pub mod compendium;
/// Stepped dice (d4 through d12+N).
pub mod die;
/// Active effects attached to items.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// Items and their category-specific stats.
pub mod item;
/// In-memory document store with optimistic versioning.
pub mod memory;
/// The document store trait and its typed update operations.
pub mod store;

/// Re-export compendium types.
pub use compendium::{CompendiumEntry, CompendiumPack, PackKind};
/// Re-export actor types.
pub use actor::{Actor, ActorId, ActorKind, PowerPool};
/// Re-export the die step type.
pub use die::DieStep;
/// Re-export effect types.
pub use effect::{Attribute, ChangeMode, Effect, EffectChange, EffectId, EffectKey};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item types.
pub use item::{
    ArcaneDevice, ArmorStats, ConsumableStats, GearStats, Grant, Item, ItemId, ItemKind, ItemRef,
    ItemStats, Markers, PowerStats, Rank, ShieldStats, SkillStats, Uses, WeaponStats,
};
/// Re-export the in-memory store.
pub use memory::{MemoryStore, StoreSnapshot};
/// Re-export the store trait and update operations.
pub use store::{ActorUpdate, DocumentStore, ItemUpdate};
