use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Generate a new random actor ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The kind of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// A player character.
    Character,
    /// A non-player character.
    Npc,
    /// A vehicle. Vehicles carry items but never enchant them.
    Vehicle,
}

impl ActorKind {
    /// Returns true if items owned by this kind of actor can be made magic.
    pub fn can_make_magic(self) -> bool {
        matches!(self, Self::Character | Self::Npc)
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Npc => write!(f, "npc"),
            Self::Vehicle => write!(f, "vehicle"),
        }
    }
}

/// A pool of power points: a maximum and the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerPool {
    /// Maximum power points.
    pub max: u32,
    /// Power points currently available.
    pub value: u32,
}

impl PowerPool {
    /// A full pool holding `max` points.
    pub fn full(max: u32) -> Self {
        Self { max, value: max }
    }
}

impl fmt::Display for PowerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}

/// A character, NPC or vehicle that owns items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Actor kind.
    pub kind: ActorKind,
    /// Power-point ledger keyed by arcane background (or scroll) name.
    #[serde(default)]
    pub power_points: BTreeMap<String, PowerPool>,
    /// Optimistic-concurrency version, bumped on every committed update.
    #[serde(default)]
    pub version: u64,
    /// Timestamp of the last committed update.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Actor {
    /// Create a new actor with an empty ledger.
    pub fn new(kind: ActorKind, name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            kind,
            power_points: BTreeMap::new(),
            version: 0,
            updated_at: Utc::now(),
        }
    }

    /// Look up a ledger entry.
    pub fn pool(&self, key: &str) -> Option<PowerPool> {
        self.power_points.get(key).copied()
    }
}
