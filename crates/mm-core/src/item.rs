use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actor::{ActorId, PowerPool};
use crate::die::DieStep;
use crate::effect::Effect;

/// Unique identifier for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The category of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A melee or ranged weapon.
    Weapon,
    /// Worn armor.
    Armor,
    /// A shield.
    Shield,
    /// A spell-like power.
    Power,
    /// A consumable with limited uses.
    Consumable,
    /// Miscellaneous gear, including jewelry and arcane devices.
    Gear,
    /// A skill.
    Skill,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Armor => write!(f, "armor"),
            Self::Shield => write!(f, "shield"),
            Self::Power => write!(f, "power"),
            Self::Consumable => write!(f, "consumable"),
            Self::Gear => write!(f, "gear"),
            Self::Skill => write!(f, "skill"),
        }
    }
}

/// Rank tier of a power, Novice (1) through Legendary (5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 1.
    Novice,
    /// Rank 2.
    Seasoned,
    /// Rank 3.
    Veteran,
    /// Rank 4.
    Heroic,
    /// Rank 5.
    Legendary,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Novice,
        Self::Seasoned,
        Self::Veteran,
        Self::Heroic,
        Self::Legendary,
    ];

    /// One-based rank index.
    pub fn index(self) -> u32 {
        match self {
            Self::Novice => 1,
            Self::Seasoned => 2,
            Self::Veteran => 3,
            Self::Heroic => 4,
            Self::Legendary => 5,
        }
    }

    /// Parse a rank name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.to_string().to_lowercase() == lower)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Novice => write!(f, "Novice"),
            Self::Seasoned => write!(f, "Seasoned"),
            Self::Veteran => write!(f, "Veteran"),
            Self::Heroic => write!(f, "Heroic"),
            Self::Legendary => write!(f, "Legendary"),
        }
    }
}

/// One-way markers set by enchantment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Markers {
    /// The item has been made magic.
    #[serde(default)]
    pub is_magic: bool,
    /// The power has been turned into a scroll.
    #[serde(default)]
    pub is_scroll: bool,
}

/// Charges on a consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Uses {
    /// Charges remaining.
    pub value: u32,
    /// Maximum charges.
    pub max: u32,
}

/// A grant carried by an arcane device: an item mutation it applies to its
/// owner. Only the arcane background name matters here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grant {
    /// Name of the granted item.
    pub name: String,
    /// Arcane background the granted power is mutated into, if any.
    #[serde(default)]
    pub arcane: Option<String>,
}

/// Power-point storage of an arcane device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArcaneDevice {
    /// The device's own power points.
    pub power_points: PowerPool,
    /// Powers granted by the device.
    #[serde(default)]
    pub grants: Vec<Grant>,
}

/// Weapon stats.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Bonus to the attack trait roll.
    #[serde(default)]
    pub trait_mod: u32,
    /// Damage expression, e.g. `@str+d8`.
    #[serde(default)]
    pub damage: String,
    /// Minimum strength die, e.g. `d8`.
    #[serde(default)]
    pub min_str: String,
}

/// Armor stats.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArmorStats {
    /// Armor value.
    pub armor: u32,
    /// Minimum strength die.
    #[serde(default)]
    pub min_str: String,
}

/// Shield stats.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShieldStats {
    /// Parry bonus.
    pub parry: u32,
    /// Minimum strength die.
    #[serde(default)]
    pub min_str: String,
}

/// Power stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStats {
    /// Rank required to learn the power.
    pub rank: Rank,
    /// Power-point cost to cast.
    pub pp: u32,
    /// Arcane background the power draws points from; empty for the
    /// general pool.
    #[serde(default)]
    pub arcane: String,
    /// Trait rolled when casting.
    #[serde(default)]
    pub casting_trait: String,
}

/// Consumable stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableStats {
    /// Stack size.
    pub quantity: u32,
    /// Charges.
    pub uses: Uses,
    /// Whether using a charge consumes the item.
    #[serde(default)]
    pub consume_on_use: bool,
}

impl Default for ConsumableStats {
    fn default() -> Self {
        Self {
            quantity: 1,
            uses: Uses { value: 1, max: 1 },
            consume_on_use: true,
        }
    }
}

/// Gear stats.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GearStats {
    /// Present when the gear is an arcane device.
    #[serde(default)]
    pub arcane_device: Option<ArcaneDevice>,
}

/// Skill stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillStats {
    /// Current skill die.
    pub die: DieStep,
}

/// Category-specific item stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemStats {
    /// Weapon stats.
    Weapon(WeaponStats),
    /// Armor stats.
    Armor(ArmorStats),
    /// Shield stats.
    Shield(ShieldStats),
    /// Power stats.
    Power(PowerStats),
    /// Consumable stats.
    Consumable(ConsumableStats),
    /// Gear stats.
    Gear(GearStats),
    /// Skill stats.
    Skill(SkillStats),
}

impl ItemStats {
    /// The item category these stats belong to.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Weapon(_) => ItemKind::Weapon,
            Self::Armor(_) => ItemKind::Armor,
            Self::Shield(_) => ItemKind::Shield,
            Self::Power(_) => ItemKind::Power,
            Self::Consumable(_) => ItemKind::Consumable,
            Self::Gear(_) => ItemKind::Gear,
            Self::Skill(_) => ItemKind::Skill,
        }
    }
}

/// A stable cross-document reference to an item, rendered the way the host
/// resolves links: `Actor.<actor>.Item.<item>` or `Item.<item>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    /// Owning actor, if embedded.
    pub actor: Option<ActorId>,
    /// The item.
    pub item: ItemId,
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.actor {
            Some(actor) => write!(f, "Actor.{}.Item.{}", actor.0, self.item.0),
            None => write!(f, "Item.{}", self.item.0),
        }
    }
}

/// An item document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Rich-text description.
    #[serde(default)]
    pub description: String,
    /// System identifier of the item template, e.g. `magic-jewelry`.
    #[serde(default)]
    pub swid: String,
    /// Image path.
    #[serde(default)]
    pub img: Option<String>,
    /// Price in currency units.
    #[serde(default)]
    pub price: u32,
    /// Weight in pounds.
    #[serde(default)]
    pub weight: u32,
    /// Owning actor; `None` for items not yet assigned.
    #[serde(default)]
    pub owner: Option<ActorId>,
    /// Category-specific stats.
    pub stats: ItemStats,
    /// One-way enchantment markers.
    #[serde(default)]
    pub markers: Markers,
    /// Items this one was granted by.
    #[serde(default)]
    pub grants: Vec<ItemId>,
    /// Embedded effects.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Optimistic-concurrency version, bumped on every committed update.
    #[serde(default)]
    pub version: u64,
    /// Timestamp when the item was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last committed update.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new unowned item with a random ID.
    pub fn new(name: impl Into<String>, stats: ItemStats) -> Self {
        Self::with_id(ItemId::new(), name, stats)
    }

    /// Create an item with a pre-assigned ID.
    ///
    /// Used when a command list must refer to an item before the store has
    /// created it.
    pub fn with_id(id: ItemId, name: impl Into<String>, stats: ItemStats) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: String::new(),
            swid: String::new(),
            img: None,
            price: 0,
            weight: 0,
            owner: None,
            stats,
            markers: Markers::default(),
            grants: Vec::new(),
            effects: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the price.
    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    /// Set the system identifier.
    pub fn with_swid(mut self, swid: impl Into<String>) -> Self {
        self.swid = swid.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The item category.
    pub fn kind(&self) -> ItemKind {
        self.stats.kind()
    }

    /// A stable reference to this item.
    pub fn reference(&self) -> ItemRef {
        ItemRef {
            actor: self.owner,
            item: self.id,
        }
    }
}
