//! The fixed table of enchantment options.
//!
//! Each option names its cost setting and the stat delta it applies. Options
//! are grouped per item category; jewelry offers forms instead of deltas and
//! scrolls are priced from the power itself.

use std::fmt;

use mm_core::ItemKind;

use crate::config::{CostKey, CostSettings};

/// Price per power point per rank step for scrolls.
pub const SCROLL_PRICE_PER_POINT: u32 = 50;

/// The stat change an option makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatDelta {
    /// Raise a weapon's trait modifier, optionally stepping up its damage dice.
    TraitMod {
        /// Trait modifier bonus.
        bonus: u32,
        /// Step every damage die up once.
        escalate_damage: bool,
    },
    /// Raise armor, optionally lowering the minimum strength.
    Armor {
        /// Armor bonus.
        bonus: u32,
        /// Lower minimum strength one die step.
        lighter: bool,
    },
    /// Raise a shield's parry, optionally lowering the minimum strength.
    Parry {
        /// Parry bonus.
        bonus: u32,
        /// Lower minimum strength one die step.
        lighter: bool,
    },
}

impl StatDelta {
    /// The item category this delta applies to.
    pub fn category(self) -> ItemKind {
        match self {
            Self::TraitMod { .. } => ItemKind::Weapon,
            Self::Armor { .. } => ItemKind::Armor,
            Self::Parry { .. } => ItemKind::Shield,
        }
    }
}

/// One upgrade path for one item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnchantmentOption {
    /// Stable identifier, e.g. `plus2light`.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Suffix appended to the item name, e.g. `+2 (Light)`.
    pub suffix: &'static str,
    /// The cost setting charged.
    pub cost: CostKey,
    /// The stat change.
    pub delta: StatDelta,
}

impl EnchantmentOption {
    /// Label with the configured price, e.g. `+1 Armor (3000)`.
    pub fn priced_label(&self, settings: &CostSettings) -> String {
        format!("{} ({})", self.label, settings.cost(self.cost))
    }
}

/// Weapon options.
pub const WEAPON_OPTIONS: &[EnchantmentOption] = &[
    EnchantmentOption {
        id: "plus1",
        label: "+1 Trait",
        suffix: "+1",
        cost: CostKey::Plus1Weapon,
        delta: StatDelta::TraitMod {
            bonus: 1,
            escalate_damage: false,
        },
    },
    EnchantmentOption {
        id: "plus2",
        label: "+2 Trait",
        suffix: "+2",
        cost: CostKey::Plus2Weapon,
        delta: StatDelta::TraitMod {
            bonus: 2,
            escalate_damage: false,
        },
    },
    EnchantmentOption {
        id: "plus2dmg",
        label: "+2 Trait, damage increase",
        suffix: "+2",
        cost: CostKey::Plus2WeaponDamage,
        delta: StatDelta::TraitMod {
            bonus: 2,
            escalate_damage: true,
        },
    },
];

/// Armor options.
pub const ARMOR_OPTIONS: &[EnchantmentOption] = &[
    EnchantmentOption {
        id: "plus1",
        label: "+1 Armor",
        suffix: "+1",
        cost: CostKey::Plus1Armor,
        delta: StatDelta::Armor {
            bonus: 1,
            lighter: false,
        },
    },
    EnchantmentOption {
        id: "plus2",
        label: "+2 Armor",
        suffix: "+2",
        cost: CostKey::Plus2Armor,
        delta: StatDelta::Armor {
            bonus: 2,
            lighter: false,
        },
    },
    EnchantmentOption {
        id: "plus2light",
        label: "+2 Armor, lower Min. Str",
        suffix: "+2 (Light)",
        cost: CostKey::Plus2ArmorLight,
        delta: StatDelta::Armor {
            bonus: 2,
            lighter: true,
        },
    },
];

/// Shield options.
pub const SHIELD_OPTIONS: &[EnchantmentOption] = &[
    EnchantmentOption {
        id: "plus1",
        label: "+1 Parry",
        suffix: "+1",
        cost: CostKey::Plus1Shield,
        delta: StatDelta::Parry {
            bonus: 1,
            lighter: false,
        },
    },
    EnchantmentOption {
        id: "plus1light",
        label: "+1 Parry, lower Min. Str",
        suffix: "+1 (Light)",
        cost: CostKey::Plus1ShieldLight,
        delta: StatDelta::Parry {
            bonus: 1,
            lighter: true,
        },
    },
];

/// Options offered for an item category. Categories without stat options
/// (powers, jewelry gear, consumables, skills) get an empty slice.
pub fn options_for(kind: ItemKind) -> &'static [EnchantmentOption] {
    match kind {
        ItemKind::Weapon => WEAPON_OPTIONS,
        ItemKind::Armor => ARMOR_OPTIONS,
        ItemKind::Shield => SHIELD_OPTIONS,
        _ => &[],
    }
}

/// Find an option by ID within a category.
pub fn find_option(kind: ItemKind, id: &str) -> Option<&'static EnchantmentOption> {
    options_for(kind).iter().find(|o| o.id == id)
}

/// Forms a piece of magic jewelry can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JewelryForm {
    /// A bracelet.
    Bracelet,
    /// A brooch.
    Brooch,
    /// An earring.
    Earring,
    /// A hairpin.
    Hairpin,
    /// A necklace.
    Necklace,
    /// A ring.
    Ring,
}

impl JewelryForm {
    /// Every form, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Bracelet,
        Self::Brooch,
        Self::Earring,
        Self::Hairpin,
        Self::Necklace,
        Self::Ring,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bracelet => "Bracelet",
            Self::Brooch => "Brooch",
            Self::Earring => "Earring",
            Self::Hairpin => "Hairpin",
            Self::Necklace => "Necklace",
            Self::Ring => "Ring",
        }
    }

    /// Parse a form name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name().to_lowercase() == lower)
    }
}

impl fmt::Display for JewelryForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
