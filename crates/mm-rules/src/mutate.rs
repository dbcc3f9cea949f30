//! Stat mutation.
//!
//! Pure functions from an item snapshot and a chosen option to a successor
//! snapshot. Nothing here touches the document store.

use mm_core::{
    ArmorStats, DieStep, Effect, Item, ItemStats, ItemUpdate, Markers, ShieldStats, WeaponStats,
};

use crate::catalog::{EnchantmentOption, JewelryForm, StatDelta};
use crate::config::{CostKey, CostSettings};
use crate::damage;
use crate::error::{RulesError, RulesResult};
use crate::guard;
use crate::traits::{self, TraitTarget};

/// The state an item moves to after enchantment.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor {
    /// New display name.
    pub name: String,
    /// New price.
    pub price: u32,
    /// New stats.
    pub stats: ItemStats,
    /// New description, if it changes.
    pub description: Option<String>,
}

impl Successor {
    /// The store update committing this successor and the magic marker.
    pub fn into_update(self, markers: Markers) -> ItemUpdate {
        let mut update = ItemUpdate::new()
            .name(self.name)
            .price(self.price)
            .stats(self.stats)
            .markers(guard::mark_enchanted(markers));
        if let Some(description) = self.description {
            update = update.description(description);
        }
        update
    }
}

/// A jewelry enchantment: the item successor plus the effect to attach.
#[derive(Debug, Clone, PartialEq)]
pub struct JewelryEnchantment {
    /// Renamed, repriced item.
    pub successor: Successor,
    /// The +1 die-step effect.
    pub effect: Effect,
}

/// Apply a stat option to an item.
pub fn apply_option(
    item: &Item,
    option: &EnchantmentOption,
    settings: &CostSettings,
) -> RulesResult<Successor> {
    let cost = settings.cost(option.cost);
    let price = item.price.saturating_add(cost);

    let (stats, name) = match (&item.stats, option.delta) {
        (
            ItemStats::Weapon(weapon),
            StatDelta::TraitMod {
                bonus,
                escalate_damage,
            },
        ) => {
            let damage = if escalate_damage {
                damage::escalate(&weapon.damage)
            } else {
                weapon.damage.clone()
            };
            let name = if escalate_damage {
                format!(
                    "{} {} ({})",
                    item.name,
                    option.suffix,
                    damage::render_placeholders(&damage)
                )
            } else {
                format!("{} {}", item.name, option.suffix)
            };
            let stats = ItemStats::Weapon(WeaponStats {
                trait_mod: weapon.trait_mod.saturating_add(bonus),
                damage,
                min_str: weapon.min_str.clone(),
            });
            (stats, name)
        }
        (ItemStats::Armor(armor), StatDelta::Armor { bonus, lighter }) => {
            let min_str = if lighter {
                lighten(&armor.min_str)?
            } else {
                armor.min_str.clone()
            };
            let stats = ItemStats::Armor(ArmorStats {
                armor: armor.armor.saturating_add(bonus),
                min_str,
            });
            (stats, format!("{} {}", item.name, option.suffix))
        }
        (ItemStats::Shield(shield), StatDelta::Parry { bonus, lighter }) => {
            let min_str = if lighter {
                lighten(&shield.min_str)?
            } else {
                shield.min_str.clone()
            };
            let stats = ItemStats::Shield(ShieldStats {
                parry: shield.parry.saturating_add(bonus),
                min_str,
            });
            (stats, format!("{} {}", item.name, option.suffix))
        }
        _ => {
            return Err(RulesError::WrongCategory {
                expected: option.delta.category(),
                found: item.kind(),
            });
        }
    };

    Ok(Successor {
        name,
        price,
        stats,
        description: None,
    })
}

/// Lower a minimum-strength die one step, never below d4.
pub fn lighten(min_str: &str) -> RulesResult<String> {
    let die = DieStep::parse(min_str).ok_or_else(|| RulesError::MalformedStat {
        field: "minimum strength",
        value: min_str.to_string(),
    })?;
    Ok(die.step_down().to_string())
}

/// Turn a piece of gear into trait jewelry.
///
/// The price is replaced (not increased) by the attribute or skill cost.
pub fn enchant_jewelry(
    item: &Item,
    form: JewelryForm,
    target: &TraitTarget,
    settings: &CostSettings,
) -> RulesResult<JewelryEnchantment> {
    if !matches!(item.stats, ItemStats::Gear(_)) {
        return Err(RulesError::WrongCategory {
            expected: mm_core::ItemKind::Gear,
            found: item.kind(),
        });
    }
    let cost_key = if target.is_attribute() {
        CostKey::Attribute
    } else {
        CostKey::Skill
    };
    let trait_name = target.name();
    let successor = Successor {
        name: format!("{form} of {trait_name}"),
        price: settings.cost(cost_key),
        stats: item.stats.clone(),
        description: Some(format!(
            "<p>This piece of magic jewelry increases {trait_name} by one die step.</p>"
        )),
    };
    Ok(JewelryEnchantment {
        successor,
        effect: traits::trait_effect(item, target),
    })
}
