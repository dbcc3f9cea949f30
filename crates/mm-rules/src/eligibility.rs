//! Which items offer the "Make Magic" action, and which flow it runs.

use std::fmt;

use mm_core::{Actor, Item, ItemStats};

use crate::error::{RulesError, RulesResult};
use crate::guard;

/// Swid of gear that can become trait jewelry.
pub const JEWELRY_SWID: &str = "magic-jewelry";
/// Swid of a blank scroll consumable.
pub const SCROLL_SWID: &str = "scroll";

/// The enchantment flow an item runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicAction {
    /// Weapon stat options.
    Weapon,
    /// Armor stat options.
    Armor,
    /// Shield stat options.
    Shield,
    /// Jewelry form and trait.
    Jewelry,
    /// Scroll linking.
    Scroll,
}

impl fmt::Display for MagicAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Shield => "shield",
            Self::Jewelry => "jewelry",
            Self::Scroll => "scroll",
        };
        f.write_str(s)
    }
}

/// The flow for an item, judged on category and owner alone.
///
/// Markers are not checked here; entry points report those as
/// `AlreadyEnchanted` or `AlreadyLinked`.
pub fn action_for(item: &Item, owner: Option<&Actor>) -> RulesResult<MagicAction> {
    let ineligible = |reason: &str| RulesError::NotEligible {
        name: item.name.clone(),
        reason: reason.to_string(),
    };
    let Some(owner) = owner else {
        return Err(ineligible("it is not owned by an actor"));
    };
    if !owner.kind.can_make_magic() {
        return Err(ineligible(&format!("it belongs to a {}", owner.kind)));
    }
    match &item.stats {
        ItemStats::Weapon(_) => Ok(MagicAction::Weapon),
        ItemStats::Armor(_) => Ok(MagicAction::Armor),
        ItemStats::Shield(_) => Ok(MagicAction::Shield),
        ItemStats::Power(_) => Ok(MagicAction::Scroll),
        ItemStats::Gear(_) if item.swid == JEWELRY_SWID => Ok(MagicAction::Jewelry),
        ItemStats::Gear(_) => Err(ineligible("only magic jewelry gear can be enchanted")),
        _ => Err(ineligible(&format!("{} items cannot be enchanted", item.kind()))),
    }
}

/// Returns true if the item's sheet should show the action.
pub fn offers_make_magic(item: &Item, owner: Option<&Actor>) -> bool {
    match action_for(item, owner) {
        Ok(MagicAction::Scroll) => !guard::is_enchanted(item) && !guard::is_scrolled(item),
        Ok(_) => !guard::is_enchanted(item),
        Err(_) => false,
    }
}

/// Returns true for an uninscribed scroll consumable.
pub fn is_blank_scroll(item: &Item) -> bool {
    matches!(item.stats, ItemStats::Consumable(_))
        && item.swid == SCROLL_SWID
        && item.grants.is_empty()
}
