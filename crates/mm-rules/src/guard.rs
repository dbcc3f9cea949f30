//! One-way enchantment markers.
//!
//! `is_magic` and `is_scroll` only ever move from false to true. Entry points
//! check the marker before asking for a choice and write the set marker in
//! the same versioned update as the new stats.

use mm_core::{Item, Markers};

use crate::error::{RulesError, RulesResult};

/// Returns true if the item has been made magic.
pub fn is_enchanted(item: &Item) -> bool {
    item.markers.is_magic
}

/// Returns true if the power has been turned into a scroll.
pub fn is_scrolled(item: &Item) -> bool {
    item.markers.is_scroll
}

/// The item's markers with `is_magic` set.
pub fn mark_enchanted(markers: Markers) -> Markers {
    Markers {
        is_magic: true,
        ..markers
    }
}

/// The item's markers with `is_scroll` set.
pub fn mark_scrolled(markers: Markers) -> Markers {
    Markers {
        is_scroll: true,
        ..markers
    }
}

/// Fail with [`RulesError::AlreadyEnchanted`] if the item is magic.
pub fn ensure_not_enchanted(item: &Item) -> RulesResult<()> {
    if is_enchanted(item) {
        return Err(RulesError::AlreadyEnchanted(item.name.clone()));
    }
    Ok(())
}

/// Fail with [`RulesError::AlreadyLinked`] if the power is a scroll.
pub fn ensure_not_scrolled(item: &Item) -> RulesResult<()> {
    if is_scrolled(item) {
        return Err(RulesError::AlreadyLinked(item.name.clone()));
    }
    Ok(())
}
