//! Trait resolution for magic jewelry.
//!
//! A trait is either one of the five attributes or a skill name taken from
//! the compendium. Resolution only decides which effect key gets written;
//! it does not check that the wearer actually has the skill.

use std::collections::BTreeSet;

use mm_core::{
    Attribute, ChangeMode, DocumentStore, Effect, EffectChange, EffectId, EffectKey, Item,
};

use crate::error::RulesResult;

/// Die sides added by one die step.
pub const DIE_STEP_SIDES: i32 = 2;
/// Priority of jewelry trait changes.
pub const TRAIT_EFFECT_PRIORITY: i32 = 20;

/// What a trait name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraitTarget {
    /// One of the five attributes.
    Attribute(Attribute),
    /// Any other name, treated as a skill.
    Skill(String),
}

impl TraitTarget {
    /// The effect key raising this trait's die.
    pub fn effect_key(&self) -> EffectKey {
        match self {
            Self::Attribute(attr) => EffectKey::AttributeDie(*attr),
            Self::Skill(name) => EffectKey::SkillDie(name.clone()),
        }
    }

    /// Display name of the trait.
    pub fn name(&self) -> &str {
        match self {
            Self::Attribute(attr) => attr.name(),
            Self::Skill(name) => name,
        }
    }

    /// Returns true for attributes.
    pub fn is_attribute(&self) -> bool {
        matches!(self, Self::Attribute(_))
    }
}

/// Classify a trait name.
pub fn resolve(name: &str) -> TraitTarget {
    match Attribute::from_name(name) {
        Some(attr) => TraitTarget::Attribute(attr),
        None => TraitTarget::Skill(name.to_string()),
    }
}

/// Deduplicate and sort skill names.
pub fn sorted_skills<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::into)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Every selectable trait: attributes first, then skills deduplicated and
/// sorted.
pub fn trait_choices(store: &impl DocumentStore) -> RulesResult<Vec<String>> {
    let skills = sorted_skills(store.list_compendium_skill_names()?);
    Ok(Attribute::ALL
        .iter()
        .map(|a| a.name().to_string())
        .chain(skills)
        .collect())
}

/// The permanent +1 die-step effect for a piece of jewelry.
pub fn trait_effect(item: &Item, target: &TraitTarget) -> Effect {
    Effect {
        id: EffectId::new(),
        name: format!("{} Increase", target.name()),
        icon: item.img.clone(),
        origin: item.reference().to_string(),
        disabled: false,
        transfer: true,
        favorite: true,
        changes: vec![EffectChange {
            key: target.effect_key(),
            mode: ChangeMode::Add,
            value: DIE_STEP_SIDES,
            priority: TRAIT_EFFECT_PRIORITY,
        }],
    }
}
