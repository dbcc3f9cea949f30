use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub Uuid);

impl EffectId {
    /// Generate a new random effect ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EffectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The five core attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Nimbleness and dexterity.
    Agility,
    /// Raw intellect and perception.
    Smarts,
    /// Willpower and inner strength.
    Spirit,
    /// Physical power.
    Strength,
    /// Endurance and health.
    Vigor,
}

impl Attribute {
    /// All attributes in display order.
    pub const ALL: [Self; 5] = [
        Self::Agility,
        Self::Smarts,
        Self::Spirit,
        Self::Strength,
        Self::Vigor,
    ];

    /// Display name, e.g. "Agility".
    pub fn name(self) -> &'static str {
        match self {
            Self::Agility => "Agility",
            Self::Smarts => "Smarts",
            Self::Spirit => "Spirit",
            Self::Strength => "Strength",
            Self::Vigor => "Vigor",
        }
    }

    /// Field name in the actor's attribute block, e.g. "agility".
    pub fn field(self) -> &'static str {
        match self {
            Self::Agility => "agility",
            Self::Smarts => "smarts",
            Self::Spirit => "spirit",
            Self::Strength => "strength",
            Self::Vigor => "vigor",
        }
    }

    /// Match an exact display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The stat an effect change targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKey {
    /// The die sides of an attribute.
    AttributeDie(Attribute),
    /// The die sides of a named skill.
    SkillDie(String),
}

impl fmt::Display for EffectKey {
    /// Renders the host's change-key path.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeDie(attr) => {
                write!(f, "system.attributes.{}.die.sides", attr.field())
            }
            Self::SkillDie(skill) => write!(f, "@Skill{{{skill}}}[system.die.sides]"),
        }
    }
}

/// How a change combines with the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeMode {
    /// Multiply the base value.
    Multiply,
    /// Add to the base value.
    #[default]
    Add,
    /// Replace the base value.
    Override,
}

impl ChangeMode {
    /// The host's numeric mode code.
    pub fn code(self) -> u8 {
        match self {
            Self::Multiply => 1,
            Self::Add => 2,
            Self::Override => 5,
        }
    }
}

/// One stat change carried by an effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectChange {
    /// Target stat.
    pub key: EffectKey,
    /// Combination mode.
    pub mode: ChangeMode,
    /// Change amount.
    pub value: i32,
    /// Application order; higher applies later.
    pub priority: i32,
}

/// A permanent or temporary modifier attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Unique identifier.
    pub id: EffectId,
    /// Display name.
    pub name: String,
    /// Icon path, usually the owning item's image.
    #[serde(default)]
    pub icon: Option<String>,
    /// Stable reference to the document that created the effect.
    pub origin: String,
    /// Disabled effects are ignored.
    #[serde(default)]
    pub disabled: bool,
    /// Whether the effect transfers to the wearer while the item is equipped.
    #[serde(default)]
    pub transfer: bool,
    /// Pinned to the actor's favorites.
    #[serde(default)]
    pub favorite: bool,
    /// The stat changes.
    #[serde(default)]
    pub changes: Vec<EffectChange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup_is_exact() {
        assert_eq!(Attribute::from_name("Vigor"), Some(Attribute::Vigor));
        assert_eq!(Attribute::from_name("vigor"), None);
        assert_eq!(Attribute::from_name("Fighting"), None);
    }

    #[test]
    fn effect_key_paths() {
        assert_eq!(
            EffectKey::AttributeDie(Attribute::Smarts).to_string(),
            "system.attributes.smarts.die.sides"
        );
        assert_eq!(
            EffectKey::SkillDie("Fighting".into()).to_string(),
            "@Skill{Fighting}[system.die.sides]"
        );
    }

    #[test]
    fn add_mode_code() {
        assert_eq!(ChangeMode::default(), ChangeMode::Add);
        assert_eq!(ChangeMode::Add.code(), 2);
    }
}
