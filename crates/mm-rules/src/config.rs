//! Cost settings for magic item creation.
//!
//! Loaded once at startup and passed by reference into every rule entry
//! point. Each value is independently configurable; missing keys fall back
//! to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

/// Names one configurable cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostKey {
    /// +1 armor.
    Plus1Armor,
    /// +2 armor.
    Plus2Armor,
    /// +2 armor with reduced minimum strength.
    Plus2ArmorLight,
    /// +1 shield parry.
    Plus1Shield,
    /// +1 shield parry with reduced minimum strength.
    Plus1ShieldLight,
    /// +1 weapon trait.
    Plus1Weapon,
    /// +2 weapon trait.
    Plus2Weapon,
    /// +2 weapon trait with increased damage.
    Plus2WeaponDamage,
    /// Jewelry raising an attribute.
    Attribute,
    /// Jewelry raising a skill.
    Skill,
}

impl CostKey {
    /// Every cost key, in settings-menu order.
    pub const ALL: [Self; 10] = [
        Self::Plus1Armor,
        Self::Plus2Armor,
        Self::Plus2ArmorLight,
        Self::Plus1Shield,
        Self::Plus1ShieldLight,
        Self::Plus1Weapon,
        Self::Plus2Weapon,
        Self::Plus2WeaponDamage,
        Self::Attribute,
        Self::Skill,
    ];

    /// The persisted setting key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Plus1Armor => "plus1armor",
            Self::Plus2Armor => "plus2armor",
            Self::Plus2ArmorLight => "plus2armorLight",
            Self::Plus1Shield => "plus1shield",
            Self::Plus1ShieldLight => "plus1shieldLight",
            Self::Plus1Weapon => "plus1weapon",
            Self::Plus2Weapon => "plus2weapon",
            Self::Plus2WeaponDamage => "plus2weaponDamage",
            Self::Attribute => "attribute",
            Self::Skill => "skill",
        }
    }

    /// Short label shown in settings listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Plus1Armor => "+1 Armor",
            Self::Plus2Armor => "+2 Armor",
            Self::Plus2ArmorLight => "+2 Armor (light)",
            Self::Plus1Shield => "+1 Shield",
            Self::Plus1ShieldLight => "+1 Shield (light)",
            Self::Plus1Weapon => "+1 Weapon",
            Self::Plus2Weapon => "+2 Weapon",
            Self::Plus2WeaponDamage => "+2 Weapon +Damage",
            Self::Attribute => "Increased Attribute",
            Self::Skill => "Increased Skill",
        }
    }

    /// One-line explanation of the setting.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Plus1Armor => "Cost of +1 Armor magic bonus.",
            Self::Plus2Armor => "Cost of +2 Armor magic bonus.",
            Self::Plus2ArmorLight => "Cost of +2 Armor magic bonus, reduced Min. Strength.",
            Self::Plus1Shield => "Cost of +1 Shield magic parry bonus.",
            Self::Plus1ShieldLight => {
                "Cost of +1 Shield magic parry bonus, reduced Min. Strength."
            }
            Self::Plus1Weapon => "Cost of +1 magic weapon trait bonus.",
            Self::Plus2Weapon => "Cost of +2 magic weapon trait bonus.",
            Self::Plus2WeaponDamage => "Cost of +2 magic weapon bonus, increased damage.",
            Self::Attribute => "Cost of magic attribute increase.",
            Self::Skill => "Cost of magic skill increase.",
        }
    }
}

/// Configurable costs for every enchantment option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSettings {
    /// +1 armor.
    #[serde(rename = "plus1armor")]
    pub plus1_armor: u32,
    /// +2 armor.
    #[serde(rename = "plus2armor")]
    pub plus2_armor: u32,
    /// +2 armor, lighter.
    #[serde(rename = "plus2armorLight")]
    pub plus2_armor_light: u32,
    /// +1 shield.
    #[serde(rename = "plus1shield")]
    pub plus1_shield: u32,
    /// +1 shield, lighter.
    #[serde(rename = "plus1shieldLight")]
    pub plus1_shield_light: u32,
    /// +1 weapon.
    #[serde(rename = "plus1weapon")]
    pub plus1_weapon: u32,
    /// +2 weapon.
    #[serde(rename = "plus2weapon")]
    pub plus2_weapon: u32,
    /// +2 weapon, more damage.
    #[serde(rename = "plus2weaponDamage")]
    pub plus2_weapon_damage: u32,
    /// Attribute jewelry.
    pub attribute: u32,
    /// Skill jewelry.
    pub skill: u32,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            plus1_armor: 3000,
            plus2_armor: 6000,
            plus2_armor_light: 8000,
            plus1_shield: 3000,
            plus1_shield_light: 6000,
            plus1_weapon: 4000,
            plus2_weapon: 8000,
            plus2_weapon_damage: 10000,
            attribute: 16000,
            skill: 10000,
        }
    }
}

impl CostSettings {
    /// Look up a cost.
    pub fn cost(&self, key: CostKey) -> u32 {
        match key {
            CostKey::Plus1Armor => self.plus1_armor,
            CostKey::Plus2Armor => self.plus2_armor,
            CostKey::Plus2ArmorLight => self.plus2_armor_light,
            CostKey::Plus1Shield => self.plus1_shield,
            CostKey::Plus1ShieldLight => self.plus1_shield_light,
            CostKey::Plus1Weapon => self.plus1_weapon,
            CostKey::Plus2Weapon => self.plus2_weapon,
            CostKey::Plus2WeaponDamage => self.plus2_weapon_damage,
            CostKey::Attribute => self.attribute,
            CostKey::Skill => self.skill,
        }
    }

    /// Override one cost.
    pub fn with_cost(mut self, key: CostKey, value: u32) -> Self {
        let slot = match key {
            CostKey::Plus1Armor => &mut self.plus1_armor,
            CostKey::Plus2Armor => &mut self.plus2_armor,
            CostKey::Plus2ArmorLight => &mut self.plus2_armor_light,
            CostKey::Plus1Shield => &mut self.plus1_shield,
            CostKey::Plus1ShieldLight => &mut self.plus1_shield_light,
            CostKey::Plus1Weapon => &mut self.plus1_weapon,
            CostKey::Plus2Weapon => &mut self.plus2_weapon,
            CostKey::Plus2WeaponDamage => &mut self.plus2_weapon_damage,
            CostKey::Attribute => &mut self.attribute,
            CostKey::Skill => &mut self.skill,
        };
        *slot = value;
        self
    }

    /// Parse settings from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        serde_json::from_str(json).map_err(|e| RulesError::Config(e.to_string()))
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> RulesResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| RulesError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_price_table() {
        let cfg = CostSettings::default();
        assert_eq!(cfg.cost(CostKey::Plus1Armor), 3000);
        assert_eq!(cfg.cost(CostKey::Plus2ArmorLight), 8000);
        assert_eq!(cfg.cost(CostKey::Plus1ShieldLight), 6000);
        assert_eq!(cfg.cost(CostKey::Plus2WeaponDamage), 10000);
        assert_eq!(cfg.cost(CostKey::Attribute), 16000);
        assert_eq!(cfg.cost(CostKey::Skill), 10000);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = CostSettings::from_json(r#"{"plus1weapon": 2500, "skill": 7000}"#).unwrap();
        assert_eq!(cfg.plus1_weapon, 2500);
        assert_eq!(cfg.skill, 7000);
        assert_eq!(cfg.plus2_weapon, 8000);
    }

    #[test]
    fn negative_cost_rejected() {
        let err = CostSettings::from_json(r#"{"plus1armor": -5}"#).unwrap_err();
        assert!(matches!(err, RulesError::Config(_)));
    }

    #[test]
    fn with_cost_overrides_one_key() {
        let cfg = CostSettings::default().with_cost(CostKey::Plus1Shield, 1234);
        assert_eq!(cfg.cost(CostKey::Plus1Shield), 1234);
        assert_eq!(cfg.cost(CostKey::Plus1Armor), 3000);
    }

    #[test]
    fn keys_round_trip_through_json() {
        let json = serde_json::to_value(CostSettings::default()).unwrap();
        for key in CostKey::ALL {
            assert!(json.get(key.key()).is_some(), "missing {}", key.key());
        }
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CostSettings::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, RulesError::Config(_)));
    }
}
