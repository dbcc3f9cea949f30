//! Stepped dice.
//!
//! Traits, minimum-strength requirements and damage terms share one
//! sequence: d4, d6, d8, d10, d12, then d12+1, d12+2 and so on. A die step
//! is two sides; past d12 each step adds a flat +1 instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Smallest die in the stepped sequence.
pub const MIN_SIDES: u32 = 4;
/// Largest die before steps turn into flat bonuses.
pub const MAX_SIDES: u32 = 12;

/// One step on the die ladder, e.g. `d8` or `d12+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DieStep {
    sides: u32,
    bonus: u32,
}

impl DieStep {
    /// A four-sided die.
    pub const D4: Self = Self::new(4);
    /// A six-sided die.
    pub const D6: Self = Self::new(6);
    /// An eight-sided die.
    pub const D8: Self = Self::new(8);
    /// A ten-sided die.
    pub const D10: Self = Self::new(10);
    /// A twelve-sided die.
    pub const D12: Self = Self::new(12);

    /// A plain die with the given number of sides.
    pub const fn new(sides: u32) -> Self {
        Self { sides, bonus: 0 }
    }

    /// A die with a flat bonus, e.g. `d12+1`.
    pub const fn with_bonus(sides: u32, bonus: u32) -> Self {
        Self { sides, bonus }
    }

    /// Returns the number of sides.
    pub fn sides(self) -> u32 {
        self.sides
    }

    /// Returns the flat bonus (non-zero only past d12).
    pub fn bonus(self) -> u32 {
        self.bonus
    }

    /// Parse die notation: `d8`, `D10`, `d12+1`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let rest = s.strip_prefix('d').or_else(|| s.strip_prefix('D'))?;
        let (sides, bonus) = match rest.split_once('+') {
            Some((sides, bonus)) => (sides, Some(bonus)),
            None => (rest, None),
        };
        if sides.is_empty() || !sides.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let sides = sides.parse::<u32>().ok()?;
        if sides < 2 {
            return None;
        }
        let bonus = match bonus {
            Some(b) if !b.is_empty() && b.bytes().all(|c| c.is_ascii_digit()) => {
                b.parse::<u32>().ok()?
            }
            Some(_) => return None,
            None => 0,
        };
        Some(Self { sides, bonus })
    }

    /// One step up the ladder: `d8 → d10`, `d12 → d12+1`, `d12+1 → d12+2`.
    pub fn step_up(self) -> Self {
        if self.bonus > 0 || self.sides == MAX_SIDES {
            Self {
                sides: self.sides,
                bonus: self.bonus.saturating_add(1),
            }
        } else {
            Self {
                sides: self.sides.saturating_add(2),
                bonus: 0,
            }
        }
    }

    /// One step down the ladder, never below d4: `d8 → d6`, `d4 → d4`,
    /// `d12+1 → d12`.
    pub fn step_down(self) -> Self {
        if self.bonus > 0 {
            return Self {
                sides: self.sides,
                bonus: self.bonus - 1,
            };
        }
        if self.sides <= MIN_SIDES {
            return self;
        }
        Self::new(self.sides.saturating_sub(2).max(MIN_SIDES))
    }
}

impl fmt::Display for DieStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bonus > 0 {
            write!(f, "d{}+{}", self.sides, self.bonus)
        } else {
            write!(f, "d{}", self.sides)
        }
    }
}

impl FromStr for DieStep {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::MalformedDie(s.to_string()))
    }
}

impl TryFrom<String> for DieStep {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DieStep> for String {
    fn from(die: DieStep) -> Self {
        die.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_plain_dice() {
        assert_eq!(DieStep::parse("d4"), Some(DieStep::D4));
        assert_eq!(DieStep::parse("D10"), Some(DieStep::D10));
        assert_eq!(DieStep::parse(" d8 "), Some(DieStep::D8));
    }

    #[test]
    fn parse_bonus_dice() {
        assert_eq!(DieStep::parse("d12+1"), Some(DieStep::with_bonus(12, 1)));
        assert_eq!(DieStep::parse("d12+"), None);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(DieStep::parse(""), None);
        assert_eq!(DieStep::parse("8"), None);
        assert_eq!(DieStep::parse("d"), None);
        assert_eq!(DieStep::parse("d1"), None);
        assert_eq!(DieStep::parse("dx"), None);
        assert_eq!(DieStep::parse("d-6"), None);
        assert!("strong".parse::<DieStep>().is_err());
    }

    #[test]
    fn step_down_floors_at_d4() {
        assert_eq!(DieStep::D8.step_down(), DieStep::D6);
        assert_eq!(DieStep::D6.step_down(), DieStep::D4);
        assert_eq!(DieStep::D4.step_down(), DieStep::D4);
        assert_eq!(DieStep::with_bonus(12, 1).step_down(), DieStep::D12);
    }

    #[test]
    fn step_up_past_d12_adds_bonus() {
        assert_eq!(DieStep::D10.step_up(), DieStep::D12);
        assert_eq!(DieStep::D12.step_up(), DieStep::with_bonus(12, 1));
        assert_eq!(
            DieStep::with_bonus(12, 1).step_up(),
            DieStep::with_bonus(12, 2)
        );
    }

    #[test]
    fn display_round_trips_through_serde() {
        let die = DieStep::with_bonus(12, 2);
        assert_eq!(die.to_string(), "d12+2");
        let json = serde_json::to_string(&die).unwrap();
        assert_eq!(json, "\"d12+2\"");
        let back: DieStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, die);
        assert!(serde_json::from_str::<DieStep>("\"huge\"").is_err());
    }

    proptest! {
        #[test]
        fn step_down_never_below_d4(half in 2u32..20) {
            let die = DieStep::new(half * 2);
            let down = die.step_down();
            prop_assert!(down.sides() >= MIN_SIDES);
            prop_assert_eq!(down.sides(), (die.sides() - 2).max(MIN_SIDES));
        }

        #[test]
        fn step_up_then_down_is_identity(half in 2u32..6, bonus in 0u32..4) {
            let die = if bonus > 0 {
                DieStep::with_bonus(MAX_SIDES, bonus)
            } else {
                DieStep::new(half * 2)
            };
            prop_assert_eq!(die.step_up().step_down(), die);
        }
    }
}
