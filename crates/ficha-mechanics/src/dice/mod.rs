//! Attribute dice pools.
//!
//! Every check rolls d20s. The pool size comes from the key attribute plus
//! any dice-affecting modifiers and the highest die is kept. An attribute
//! of exactly 0 inverts the rule: roll two dice and keep the lowest.

pub mod formula;

pub use formula::{RollFormula, format_roll};

use serde::{Deserialize, Serialize};

/// Number of dice rolled when the lowest die is kept.
pub const TAKE_LOWEST_DICE: i32 = 2;

/// A resolved dice pool, before any numeric modifier is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DicePool {
    /// How many d20 are rolled.
    pub dice_count: i32,
    /// Keep the lowest die instead of the highest.
    pub take_lowest: bool,
}

impl DicePool {
    /// Attach a flat numeric total, producing a displayable formula.
    pub fn with_numeric(self, numeric_total: i32) -> RollFormula {
        RollFormula {
            dice_count: self.dice_count,
            take_lowest: self.take_lowest,
            numeric_total,
        }
    }
}

/// Resolve the pool for an attribute score and a dice delta.
///
/// `take_lowest` is decided by the raw attribute alone. While it is active,
/// dice modifiers are inert and the pool is always two dice. Otherwise the
/// count is `max(attribute, 0) + dice_delta`, never fewer than one die and
/// saturating at `i32::MAX`.
pub fn resolve_dice_pool(attribute_value: i32, dice_delta: i32) -> DicePool {
    if attribute_value == 0 {
        return DicePool {
            dice_count: TAKE_LOWEST_DICE,
            take_lowest: true,
        };
    }

    let dice_count = attribute_value.max(0).saturating_add(dice_delta).max(1);
    DicePool {
        dice_count,
        take_lowest: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_attribute_takes_lowest() {
        let pool = resolve_dice_pool(0, 0);
        assert!(pool.take_lowest);
        assert_eq!(pool.dice_count, 2);
    }

    #[test]
    fn zero_attribute_ignores_added_dice() {
        for delta in [-2, 1, 3, 10] {
            let pool = resolve_dice_pool(0, delta);
            assert!(pool.take_lowest, "delta {delta}");
            assert_eq!(pool.dice_count, TAKE_LOWEST_DICE, "delta {delta}");
        }
    }

    #[test]
    fn positive_attribute_adds_delta() {
        let expected = DicePool {
            dice_count: 4,
            take_lowest: false,
        };
        assert_eq!(resolve_dice_pool(3, 1), expected);
        assert_eq!(resolve_dice_pool(3, -1).dice_count, 2);
    }

    #[test]
    fn reduced_pool_keeps_one_die() {
        let pool = resolve_dice_pool(1, -3);
        assert!(!pool.take_lowest);
        assert_eq!(pool.dice_count, 1);
    }

    #[test]
    fn take_lowest_comes_from_raw_attribute_only() {
        // A positive attribute reduced to nothing still keeps the highest.
        assert!(!resolve_dice_pool(2, -5).take_lowest);
    }

    #[test]
    fn extreme_values_saturate() {
        assert_eq!(resolve_dice_pool(i32::MAX, 1).dice_count, i32::MAX);
        assert_eq!(resolve_dice_pool(i32::MAX, i32::MAX).dice_count, i32::MAX);
        assert_eq!(resolve_dice_pool(i32::MIN, i32::MIN).dice_count, 1);
        assert_eq!(resolve_dice_pool(5, i32::MIN).dice_count, 1);
    }

    #[test]
    fn with_numeric_builds_formula() {
        let formula = resolve_dice_pool(2, 0).with_numeric(3);
        assert_eq!(formula.to_string(), "2d20 (maior)+3");
    }
}
