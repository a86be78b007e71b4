//! Canonical roll-formula text.
//!
//! | pool                    | text              |
//! |-------------------------|-------------------|
//! | keep lowest             | `-2d20`           |
//! | one die                 | `1d20`            |
//! | n dice, keep highest    | `{n}d20 (maior)`  |
//!
//! A nonzero numeric total is appended as `+k` or `-k`. Zero is never shown.

use serde::{Deserialize, Serialize};

/// A complete, roll-ready check: pool plus flat addend.
///
/// This is the contract handed to anything that will actually roll dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollFormula {
    /// How many d20 are rolled.
    pub dice_count: i32,
    /// Keep the lowest die instead of the highest.
    pub take_lowest: bool,
    /// Flat number added to the kept die.
    pub numeric_total: i32,
}

impl std::fmt::Display for RollFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.take_lowest {
            write!(f, "-2d20")?;
        } else if self.dice_count <= 1 {
            write!(f, "1d20")?;
        } else {
            write!(f, "{}d20 (maior)", self.dice_count)?;
        }

        match self.numeric_total {
            0 => Ok(()),
            n if n > 0 => write!(f, "+{n}"),
            n => write!(f, "{n}"),
        }
    }
}

/// Render a pool and numeric total as display text.
pub fn format_roll(dice_count: i32, take_lowest: bool, numeric_total: i32) -> String {
    RollFormula {
        dice_count,
        take_lowest,
        numeric_total,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_lowest_text() {
        assert_eq!(format_roll(2, true, 0), "-2d20");
        assert_eq!(format_roll(5, true, 0), "-2d20");
        assert_eq!(format_roll(2, true, 3), "-2d20+3");
        assert_eq!(format_roll(2, true, -1), "-2d20-1");
    }

    #[test]
    fn single_die_has_no_suffix() {
        assert_eq!(format_roll(1, false, 0), "1d20");
        assert_eq!(format_roll(1, false, 4), "1d20+4");
    }

    #[test]
    fn multiple_dice_keep_highest() {
        assert_eq!(format_roll(2, false, 0), "2d20 (maior)");
        assert_eq!(format_roll(4, false, -2), "4d20 (maior)-2");
    }

    #[test]
    fn zero_total_is_never_printed() {
        for text in [
            format_roll(1, false, 0),
            format_roll(3, false, 0),
            format_roll(2, true, 0),
        ] {
            assert!(!text.contains("+0") && !text.contains("-0"), "{text}");
        }
    }

    #[test]
    fn serializes_for_roller() {
        let json = serde_json::to_value(RollFormula {
            dice_count: 3,
            take_lowest: false,
            numeric_total: 2,
        })
        .unwrap();
        assert_eq!(json["diceCount"], 3);
        assert_eq!(json["takeLowest"], false);
        assert_eq!(json["numericTotal"], 2);
    }
}
