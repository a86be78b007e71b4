//! Craft checks.
//!
//! A craft check starts from a single die, adjustable by the craft's dice
//! modifier. Its flat bonus is the craft attribute times the tier
//! multiplier, plus the signature bonus when the craft skill is the
//! signature skill, plus the craft's own numeric modifier. The lowest die
//! is kept when the pool drops below one die or the attribute is 0.

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeSet};
use crate::dice::{RollFormula, TAKE_LOWEST_DICE};
use crate::modifier::Modifier;
use crate::proficiency::ProficiencyLevel;

/// Dice rolled for a craft check before modifiers.
pub const CRAFT_BASE_DICE: i32 = 1;

/// A craft the character practices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Craft {
    /// Craft name (e.g. "Ferraria").
    pub name: String,
    /// Attribute the craft works from.
    pub attribute_key: Attribute,
    /// Training tier in this craft.
    #[serde(default)]
    pub level: ProficiencyLevel,
    /// Dice added to or removed from the single base die.
    #[serde(default)]
    pub dice_modifier: i32,
    /// Flat modifier.
    #[serde(default)]
    pub numeric_modifier: i32,
}

impl Craft {
    /// A craft with no modifiers.
    pub fn new(name: impl Into<String>, attribute_key: Attribute, level: ProficiencyLevel) -> Self {
        Self {
            name: name.into(),
            attribute_key,
            level,
            dice_modifier: 0,
            numeric_modifier: 0,
        }
    }

    /// Set the dice modifier.
    pub fn with_dice_modifier(mut self, dice: i32) -> Self {
        self.dice_modifier = dice;
        self
    }

    /// Set the numeric modifier.
    pub fn with_numeric_modifier(mut self, value: i32) -> Self {
        self.numeric_modifier = value;
        self
    }

    /// The craft's modifiers as they apply to uses of the craft skill.
    pub fn use_modifiers(&self) -> Vec<Modifier> {
        let name = format!("Ofício: {}", self.name);
        let mut modifiers = Vec::new();
        if self.dice_modifier != 0 {
            modifiers.push(Modifier::dice(name.clone(), self.dice_modifier));
        }
        if self.numeric_modifier != 0 {
            modifiers.push(Modifier::numeric(name, self.numeric_modifier));
        }
        modifiers
    }
}

/// Each term of a craft check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftCheck {
    /// Craft name.
    pub craft: String,
    /// Attribute the craft works from.
    pub attribute_key: Attribute,
    /// Raw score of that attribute.
    pub attribute_value: i32,
    /// Tier multiplier applied to the attribute.
    pub multiplier: i32,
    /// Signature bonus (0 unless the craft skill is the signature skill).
    pub signature_bonus: i32,
    /// The craft's numeric modifier.
    pub numeric_modifier: i32,
    /// Base die plus the dice modifier, before the keep-lowest rule.
    pub effective_dice: i32,
    /// Pool and flat bonus.
    pub formula: RollFormula,
    /// Formula as display text.
    pub text: String,
}

/// Evaluate a craft check. Dice and flat sums saturate at the `i32` bounds.
pub fn calculate_craft_check(
    craft: &Craft,
    attributes: &AttributeSet,
    multiplier: i32,
    signature_bonus: i32,
) -> CraftCheck {
    let attribute_value = attributes.get(craft.attribute_key);
    let effective_dice = CRAFT_BASE_DICE.saturating_add(craft.dice_modifier);
    let take_lowest = effective_dice < 1 || attribute_value == 0;
    let numeric_total = attribute_value
        .saturating_mul(multiplier)
        .saturating_add(signature_bonus)
        .saturating_add(craft.numeric_modifier);
    let dice_count = if take_lowest {
        TAKE_LOWEST_DICE
    } else {
        effective_dice
    };

    let formula = RollFormula {
        dice_count,
        take_lowest,
        numeric_total,
    };

    CraftCheck {
        craft: craft.name.clone(),
        attribute_key: craft.attribute_key,
        attribute_value,
        multiplier,
        signature_bonus,
        numeric_modifier: craft.numeric_modifier,
        effective_dice,
        text: formula.to_string(),
        formula,
    }
}
