//! Defense total.
//!
//! `base + effective agility + armor + shield + other bonuses`, where the
//! active armor may cap how much Agilidade counts.

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::modifier::{Modifier, sum_values};

/// A piece of armor the character owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Armor {
    /// Armor name.
    pub name: String,
    /// Defense granted while worn.
    #[serde(default)]
    pub armor_bonus: i32,
    /// Cap on the Agilidade that counts toward Defense, if any.
    #[serde(default)]
    pub max_agility_bonus: Option<i32>,
    /// Whether this is the armor being worn.
    #[serde(default)]
    pub active: bool,
}

impl Armor {
    /// An unworn armor without an agility cap.
    pub fn new(name: impl Into<String>, armor_bonus: i32) -> Self {
        Self {
            name: name.into(),
            armor_bonus,
            max_agility_bonus: None,
            active: false,
        }
    }

    /// Set the agility cap.
    pub fn with_max_agility(mut self, cap: i32) -> Self {
        self.max_agility_bonus = Some(cap);
        self
    }

    /// Mark as worn.
    pub fn worn(mut self) -> Self {
        self.active = true;
        self
    }
}

/// Armor and shield carried by a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Equipment {
    /// Every armor owned; at most one is active.
    pub armors: Vec<Armor>,
    /// Defense from the shield in hand.
    pub shield_bonus: i32,
}

impl Equipment {
    /// The worn armor, if any.
    pub fn active_armor(&self) -> Option<&Armor> {
        self.armors.iter().find(|a| a.active)
    }
}

/// The inputs of a Defense calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Defense {
    /// Bonus of the worn armor.
    pub armor_bonus: i32,
    /// Shield bonus.
    pub shield_bonus: i32,
    /// Agility cap of the worn armor.
    pub max_agility_bonus: Option<i32>,
    /// Any other bonuses.
    pub other_bonuses: Vec<Modifier>,
}

impl Defense {
    /// Build from equipment: armor values come from the active armor only.
    pub fn from_equipment(equipment: &Equipment, other_bonuses: &[Modifier]) -> Self {
        let armor = equipment.active_armor();
        Self {
            armor_bonus: armor.map_or(0, |a| a.armor_bonus),
            shield_bonus: equipment.shield_bonus,
            max_agility_bonus: armor.and_then(|a| a.max_agility_bonus),
            other_bonuses: other_bonuses.to_vec(),
        }
    }
}

/// Each term of a Defense total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseBreakdown {
    /// Fixed base.
    pub base: i32,
    /// Agilidade after the armor cap.
    pub effective_agility: i32,
    /// Armor bonus.
    pub armor_bonus: i32,
    /// Shield bonus.
    pub shield_bonus: i32,
    /// Sum of other bonuses.
    pub other_bonuses: i32,
    /// Final Defense.
    pub total: i32,
}

/// Calculate Defense from Agilidade and the Defense inputs.
///
/// The total saturates at the `i32` bounds.
pub fn calculate_defense(
    agilidade: i32,
    defense: &Defense,
    config: &RulesConfig,
) -> DefenseBreakdown {
    let effective_agility = match defense.max_agility_bonus {
        Some(cap) => agilidade.min(cap),
        None => agilidade,
    };
    let other_bonuses = sum_values(&defense.other_bonuses);
    let total = config
        .defense_base
        .saturating_add(effective_agility)
        .saturating_add(defense.armor_bonus)
        .saturating_add(defense.shield_bonus)
        .saturating_add(other_bonuses);

    DefenseBreakdown {
        base: config.defense_base,
        effective_agility,
        armor_bonus: defense.armor_bonus,
        shield_bonus: defense.shield_bonus,
        other_bonuses,
        total,
    }
}
