//! Spellcasting pools.
//!
//! `attribute + skill modifier + casting bonus`, floored at 0 and saturating
//! at `i32::MAX`. The skill
//! modifier is the resolved modifier total of the skill's spellcasting use
//! when the skill has one, otherwise of its general use. It is a flat pool
//! contribution, not a dice count.

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::skill::{Skill, SkillCheck, UseSpec};

/// A spellcasting tradition the character can cast from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingAbility {
    /// Ability name (e.g. "Magia Arcana").
    pub name: String,
    /// Attribute the pool is built on.
    pub attribute: Attribute,
    /// Skill whose modifier joins the pool.
    pub skill: String,
    /// Flat casting bonus.
    #[serde(default)]
    pub casting_bonus: i32,
}

/// Each term of a spellcasting pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingPool {
    /// Ability name.
    pub ability: String,
    /// Attribute the pool is built on.
    pub attribute: Attribute,
    /// Raw score of that attribute.
    pub attribute_value: i32,
    /// Skill consulted.
    pub skill: String,
    /// Use of the skill that was resolved, `None` for the general use.
    pub use_name: Option<String>,
    /// Resolved modifier total of the skill use.
    pub pool_contribution: i32,
    /// Flat casting bonus.
    pub casting_bonus: i32,
    /// Final pool, never negative.
    pub total: i32,
}

/// The use of `skill` consulted for spellcasting.
pub fn spellcasting_use<'a>(skill: &'a Skill, use_name: &str) -> UseSpec<'a> {
    match skill.custom_use(use_name) {
        Some(skill_use) => UseSpec::Custom(skill_use),
        None => UseSpec::General,
    }
}

/// Build the pool from the attribute score and the resolved skill check.
///
/// A missing skill contributes nothing.
pub fn calculate_casting_pool(
    ability: &SpellcastingAbility,
    attribute_value: i32,
    skill_check: Option<&SkillCheck>,
) -> SpellcastingPool {
    let pool_contribution = skill_check.map_or(0, |c| c.modifier_total);
    let total = attribute_value
        .saturating_add(pool_contribution)
        .saturating_add(ability.casting_bonus)
        .max(0);

    SpellcastingPool {
        ability: ability.name.clone(),
        attribute: ability.attribute,
        attribute_value,
        skill: ability.skill.clone(),
        use_name: skill_check.and_then(|c| c.use_name.clone()),
        pool_contribution,
        casting_bonus: ability.casting_bonus,
        total,
    }
}
