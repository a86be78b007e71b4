//! Resolving one use of a skill into a key attribute, modifiers, and a check.

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeSet};
use crate::dice::{RollFormula, resolve_dice_pool};
use crate::modifier::{Modifier, ModifierTotals, aggregate};
use crate::resources::craft::Craft;
use crate::skill::senses::{KeenSense, keen_sense_modifiers};
use crate::skill::{Skill, UseSpec};

/// Situational inputs that add modifiers to some uses.
///
/// Callers pass keen senses only for the Perception skill and a craft only
/// for the craft skill; the resolver applies whatever it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseContext<'a> {
    /// The character's sharpened senses.
    pub keen_senses: &'a [KeenSense],
    /// The craft being worked, if any.
    pub craft: Option<&'a Craft>,
}

/// Key attribute and merged modifier list for one use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedUse {
    /// Use name, or `None` for the general use.
    pub use_name: Option<String>,
    /// Attribute that sizes the pool.
    pub key_attribute: Attribute,
    /// Every modifier that applies, in merge order.
    pub modifiers: Vec<Modifier>,
}

impl ResolvedUse {
    /// Dice and numeric deltas of the merged modifiers.
    pub fn totals(&self) -> ModifierTotals {
        aggregate(&self.modifiers)
    }
}

/// Resolve a use of `skill`.
///
/// Key attribute: the custom use's own attribute, else the skill's override
/// for that default use, else the skill's key attribute. Default-use
/// overrides are matched by name case-insensitively.
///
/// Modifiers are additive: the skill's own, then the custom use's (with its
/// bonus as a flat modifier) or the default-use override list, then keen
/// senses and craft modifiers from `context`.
pub fn resolve_use(skill: &Skill, spec: UseSpec<'_>, context: &UseContext<'_>) -> ResolvedUse {
    let mut modifiers = skill.modifiers.clone();

    let key_attribute = match spec {
        UseSpec::General => skill.key_attribute,
        UseSpec::Default(name) => {
            if let Some(extra) = skill.use_modifier_override(name) {
                modifiers.extend_from_slice(extra);
            }
            skill
                .attribute_override(name)
                .unwrap_or(skill.key_attribute)
        }
        UseSpec::Custom(skill_use) => {
            modifiers.extend(skill_use.modifiers.iter().cloned());
            if skill_use.bonus != 0 {
                modifiers.push(Modifier::numeric(
                    format!("Bônus de {}", skill_use.name),
                    skill_use.bonus,
                ));
            }
            skill_use.key_attribute
        }
    };

    if let Some(name) = spec.name() {
        let senses = context.keen_senses;
        modifiers.extend(keen_sense_modifiers(name, senses));
    }
    if let Some(craft) = context.craft {
        modifiers.extend(craft.use_modifiers());
    }

    tracing::trace!(
        skill = %skill.name,
        use_name = spec.name().unwrap_or("geral"),
        %key_attribute,
        modifiers = modifiers.len(),
        "resolved skill use"
    );

    ResolvedUse {
        use_name: spec.name().map(str::to_string),
        key_attribute,
        modifiers,
    }
}

/// A fully evaluated skill check, ready for display or rolling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCheck {
    /// Skill name.
    pub skill: String,
    /// Use name, or `None` for the general use.
    pub use_name: Option<String>,
    /// Attribute that sized the pool.
    pub key_attribute: Attribute,
    /// Raw score of that attribute.
    pub attribute_value: i32,
    /// Merged modifiers.
    pub modifiers: Vec<Modifier>,
    /// Dice and numeric deltas of `modifiers`.
    pub totals: ModifierTotals,
    /// Signature-ability bonus (0 unless this is the signature skill).
    pub signature_bonus: i32,
    /// Bonus from the proficiency scale.
    pub proficiency_bonus: i32,
    /// The "Modificador Total": numeric delta plus signature and proficiency
    /// bonuses, saturating at the `i32` bounds.
    pub modifier_total: i32,
    /// Pool and flat total.
    pub formula: RollFormula,
    /// Formula as display text.
    pub text: String,
    /// False when a default use requires more proficiency than the skill has.
    pub available: bool,
}

impl SkillCheck {
    /// Evaluate a resolved use against the character's attributes.
    ///
    /// Dice-affecting modifiers only change the pool size; they never enter
    /// the modifier total.
    pub fn evaluate(
        skill: &Skill,
        resolved: ResolvedUse,
        attributes: &AttributeSet,
        signature_bonus: i32,
        proficiency_bonus: i32,
        available: bool,
    ) -> Self {
        let attribute_value = attributes.get(resolved.key_attribute);
        let totals = resolved.totals();
        let modifier_total = totals
            .numeric_delta
            .saturating_add(signature_bonus)
            .saturating_add(proficiency_bonus);
        let pool = resolve_dice_pool(attribute_value, totals.dice_delta);
        let formula = pool.with_numeric(modifier_total);

        Self {
            skill: skill.name.clone(),
            use_name: resolved.use_name,
            key_attribute: resolved.key_attribute,
            attribute_value,
            modifiers: resolved.modifiers,
            totals,
            signature_bonus,
            proficiency_bonus,
            modifier_total,
            text: formula.to_string(),
            formula,
            available,
        }
    }
}
