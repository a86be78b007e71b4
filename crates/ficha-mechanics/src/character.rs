//! The character snapshot and the mutations that keep it consistent.
//!
//! Calculators only read a [`Character`]. Edits that touch cross-entity
//! invariants (one worn armor, one signature skill, custom uses filed under
//! their own skill) go through the methods here.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeSet;
use crate::error::{MechError, MechResult};
use crate::modifier::Modifier;
use crate::resources::{
    Archetype, Craft, Defense, Equipment, PowerPoints, SpellPoints, SpellcastingAbility,
};
use crate::skill::{KeenSense, Skill, SkillUse};

fn default_level() -> u32 {
    1
}

/// A character's full mechanical state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Character name.
    pub name: String,
    /// Character level (1 or more).
    #[serde(default = "default_level")]
    pub level: u32,
    /// Attribute scores.
    #[serde(default)]
    pub attributes: AttributeSet,
    /// Configured skills.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Armor and shield.
    #[serde(default)]
    pub equipment: Equipment,
    /// Defense bonuses other than armor and shield.
    #[serde(default)]
    pub defense_bonuses: Vec<Modifier>,
    /// Power Point pool.
    #[serde(default)]
    pub power_points: PowerPoints,
    /// Spell point pool.
    #[serde(default)]
    pub spell_points: SpellPoints,
    /// Archetype levels.
    #[serde(default)]
    pub archetypes: Vec<Archetype>,
    /// Modifiers to the Power Points spendable per round.
    #[serde(default)]
    pub pp_limit_modifiers: Vec<Modifier>,
    /// Spellcasting abilities.
    #[serde(default)]
    pub spellcasting: Vec<SpellcastingAbility>,
    /// Crafts practiced.
    #[serde(default)]
    pub crafts: Vec<Craft>,
    /// Sharpened senses.
    #[serde(default)]
    pub keen_senses: Vec<KeenSense>,
}

impl Character {
    /// A blank character.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
            attributes: AttributeSet::default(),
            skills: Vec::new(),
            equipment: Equipment::default(),
            defense_bonuses: Vec::new(),
            power_points: PowerPoints::default(),
            spell_points: SpellPoints::default(),
            archetypes: Vec::new(),
            pp_limit_modifiers: Vec::new(),
            spellcasting: Vec::new(),
            crafts: Vec::new(),
            keen_senses: Vec::new(),
        }
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> MechResult<Self> {
        serde_json::from_str(json).map_err(|e| MechError::InvalidSnapshot(e.to_string()))
    }

    /// Set the attribute scores.
    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    /// Add a skill.
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Find a skill by name (case-insensitive).
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        let wanted = name.trim().to_lowercase();
        self.skills.iter().find(|s| s.name.to_lowercase() == wanted)
    }

    fn skill_mut(&mut self, name: &str) -> MechResult<&mut Skill> {
        let wanted = name.trim().to_lowercase();
        self.skills
            .iter_mut()
            .find(|s| s.name.to_lowercase() == wanted)
            .ok_or_else(|| MechError::UnknownSkill(name.to_string()))
    }

    /// The flagged signature skill, if any.
    pub fn signature_skill(&self) -> Option<&Skill> {
        self.skills.iter().find(|s| s.is_signature)
    }

    /// A craft by name (case-insensitive).
    pub fn craft(&self, name: &str) -> Option<&Craft> {
        let wanted = name.trim().to_lowercase();
        self.crafts.iter().find(|c| c.name.to_lowercase() == wanted)
    }

    /// Defense inputs from the worn armor, shield, and other bonuses.
    pub fn defense(&self) -> Defense {
        Defense::from_equipment(&self.equipment, &self.defense_bonuses)
    }

    /// Wear the named armor, taking off any other.
    pub fn equip_armor(&mut self, name: &str) -> MechResult<()> {
        let wanted = name.trim().to_lowercase();
        if !self
            .equipment
            .armors
            .iter()
            .any(|a| a.name.to_lowercase() == wanted)
        {
            return Err(MechError::UnknownArmor(name.to_string()));
        }
        for armor in &mut self.equipment.armors {
            armor.active = armor.name.to_lowercase() == wanted;
        }
        Ok(())
    }

    /// Take off all armor.
    pub fn unequip_armors(&mut self) {
        for armor in &mut self.equipment.armors {
            armor.active = false;
        }
    }

    /// Make the named skill the signature skill, clearing any other.
    pub fn set_signature_skill(&mut self, name: &str) -> MechResult<()> {
        self.skill_mut(name)?;
        let wanted = name.trim().to_lowercase();
        for skill in &mut self.skills {
            skill.is_signature = skill.name.to_lowercase() == wanted;
        }
        Ok(())
    }

    /// Remove the signature flag from every skill.
    pub fn clear_signature_skill(&mut self) {
        for skill in &mut self.skills {
            skill.is_signature = false;
        }
    }

    /// File a custom use under the skill it names.
    pub fn add_custom_use(&mut self, skill_use: SkillUse) -> MechResult<()> {
        let skill = self.skill_mut(&skill_use.skill_name)?;
        skill.custom_uses.push(skill_use);
        Ok(())
    }

    /// Remove a custom use by id, returning it.
    pub fn remove_custom_use(&mut self, id: &str) -> MechResult<SkillUse> {
        for skill in &mut self.skills {
            if let Some(index) = skill.custom_uses.iter().position(|u| u.id == id) {
                return Ok(skill.custom_uses.remove(index));
            }
        }
        Err(MechError::UnknownSkillUse(id.to_string()))
    }

    /// Every broken cross-entity invariant: more than one worn armor, more
    /// than one signature skill, then custom uses filed under the wrong skill.
    pub fn invariant_violations(&self) -> Vec<MechError> {
        let mut violations = Vec::new();

        let worn: Vec<String> = self
            .equipment
            .armors
            .iter()
            .filter(|a| a.active)
            .map(|a| a.name.clone())
            .collect();
        if worn.len() > 1 {
            violations.push(MechError::MultipleActiveArmors(worn));
        }

        let signatures: Vec<String> = self
            .skills
            .iter()
            .filter(|s| s.is_signature)
            .map(|s| s.name.clone())
            .collect();
        if signatures.len() > 1 {
            violations.push(MechError::MultipleSignatureSkills(signatures));
        }

        for skill in &self.skills {
            for skill_use in &skill.custom_uses {
                if skill_use.skill_name.to_lowercase() != skill.name.to_lowercase() {
                    violations.push(MechError::MisfiledSkillUse {
                        use_name: skill_use.name.clone(),
                        expected: skill_use.skill_name.clone(),
                        found: skill.name.clone(),
                    });
                }
            }
        }

        violations
    }

    /// Check the cross-entity invariants, returning the first violation.
    pub fn check_invariants(&self) -> MechResult<()> {
        match self.invariant_violations().into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}
