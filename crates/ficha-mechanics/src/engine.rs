//! The sheet engine: one entry point for every derived value.
//!
//! A [`SheetEngine`] bundles the rules config, the skill catalog, and the
//! proficiency scale. It holds no per-character state; every method takes a
//! snapshot and returns fresh results, so one engine can serve any number
//! of callers concurrently.

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeSet};
use crate::character::Character;
use crate::config::RulesConfig;
use crate::error::{MechError, MechResult};
use crate::proficiency::{ProficiencyLevel, ProficiencyScale, SheetScale, signature_bonus};
use crate::resources::spellcasting::spellcasting_use;
use crate::resources::{
    CraftCheck, DefenseBreakdown, PowerPointMax, SpellcastingPool, Track, calculate_casting_pool,
    calculate_craft_check, calculate_defense, calculate_power_points_max, calculate_pp_per_round,
};
use crate::skill::{KeenSense, Skill, SkillCatalog, SkillCheck, UseContext, UseSpec, resolve_use};
use crate::validate::{ValidationIssue, validate_character};

/// Rules, catalog, and proficiency scale used to evaluate characters.
#[derive(Debug)]
pub struct SheetEngine {
    config: RulesConfig,
    catalog: SkillCatalog,
    scale: Box<dyn ProficiencyScale>,
}

impl Default for SheetEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetEngine {
    /// Default rules, the built-in catalog, and the sheet's proficiency scale.
    pub fn new() -> Self {
        Self {
            config: RulesConfig::default(),
            catalog: SkillCatalog::builtin(),
            scale: Box::new(SheetScale),
        }
    }

    /// Replace the rules config.
    pub fn with_config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the skill catalog.
    pub fn with_catalog(mut self, catalog: SkillCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the proficiency scale.
    pub fn with_scale(mut self, scale: impl ProficiencyScale + 'static) -> Self {
        self.scale = Box::new(scale);
        self
    }

    /// The rules config in use.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// The skill catalog in use.
    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    fn is_skill(&self, skill: &Skill, configured: &str) -> bool {
        skill.name.to_lowercase() == configured.to_lowercase()
    }

    /// Signature bonus for `skill`, 0 unless it is flagged.
    pub fn signature_bonus_for(&self, character: &Character, skill: &Skill) -> i32 {
        if skill.is_signature {
            signature_bonus(character.level, self.catalog.is_combat(&skill.name))
        } else {
            0
        }
    }

    /// Evaluate one use of one skill.
    ///
    /// `craft` names the craft being worked when `skill` is the craft skill;
    /// it is ignored for other skills.
    pub fn check_use(
        &self,
        character: &Character,
        skill: &Skill,
        spec: UseSpec<'_>,
        craft: Option<&str>,
    ) -> SkillCheck {
        let keen_senses: &[KeenSense] = if self.is_skill(skill, &self.config.perception_skill) {
            &character.keen_senses
        } else {
            &[]
        };
        let craft = if self.is_skill(skill, &self.config.craft_skill) {
            craft.and_then(|name| character.craft(name))
        } else {
            None
        };
        let context = UseContext { keen_senses, craft };

        let available = match spec {
            UseSpec::Default(name) => self.catalog.is_available(skill, name),
            UseSpec::General | UseSpec::Custom(_) => true,
        };

        let resolved = resolve_use(skill, spec, &context);
        SkillCheck::evaluate(
            skill,
            resolved,
            &character.attributes,
            self.signature_bonus_for(character, skill),
            self.scale.skill_bonus(skill.proficiency_level),
            available,
        )
    }

    /// Evaluate a skill use by name.
    ///
    /// The use is looked up among the skill's custom uses first, then the
    /// catalog's default uses and the skill's own override keys.
    pub fn skill_check(
        &self,
        character: &Character,
        skill_name: &str,
        use_name: Option<&str>,
        craft: Option<&str>,
    ) -> MechResult<SkillCheck> {
        let skill = character
            .skill(skill_name)
            .ok_or_else(|| MechError::UnknownSkill(skill_name.to_string()))?;

        let spec = match use_name {
            None => UseSpec::General,
            Some(name) => {
                if let Some(custom) = skill.custom_use(name) {
                    UseSpec::Custom(custom)
                } else if let Some(default) = self.catalog.find(&skill.name, name) {
                    UseSpec::Default(&default.name)
                } else if skill.has_override_for(name) {
                    UseSpec::Default(name)
                } else {
                    return Err(MechError::UnknownSkillUse(name.to_string()));
                }
            }
        };

        Ok(self.check_use(character, skill, spec, craft))
    }

    /// Every use of a skill: general, then catalog defaults, then custom.
    pub fn all_uses(&self, character: &Character, skill: &Skill) -> Vec<SkillCheck> {
        let mut checks = vec![self.check_use(character, skill, UseSpec::General, None)];
        for default_use in self.catalog.default_uses(&skill.name) {
            let spec = UseSpec::Default(&default_use.name);
            checks.push(self.check_use(character, skill, spec, None));
        }
        for custom_use in &skill.custom_uses {
            let spec = UseSpec::Custom(custom_use);
            checks.push(self.check_use(character, skill, spec, None));
        }
        checks
    }

    /// Defense total.
    pub fn defense(&self, character: &Character) -> DefenseBreakdown {
        calculate_defense(
            character.attributes.agilidade,
            &character.defense(),
            &self.config,
        )
    }

    /// Power Point maximum.
    pub fn power_points_max(&self, character: &Character) -> PowerPointMax {
        calculate_power_points_max(
            &character.archetypes,
            character.attributes.essencia,
            &character.power_points.max_modifiers,
            &self.config,
        )
    }

    /// Power Points spendable per round.
    pub fn pp_per_round(&self, character: &Character) -> i32 {
        calculate_pp_per_round(
            character.level,
            character.attributes.essencia,
            &character.pp_limit_modifiers,
        )
    }

    /// One pool per spellcasting ability.
    pub fn spellcasting_pools(&self, character: &Character) -> Vec<SpellcastingPool> {
        character
            .spellcasting
            .iter()
            .map(|ability| {
                let check = character.skill(&ability.skill).map(|skill| {
                    let spec = spellcasting_use(skill, &self.config.spellcasting_use);
                    self.check_use(character, skill, spec, None)
                });
                calculate_casting_pool(
                    ability,
                    character.attributes.get(ability.attribute),
                    check.as_ref(),
                )
            })
            .collect()
    }

    /// One check per craft.
    pub fn craft_checks(&self, character: &Character) -> Vec<CraftCheck> {
        let signature = character
            .skill(&self.config.craft_skill)
            .map_or(0, |skill| self.signature_bonus_for(character, skill));

        character
            .crafts
            .iter()
            .map(|craft| {
                calculate_craft_check(
                    craft,
                    &character.attributes,
                    self.scale.craft_multiplier(craft.level),
                    signature,
                )
            })
            .collect()
    }

    /// Validate a snapshot against this engine's catalog.
    pub fn validate(&self, character: &Character) -> Vec<ValidationIssue> {
        validate_character(character, &self.catalog)
    }

    /// Evaluate every derived value of a character.
    pub fn derive_sheet(&self, character: &Character) -> DerivedSheet {
        let power_points_max = self.power_points_max(character);
        let skills: Vec<SkillSheet> = character
            .skills
            .iter()
            .map(|skill| SkillSheet {
                name: skill.name.clone(),
                proficiency: skill.proficiency_level,
                is_signature: skill.is_signature,
                is_combat: self.catalog.is_combat(&skill.name),
                uses: self.all_uses(character, skill),
            })
            .collect();

        let sheet = DerivedSheet {
            name: character.name.clone(),
            level: character.level,
            attributes: AttributeLine::for_set(&character.attributes, &self.config),
            defense: self.defense(character),
            power_point_track: Track::power_points(&character.power_points, power_points_max.total),
            spell_point_track: Track::spell_points(&character.spell_points),
            power_points_max,
            pp_per_round: self.pp_per_round(character),
            carry_capacity: character.attributes.carry_capacity(&self.config),
            dying_rounds: character.attributes.dying_rounds(&self.config),
            skills,
            spellcasting: self.spellcasting_pools(character),
            crafts: self.craft_checks(character),
        };

        tracing::debug!(
            character = %sheet.name,
            defense = sheet.defense.total,
            pp_max = sheet.power_points_max.total,
            skills = sheet.skills.len(),
            "derived sheet"
        );
        sheet
    }
}

/// One attribute as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeLine {
    /// The attribute.
    pub attribute: Attribute,
    /// Its score.
    pub value: i32,
    /// Above the display cap.
    pub special: bool,
}

impl AttributeLine {
    fn for_set(attributes: &AttributeSet, config: &RulesConfig) -> Vec<Self> {
        attributes
            .iter()
            .map(|(attribute, value)| Self {
                attribute,
                value,
                special: attributes.is_special(attribute, config),
            })
            .collect()
    }
}

/// Every use of one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSheet {
    /// Skill name.
    pub name: String,
    /// Training tier.
    pub proficiency: ProficiencyLevel,
    /// Signature skill flag.
    pub is_signature: bool,
    /// Combat skill flag.
    pub is_combat: bool,
    /// General use first, then default uses, then custom uses.
    pub uses: Vec<SkillCheck>,
}

/// Every derived value of a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedSheet {
    /// Character name.
    pub name: String,
    /// Character level.
    pub level: u32,
    /// Attribute scores with the special flag.
    pub attributes: Vec<AttributeLine>,
    /// Defense breakdown.
    pub defense: DefenseBreakdown,
    /// Power Point maximum breakdown.
    pub power_points_max: PowerPointMax,
    /// Power Points against the calculated maximum.
    pub power_point_track: Track,
    /// Spell points.
    pub spell_point_track: Track,
    /// Power Points spendable per round.
    pub pp_per_round: i32,
    /// Carrying capacity.
    pub carry_capacity: i32,
    /// Rounds survived while dying.
    pub dying_rounds: i32,
    /// Skills with every use resolved.
    pub skills: Vec<SkillSheet>,
    /// Spellcasting pools.
    pub spellcasting: Vec<SpellcastingPool>,
    /// Craft checks.
    pub crafts: Vec<CraftCheck>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::Modifier;
    use crate::proficiency::TableScale;
    use crate::resources::{Archetype, Armor, Craft, SpellcastingAbility};
    use crate::skill::{Sense, SkillUse};

    fn ranger() -> Character {
        let mut c = Character::new("Tainá", 9).with_attributes(AttributeSet {
            agilidade: 3,
            corpo: 3,
            influencia: 1,
            mente: 2,
            essencia: 2,
            instinto: 4,
        });
        c.skills = vec![
            Skill::new("Percepção", Attribute::Instinto)
                .with_proficiency(ProficiencyLevel::Adepto)
                .with_attribute_override("Procurar", Attribute::Mente)
                .signature(),
            Skill::new("Pontaria", Attribute::Agilidade)
                .with_modifier(Modifier::dice("Arco longo", 1)),
            Skill::new("Medicina", Attribute::Mente),
            Skill::new("Ofício", Attribute::Mente),
            Skill::new("Arcanismo", Attribute::Essencia).with_custom_use(
                SkillUse::new("u1", "Conjurar Feitiço", "Arcanismo", Attribute::Essencia)
                    .with_bonus(1),
            ),
        ];
        c.keen_senses = vec![KeenSense {
            sense: Sense::Audicao,
            value: 2,
            affects_dice: false,
        }];
        c.equipment.armors = vec![Armor::new("Couro Batido", 4).with_max_agility(2).worn()];
        c.equipment.shield_bonus = 1;
        c.defense_bonuses = vec![Modifier::numeric("Amuleto", 2)];
        c.archetypes = vec![Archetype {
            name: "batedor".to_string(),
            label: "Batedor".to_string(),
            level: 9,
            base_per_level: 1,
        }];
        let arcos = Craft::new("Arcos", Attribute::Agilidade, ProficiencyLevel::Versado);
        c.crafts = vec![arcos.with_dice_modifier(1)];
        c.spellcasting = vec![SpellcastingAbility {
            name: "Magia Natural".to_string(),
            attribute: Attribute::Essencia,
            skill: "Arcanismo".to_string(),
            casting_bonus: 0,
        }];
        c
    }

    #[test]
    fn signature_bonus_enters_total() {
        let engine = SheetEngine::new();
        let c = ranger();
        let check = engine.skill_check(&c, "Percepção", None, None).unwrap();
        assert_eq!(check.signature_bonus, 9);
        assert_eq!(check.text, "4d20 (maior)+9");
    }

    #[test]
    fn keen_sense_on_perception_use() {
        let engine = SheetEngine::new();
        let c = ranger();
        let check = engine
            .skill_check(&c, "Percepção", Some("ouvir"), None)
            .unwrap();
        assert_eq!(check.use_name.as_deref(), Some("Ouvir"));
        assert_eq!(check.modifier_total, 11);
    }

    #[test]
    fn attribute_override_on_default_use() {
        let engine = SheetEngine::new();
        let c = ranger();
        let check = engine
            .skill_check(&c, "Percepção", Some("Procurar"), None)
            .unwrap();
        assert_eq!(check.key_attribute, Attribute::Mente);
        assert_eq!(check.text, "2d20 (maior)+9");
        assert!(check.available);
    }

    #[test]
    fn override_key_case_does_not_matter() {
        let engine = SheetEngine::new();
        let mut c = ranger();
        let overrides = &mut c.skills[0].default_use_attribute_overrides;
        overrides.clear();
        overrides.insert("procurar".to_string(), Attribute::Mente);

        let check = engine
            .skill_check(&c, "Percepção", Some("PROCURAR"), None)
            .unwrap();
        assert_eq!(check.use_name.as_deref(), Some("Procurar"));
        assert_eq!(check.key_attribute, Attribute::Mente);
    }

    #[test]
    fn combat_signature_scales_by_thirds() {
        let engine = SheetEngine::new();
        let mut c = ranger();
        c.set_signature_skill("Pontaria").unwrap();
        let check = engine.skill_check(&c, "Pontaria", None, None).unwrap();
        assert_eq!(check.signature_bonus, 3);
        assert_eq!(check.text, "4d20 (maior)+3");
    }

    #[test]
    fn unavailable_default_use_still_resolves() {
        let engine = SheetEngine::new();
        let c = ranger();
        let check = engine
            .skill_check(&c, "Medicina", Some("Cirurgia"), None)
            .unwrap();
        assert!(!check.available);
        assert_eq!(check.text, "2d20 (maior)");
    }

    #[test]
    fn unknown_skill_and_use() {
        let engine = SheetEngine::new();
        let c = ranger();
        assert_eq!(
            engine.skill_check(&c, "Voo", None, None),
            Err(MechError::UnknownSkill("Voo".to_string()))
        );
        assert_eq!(
            engine.skill_check(&c, "Medicina", Some("Benzer"), None),
            Err(MechError::UnknownSkillUse("Benzer".to_string()))
        );
    }

    #[test]
    fn craft_modifiers_reach_craft_skill_only() {
        let engine = SheetEngine::new();
        let c = ranger();
        let with_craft = engine
            .skill_check(&c, "Ofício", Some("Criar"), Some("Arcos"))
            .unwrap();
        assert_eq!(with_craft.formula.dice_count, 3);
        let elsewhere = engine
            .skill_check(&c, "Medicina", None, Some("Arcos"))
            .unwrap();
        assert_eq!(elsewhere.formula.dice_count, 2);
    }

    #[test]
    fn resources() {
        let engine = SheetEngine::new();
        let c = ranger();
        assert_eq!(engine.defense(&c).total, 24);
        // 2 + 9 * (1 + 2)
        assert_eq!(engine.power_points_max(&c).total, 29);
        assert_eq!(engine.pp_per_round(&c), 11);
    }

    #[test]
    fn spellcasting_uses_custom_use() {
        let engine = SheetEngine::new();
        let pools = engine.spellcasting_pools(&ranger());
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].pool_contribution, 1);
        assert_eq!(pools[0].total, 3);
    }

    #[test]
    fn craft_checks_use_scale() {
        let c = ranger();
        let sheet_scale = SheetEngine::new().craft_checks(&c);
        assert_eq!(sheet_scale[0].text, "2d20 (maior)+6");

        let pinned = SheetEngine::new().with_scale(TableScale {
            skill_bonus: [0, 1, 2, 3],
            craft_multiplier: [1, 1, 1, 1],
        });
        assert_eq!(pinned.craft_checks(&c)[0].text, "2d20 (maior)+3");
        let check = pinned.skill_check(&c, "Percepção", None, None).unwrap();
        assert_eq!(check.proficiency_bonus, 1);
        assert_eq!(check.modifier_total, 10);
    }

    #[test]
    fn craft_signature_bonus() {
        let engine = SheetEngine::new();
        let mut c = ranger();
        c.set_signature_skill("Ofício").unwrap();
        assert_eq!(engine.craft_checks(&c)[0].signature_bonus, 9);
    }

    #[test]
    fn derive_sheet_covers_everything() {
        let engine = SheetEngine::new();
        let sheet = engine.derive_sheet(&ranger());
        assert_eq!(sheet.attributes.len(), 6);
        assert_eq!(sheet.carry_capacity, 20);
        assert_eq!(sheet.dying_rounds, 5);
        assert_eq!(sheet.defense.total, 24);
        assert_eq!(sheet.power_point_track.max, 29);

        let perception = &sheet.skills[0];
        // General, six catalog uses.
        assert_eq!(perception.uses.len(), 7);
        let arcana = sheet.skills.iter().find(|s| s.name == "Arcanismo").unwrap();
        assert_eq!(
            arcana.uses.last().and_then(|u| u.use_name.as_deref()),
            Some("Conjurar Feitiço")
        );
        assert!(sheet.skills.iter().any(|s| s.is_combat));
    }

    #[test]
    fn extreme_snapshot_saturates() {
        let mut c = ranger();
        c.level = u32::MAX;
        c.attributes = AttributeSet {
            agilidade: i32::MAX,
            corpo: i32::MAX,
            influencia: i32::MAX,
            mente: i32::MAX,
            essencia: i32::MAX,
            instinto: i32::MAX,
        };
        c.equipment.shield_bonus = i32::MAX;

        let sheet = SheetEngine::new().derive_sheet(&c);
        assert_eq!(sheet.defense.total, i32::MAX);
        assert_eq!(sheet.carry_capacity, i32::MAX);
        assert_eq!(sheet.power_points_max.total, i32::MAX);
        let general = &sheet.skills[0].uses[0];
        assert_eq!(general.modifier_total, i32::MAX);
        assert_eq!(general.formula.dice_count, i32::MAX);
    }

    #[test]
    fn derived_sheet_serializes() {
        let json = serde_json::to_value(SheetEngine::new().derive_sheet(&ranger())).unwrap();
        assert_eq!(json["defense"]["total"], 24);
        assert_eq!(json["ppPerRound"], 11);
        assert_eq!(json["spellcasting"][0]["poolContribution"], 1);
    }
}
