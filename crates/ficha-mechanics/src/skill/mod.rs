//! Skills, their uses, and use resolution.
//!
//! A skill can be applied in several ways ("uses"): the general use, a
//! system-provided default use from the [`SkillCatalog`], or a use the player
//! created. Each use may carry its own key attribute and modifiers.

pub mod catalog;
pub mod resolve;
pub mod senses;

pub use catalog::{DefaultSkillUse, SkillCatalog};
pub use resolve::{ResolvedUse, SkillCheck, UseContext, resolve_use};
pub use senses::{KeenSense, Sense};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::modifier::Modifier;
use crate::proficiency::ProficiencyLevel;

/// A skill as configured on a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Skill name (e.g. "Percepção").
    pub name: String,
    /// Attribute rolled for the general use.
    pub key_attribute: Attribute,
    /// Training tier.
    #[serde(default)]
    pub proficiency_level: ProficiencyLevel,
    /// Modifiers that apply to every use.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Uses created by the player.
    #[serde(default)]
    pub custom_uses: Vec<SkillUse>,
    /// Key attribute overrides for default uses, by use name.
    #[serde(default)]
    pub default_use_attribute_overrides: BTreeMap<String, Attribute>,
    /// Extra modifiers for default uses, by use name.
    #[serde(default)]
    pub default_use_modifier_overrides: BTreeMap<String, Vec<Modifier>>,
    /// Whether this is the character's signature skill.
    #[serde(default)]
    pub is_signature: bool,
}

impl Skill {
    /// Create an untrained skill with no modifiers.
    pub fn new(name: impl Into<String>, key_attribute: Attribute) -> Self {
        Self {
            name: name.into(),
            key_attribute,
            proficiency_level: ProficiencyLevel::Leigo,
            modifiers: Vec::new(),
            custom_uses: Vec::new(),
            default_use_attribute_overrides: BTreeMap::new(),
            default_use_modifier_overrides: BTreeMap::new(),
            is_signature: false,
        }
    }

    /// Set the training tier.
    pub fn with_proficiency(mut self, level: ProficiencyLevel) -> Self {
        self.proficiency_level = level;
        self
    }

    /// Add a skill-wide modifier.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Add a custom use.
    pub fn with_custom_use(mut self, skill_use: SkillUse) -> Self {
        self.custom_uses.push(skill_use);
        self
    }

    /// Override the key attribute of a default use.
    pub fn with_attribute_override(
        mut self,
        use_name: impl Into<String>,
        attribute: Attribute,
    ) -> Self {
        self.default_use_attribute_overrides
            .insert(use_name.into(), attribute);
        self
    }

    /// Attach modifiers to a default use.
    pub fn with_use_modifiers(
        mut self,
        use_name: impl Into<String>,
        modifiers: Vec<Modifier>,
    ) -> Self {
        self.default_use_modifier_overrides
            .insert(use_name.into(), modifiers);
        self
    }

    /// Flag as the signature skill.
    pub fn signature(mut self) -> Self {
        self.is_signature = true;
        self
    }

    /// Find a custom use by name (case-insensitive).
    pub fn custom_use(&self, name: &str) -> Option<&SkillUse> {
        self.custom_uses
            .iter()
            .find(|u| u.name.to_lowercase() == name.to_lowercase())
    }

    /// Key attribute override for a default use.
    ///
    /// Use names match case-insensitively; an exact key wins over a folded one.
    pub fn attribute_override(&self, use_name: &str) -> Option<Attribute> {
        let overrides = &self.default_use_attribute_overrides;
        lookup_use(overrides, use_name).copied()
    }

    /// Extra modifiers for a default use, matched like
    /// [`attribute_override`](Self::attribute_override).
    pub fn use_modifier_override(&self, use_name: &str) -> Option<&[Modifier]> {
        let overrides = &self.default_use_modifier_overrides;
        lookup_use(overrides, use_name).map(Vec::as_slice)
    }

    /// True if the skill carries any per-use override for `use_name`.
    pub fn has_override_for(&self, use_name: &str) -> bool {
        self.attribute_override(use_name).is_some()
            || self.use_modifier_override(use_name).is_some()
    }
}

fn lookup_use<'a, V>(map: &'a BTreeMap<String, V>, use_name: &str) -> Option<&'a V> {
    if let Some(value) = map.get(use_name) {
        return Some(value);
    }
    let key = catalog::catalog_key(use_name);
    map.iter()
        .find(|(name, _)| catalog::catalog_key(name) == key)
        .map(|(_, value)| value)
}

/// A player-created use of a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillUse {
    /// Stable identifier assigned by the caller.
    pub id: String,
    /// Use name (e.g. "Conjurar Feitiço").
    pub name: String,
    /// Name of the skill this use belongs to.
    pub skill_name: String,
    /// Attribute rolled for this use.
    pub key_attribute: Attribute,
    /// Flat bonus, applied as a numeric modifier.
    #[serde(default)]
    pub bonus: i32,
    /// Modifiers specific to this use.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl SkillUse {
    /// Create a custom use with no bonus or modifiers.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        skill_name: impl Into<String>,
        key_attribute: Attribute,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skill_name: skill_name.into(),
            key_attribute,
            bonus: 0,
            modifiers: Vec::new(),
            description: String::new(),
        }
    }

    /// Set the flat bonus.
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    /// Add a modifier.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// Which use of a skill to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseSpec<'a> {
    /// The skill applied without a named use.
    General,
    /// A system-provided use, by name.
    Default(&'a str),
    /// A player-created use.
    Custom(&'a SkillUse),
}

impl UseSpec<'_> {
    /// The use name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::General => None,
            Self::Default(name) => Some(name),
            Self::Custom(skill_use) => Some(&skill_use.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let skill = Skill::new("Atletismo", Attribute::Corpo)
            .with_proficiency(ProficiencyLevel::Versado)
            .with_modifier(Modifier::numeric("Treino", 1))
            .with_attribute_override("Saltar", Attribute::Agilidade)
            .signature();
        assert_eq!(skill.proficiency_level, ProficiencyLevel::Versado);
        assert_eq!(skill.modifiers.len(), 1);
        assert!(skill.is_signature);
        assert!(skill.has_override_for("Saltar"));
        assert!(!skill.has_override_for("Nadar"));
    }

    #[test]
    fn override_lookup_ignores_case() {
        let skill = Skill::new("Percepção", Attribute::Instinto)
            .with_attribute_override("procurar", Attribute::Mente)
            .with_use_modifiers("OUVIR", vec![Modifier::numeric("Eco", 1)]);
        assert_eq!(skill.attribute_override("Procurar"), Some(Attribute::Mente));
        let padded = skill.attribute_override(" PROCURAR ");
        assert_eq!(padded, Some(Attribute::Mente));
        let ouvir = skill.use_modifier_override("Ouvir").unwrap_or_default();
        assert_eq!(ouvir.len(), 1);
        assert!(skill.has_override_for("Procurar"));
        assert!(skill.has_override_for("ouvir"));
        assert_eq!(skill.attribute_override("Observar"), None);
    }

    #[test]
    fn exact_override_key_wins() {
        let skill = Skill::new("Percepção", Attribute::Instinto)
            .with_attribute_override("procurar", Attribute::Mente)
            .with_attribute_override("Procurar", Attribute::Corpo);
        assert_eq!(skill.attribute_override("procurar"), Some(Attribute::Mente));
        assert_eq!(skill.attribute_override("Procurar"), Some(Attribute::Corpo));
    }

    #[test]
    fn custom_use_lookup_ignores_case() {
        let conjurar = SkillUse::new("u1", "Conjurar Feitiço", "Arcanismo", Attribute::Essencia);
        let skill = Skill::new("Arcanismo", Attribute::Mente).with_custom_use(conjurar);
        assert!(skill.custom_use("conjurar feitiço").is_some());
        assert!(skill.custom_use("Ritual").is_none());
    }

    #[test]
    fn use_spec_names() {
        let custom = SkillUse::new("u1", "Rastrear Fera", "Sobrevivência", Attribute::Instinto);
        assert_eq!(UseSpec::General.name(), None);
        assert_eq!(UseSpec::Default("Ouvir").name(), Some("Ouvir"));
        assert_eq!(UseSpec::Custom(&custom).name(), Some("Rastrear Fera"));
    }

    #[test]
    fn deserialize_minimal_skill() {
        let json = r#"{"name":"Furtividade","keyAttribute":"agilidade"}"#;
        let skill: Skill = serde_json::from_str(json).unwrap();
        assert_eq!(skill.key_attribute, Attribute::Agilidade);
        assert_eq!(skill.proficiency_level, ProficiencyLevel::Leigo);
        assert!(skill.custom_uses.is_empty());
        assert!(!skill.is_signature);
    }

    #[test]
    fn deserialize_rejects_unknown_attribute() {
        let json = r#"{"name":"X","keyAttribute":"sorte"}"#;
        let err = serde_json::from_str::<Skill>(json).unwrap_err();
        assert!(err.to_string().contains("unknown attribute: sorte"));
    }
}
