//! The system catalog of default skill uses.
//!
//! Default uses are not stored on characters. They come from this read-only
//! catalog, keyed by skill name, and become rollable once the skill reaches
//! the required proficiency. The catalog also records which skills are
//! combat skills, since those scale the signature bonus differently.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::proficiency::ProficiencyLevel;
use crate::skill::Skill;

/// A use of a skill provided by the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSkillUse {
    /// Use name.
    pub name: String,
    /// Minimum tier needed to roll this use, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_proficiency: Option<ProficiencyLevel>,
}

impl DefaultSkillUse {
    /// A use open to every tier.
    pub fn open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_proficiency: None,
        }
    }

    /// A use gated behind a tier.
    pub fn gated(name: impl Into<String>, level: ProficiencyLevel) -> Self {
        Self {
            name: name.into(),
            required_proficiency: Some(level),
        }
    }

    /// True if a skill at `level` may roll this use.
    pub fn is_available_at(&self, level: ProficiencyLevel) -> bool {
        self.required_proficiency
            .is_none_or(|required| level >= required)
    }
}

/// Default uses per skill plus the set of combat skills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillCatalog {
    uses: BTreeMap<String, Vec<DefaultSkillUse>>,
    combat_skills: BTreeSet<String>,
}

/// Normalized lookup key: trimmed and lowercased.
pub(crate) fn catalog_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl SkillCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the default uses of a skill, replacing any previous entry.
    pub fn with_uses(mut self, skill_name: &str, uses: Vec<DefaultSkillUse>) -> Self {
        self.uses.insert(catalog_key(skill_name), uses);
        self
    }

    /// Mark a skill as a combat skill.
    pub fn with_combat_skill(mut self, skill_name: &str) -> Self {
        self.combat_skills.insert(catalog_key(skill_name));
        self
    }

    /// Default uses of a skill; empty for skills the catalog does not know.
    pub fn default_uses(&self, skill_name: &str) -> &[DefaultSkillUse] {
        self.uses
            .get(&catalog_key(skill_name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up one default use (use name is case-insensitive).
    pub fn find(&self, skill_name: &str, use_name: &str) -> Option<&DefaultSkillUse> {
        let wanted = catalog_key(use_name);
        self.default_uses(skill_name)
            .iter()
            .find(|u| catalog_key(&u.name) == wanted)
    }

    /// Whether the skill may roll the named default use.
    ///
    /// Uses the catalog does not know carry no requirement.
    pub fn is_available(&self, skill: &Skill, use_name: &str) -> bool {
        self.find(&skill.name, use_name)
            .is_none_or(|u| u.is_available_at(skill.proficiency_level))
    }

    /// Whether the skill is a combat skill.
    pub fn is_combat(&self, skill_name: &str) -> bool {
        self.combat_skills.contains(&catalog_key(skill_name))
    }

    /// The catalog shipped with the system.
    pub fn builtin() -> Self {
        use DefaultSkillUse as U;
        use ProficiencyLevel::{Adepto, Mestre, Versado};

        Self::new()
            .with_uses(
                "Percepção",
                vec![
                    U::open("Observar"),
                    U::open("Ouvir"),
                    U::open("Farejar"),
                    U::open("Provar"),
                    U::open("Tatear"),
                    U::gated("Procurar", Adepto),
                ],
            )
            .with_uses(
                "Atletismo",
                vec![
                    U::open("Correr"),
                    U::open("Escalar"),
                    U::open("Nadar"),
                    U::open("Saltar"),
                ],
            )
            .with_uses(
                "Acrobacia",
                vec![
                    U::open("Equilibrar-se"),
                    U::open("Rolar"),
                    U::gated("Amortecer Queda", Adepto),
                ],
            )
            .with_uses(
                "Furtividade",
                vec![
                    U::open("Esconder-se"),
                    U::open("Mover-se em Silêncio"),
                    U::gated("Prestidigitação", Adepto),
                ],
            )
            .with_uses(
                "Ofício",
                vec![
                    U::open("Criar"),
                    U::open("Reparar"),
                    U::gated("Avaliar", Adepto),
                ],
            )
            .with_uses(
                "Arcanismo",
                vec![
                    U::open("Identificar Magia"),
                    U::gated("Detectar Magia", Adepto),
                    U::gated("Dissipar Magia", Versado),
                ],
            )
            .with_uses(
                "Medicina",
                vec![
                    U::open("Primeiros Socorros"),
                    U::gated("Tratar Doença", Adepto),
                    U::gated("Cirurgia", Mestre),
                ],
            )
            .with_uses(
                "Persuasão",
                vec![
                    U::open("Convencer"),
                    U::open("Negociar"),
                    U::gated("Inspirar", Versado),
                ],
            )
            .with_uses(
                "Intimidação",
                vec![U::open("Ameaçar"), U::gated("Interrogar", Adepto)],
            )
            .with_uses(
                "Sobrevivência",
                vec![
                    U::open("Rastrear"),
                    U::open("Orientar-se"),
                    U::open("Forragear"),
                ],
            )
            .with_uses(
                "Luta",
                vec![U::open("Agarrar"), U::gated("Desarmar", Adepto)],
            )
            .with_uses("Pontaria", vec![U::gated("Tiro Preciso", Versado)])
            .with_combat_skill("Luta")
            .with_combat_skill("Pontaria")
            .with_combat_skill("Esquiva")
    }
}
