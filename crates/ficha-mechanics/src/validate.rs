//! Whole-character validation.
//!
//! Collects every problem in a snapshot rather than stopping at the first.
//! Errors break an invariant the calculators rely on; warnings flag data
//! that resolves fine but is probably a mistake.

use std::collections::HashSet;

use crate::character::Character;
use crate::error::MechError;
use crate::skill::SkillCatalog;

/// A warning or error found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// What the issue is about (e.g. "skill 'Luta'").
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Validate a character snapshot.
///
/// Broken cross-entity invariants come from
/// [`Character::invariant_violations`] and are reported as errors.
pub fn validate_character(character: &Character, catalog: &SkillCatalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if character.level == 0 {
        issues.push(ValidationIssue::warning(
            "character",
            "level is 0; levels start at 1",
        ));
    }

    for (attribute, value) in character.attributes.iter() {
        if value < 0 {
            issues.push(ValidationIssue::warning(
                format!("attribute '{}'", attribute.label()),
                format!("negative score {value}"),
            ));
        }
    }

    for violation in character.invariant_violations() {
        issues.push(ValidationIssue::error(
            violation_subject(&violation),
            violation.to_string(),
        ));
    }

    validate_equipment(character, &mut issues);
    validate_skills(character, catalog, &mut issues);
    validate_references(character, &mut issues);

    issues
}

fn violation_subject(violation: &MechError) -> String {
    match violation {
        MechError::MultipleActiveArmors(_) => "equipment".to_string(),
        MechError::MultipleSignatureSkills(_) => "skills".to_string(),
        MechError::MisfiledSkillUse { found, .. } => format!("skill '{found}'"),
        _ => "character".to_string(),
    }
}

fn validate_equipment(character: &Character, issues: &mut Vec<ValidationIssue>) {
    for armor in &character.equipment.armors {
        if armor.max_agility_bonus.is_some_and(|cap| cap < 0) {
            issues.push(ValidationIssue::warning(
                format!("armor '{}'", armor.name),
                "negative agility cap",
            ));
        }
    }
}

fn validate_skills(
    character: &Character,
    catalog: &SkillCatalog,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen_skills = HashSet::new();
    let mut seen_use_ids = HashSet::new();
    for skill in &character.skills {
        let subject = format!("skill '{}'", skill.name);

        if !seen_skills.insert(skill.name.to_lowercase()) {
            issues.push(ValidationIssue::warning(&subject, "duplicate skill name"));
        }

        for skill_use in &skill.custom_uses {
            if !seen_use_ids.insert(skill_use.id.as_str()) {
                issues.push(ValidationIssue::error(
                    &subject,
                    format!("duplicate custom use id '{}'", skill_use.id),
                ));
            }
        }

        let overridden = skill
            .default_use_attribute_overrides
            .keys()
            .chain(skill.default_use_modifier_overrides.keys());
        for use_name in overridden {
            if catalog.find(&skill.name, use_name).is_none() {
                issues.push(ValidationIssue::warning(
                    &subject,
                    format!("override for '{use_name}', which is not a default use"),
                ));
            }
        }
    }
}

fn validate_references(character: &Character, issues: &mut Vec<ValidationIssue>) {
    for ability in &character.spellcasting {
        if character.skill(&ability.skill).is_none() {
            issues.push(ValidationIssue::warning(
                format!("spellcasting '{}'", ability.name),
                format!("skill '{}' not found; it will contribute 0", ability.skill),
            ));
        }
    }

    let mut senses = HashSet::new();
    for keen in &character.keen_senses {
        if !senses.insert(keen.sense) {
            issues.push(ValidationIssue::warning(
                "keen senses",
                format!("{} listed more than once", keen.sense.label()),
            ));
        }
    }
}
