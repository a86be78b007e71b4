//! Rules constants that vary between tables and house rules.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Tunable constants used by the resource calculators and the skill resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RulesConfig {
    /// Fixed base of the Defense total.
    pub defense_base: i32,
    /// Power Points every character has at level 1 before archetypes.
    pub base_power_points: i32,
    /// Attribute scores above this are flagged as special.
    pub attribute_display_cap: i32,
    /// Carrying capacity before Corpo is applied.
    pub carry_base: i32,
    /// Carrying capacity gained per point of Corpo.
    pub carry_per_corpo: i32,
    /// Dying rounds before Corpo is applied.
    pub dying_base: i32,
    /// Name of the Perception skill whose uses map to senses.
    pub perception_skill: String,
    /// Name of the craft skill.
    pub craft_skill: String,
    /// Name of the custom use consulted for spellcasting pools.
    pub spellcasting_use: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            defense_base: 15,
            base_power_points: 2,
            attribute_display_cap: 5,
            carry_base: 5,
            carry_per_corpo: 5,
            dying_base: 2,
            perception_skill: "Percepção".to_string(),
            craft_skill: "Ofício".to_string(),
            spellcasting_use: "Conjurar Feitiço".to_string(),
        }
    }
}

impl RulesConfig {
    /// Parse a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MechError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the config is usable.
    pub fn validate(&self) -> MechResult<()> {
        if self.attribute_display_cap < 0 {
            return Err(MechError::InvalidConfig(format!(
                "attributeDisplayCap must not be negative (got {})",
                self.attribute_display_cap
            )));
        }
        for (field, value) in [
            ("perceptionSkill", &self.perception_skill),
            ("craftSkill", &self.craft_skill),
            ("spellcastingUse", &self.spellcasting_use),
        ] {
            if value.trim().is_empty() {
                return Err(MechError::InvalidConfig(format!(
                    "{field} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Set the Defense base.
    pub fn with_defense_base(mut self, base: i32) -> Self {
        self.defense_base = base;
        self
    }

    /// Set the level-1 Power Points.
    pub fn with_base_power_points(mut self, points: i32) -> Self {
        self.base_power_points = points;
        self
    }

    /// Set the attribute display cap (negative values clamp to 0).
    pub fn with_display_cap(mut self, cap: i32) -> Self {
        self.attribute_display_cap = cap.max(0);
        self
    }
}
