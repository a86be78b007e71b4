//! Power Points: maximum, per-round spending limit, and archetype growth.

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::modifier::{Modifier, sum_values};
use crate::proficiency::level_i32;

/// An archetype the character has levels in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archetype {
    /// Archetype key (e.g. "arcanista").
    pub name: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Levels taken in this archetype.
    pub level: u32,
    /// Power Points gained per level before Essência.
    #[serde(default)]
    pub base_per_level: i32,
}

/// One archetype's contribution to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeResourceBreakdown {
    /// Archetype key.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Levels taken.
    pub level: u32,
    /// Per-level base.
    pub base_per_level: i32,
    /// `level * (base_per_level + essencia)`, saturating.
    pub total: i32,
}

impl ArchetypeResourceBreakdown {
    /// Compute an archetype's Power Point contribution.
    pub fn for_archetype(archetype: &Archetype, essencia: i32) -> Self {
        let per_level = archetype.base_per_level.saturating_add(essencia);
        Self {
            name: archetype.name.clone(),
            label: archetype.label.clone(),
            level: archetype.level,
            base_per_level: archetype.base_per_level,
            total: level_i32(archetype.level).saturating_mul(per_level),
        }
    }
}

/// A character's Power Point pool as stored on the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PowerPoints {
    /// Points currently available.
    pub current: i32,
    /// Temporary points, spent before `current`.
    pub temporary: i32,
    /// Last stored maximum; the calculated maximum supersedes it.
    pub max: i32,
    /// Modifiers to the maximum.
    pub max_modifiers: Vec<Modifier>,
}

impl PowerPoints {
    /// Points that can be spent right now.
    pub fn available(&self) -> i32 {
        self.current.saturating_add(self.temporary)
    }
}

/// A character's spell point pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpellPoints {
    /// Points currently available.
    pub current: i32,
    /// Maximum.
    pub max: i32,
}

/// Each term of the Power Point maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerPointMax {
    /// Level-1 base.
    pub base: i32,
    /// Per-archetype growth.
    pub archetypes: Vec<ArchetypeResourceBreakdown>,
    /// Sum of maximum modifiers.
    pub modifiers: i32,
    /// Final maximum.
    pub total: i32,
}

/// Power Point maximum: base plus archetype growth plus modifiers.
///
/// Every sum saturates at the `i32` bounds.
pub fn calculate_power_points_max(
    archetypes: &[Archetype],
    essencia: i32,
    max_modifiers: &[Modifier],
    config: &RulesConfig,
) -> PowerPointMax {
    let archetypes: Vec<ArchetypeResourceBreakdown> = archetypes
        .iter()
        .map(|a| ArchetypeResourceBreakdown::for_archetype(a, essencia))
        .collect();
    let growth = archetypes
        .iter()
        .map(|a| a.total)
        .fold(0, i32::saturating_add);
    let modifiers = sum_values(max_modifiers);
    let total = config
        .base_power_points
        .saturating_add(growth)
        .saturating_add(modifiers);

    PowerPointMax {
        base: config.base_power_points,
        total,
        archetypes,
        modifiers,
    }
}

/// Most Power Points spendable in one round: `level + essencia + modifiers`,
/// saturating.
pub fn calculate_pp_per_round(
    character_level: u32,
    essencia: i32,
    limit_modifiers: &[Modifier],
) -> i32 {
    level_i32(character_level)
        .saturating_add(essencia)
        .saturating_add(sum_values(limit_modifiers))
}
