//! Proficiency tiers, signature-ability bonuses, and proficiency scaling.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A skill's training tier. The ordinal doubles as a scaling multiplier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProficiencyLevel {
    /// Untrained.
    #[default]
    Leigo,
    /// Trained.
    Adepto,
    /// Expert.
    Versado,
    /// Master.
    Mestre,
}

impl ProficiencyLevel {
    /// All tiers in ascending order.
    pub const ALL: [ProficiencyLevel; 4] = [Self::Leigo, Self::Adepto, Self::Versado, Self::Mestre];

    /// The tier's ordinal (0-3).
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Leigo => 0,
            Self::Adepto => 1,
            Self::Versado => 2,
            Self::Mestre => 3,
        }
    }

    /// Parse an ordinal.
    pub fn from_ordinal(ordinal: u8) -> MechResult<Self> {
        match ordinal {
            0 => Ok(Self::Leigo),
            1 => Ok(Self::Adepto),
            2 => Ok(Self::Versado),
            3 => Ok(Self::Mestre),
            other => Err(MechError::InvalidProficiency(other)),
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Leigo => "Leigo",
            Self::Adepto => "Adepto",
            Self::Versado => "Versado",
            Self::Mestre => "Mestre",
        }
    }
}

impl TryFrom<u8> for ProficiencyLevel {
    type Error = MechError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(value)
    }
}

impl From<ProficiencyLevel> for u8 {
    fn from(value: ProficiencyLevel) -> Self {
        value.ordinal()
    }
}

impl std::fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Bonus granted to the signature skill at a given character level.
///
/// Combat skills scale at a third of the level, never below 1. Other
/// skills get the full level.
pub fn signature_bonus(character_level: u32, is_combat_skill: bool) -> i32 {
    let level = level_i32(character_level);
    if is_combat_skill {
        (level / 3).max(1)
    } else {
        level
    }
}

/// Levels beyond `i32::MAX` saturate.
pub(crate) fn level_i32(level: u32) -> i32 {
    i32::try_from(level).unwrap_or(i32::MAX)
}

/// Maps a proficiency tier to numeric magnitudes.
///
/// Implementations must be pure: the same tier always yields the same value.
pub trait ProficiencyScale: std::fmt::Debug + Send + Sync {
    /// Flat amount the tier adds to a skill's modifier total.
    fn skill_bonus(&self, level: ProficiencyLevel) -> i32;

    /// Multiplier applied to the craft attribute in craft checks.
    fn craft_multiplier(&self, level: ProficiencyLevel) -> i32;
}

/// The behavior shown on the character sheet: tiers add nothing to skill
/// totals and multiply the craft attribute by their ordinal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetScale;

impl ProficiencyScale for SheetScale {
    fn skill_bonus(&self, _level: ProficiencyLevel) -> i32 {
        0
    }

    fn craft_multiplier(&self, level: ProficiencyLevel) -> i32 {
        i32::from(level.ordinal())
    }
}

/// A scale with explicit per-tier values, indexed by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableScale {
    /// Skill bonus for leigo, adepto, versado, mestre.
    pub skill_bonus: [i32; 4],
    /// Craft multiplier for leigo, adepto, versado, mestre.
    pub craft_multiplier: [i32; 4],
}

impl Default for TableScale {
    fn default() -> Self {
        Self {
            skill_bonus: [0; 4],
            craft_multiplier: [0, 1, 2, 3],
        }
    }
}

impl ProficiencyScale for TableScale {
    fn skill_bonus(&self, level: ProficiencyLevel) -> i32 {
        self.skill_bonus[usize::from(level.ordinal())]
    }

    fn craft_multiplier(&self, level: ProficiencyLevel) -> i32 {
        self.craft_multiplier[usize::from(level.ordinal())]
    }
}
