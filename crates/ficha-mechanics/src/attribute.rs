//! The six core attributes and a character's attribute scores.
//!
//! Attributes drive dice-pool size. Scores are normally 0 or more with no
//! hard ceiling; anything above the display cap is "special".

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::error::{MechError, MechResult};

/// One of the six core attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Attribute {
    /// Agility: reflexes, dodging, fine motor control.
    Agilidade,
    /// Body: strength and endurance.
    Corpo,
    /// Influence: presence and persuasion.
    Influencia,
    /// Mind: reasoning and knowledge.
    Mente,
    /// Essence: magical potential.
    Essencia,
    /// Instinct: perception and intuition.
    Instinto,
}

impl Attribute {
    /// All six attributes in sheet order.
    pub const ALL: [Attribute; 6] = [
        Self::Agilidade,
        Self::Corpo,
        Self::Influencia,
        Self::Mente,
        Self::Essencia,
        Self::Instinto,
    ];

    /// The canonical lowercase key, as used in serialized snapshots.
    pub fn key(self) -> &'static str {
        match self {
            Self::Agilidade => "agilidade",
            Self::Corpo => "corpo",
            Self::Influencia => "influencia",
            Self::Mente => "mente",
            Self::Essencia => "essencia",
            Self::Instinto => "instinto",
        }
    }

    /// The display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Agilidade => "Agilidade",
            Self::Corpo => "Corpo",
            Self::Influencia => "Influência",
            Self::Mente => "Mente",
            Self::Essencia => "Essência",
            Self::Instinto => "Instinto",
        }
    }

    /// Parse an attribute name. Case-insensitive; accented spellings are accepted.
    pub fn from_name(name: &str) -> MechResult<Self> {
        let lowered = name.trim().to_lowercase();
        match lowered.as_str() {
            "agilidade" => Ok(Self::Agilidade),
            "corpo" => Ok(Self::Corpo),
            "influencia" | "influência" => Ok(Self::Influencia),
            "mente" => Ok(Self::Mente),
            "essencia" | "essência" => Ok(Self::Essencia),
            "instinto" => Ok(Self::Instinto),
            _ => Err(MechError::InvalidAttribute(name.to_string())),
        }
    }
}

impl FromStr for Attribute {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl TryFrom<String> for Attribute {
    type Error = MechError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value)
    }
}

impl From<Attribute> for String {
    fn from(value: Attribute) -> Self {
        value.key().to_string()
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A character's six attribute scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSet {
    /// Agility score.
    pub agilidade: i32,
    /// Body score.
    pub corpo: i32,
    /// Influence score.
    #[serde(alias = "influência")]
    pub influencia: i32,
    /// Mind score.
    pub mente: i32,
    /// Essence score.
    #[serde(alias = "essência")]
    pub essencia: i32,
    /// Instinct score.
    pub instinto: i32,
}

impl AttributeSet {
    /// Look up a score by attribute.
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Agilidade => self.agilidade,
            Attribute::Corpo => self.corpo,
            Attribute::Influencia => self.influencia,
            Attribute::Mente => self.mente,
            Attribute::Essencia => self.essencia,
            Attribute::Instinto => self.instinto,
        }
    }

    /// Returns a copy with one score replaced.
    pub fn with(mut self, attribute: Attribute, value: i32) -> Self {
        let slot = match attribute {
            Attribute::Agilidade => &mut self.agilidade,
            Attribute::Corpo => &mut self.corpo,
            Attribute::Influencia => &mut self.influencia,
            Attribute::Mente => &mut self.mente,
            Attribute::Essencia => &mut self.essencia,
            Attribute::Instinto => &mut self.instinto,
        };
        *slot = value;
        self
    }

    /// Iterate `(attribute, score)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.get(a)))
    }

    /// True when a score exceeds the display cap.
    pub fn is_special(&self, attribute: Attribute, config: &RulesConfig) -> bool {
        self.get(attribute) > config.attribute_display_cap
    }

    /// Carrying capacity: `carry_base + corpo * carry_per_corpo`.
    pub fn carry_capacity(&self, config: &RulesConfig) -> i32 {
        let per_corpo = self.corpo.saturating_mul(config.carry_per_corpo);
        config.carry_base.saturating_add(per_corpo)
    }

    /// Rounds a character survives while dying: `dying_base + corpo`.
    pub fn dying_rounds(&self, config: &RulesConfig) -> i32 {
        config.dying_base.saturating_add(self.corpo)
    }
}
