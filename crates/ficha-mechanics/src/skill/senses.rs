//! Keen senses and the Perception use each sense sharpens.

use serde::{Deserialize, Serialize};

use crate::modifier::Modifier;

/// One of the five senses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    /// Sight.
    #[serde(alias = "visão")]
    Visao,
    /// Hearing.
    #[serde(alias = "audição")]
    Audicao,
    /// Smell.
    Olfato,
    /// Taste.
    Paladar,
    /// Touch.
    Tato,
}

impl Sense {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Visao => "Visão",
            Self::Audicao => "Audição",
            Self::Olfato => "Olfato",
            Self::Paladar => "Paladar",
            Self::Tato => "Tato",
        }
    }
}

/// The Perception use that relies on a given sense.
pub fn sense_for_use(use_name: &str) -> Option<Sense> {
    match use_name.trim().to_lowercase().as_str() {
        "observar" => Some(Sense::Visao),
        "ouvir" => Some(Sense::Audicao),
        "farejar" => Some(Sense::Olfato),
        "provar" => Some(Sense::Paladar),
        "tatear" => Some(Sense::Tato),
        _ => None,
    }
}

/// A sharpened sense granting a bonus on its Perception use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeenSense {
    /// The sharpened sense.
    pub sense: Sense,
    /// Bonus granted.
    #[serde(default = "default_keen_value")]
    pub value: i32,
    /// Whether the bonus adds dice instead of a flat amount.
    #[serde(default)]
    pub affects_dice: bool,
}

fn default_keen_value() -> i32 {
    1
}

impl KeenSense {
    /// The modifier this sense contributes.
    pub fn to_modifier(&self) -> Modifier {
        Modifier {
            name: format!("Sentido Aguçado ({})", self.sense.label()),
            value: self.value,
            affects_dice: self.affects_dice,
        }
    }
}

/// Modifiers contributed by keen senses to the named use.
pub fn keen_sense_modifiers(use_name: &str, keen_senses: &[KeenSense]) -> Vec<Modifier> {
    let Some(sense) = sense_for_use(use_name) else {
        return Vec::new();
    };
    keen_senses
        .iter()
        .filter(|k| k.sense == sense)
        .map(KeenSense::to_modifier)
        .collect()
}
