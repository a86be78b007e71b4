//! Named signed modifiers and their aggregation.
//!
//! A modifier either changes the number of dice in a pool (`affects_dice`)
//! or the flat number added after rolling. Its bonus/penalty kind is never
//! stored: it is always derived from the sign of the value, so snapshots
//! carrying a contradicting `type` are normalized on load.

use serde::{Deserialize, Serialize};

/// Whether a modifier helps or hinders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    /// Strictly positive value.
    Bonus,
    /// Zero or negative value.
    Penalidade,
}

impl ModifierKind {
    /// The kind implied by a value's sign.
    pub fn from_value(value: i32) -> Self {
        if value > 0 {
            Self::Bonus
        } else {
            Self::Penalidade
        }
    }
}

/// A named signed adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ModifierRecord", into = "ModifierRecord")]
pub struct Modifier {
    /// Display name (e.g. "Armadura pesada").
    pub name: String,
    /// Signed amount.
    pub value: i32,
    /// True if the value changes the dice count rather than the flat addend.
    pub affects_dice: bool,
}

impl Modifier {
    /// A modifier to the flat addend.
    pub fn numeric(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
            affects_dice: false,
        }
    }

    /// A modifier to the dice count.
    pub fn dice(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
            affects_dice: true,
        }
    }

    /// Bonus or penalty, from the value's sign.
    pub fn kind(&self) -> ModifierKind {
        ModifierKind::from_value(self.value)
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = if self.affects_dice { "d20" } else { "" };
        if self.value >= 0 {
            write!(f, "{} +{}{unit}", self.name, self.value)
        } else {
            write!(f, "{} {}{unit}", self.name, self.value)
        }
    }
}

/// Serialized shape of a [`Modifier`], including the redundant `type` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModifierRecord {
    #[serde(default)]
    name: String,
    value: i32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<ModifierKind>,
    #[serde(default)]
    affects_dice: bool,
}

impl From<ModifierRecord> for Modifier {
    fn from(record: ModifierRecord) -> Self {
        let derived = ModifierKind::from_value(record.value);
        if record.kind.is_some_and(|stated| stated != derived) {
            tracing::debug!(
                modifier = %record.name,
                value = record.value,
                stated = ?record.kind,
                ?derived,
                "normalizing modifier type from value sign"
            );
        }
        Self {
            name: record.name,
            value: record.value,
            affects_dice: record.affects_dice,
        }
    }
}

impl From<Modifier> for ModifierRecord {
    fn from(modifier: Modifier) -> Self {
        let kind = Some(modifier.kind());
        Self {
            name: modifier.name,
            value: modifier.value,
            kind,
            affects_dice: modifier.affects_dice,
        }
    }
}

/// The two deltas a modifier list reduces to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierTotals {
    /// Sum of dice-affecting values.
    pub dice_delta: i32,
    /// Sum of flat values.
    pub numeric_delta: i32,
}

/// Sum modifiers into a dice delta and a numeric delta.
///
/// Both sums saturate at the `i32` bounds.
pub fn aggregate<'a, I>(modifiers: I) -> ModifierTotals
where
    I: IntoIterator<Item = &'a Modifier>,
{
    modifiers
        .into_iter()
        .fold(ModifierTotals::default(), |mut totals, m| {
            if m.affects_dice {
                totals.dice_delta = totals.dice_delta.saturating_add(m.value);
            } else {
                totals.numeric_delta = totals.numeric_delta.saturating_add(m.value);
            }
            totals
        })
}

/// Sum every value regardless of `affects_dice`.
///
/// Used by resources whose modifier lists are plain numbers (Defense bonuses,
/// Power Point maximum and per-round modifiers).
pub fn sum_values<'a, I>(modifiers: I) -> i32
where
    I: IntoIterator<Item = &'a Modifier>,
{
    modifiers
        .into_iter()
        .map(|m| m.value)
        .fold(0, i32::saturating_add)
}
