//! Display views of spendable pools (Power Points, spell points).
//!
//! A track is a clamped `current/max` pair. The maximum of a Power Point
//! track is the calculated one, not the stored one.

use serde::{Deserialize, Serialize};

use crate::resources::power::{PowerPoints, SpellPoints};

/// A named value clamped between 0 and a maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Display name.
    pub name: String,
    /// Current value.
    pub current: i32,
    /// Temporary extra on top of `current`.
    pub temporary: i32,
    /// Maximum value.
    pub max: i32,
}

impl Track {
    /// Create a track, clamping `current` into `0..=max`.
    pub fn new(name: impl Into<String>, current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            name: name.into(),
            current: current.clamp(0, max),
            temporary: 0,
            max,
        }
    }

    /// Power Points against the calculated maximum.
    pub fn power_points(points: &PowerPoints, calculated_max: i32) -> Self {
        Self {
            temporary: points.temporary.max(0),
            ..Self::new("PP", points.current, calculated_max)
        }
    }

    /// Spell points against their stored maximum.
    pub fn spell_points(points: &SpellPoints) -> Self {
        Self::new("PM", points.current, points.max)
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.current, self.max)?;
        if self.temporary > 0 {
            write!(f, " (+{} temp)", self.temporary)?;
        }
        Ok(())
    }
}
