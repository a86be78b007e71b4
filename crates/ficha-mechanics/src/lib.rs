//! Derived-stat engine for Ficha character sheets.
//!
//! Turns a character snapshot (attributes, skills, equipment, resources)
//! into everything the sheet displays: d20 pool formulas for every skill
//! use, Defense, Power Point limits, spellcasting pools, and craft checks.
//! Nothing here rolls dice; results are formulas for a caller to roll.

pub mod attribute;
pub mod character;
pub mod config;
pub mod dice;
pub mod engine;
pub mod error;
pub mod modifier;
pub mod proficiency;
pub mod resources;
pub mod skill;
pub mod validate;

pub use attribute::{Attribute, AttributeSet};
pub use character::Character;
pub use config::RulesConfig;
pub use dice::{DicePool, RollFormula, format_roll, resolve_dice_pool};
pub use engine::{DerivedSheet, SheetEngine};
pub use error::{MechError, MechResult};
pub use modifier::{Modifier, ModifierKind, ModifierTotals, aggregate};
pub use proficiency::{ProficiencyLevel, ProficiencyScale, SheetScale, TableScale, signature_bonus};
pub use skill::{Skill, SkillCatalog, SkillCheck, SkillUse, UseSpec};
pub use validate::{ValidationIssue, validate_character};
