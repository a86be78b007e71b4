//! Resource calculators: Defense, Power Points, spellcasting pools, craft
//! checks, and display tracks.

pub mod craft;
pub mod defense;
pub mod power;
pub mod spellcasting;
pub mod track;

pub use craft::{Craft, CraftCheck, calculate_craft_check};
pub use defense::{Armor, Defense, DefenseBreakdown, Equipment, calculate_defense};
pub use power::{
    Archetype, ArchetypeResourceBreakdown, PowerPointMax, PowerPoints, SpellPoints,
    calculate_power_points_max, calculate_pp_per_round,
};
pub use spellcasting::{SpellcastingAbility, SpellcastingPool, calculate_casting_pool};
pub use track::Track;
