//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// An attribute name outside the fixed set of six.
    #[error("unknown attribute: {0}")]
    InvalidAttribute(String),

    /// A proficiency ordinal outside 0..=3.
    #[error("invalid proficiency level: {0} (expected 0-3)")]
    InvalidProficiency(u8),

    /// A skill referenced by a mutation or lookup does not exist.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// An armor referenced by a mutation does not exist.
    #[error("unknown armor: {0}")]
    UnknownArmor(String),

    /// A custom use referenced by a mutation does not exist.
    #[error("unknown skill use: {0}")]
    UnknownSkillUse(String),

    /// More than one armor is flagged active.
    #[error("more than one active armor: {}", .0.join(", "))]
    MultipleActiveArmors(Vec<String>),

    /// More than one skill is flagged as the signature ability.
    #[error("more than one signature skill: {}", .0.join(", "))]
    MultipleSignatureSkills(Vec<String>),

    /// A custom use is filed under a skill other than the one it names.
    #[error("use '{use_name}' belongs to skill '{expected}' but is filed under '{found}'")]
    MisfiledSkillUse {
        /// Name of the custom use.
        use_name: String,
        /// Skill named by the use itself.
        expected: String,
        /// Skill the use is stored under.
        found: String,
    },

    /// A character snapshot could not be read.
    #[error("invalid character snapshot: {0}")]
    InvalidSnapshot(String),

    /// The rules configuration is malformed.
    #[error("invalid rules config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
