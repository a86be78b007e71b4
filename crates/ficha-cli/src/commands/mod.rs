pub mod check;
pub mod formula;
pub mod sheet;
pub mod validate;

use std::fs;
use std::path::Path;

use ficha_mechanics::{Character, RulesConfig, SheetEngine};

/// Read and parse a character snapshot.
fn load_character(path: &Path) -> Result<Character, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    let character = Character::from_json(&json).map_err(|e| e.to_string())?;
    tracing::debug!(
        path = %path.display(),
        character = %character.name,
        "loaded character"
    );
    Ok(character)
}

/// Build an engine, applying a rules file when given.
fn build_engine(rules: Option<&Path>) -> Result<SheetEngine, String> {
    let Some(path) = rules else {
        return Ok(SheetEngine::new());
    };
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    let config = RulesConfig::from_json(&json).map_err(|e| e.to_string())?;
    Ok(SheetEngine::new().with_config(config))
}

/// Render a signed number with an explicit sign, or a dash for zero.
fn signed(value: i32) -> String {
    match value {
        0 => "—".to_string(),
        v if v > 0 => format!("+{v}"),
        v => v.to_string(),
    }
}
