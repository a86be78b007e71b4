use std::path::Path;

use colored::Colorize;

pub fn run(file: &Path) -> Result<(), String> {
    let character = super::load_character(file)?;
    let issues = ficha_mechanics::SheetEngine::new().validate(&character);

    for issue in &issues {
        if issue.is_error {
            let label = "error".red().bold();
            eprintln!("  {label} {}: {}", issue.subject, issue.message);
        } else {
            let label = "warning".yellow();
            eprintln!("  {label} {}: {}", issue.subject, issue.message);
        }
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;

    if errors > 0 {
        return Err(format!(
            "{errors} error{}, {warnings} warning{}",
            if errors == 1 { "" } else { "s" },
            if warnings == 1 { "" } else { "s" },
        ));
    }

    println!("  All checks passed for '{}'.", character.name);
    if warnings > 0 {
        println!(
            "  {warnings} warning{}",
            if warnings == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
