use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(
    file: &Path,
    skill: &str,
    use_name: Option<&str>,
    craft: Option<&str>,
    rules: Option<&Path>,
) -> Result<(), String> {
    let character = super::load_character(file)?;
    let engine = super::build_engine(rules)?;
    let check = engine
        .skill_check(&character, skill, use_name, craft)
        .map_err(|e| e.to_string())?;

    let use_label = check.use_name.as_deref().unwrap_or("geral");
    println!("  {} [{}]", check.skill.bold(), use_label.dimmed());
    println!("  {}", check.text.bold());
    if !check.available {
        println!("  {}", "proficiência insuficiente para este uso".yellow());
    }
    println!();

    println!(
        "  atributo:    {} {}",
        check.key_attribute.label(),
        check.attribute_value
    );
    if check.formula.take_lowest {
        println!("  dados:       2, menor resultado");
    } else {
        println!(
            "  dados:       {} ({} por modificadores)",
            check.formula.dice_count,
            super::signed(check.totals.dice_delta)
        );
    }
    if check.signature_bonus != 0 {
        println!("  assinatura:  {}", super::signed(check.signature_bonus));
    }
    if check.proficiency_bonus != 0 {
        println!("  proficiência: {}", super::signed(check.proficiency_bonus));
    }
    println!("  total:       {}", super::signed(check.modifier_total));

    if !check.modifiers.is_empty() {
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Modificador", "Valor", "Alvo"]);
        for modifier in &check.modifiers {
            let target = if modifier.affects_dice {
                "dados"
            } else {
                "total"
            };
            table.add_row(vec![
                modifier.name.clone(),
                super::signed(modifier.value),
                target.to_string(),
            ]);
        }
        println!("{table}");
    }

    Ok(())
}
