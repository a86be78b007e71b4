use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use ficha_mechanics::DerivedSheet;

pub fn run(file: &Path, json: bool, rules: Option<&Path>) -> Result<(), String> {
    let character = super::load_character(file)?;
    let engine = super::build_engine(rules)?;
    let sheet = engine.derive_sheet(&character);

    if json {
        let out = serde_json::to_string_pretty(&sheet)
            .map_err(|e| format!("serialization error: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    print_header(&sheet);
    print_attributes(&sheet);
    print_resources(&sheet);
    print_skills(&sheet);
    print_spellcasting(&sheet);
    print_crafts(&sheet);

    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn print_header(sheet: &DerivedSheet) {
    println!(
        "  {} [{}]",
        sheet.name.bold(),
        format!("nível {}", sheet.level).dimmed()
    );
    println!();
}

fn print_attributes(sheet: &DerivedSheet) {
    let mut table = new_table(vec!["Atributo", "Valor"]);
    for line in &sheet.attributes {
        let value = if line.special {
            format!("{} (especial)", line.value)
        } else {
            line.value.to_string()
        };
        let label = line.attribute.label().to_string();
        table.add_row(vec![label, value]);
    }
    println!("{table}");
    println!();
}

fn print_resources(sheet: &DerivedSheet) {
    let d = &sheet.defense;
    println!(
        "  {}  {} = {} + {} agi + {} armadura + {} escudo + {} outros",
        "Defesa".bold(),
        d.total,
        d.base,
        d.effective_agility,
        d.armor_bonus,
        d.shield_bonus,
        d.other_bonuses
    );

    let pp = &sheet.power_points_max;
    let archetypes: Vec<String> = pp
        .archetypes
        .iter()
        .map(|a| format!("{} {}", a.total, a.label))
        .collect();
    println!(
        "  {}  máx {} = {} base{}{}",
        "PP".bold(),
        pp.total,
        pp.base,
        if archetypes.is_empty() {
            String::new()
        } else {
            format!(" + {}", archetypes.join(" + "))
        },
        if pp.modifiers == 0 {
            String::new()
        } else {
            format!(" {} mods", super::signed(pp.modifiers))
        },
    );
    println!("  {}", sheet.power_point_track);
    println!("  PP por rodada: {}", sheet.pp_per_round);
    if sheet.spell_point_track.max > 0 {
        println!("  {}", sheet.spell_point_track);
    }
    println!(
        "  Carga: {}  Rodadas morrendo: {}",
        sheet.carry_capacity, sheet.dying_rounds
    );
    println!();
}

fn print_skills(sheet: &DerivedSheet) {
    if sheet.skills.is_empty() {
        println!("  No skills.");
        println!();
        return;
    }

    let mut table = new_table(vec!["Perícia", "Uso", "Atributo", "Rolagem", ""]);
    for skill in &sheet.skills {
        let mut name = skill.name.clone();
        if skill.is_signature {
            name.push_str(" ★");
        }
        for check in &skill.uses {
            let use_name = check.use_name.as_deref().unwrap_or("geral");
            let status = if check.available { "" } else { "indisponível" };
            table.add_row(vec![
                name.as_str(),
                use_name,
                check.key_attribute.label(),
                check.text.as_str(),
                status,
            ]);
        }
    }
    println!("{table}");
    println!();
}

fn print_spellcasting(sheet: &DerivedSheet) {
    if sheet.spellcasting.is_empty() {
        return;
    }
    let header = vec!["Conjuração", "Atributo", "Perícia", "Bônus", "Reserva"];
    let mut table = new_table(header);
    for pool in &sheet.spellcasting {
        table.add_row(vec![
            pool.ability.clone(),
            format!("{} {}", pool.attribute.label(), pool.attribute_value),
            format!("{} {}", pool.skill, super::signed(pool.pool_contribution)),
            super::signed(pool.casting_bonus),
            pool.total.to_string(),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_crafts(sheet: &DerivedSheet) {
    if sheet.crafts.is_empty() {
        return;
    }
    let mut table = new_table(vec!["Ofício", "Atributo", "Rolagem"]);
    for craft in &sheet.crafts {
        table.add_row(vec![
            craft.craft.clone(),
            format!(
                "{} {} ×{}",
                craft.attribute_key.label(),
                craft.attribute_value,
                craft.multiplier
            ),
            craft.text.clone(),
        ]);
    }
    println!("{table}");
    println!();
}
