//! Integration tests: cli_commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CHARACTER: &str = r#"{
    "name": "Iara",
    "level": 5,
    "attributes": { "agilidade": 3, "corpo": 3, "mente": 0, "essencia": 2, "instinto": 6 },
    "skills": [
        {
            "name": "Percepção",
            "keyAttribute": "instinto",
            "proficiencyLevel": 1,
            "isSignature": true,
            "defaultUseAttributeOverrides": { "Procurar": "mente" }
        },
        { "name": "Luta", "keyAttribute": "corpo" },
        {
            "name": "Arcanismo",
            "keyAttribute": "essencia",
            "customUses": [
                { "id": "c1", "name": "Conjurar Feitiço", "skillName": "Arcanismo",
                  "keyAttribute": "essencia", "bonus": 2 }
            ]
        }
    ],
    "equipment": {
        "armors": [
            { "name": "Cota de Malha", "armorBonus": 4, "maxAgilityBonus": 2, "active": true }
        ],
        "shieldBonus": 1
    },
    "defenseBonuses": [{ "name": "Anel", "value": 2 }],
    "archetypes": [{ "name": "arcanista", "label": "Arcanista", "level": 5, "basePerLevel": 3 }],
    "spellcasting": [{ "name": "Magia Arcana", "attribute": "essencia", "skill": "Arcanismo" }],
    "keenSenses": [{ "sense": "visao", "value": 2 }]
}"#;

const BROKEN: &str = r#"{
    "name": "Dupla",
    "skills": [
        { "name": "Luta", "keyAttribute": "corpo", "isSignature": true },
        { "name": "Pontaria", "keyAttribute": "agilidade", "isSignature": true }
    ],
    "equipment": {
        "armors": [
            { "name": "Couro", "armorBonus": 2, "active": true },
            { "name": "Placas", "armorBonus": 6, "active": true }
        ]
    }
}"#;

/// Create a temp directory with character and rules files.
fn fixtures() -> TempDir {
    let dir = TempDir::new().unwrap();
    let files = [
        ("iara.json", CHARACTER),
        ("dupla.json", BROKEN),
        ("rules.json", r#"{ "defenseBase": 10 }"#),
        ("bad-rules.json", r#"{ "craftSkill": "" }"#),
    ];
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

fn path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn ficha() -> Command {
    Command::cargo_bin("ficha").unwrap()
}

// ---------------------------------------------------------------------------
// sheet
// ---------------------------------------------------------------------------

#[test]
fn sheet_prints_tables() {
    let dir = fixtures();
    ficha()
        .arg("sheet")
        .arg(path(&dir, "iara.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Iara"))
        .stdout(predicate::str::contains("Defesa"))
        .stdout(predicate::str::contains("24"))
        .stdout(predicate::str::contains("6d20 (maior)+5"))
        .stdout(predicate::str::contains("Conjurar Feitiço"))
        .stdout(predicate::str::contains("Magia Arcana"));
}

#[test]
fn sheet_json() {
    let dir = fixtures();
    let output = ficha()
        .args(["sheet", "--json"])
        .arg(path(&dir, "iara.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["defense"]["total"], 24);
    assert_eq!(json["ppPerRound"], 7);
    assert_eq!(json["powerPointsMax"]["total"], 27);
    assert_eq!(json["carryCapacity"], 20);
    assert_eq!(json["dyingRounds"], 5);
    assert_eq!(json["spellcasting"][0]["total"], 4);
}

#[test]
fn sheet_with_rules() {
    let dir = fixtures();
    let output = ficha()
        .args(["sheet", "--json", "--rules"])
        .arg(path(&dir, "rules.json"))
        .arg(path(&dir, "iara.json"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["defense"]["total"], 19);
}

#[test]
fn sheet_rejects_bad_rules() {
    let dir = fixtures();
    ficha()
        .args(["sheet", "--rules"])
        .arg(path(&dir, "bad-rules.json"))
        .arg(path(&dir, "iara.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("craftSkill must not be empty"));
}

#[test]
fn sheet_missing_file() {
    ficha()
        .args(["sheet", "/nonexistent/ficha.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: cannot read"));
}

#[test]
fn sheet_invalid_snapshot() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bad.json"),
        r#"{ "name": "X", "skills": [{ "name": "Y", "keyAttribute": "sorte" }] }"#,
    )
    .unwrap();
    ficha()
        .arg("sheet")
        .arg(dir.path().join("bad.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown attribute: sorte"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_general_use() {
    let dir = fixtures();
    ficha()
        .arg("check")
        .arg(path(&dir, "iara.json"))
        .arg("percepção")
        .assert()
        .success()
        .stdout(predicate::str::contains("6d20 (maior)+5"))
        .stdout(predicate::str::contains("geral"));
}

#[test]
fn check_keen_sense_use() {
    let dir = fixtures();
    ficha()
        .arg("check")
        .arg(path(&dir, "iara.json"))
        .args(["Percepção", "--use", "Observar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6d20 (maior)+7"))
        .stdout(predicate::str::contains("Sentido Aguçado (Visão)"));
}

#[test]
fn check_take_lowest_override() {
    let dir = fixtures();
    ficha()
        .arg("check")
        .arg(path(&dir, "iara.json"))
        .args(["Percepção", "--use", "Procurar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-2d20+5"))
        .stdout(predicate::str::contains("menor resultado"));
}

#[test]
fn check_unknown_skill() {
    let dir = fixtures();
    ficha()
        .arg("check")
        .arg(path(&dir, "iara.json"))
        .arg("Voo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: unknown skill: Voo"));
}

#[test]
fn check_unknown_use() {
    let dir = fixtures();
    ficha()
        .arg("check")
        .arg(path(&dir, "iara.json"))
        .args(["Luta", "--use", "Voar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown skill use: Voar"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_clean_character() {
    let dir = fixtures();
    ficha()
        .arg("validate")
        .arg(path(&dir, "iara.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed for 'Iara'"));
}

#[test]
fn validate_reports_violations() {
    let dir = fixtures();
    ficha()
        .arg("validate")
        .arg(path(&dir, "dupla.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "more than one active armor: Couro, Placas",
        ))
        .stderr(predicate::str::contains(
            "more than one signature skill: Luta, Pontaria",
        ))
        .stderr(predicate::str::contains("error: 2 errors, 0 warnings"));
}

// ---------------------------------------------------------------------------
// formula
// ---------------------------------------------------------------------------

#[test]
fn formula_outputs() {
    let cases: [(&[&str], &str); 5] = [
        (&["1"], "1d20\n"),
        (&["3"], "3d20 (maior)\n"),
        (&["3", "--dice", "1", "--bonus", "2"], "4d20 (maior)+2\n"),
        (&["0", "--dice", "3", "--bonus", "-1"], "-2d20-1\n"),
        (&["2", "--dice", "-5"], "1d20\n"),
    ];
    for (args, expected) in cases {
        ficha()
            .arg("formula")
            .args(args)
            .assert()
            .success()
            .stdout(expected);
    }
}

// ---------------------------------------------------------------------------
// help / version
// ---------------------------------------------------------------------------

#[test]
fn help_lists_commands() {
    ficha()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheet"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("formula"));
}

#[test]
fn version() {
    ficha()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ficha"));
}
