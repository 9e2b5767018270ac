//! Integration tests for the workshop CLI
//!
//! These tests drive the binary end-to-end with piped stdin using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a workshop command isolated from the user's config and env
fn workshop(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("workshop").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("WORKSHOP_CONFIG")
        .env_remove("WORKSHOP_NAME")
        .env_remove("WORKSHOP_CAPACITY")
        .env_remove("WORKSHOP_BASE_PRICE")
        .env_remove("WORKSHOP_MAX_ATTEMPTS")
        .env_remove("RUST_LOG");
    cmd
}

/// Stdin script: one answer per line
fn script(answers: &[&str]) -> String {
    let mut s = answers.join("\n");
    s.push('\n');
    s
}

const REFERENCE_SESSION: &[&str] = &[
    "Ana", "10", "", "mañana", "s", //
    "Luis", "70", "luis@x.com", "tarde",
];

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("capacity-limited workshop"));
}

#[test]
fn test_version_displays() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("workshop"));
}

#[test]
fn test_unknown_command_fails() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Register Command Tests
// ============================================================================

#[test]
fn test_register_reference_session() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .args(["register", "--capacity", "2"])
        .write_stdin(script(REFERENCE_SESSION))
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Kotlin Taller González ==="))
        .stdout(predicate::str::contains("Precio final: 25.00 €"))
        .stdout(predicate::str::contains("Precio final: 35.00 €"))
        .stdout(predicate::str::contains("Se ha alcanzado el aforo máximo."))
        .stdout(predicate::str::contains("Total inscripciones: 2"))
        .stdout(predicate::str::contains("Precio promedio: 30.00 €"))
        .stdout(predicate::str::contains("Precio máximo: 35.00 €"))
        .stdout(predicate::str::contains("Precio mínimo: 25.00 €"))
        .stdout(predicate::str::contains("Menores de edad inscritos: 1"))
        .stdout(predicate::str::contains(
            "A - Ana, 10 años, mañana, 25.00 €, dominio: sin-dominio",
        ))
        .stdout(predicate::str::contains(
            "L - Luis, 70 años, tarde, 35.00 €, dominio: x.com",
        ))
        // capacity reached: no "continue?" after the second attendee
        .stdout(predicate::str::contains("¿Deseas registrar otra inscripción?").count(1));
}

#[test]
fn test_register_is_the_default_command() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aforo máximo: 5"))
        .stdout(predicate::str::contains("Total inscripciones: 0"))
        .stdout(predicate::str::contains("Precio promedio: 0.00 €"))
        .stdout(predicate::str::contains("No hay más entrada"));
}

#[test]
fn test_register_retries_and_rejections() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .arg("register")
        .write_stdin(script(&[
            "   ", "Ana", "diez", "0", "30", "", "noche", // discarded attempt
            "Bea", "40", "bea@uni.edu", "tarde", "n",
        ]))
        .assert()
        .success()
        .stdout(predicate::str::contains("El nombre no puede estar vacío."))
        .stdout(predicate::str::contains("introduce un número válido mayor que 0").count(2))
        .stdout(predicate::str::contains("Modalidad inválida"))
        .stdout(predicate::str::contains("Total inscripciones: 1"))
        .stdout(predicate::str::contains("B - Bea, 40 años, tarde, 50.00 €, dominio: uni.edu"))
        .stdout(predicate::str::contains("A - Ana").not());
}

#[test]
fn test_register_json_keeps_stdout_clean() {
    let home = TempDir::new().unwrap();
    let output = workshop(&home)
        .args(["register", "--capacity", "2", "--format", "json"])
        .write_stdin(script(REFERENCE_SESSION))
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["close_reason"], "capacity_reached");
    assert_eq!(report["statistics"]["total"], 2);
    assert_eq!(report["statistics"]["average_price"], 30.0);
    assert_eq!(report["statistics"]["minors_count"], 1);
    assert_eq!(report["attendees"][0]["name"], "Ana");
    assert_eq!(report["attendees"][1]["domain"], "x.com");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Nombre: "));
}

#[test]
fn test_register_csv() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .args(["register", "--capacity", "2", "-f", "csv", "--quiet"])
        .write_stdin(script(REFERENCE_SESSION))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,age,email,domain,modality,price"))
        .stdout(predicate::str::contains("Luis,70,luis@x.com,x.com,tarde,35.00"))
        .stderr(predicate::str::contains("Nombre").not());
}

#[test]
fn test_register_max_attempts() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .args(["register", "--max-attempts", "2"])
        .write_stdin(script(&["Ana", "x", "y", "30", "", "tarde"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Demasiados intentos inválidos"))
        .stdout(predicate::str::contains("Total inscripciones: 0"));
}

#[test]
fn test_register_uses_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("taller.yaml");
    fs::write(
        &config,
        "name: Taller de Rust\ncapacity: 1\nbase_price: 80.0\nmodalities: [tarde]\n",
    )
    .unwrap();

    workshop(&home)
        .arg("--config")
        .arg(&config)
        .write_stdin(script(&["Ana", "30", "", "mañana", "Ana", "30", "", "tarde"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Taller de Rust ==="))
        .stdout(predicate::str::contains("Modalidad inválida"))
        .stdout(predicate::str::contains("Precio final: 80.00 €"))
        .stdout(predicate::str::contains("Se ha alcanzado el aforo máximo."))
        .stdout(predicate::str::contains("por parte de Taller de Rust"));
}

#[test]
fn test_register_env_overrides_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("taller.yaml");
    fs::write(&config, "capacity: 4\n").unwrap();

    workshop(&home)
        .arg("--config")
        .arg(&config)
        .env("WORKSHOP_CAPACITY", "1")
        .write_stdin(script(&["Ana", "30", "", "tarde"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Aforo máximo: 1"))
        .stdout(predicate::str::contains("Se ha alcanzado el aforo máximo."));
}

#[test]
fn test_invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .args(["register", "--capacity", "0"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("capacity must be at least 1"));
}

#[test]
fn test_missing_config_file_fails() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .args(["config", "show", "--config"])
        .arg(home.path().join("nope.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read config file"));
}

// ============================================================================
// Price Command Tests
// ============================================================================

#[test]
fn test_price_by_age() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .args(["price", "10", "30", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25.00 €"))
        .stdout(predicate::str::contains("50.00 €"))
        .stdout(predicate::str::contains("35.00 €"))
        .stdout(predicate::str::contains("-50%"));
}

#[test]
fn test_price_json_with_base_override() {
    let home = TempDir::new().unwrap();
    let output = workshop(&home)
        .args(["price", "17", "65", "--base-price", "100", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let quotes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(quotes[0]["price"], 50.0);
    assert_eq!(quotes[1]["price"], 70.0);
    assert_eq!(quotes[1]["discount"], 0.3);
}

#[test]
fn test_price_requires_age() {
    let home = TempDir::new().unwrap();
    workshop(&home).arg("price").assert().failure();
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_show_yaml() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .args(["config", "show", "-f", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("capacity: 5"))
        .stdout(predicate::str::contains("base_price: 50.0"))
        .stdout(predicate::str::contains("max_age: 18"));
}

#[test]
fn test_config_keys() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("capacity"))
        .stdout(predicate::str::contains("max_attempts"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    workshop(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("workshop"));
}
