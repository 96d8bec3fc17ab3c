use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WEEKENDESK: &str = "Weekendesk - Nouvelle réservation
Client : Sophie Martin
N° de réservation : WD-884512
Arrivée : 15/03/2025
Départ : 17/03/2025
Prix établissement payé par le client : 150,00 EUR
Montant payé par Weekendesk à l'établissement (TTC) : 120,00 EUR
";

const UNCLASSIFIED: &str = "Bonjour,
je souhaiterais connaître vos disponibilités pour juillet.
Cordialement";

fn otamail() -> Command {
    Command::cargo_bin("otamail").unwrap()
}

/// Temp directory holding a config file with an operator name.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{ "render": { "operator": "Julie" } }"#,
    )
    .unwrap();
    dir
}

fn config_arg(dir: &Path) -> String {
    dir.join("config.json").display().to_string()
}

#[test]
fn test_platforms_listing() {
    otamail()
        .arg("platforms")
        .assert()
        .success()
        .stdout(predicate::str::contains("weekendesk"))
        .stdout(predicate::str::contains("Booking.com"))
        .stdout(predicate::str::contains("direct"));
}

#[test]
fn test_templates_listing() {
    otamail()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("pms_simple"))
        .stdout(predicate::str::contains("Détaillé"));
}

#[test]
fn test_detect_file() {
    let dir = workspace();
    let email = dir.path().join("mail.txt");
    fs::write(&email, WEEKENDESK).unwrap();

    otamail()
        .arg("detect")
        .arg(&email)
        .assert()
        .success()
        .stdout("weekendesk\n");
}

#[test]
fn test_detect_stdin_fallback() {
    otamail()
        .args(["detect", "-", "--name"])
        .write_stdin(UNCLASSIFIED)
        .assert()
        .success()
        .stdout("Réservation directe\n");
}

#[test]
fn test_process_prints_script() {
    let dir = workspace();
    let email = dir.path().join("mail.txt");
    fs::write(&email, WEEKENDESK).unwrap();

    otamail()
        .arg("process")
        .arg(&email)
        .args(["--config", &config_arg(dir.path())])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Weekendesk\nTotal : 150.00 EUR\n"))
        .stdout(predicate::str::contains("Payline : 120.00 EUR"))
        .stdout(predicate::str::contains("Commission : 30.00 EUR"))
        .stdout(predicate::str::contains("Julie + "))
        .stdout(predicate::str::contains("Faire Payline de 120.00 EUR puis encaisser TDS + extras"));
}

#[test]
fn test_process_operator_flag_wins() {
    let dir = workspace();

    otamail()
        .args(["process", "-", "--operator", "Marc", "--template", "pms_simple"])
        .args(["--config", &config_arg(dir.path())])
        .write_stdin(WEEKENDESK)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[Weekendesk]\nT:150.00 V:120.00 C:30.00\n"))
        .stdout(predicate::str::contains("Marc/"))
        .stdout(predicate::str::contains("Julie").not());
}

#[test]
fn test_process_json_output() {
    let dir = workspace();
    let output = dir.path().join("out.json");

    otamail()
        .args(["process", "-", "--format", "json", "--platform", "direct"])
        .args(["--config", &config_arg(dir.path())])
        .arg("--output")
        .arg(&output)
        .write_stdin(WEEKENDESK)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["reservation"]["platform"], "direct");
    assert_eq!(json["detected"], false);
    assert!(json["summary"].as_str().unwrap().starts_with("Réservation directe\n"));
}

#[test]
fn test_process_rejects_unknown_platform() {
    let dir = workspace();

    otamail()
        .args(["process", "-", "--platform", "trivago"])
        .args(["--config", &config_arg(dir.path())])
        .write_stdin(WEEKENDESK)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown platform: trivago"));
}

#[test]
fn test_process_missing_file() {
    let dir = workspace();

    otamail()
        .args(["process", "does-not-exist.txt"])
        .args(["--config", &config_arg(dir.path())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_without_operator() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();

    otamail()
        .args(["process", "-"])
        .arg("--config")
        .arg(&config)
        .write_stdin(WEEKENDESK)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--operator"));
}

#[test]
fn test_batch_writes_summaries() {
    let dir = workspace();
    let inbox = dir.path().join("inbox");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    fs::write(inbox.join("a.txt"), WEEKENDESK).unwrap();
    fs::write(inbox.join("b.txt"), UNCLASSIFIED).unwrap();
    fs::write(inbox.join("notes.md"), "ignored").unwrap();

    otamail()
        .arg("batch")
        .arg(inbox.join("*").display().to_string())
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .args(["--config", &config_arg(dir.path())])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    let a = fs::read_to_string(out.join("a.txt")).unwrap();
    assert!(a.starts_with("Weekendesk\n"));
    let b = fs::read_to_string(out.join("b.txt")).unwrap();
    assert!(b.starts_with("Réservation directe\n"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert!(lines.next().unwrap().starts_with("filename,status,platform,reservation_id"));
    assert!(lines.next().unwrap().starts_with("a.txt,success,weekendesk,WD-884512"));
    assert!(lines.next().unwrap().starts_with("b.txt,success,direct,"));
}

#[test]
fn test_batch_continue_on_error() {
    let dir = workspace();
    let inbox = dir.path().join("inbox");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    fs::write(inbox.join("a.txt"), WEEKENDESK).unwrap();
    fs::write(inbox.join("empty.txt"), "   \n").unwrap();

    let pattern = inbox.join("*.txt").display().to_string();

    otamail()
        .args(["batch", &pattern, "--config", &config_arg(dir.path())])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty e-mail"));

    otamail()
        .args(["batch", &pattern, "--continue-on-error", "--summary"])
        .args(["--config", &config_arg(dir.path())])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed: 1"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.lines().any(|l| l.starts_with("empty.txt,error,")));
}

#[test]
fn test_batch_no_match() {
    let dir = workspace();

    otamail()
        .arg("batch")
        .arg(dir.path().join("*.eml").display().to_string())
        .args(["--config", &config_arg(dir.path())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_config_init_set_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("otamail.json").display().to_string();

    otamail()
        .args(["config", "init", "--config", &config])
        .assert()
        .success();

    otamail()
        .args(["config", "init", "--config", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    otamail()
        .args(["config", "set", "render.default_template", "compact", "--config", &config])
        .assert()
        .success();

    otamail()
        .args(["config", "get", "render.default_template", "--config", &config])
        .assert()
        .success()
        .stdout("\"compact\"\n");

    otamail()
        .args(["config", "set", "render.default_template", "fancy", "--config", &config])
        .assert()
        .failure();

    otamail()
        .args(["config", "set", "render.colour", "red", "--config", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
