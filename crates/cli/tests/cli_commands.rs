use std::fs;

use predicates::prelude::*;
use tempfile::tempdir;

/// `apps` lists the built-in catalog without stores by default.
#[test]
fn apps_lists_builtin_catalog() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .current_dir(dir.path())
        .arg("apps")
        .assert()
        .success()
        .stdout(predicate::str::contains("com.forpda.lp"))
        .stdout(predicate::str::contains("cm.aptoide.pt").not());
}

#[test]
fn apps_include_stores_json() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .current_dir(dir.path())
        .args(["apps", "--include-stores", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"STORE\""))
        .stdout(predicate::str::contains("cm.aptoide.pt"));
}

/// `scan` reads `pm list packages` output from stdin.
#[test]
fn scan_reads_stdin_and_reports_detection() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .current_dir(dir.path())
        .args(["scan", "--packages", "-"])
        .write_stdin("package:com.android.chrome\npackage:com.forpda.lp\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pirate apps detected (1)"))
        .stdout(predicate::str::contains("LuckyPatcher"));
}

#[test]
fn scan_fail_on_detect_exits_non_zero() {
    let dir = tempdir().expect("tempdir");
    let listing = dir.path().join("packages.txt");
    fs::write(&listing, "cc.madkite.freedom\n").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .current_dir(dir.path())
        .arg("scan")
        .arg("--packages")
        .arg(&listing)
        .arg("--fail-on-detect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pirate app detected: Freedom"));
}

#[test]
fn scan_fails_when_listing_missing() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .current_dir(dir.path())
        .args(["scan", "--packages", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read package list"));
}

/// A config in the working directory is picked up automatically.
#[test]
fn init_config_then_scan_uses_config_defaults() {
    let dir = tempdir().expect("tempdir");

    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .current_dir(dir.path())
        .arg("init-config")
        .assert()
        .success();

    let config_path = dir.path().join("piracy-checker.json");
    assert!(config_path.exists(), "config should exist at {}", config_path.display());

    fs::write(&config_path, r#"{"config_version": "0.1.0", "include_stores": true}"#).unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .current_dir(dir.path())
        .args(["scan", "--packages", "-", "--json"])
        .write_stdin("package:cm.aptoide.pt\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Aptoide\""));
}

#[test]
fn license_record_and_status_round_trip() {
    let dir = tempdir().expect("tempdir");
    let db = dir.path().join("license.db");

    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .arg("license")
        .arg("record")
        .arg("--db")
        .arg(&db)
        .args(["--response", "licensed", "--extra", "VT=9999999999999&GT=0&GR=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Allow access: true"));

    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .arg("license")
        .arg("status")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Last response: licensed"))
        .stdout(predicate::str::contains("Allow access: yes"));
}

#[test]
fn license_record_rejects_unknown_response() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .arg("license")
        .arg("record")
        .arg("--db")
        .arg(dir.path().join("license.db"))
        .args(["--response", "maybe"])
        .assert()
        .failure();
}

#[test]
fn no_stores_flag_overrides_config() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("piracy-checker.json"),
        r#"{"config_version": "0.1.0", "include_stores": true}"#,
    )
    .unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .current_dir(dir.path())
        .args(["scan", "--packages", "-", "--no-stores"])
        .write_stdin("package:cm.aptoide.pt\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No pirate apps detected."));
}

#[test]
fn no_stores_conflicts_with_include_stores() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("piracy-checker")
        .current_dir(dir.path())
        .args(["apps", "--include-stores", "--no-stores"])
        .assert()
        .failure();
}
