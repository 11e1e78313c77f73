use std::fs;

use piracy_checker::{absolutize, read_package_list, resolve_config_path};
use tempfile::tempdir;

#[test]
fn absolutize_keeps_absolute_paths() {
    let tmp = tempdir().expect("tempdir");
    let abs = tmp.path().join("x.json");
    let result = absolutize(abs.to_str().unwrap()).expect("absolutize");
    assert_eq!(result, abs);
}

#[test]
fn absolutize_joins_relative_paths_with_cwd() {
    let cwd = std::env::current_dir().expect("cwd");
    assert_eq!(absolutize("packages.txt").unwrap(), cwd.join("packages.txt"));
}

#[test]
fn explicit_config_path_is_used_even_if_missing() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("custom.json");
    let resolved = resolve_config_path(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(resolved, Some(path));
}

#[test]
fn read_package_list_reports_missing_file() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("missing.txt");
    let err = read_package_list(missing.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Failed to read package list"), "unexpected error: {err}");
}

#[test]
fn read_package_list_reads_file_contents() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("pkgs.txt");
    fs::write(&path, "package:com.foo\n").unwrap();
    assert_eq!(read_package_list(path.to_str().unwrap()).unwrap(), "package:com.foo\n");
}
