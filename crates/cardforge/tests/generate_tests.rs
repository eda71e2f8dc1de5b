//! Integration tests for the generate command

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

#[cfg(unix)]
use cardforge_testkit::{capturing_rasterizer, failing_rasterizer, fixture_project};
#[cfg(unix)]
use cardforge_testkit::temp_dir_in_workspace;

/// Helper: write a cardforge.toml pointing at a fake rasterizer
#[cfg(unix)]
fn write_config(root: &Path, rasterizer: &Path, extra: &str) {
    let config = format!(
        r#"[raster]
command = "{}"
wait = true

{}"#,
        rasterizer.display(),
        extra
    );
    fs::write(root.join("cardforge.toml"), config).expect("Failed to write config");
}

#[cfg(unix)]
#[test]
fn test_generate_end_to_end() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    fixture_project(root);
    write_config(root, &capturing_rasterizer(root), "");

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    let assert = cmd.arg("generate").current_dir(root).assert();

    assert
        .success()
        .stdout(predicate::str::contains("2 SVG file(s) written"));

    let svg = fs::read_to_string(root.join("output/svg/Ada_Lovelace.svg")).unwrap();
    assert!(svg.contains("Ada Lovelace"));
    assert!(!svg.contains("$FULL_NAME$"));
    assert!(root.join("output/png/Ada_Lovelace.png").exists());
    assert!(root.join("output/png/Grace_Hopper.png").exists());
}

#[cfg(unix)]
#[test]
fn test_generate_writes_state_file() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    fixture_project(root);
    write_config(root, &capturing_rasterizer(root), "");

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg("generate").current_dir(root).assert().success();

    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join(".cardforge/state.json")).unwrap())
            .unwrap();
    assert_eq!(state["schema_version"], "1.0");
    assert_eq!(state["last_run"]["success"], true);
    assert_eq!(state["last_run"]["rows"], 2);
    assert_eq!(state["last_run"]["svg_written"], 2);
}

#[cfg(unix)]
#[test]
fn test_generate_skips_existing_without_overwrite() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    fixture_project(root);
    write_config(root, &capturing_rasterizer(root), "");

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg("generate").current_dir(root).assert().success();

    let svg_path = root.join("output/svg/Ada_Lovelace.svg");
    fs::write(&svg_path, "sentinel").unwrap();

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    let assert = cmd.arg("generate").current_dir(root).assert();

    // Skips are warnings, never a failed run
    assert
        .success()
        .stdout(predicate::str::contains("0 SVG file(s) written"))
        .stderr(predicate::str::contains("overwrite"));
    assert_eq!(fs::read_to_string(&svg_path).unwrap(), "sentinel");
}

#[cfg(unix)]
#[test]
fn test_generate_overwrite_flag_replaces() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    fixture_project(root);
    write_config(root, &capturing_rasterizer(root), "");

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg("generate").current_dir(root).assert().success();

    let svg_path = root.join("output/svg/Ada_Lovelace.svg");
    fs::write(&svg_path, "sentinel").unwrap();

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg("generate")
        .arg("--overwrite")
        .current_dir(root)
        .assert()
        .success();

    assert!(fs::read_to_string(&svg_path).unwrap().contains("Ada Lovelace"));
}

#[cfg(unix)]
#[test]
fn test_generate_reports_rasterizer_failures() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    fixture_project(root);
    write_config(root, &failing_rasterizer(root), "");

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    let assert = cmd.arg("generate").current_dir(root).assert();

    // Rasterizer exit codes are reported but do not fail the run
    assert
        .success()
        .stderr(predicate::str::contains("2 failed"));
    assert!(!root.join("output/png/Ada_Lovelace.png").exists());
}

#[cfg(unix)]
#[test]
fn test_generate_strict_header_mismatch_fails() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    fixture_project(root);
    write_config(
        root,
        &capturing_rasterizer(root),
        "[table]\nstrict_header = true\nexpected_header = \"Something,Else\"\n",
    );

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    let assert = cmd.arg("generate").current_dir(root).assert();

    assert
        .failure()
        .stderr(predicate::str::contains("TABLE_HEADER_MISMATCH"));
    assert_eq!(fs::read_dir(root.join("output/svg")).unwrap().count(), 0);

    // Failed runs still land in state.json
    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join(".cardforge/state.json")).unwrap())
            .unwrap();
    assert_eq!(state["last_run"]["success"], false);
}

#[cfg(unix)]
#[test]
fn test_generate_missing_output_dirs_fails_preflight() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    fixture_project(root);
    write_config(root, &capturing_rasterizer(root), "");
    fs::remove_dir(root.join("output/png")).unwrap();

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    let assert = cmd.arg("generate").current_dir(root).assert();

    assert
        .failure()
        .stderr(predicate::str::contains("PREFLIGHT_FAILED"));
}

#[cfg(unix)]
#[test]
fn test_generate_width_height_reach_rasterizer() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    fixture_project(root);
    write_config(root, &capturing_rasterizer(root), "");

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg("generate")
        .arg("--width")
        .arg("320")
        .arg("--height")
        .arg("480")
        .current_dir(root)
        .assert()
        .success();

    let args = fs::read_to_string(root.join("rasterizer-args.txt")).unwrap();
    assert!(args.contains("-w 320"));
    assert!(args.contains("-h 480"));
}

#[cfg(unix)]
#[test]
fn test_generate_malformed_rows_skipped_not_fatal() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    fixture_project(root);
    write_config(root, &capturing_rasterizer(root), "");

    fs::write(
        root.join("input/data/people.csv"),
        "Name,Nickname,Relationship,Birthday,Image\n\
         Ada Lovelace,none,aunt,Dec 10,ada.png\n\
         too,few,fields\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    let assert = cmd.arg("generate").current_dir(root).assert();

    assert
        .success()
        .stdout(predicate::str::contains("1 skipped"))
        .stdout(predicate::str::contains("1 SVG file(s) written"));
}
