//! Test utilities for cardforge
//!
//! This crate provides shared testing utilities used across the
//! cardforge workspace: workspace-local temp directories, fixture
//! projects, and fake rasterizer scripts standing in for the external
//! converter.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sample table matching the default expected header, two valid rows
pub const SAMPLE_TABLE: &str = "\
Name,Nickname,Relationship,Birthday,Image
Ada Lovelace,none,aunt,Dec 10,ada.png
Grace Hopper,Amazing Grace,cousin,Dec 9,grace.png
";

/// Minimal SVG template carrying every recognized token plus the image
/// anchor
pub const SAMPLE_TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="750" height="1125">
  <title>$FULL_NAME$</title>
  <text id="name">$FULL_NAME$</text>
  <text id="nickname">$NICKNAME$</text>
  <text id="relationship">$RELATIONSHIP$</text>
  <text id="birthday">$BIRTHDAY$</text>
  <text id="desc1">$DESC_1$</text>
  <text id="desc2">$DESC_2$</text>
  <text id="desc3">$DESC_3$</text>
  <text id="desc4">$DESC_4$</text>
  <image href="default_person.png"/>
</svg>
"#;

/// Creates a temporary directory within `.tmp/` at the workspace root
///
/// Centralizes all test temporary files in one gitignored location. The
/// returned `TempDir` cleans up on drop.
///
/// # Panics
///
/// Panics when the current directory cannot be determined or the
/// directories cannot be created.
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");

    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}

/// Lay out a complete fixture project under `root`
///
/// Creates the default input/output directory structure, the sample
/// table, and the sample template. No cardforge.toml is written; tests
/// add one when they need non-default configuration.
pub fn fixture_project(root: &Path) {
    for dir in [
        "input/data",
        "input/templates",
        "input/portraits",
        "output/svg",
        "output/png",
    ] {
        std::fs::create_dir_all(root.join(dir)).expect("Failed to create fixture directory");
    }

    std::fs::write(root.join("input/data/people.csv"), SAMPLE_TABLE)
        .expect("Failed to write fixture table");
    std::fs::write(root.join("input/templates/card.svg"), SAMPLE_TEMPLATE)
        .expect("Failed to write fixture template");
}

/// Write a fake rasterizer that records its argv and copies the input
/// SVG to the `--export-filename` target
///
/// The argv line lands in `rasterizer-args.txt` next to the script.
#[cfg(unix)]
pub fn capturing_rasterizer(dir: &Path) -> PathBuf {
    let script = r#"#!/bin/sh
dir=$(cd "$(dirname "$0")" && pwd)
echo "$@" > "$dir/rasterizer-args.txt"
out=""
in=""
skip=0
for a in "$@"; do
  if [ "$skip" = 1 ]; then skip=0; continue; fi
  case "$a" in
    --export-filename=*) out="${a#--export-filename=}" ;;
    -w|-h) skip=1 ;;
    *) in="$a" ;;
  esac
done
cp "$in" "$out"
"#;
    write_script(dir, "fake-rasterizer", script)
}

/// Write a fake rasterizer that always exits 3 without producing output
#[cfg(unix)]
pub fn failing_rasterizer(dir: &Path) -> PathBuf {
    write_script(dir, "failing-rasterizer", "#!/bin/sh\nexit 3\n")
}

/// Write a fake rasterizer that sleeps before copying, for detach tests
#[cfg(unix)]
pub fn slow_rasterizer(dir: &Path, millis: u64) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
sleep {}
out=""
in=""
skip=0
for a in "$@"; do
  if [ "$skip" = 1 ]; then skip=0; continue; fi
  case "$a" in
    --export-filename=*) out="${{a#--export-filename=}}" ;;
    -w|-h) skip=1 ;;
    *) in="$a" ;;
  esac
done
cp "$in" "$out"
"#,
        millis as f64 / 1000.0
    );
    write_script(dir, "slow-rasterizer", &script)
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fake rasterizer");

    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat fake rasterizer")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to set permissions");

    path
}

#[cfg(windows)]
pub fn capturing_rasterizer(dir: &Path) -> PathBuf {
    // Minimal .bat stand-in; argv capture is unix-only
    let path = dir.join("fake-rasterizer.bat");
    std::fs::write(&path, "@echo off\r\nexit /b 0\r\n").expect("Failed to write fake rasterizer");
    path
}

#[cfg(windows)]
pub fn failing_rasterizer(dir: &Path) -> PathBuf {
    let path = dir.join("failing-rasterizer.bat");
    std::fs::write(&path, "@echo off\r\nexit /b 3\r\n").expect("Failed to write fake rasterizer");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_in_workspace_creates_in_tmp() {
        let temp = temp_dir_in_workspace();
        let path = temp.path();

        assert!(
            path.to_string_lossy().contains(".tmp"),
            "Path should contain .tmp, got: {}",
            path.display()
        );
        assert!(path.is_dir());
    }

    #[test]
    fn test_temp_dir_auto_cleanup() {
        let path = {
            let temp = temp_dir_in_workspace();
            let p = temp.path().to_path_buf();
            assert!(p.exists());
            p
        };

        assert!(!path.exists(), "Directory should not exist after drop");
    }

    #[test]
    fn test_fixture_project_layout() {
        let temp = temp_dir_in_workspace();
        fixture_project(temp.path());

        assert!(temp.path().join("input/data/people.csv").is_file());
        assert!(temp.path().join("input/templates/card.svg").is_file());
        assert!(temp.path().join("output/svg").is_dir());
        assert!(temp.path().join("output/png").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_capturing_rasterizer_copies_input() {
        use std::process::Command;

        let temp = temp_dir_in_workspace();
        let script = capturing_rasterizer(temp.path());

        let input = temp.path().join("in.svg");
        let output = temp.path().join("out.png");
        std::fs::write(&input, "payload").unwrap();

        let status = Command::new(&script)
            .arg(format!("--export-filename={}", output.display()))
            .arg("-w")
            .arg("10")
            .arg("-h")
            .arg("20")
            .arg(&input)
            .status()
            .unwrap();

        assert!(status.success());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "payload");
        let args = std::fs::read_to_string(temp.path().join("rasterizer-args.txt")).unwrap();
        assert!(args.contains("-w 10"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_rasterizer_exit_code() {
        use std::process::Command;

        let temp = temp_dir_in_workspace();
        let script = failing_rasterizer(temp.path());

        let status = Command::new(&script).status().unwrap();
        assert_eq!(status.code(), Some(3));
    }
}
