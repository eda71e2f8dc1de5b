//! state.json - discardable cache of the last run
//!
//! Written atomically (temp file + persist) so a crash mid-save never
//! leaves a torn file behind. Safe to delete at any time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pipeline::RunSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub schema_version: String,
    pub machine: MachineInfo,
    #[serde(default)]
    pub last_run: Option<LastRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInfo {
    pub os: String,
    pub arch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastRun {
    pub success: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub rows: usize,
    pub rows_skipped: usize,
    pub svg_written: usize,
    pub raster_spawned: usize,
    pub error: Option<String>,
}

impl LastRun {
    /// Record a finished generate run
    pub fn from_summary(
        summary: &RunSummary,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        duration_ms: u64,
    ) -> Self {
        Self {
            success: true,
            started_at,
            finished_at,
            duration_ms,
            rows: summary.rows,
            rows_skipped: summary.rows_skipped,
            svg_written: summary.svg_written,
            raster_spawned: summary.raster_spawned,
            error: None,
        }
    }

    /// Record a run that aborted before completing
    pub fn failure(
        error: String,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        duration_ms: u64,
    ) -> Self {
        Self {
            success: false,
            started_at,
            finished_at,
            duration_ms,
            rows: 0,
            rows_skipped: 0,
            svg_written: 0,
            raster_spawned: 0,
            error: Some(error),
        }
    }
}

impl State {
    pub fn empty() -> Self {
        Self {
            schema_version: "1.0".to_string(),
            machine: MachineInfo::detect(),
            last_run: None,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            crate::error::CardforgeError::StateReadError(format!("Failed to read: {}", e))
        })?;

        let state: Self = serde_json::from_str(&content).map_err(|e| {
            crate::error::CardforgeError::StateReadError(format!("Failed to parse: {}", e))
        })?;

        match state.schema_version.as_str() {
            "1.0" => Ok(state),
            version => Err(crate::error::CardforgeError::StateInvalidSchema(
                version.to_string(),
            )),
        }
    }

    /// Atomic update: write to a temp file in the same directory, fsync,
    /// then persist over the destination
    pub fn save(&self, path: impl AsRef<Path>) -> crate::error::Result<()> {
        use std::io::Write;

        let path = path.as_ref();
        let parent = path.parent().ok_or_else(|| {
            crate::error::CardforgeError::StateWriteError(
                "State path has no parent directory".to_string(),
            )
        })?;
        std::fs::create_dir_all(parent).map_err(|e| {
            crate::error::CardforgeError::StateWriteError(format!(
                "Failed to create parent dir: {}",
                e
            ))
        })?;

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            crate::error::CardforgeError::StateWriteError(format!("Failed to serialize: {}", e))
        })?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(|e| {
            crate::error::CardforgeError::StateWriteError(format!(
                "Failed to create temp file: {}",
                e
            ))
        })?;

        temp_file.write_all(content.as_bytes()).map_err(|e| {
            crate::error::CardforgeError::StateWriteError(format!(
                "Failed to write temp file: {}",
                e
            ))
        })?;

        temp_file.as_file().sync_all().map_err(|e| {
            crate::error::CardforgeError::StateWriteError(format!("Failed to sync temp file: {}", e))
        })?;

        temp_file.persist(path).map_err(|e| {
            crate::error::CardforgeError::StateWriteError(format!(
                "Failed to persist temp file: {}",
                e
            ))
        })?;

        Ok(())
    }

    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|_| Self::empty())
    }
}

impl MachineInfo {
    pub fn detect() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardforge_testkit::temp_dir_in_workspace;

    #[test]
    fn test_empty_state() {
        let state = State::empty();
        assert_eq!(state.schema_version, "1.0");
        assert!(state.last_run.is_none());
    }

    #[test]
    fn test_state_roundtrip() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join(".cardforge").join("state.json");

        let mut state = State::empty();
        let now = Utc::now();
        state.last_run = Some(LastRun {
            success: true,
            started_at: now,
            finished_at: now,
            duration_ms: 12,
            rows: 3,
            rows_skipped: 1,
            svg_written: 2,
            raster_spawned: 2,
            error: None,
        });
        state.save(&path).unwrap();

        let loaded = State::load(&path).unwrap();
        let last = loaded.last_run.unwrap();
        assert!(last.success);
        assert_eq!(last.rows, 3);
        assert_eq!(last.svg_written, 2);
    }

    #[test]
    fn test_unknown_schema_rejected() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"schema_version":"9.9","machine":{"os":"linux","arch":"x86_64"}}"#,
        )
        .unwrap();

        assert!(matches!(
            State::load(&path),
            Err(crate::error::CardforgeError::StateInvalidSchema(_))
        ));
    }

    #[test]
    fn test_load_or_empty_on_missing_file() {
        let temp = temp_dir_in_workspace();
        let state = State::load_or_empty(temp.path().join("nope.json"));
        assert!(state.last_run.is_none());
    }

    #[test]
    fn test_machine_detection() {
        let machine = MachineInfo::detect();
        assert!(!machine.os.is_empty());
        assert!(!machine.arch.is_empty());
    }
}
