//! Rasterizer invocation - spawning the external SVG-to-PNG converter
//!
//! The rasterizer is a black box. Each invocation is an explicit
//! `RasterJob` with an observable exit status; callers either `wait` on
//! the job or `detach` it (the legacy fire-and-forget behavior, in which
//! case the main process may exit before the bitmap lands on disk).

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::config::RasterConfig;
use crate::error::{CardforgeError, Result};
use crate::report::Reporter;

/// A resolved rasterizer executable plus target dimensions
#[derive(Debug, Clone)]
pub struct Rasterizer {
    command: PathBuf,
    width: u32,
    height: u32,
}

impl Rasterizer {
    /// Resolve the configured command and validate the dimensions
    ///
    /// A bare name is looked up in PATH; anything with a path component
    /// must exist as given.
    pub fn resolve(config: &RasterConfig) -> Result<Self> {
        for (field, value) in [("raster.width", config.width), ("raster.height", config.height)] {
            if value == 0 {
                return Err(CardforgeError::ConfigInvalidValue {
                    field: field.to_string(),
                    reason: "must be nonzero".to_string(),
                });
            }
        }

        let command = &config.command;

        let resolved = if command.components().count() > 1 || command.is_absolute() {
            if command.exists() {
                command.clone()
            } else {
                return Err(CardforgeError::RasterizerNotFound {
                    command: command.clone(),
                });
            }
        } else {
            which::which(command).map_err(|_| CardforgeError::RasterizerNotFound {
                command: command.clone(),
            })?
        };

        Ok(Self {
            command: resolved,
            width: config.width,
            height: config.height,
        })
    }

    pub fn command(&self) -> &Path {
        &self.command
    }

    /// Spawn a conversion of `svg` into `png` at the configured size
    ///
    /// Paths are absolutized before handoff so the child is independent
    /// of our working directory. The child's output streams are
    /// discarded; its exit status is the only observable signal.
    pub fn spawn(&self, svg: &Path, png: &Path, reporter: &Reporter) -> Result<RasterJob> {
        let svg_abs = absolutize(svg)?;
        let png_abs = absolutize(png)?;

        reporter.debug(format!(
            "executing: {} --export-filename={} -w {} -h {} {}",
            self.command.display(),
            png_abs.display(),
            self.width,
            self.height,
            svg_abs.display()
        ));

        let child = Command::new(&self.command)
            .arg(format!("--export-filename={}", png_abs.display()))
            .arg("-w")
            .arg(self.width.to_string())
            .arg("-h")
            .arg(self.height.to_string())
            .arg(&svg_abs)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CardforgeError::RasterizerSpawnFailed(e.to_string()))?;

        Ok(RasterJob {
            child,
            png: png_abs,
        })
    }
}

/// A spawned rasterization with an observable completion signal
#[derive(Debug)]
pub struct RasterJob {
    child: Child,
    png: PathBuf,
}

impl RasterJob {
    /// Let the child run unobserved; it is not killed on drop
    pub fn detach(self) {
        drop(self.child);
    }

    /// Await completion and report the exit status
    pub fn wait(mut self) -> Result<RasterOutcome> {
        let status = self
            .child
            .wait()
            .map_err(|e| CardforgeError::RasterizerWaitFailed(e.to_string()))?;

        Ok(RasterOutcome {
            png: self.png,
            exit_code: status.code(),
            success: status.success(),
        })
    }
}

/// Exit status of a finished rasterization
#[derive(Debug, Clone)]
pub struct RasterOutcome {
    pub png: PathBuf,
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Make a path absolute without requiring the file to exist yet
///
/// The parent directory must exist (preflight guarantees this for output
/// directories); the file itself may not, as with a PNG about to be
/// produced.
fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file = path.file_name().ok_or_else(|| {
        CardforgeError::Generic(format!("path has no filename: {}", path.display()))
    })?;

    let parent = parent
        .canonicalize()
        .map_err(CardforgeError::IoError)?;

    Ok(parent.join(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardforge_testkit::{capturing_rasterizer, failing_rasterizer, temp_dir_in_workspace};

    fn config_for(command: PathBuf) -> RasterConfig {
        RasterConfig {
            command,
            width: 200,
            height: 300,
            wait: true,
        }
    }

    #[test]
    fn test_resolve_explicit_path_must_exist() {
        let config = config_for(PathBuf::from("/nonexistent/dir/rasterize"));
        let result = Rasterizer::resolve(&config);
        assert!(matches!(
            result,
            Err(CardforgeError::RasterizerNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_zero_dimensions() {
        let mut config = config_for(PathBuf::from("inkscape"));
        config.width = 0;
        let result = Rasterizer::resolve(&config);
        assert!(matches!(
            result,
            Err(CardforgeError::ConfigInvalidValue { ref field, .. }) if field.as_str() == "raster.width"
        ));

        let mut config = config_for(PathBuf::from("inkscape"));
        config.height = 0;
        let result = Rasterizer::resolve(&config);
        assert!(matches!(
            result,
            Err(CardforgeError::ConfigInvalidValue { ref field, .. }) if field.as_str() == "raster.height"
        ));
    }

    #[test]
    fn test_resolve_bare_name_not_in_path() {
        let config = config_for(PathBuf::from("no-such-rasterizer-binary"));
        let result = Rasterizer::resolve(&config);
        assert!(matches!(
            result,
            Err(CardforgeError::RasterizerNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_passes_dimensions_and_paths() {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        let fake = capturing_rasterizer(root);

        let svg = root.join("in.svg");
        std::fs::write(&svg, "<svg/>").unwrap();
        let png = root.join("out.png");

        let rasterizer = Rasterizer::resolve(&config_for(fake)).unwrap();
        let job = rasterizer
            .spawn(&svg, &png, &Reporter::default())
            .unwrap();
        let outcome = job.wait().unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(0));
        // The capturing script copies its input to the output path
        assert_eq!(std::fs::read_to_string(&png).unwrap(), "<svg/>");

        let argv = std::fs::read_to_string(root.join("rasterizer-args.txt")).unwrap();
        assert!(argv.contains("-w 200"));
        assert!(argv.contains("-h 300"));
        assert!(argv.contains("in.svg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_reports_nonzero_exit() {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        let fake = failing_rasterizer(root);

        let svg = root.join("in.svg");
        std::fs::write(&svg, "<svg/>").unwrap();
        let png = root.join("out.png");

        let rasterizer = Rasterizer::resolve(&config_for(fake)).unwrap();
        let outcome = rasterizer
            .spawn(&svg, &png, &Reporter::default())
            .unwrap()
            .wait()
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(3));
        assert!(!png.exists());
    }

    #[test]
    fn test_absolutize_nonexistent_file_in_existing_dir() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("not-yet.png");
        let abs = absolutize(&path).unwrap();
        assert!(abs.is_absolute());
        assert_eq!(abs.file_name().unwrap(), "not-yet.png");
    }
}
