use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::config::consts;
use crate::report::Reporter;

/// cardforge.toml schema
///
/// Every option has a hard-coded default, so a project without a config
/// file (or with an empty one) is fully usable. Immutable once resolved.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub raster: RasterConfig,
    #[serde(default)]
    pub table: TableConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    /// Table of personal info, one record per row
    #[serde(default = "default_table")]
    pub table: PathBuf,

    /// Template used when a row does not select one
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Named templates selectable per-row via the record's template field
    #[serde(default)]
    pub templates: BTreeMap<String, PathBuf>,

    /// Directory holding portrait images referenced by records
    #[serde(default)]
    pub images_dir: Option<PathBuf>,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            template: default_template(),
            templates: BTreeMap::new(),
            images_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_svg_dir")]
    pub svg_dir: PathBuf,

    #[serde(default = "default_png_dir")]
    pub png_dir: PathBuf,

    /// Appended to derived filenames before the extension
    #[serde(default)]
    pub suffix: String,

    /// Okay to overwrite existing outputs
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            svg_dir: default_svg_dir(),
            png_dir: default_png_dir(),
            suffix: String::new(),
            overwrite: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Rasterizer executable: a bare name resolved via PATH, or a path
    #[serde(default = "default_raster_command")]
    pub command: PathBuf,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Await rasterizer completion instead of detaching
    #[serde(default)]
    pub wait: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            command: default_raster_command(),
            width: default_width(),
            height: default_height(),
            wait: false,
        }
    }
}

/// Row-format strictness policies
///
/// The two legacy behaviors (exact header validation, exact field count)
/// are configuration choices of one implementation, not separate code
/// paths. Both default to lenient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub strict_header: bool,

    #[serde(default)]
    pub strict_fields: bool,

    #[serde(default = "default_expected_header")]
    pub expected_header: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            strict_header: false,
            strict_fields: false,
            expected_header: default_expected_header(),
        }
    }
}

fn default_table() -> PathBuf {
    PathBuf::from(consts::inputs::TABLE)
}

fn default_template() -> PathBuf {
    PathBuf::from(consts::inputs::TEMPLATE)
}

fn default_svg_dir() -> PathBuf {
    PathBuf::from(consts::output::SVG_DIR)
}

fn default_png_dir() -> PathBuf {
    PathBuf::from(consts::output::PNG_DIR)
}

fn default_raster_command() -> PathBuf {
    PathBuf::from(consts::raster::COMMAND)
}

fn default_width() -> u32 {
    consts::raster::WIDTH
}

fn default_height() -> u32 {
    consts::raster::HEIGHT
}

fn default_expected_header() -> String {
    consts::EXPECTED_HEADER.to_string()
}

/// Command-line overrides applied on top of file/default values
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub table: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub svg_dir: Option<PathBuf>,
    pub png_dir: Option<PathBuf>,
    pub images_dir: Option<PathBuf>,
    pub suffix: Option<String>,
    pub overwrite: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub wait: bool,
}

impl Config {
    /// Read cardforge.toml
    pub fn from_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| crate::error::CardforgeError::ConfigParseError(e.to_string()))?;

        toml::from_str(&content)
            .map_err(|e| crate::error::CardforgeError::ConfigParseError(e.to_string()))
    }

    /// Write cardforge.toml
    pub fn to_file(&self, path: impl AsRef<Path>) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::CardforgeError::ConfigParseError(e.to_string()))?;

        std::fs::write(path.as_ref(), content).map_err(crate::error::CardforgeError::IoError)?;

        Ok(())
    }

    /// Walk up from `start` looking for a directory containing cardforge.toml
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        let mut current = Some(start);
        while let Some(dir) = current {
            if dir.join(consts::CONFIG_FILE).is_file() {
                return Some(dir.to_path_buf());
            }
            current = dir.parent();
        }
        None
    }

    /// Merge explicit command-line values over the current configuration
    ///
    /// For each option the explicit value wins when supplied; either way
    /// the reporter records which path was taken.
    pub fn apply_overrides(&mut self, overrides: &Overrides, reporter: &Reporter) {
        resolve_path(&mut self.inputs.table, &overrides.table, "table file", reporter);
        resolve_path(
            &mut self.inputs.template,
            &overrides.template,
            "template file",
            reporter,
        );
        resolve_path(
            &mut self.output.svg_dir,
            &overrides.svg_dir,
            "svg output dir",
            reporter,
        );
        resolve_path(
            &mut self.output.png_dir,
            &overrides.png_dir,
            "png output dir",
            reporter,
        );

        match &overrides.images_dir {
            Some(dir) => {
                reporter.info(format!("images dir: set to {}", dir.display()));
                self.inputs.images_dir = Some(dir.clone());
            }
            None => match &self.inputs.images_dir {
                Some(dir) => reporter.info(format!("images dir: default to {}", dir.display())),
                None => reporter.info("images dir: not configured"),
            },
        }

        resolve_value(&mut self.output.suffix, &overrides.suffix, "filename suffix", reporter);
        resolve_value(&mut self.raster.width, &overrides.width, "png width", reporter);
        resolve_value(&mut self.raster.height, &overrides.height, "png height", reporter);

        // Flags only override in the affirmative; absence keeps the config value
        if overrides.overwrite {
            reporter.info("okay to overwrite files: set to true");
            self.output.overwrite = true;
        } else {
            reporter.info(format!(
                "okay to overwrite files: default to {}",
                self.output.overwrite
            ));
        }

        if overrides.wait {
            reporter.info("wait for rasterizer: set to true");
            self.raster.wait = true;
        } else {
            reporter.info(format!("wait for rasterizer: default to {}", self.raster.wait));
        }
    }
}

fn resolve_path(current: &mut PathBuf, explicit: &Option<PathBuf>, name: &str, reporter: &Reporter) {
    match explicit {
        Some(value) => {
            reporter.info(format!("{}: set to {}", name, value.display()));
            *current = value.clone();
        }
        None => reporter.info(format!("{}: default to {}", name, current.display())),
    }
}

fn resolve_value<T: Clone + Display>(
    current: &mut T,
    explicit: &Option<T>,
    name: &str,
    reporter: &Reporter,
) {
    match explicit {
        Some(value) => {
            reporter.info(format!("{}: set to {}", name, value));
            *current = value.clone();
        }
        None => reporter.info(format!("{}: default to {}", name, current)),
    }
}
