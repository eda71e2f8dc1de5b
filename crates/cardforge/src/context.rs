//! Global context for CLI commands

use anyhow::Result;
use cardforge_core::config::Config;
use cardforge_core::report::Reporter;
use std::env;
use std::path::PathBuf;

/// Global context containing project root, config, and reporter
pub struct Context {
    pub root: PathBuf,
    pub config: Config,
    pub reporter: Reporter,
}

impl Context {
    /// Create a new context by locating the project root and loading its
    /// configuration
    ///
    /// Walks up from the current directory looking for cardforge.toml.
    /// Without one, the current directory is the root and every setting
    /// takes its default.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined or
    /// an existing cardforge.toml fails to parse.
    pub fn new(verbose: bool, debug: bool) -> Result<Self> {
        let current_dir = env::current_dir()?;
        let reporter = Reporter::from_flags(verbose, debug);

        let (root, config) = match Config::find_root(&current_dir) {
            Some(root) => {
                let config = Config::from_file(root.join(cardforge_core::config::consts::CONFIG_FILE))?;
                reporter.debug(format!("project root: {}", root.display()));
                (root, config)
            }
            None => {
                reporter.debug("no cardforge.toml found; using defaults");
                (current_dir, Config::default())
            }
        };

        Ok(Self {
            root,
            config,
            reporter,
        })
    }

    /// Location of the discardable run cache
    pub fn state_path(&self) -> PathBuf {
        self.root.join(".cardforge/state.json")
    }
}
