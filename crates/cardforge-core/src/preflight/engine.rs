//! Preflight check engine

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::preflight::checks::{
    ImagesDirCheck, OutputDirsCheck, RasterizerCheck, TableCheck, TemplateCheck,
};

/// Context provided to preflight checks
pub struct CheckContext<'a> {
    pub config: &'a Config,
    pub root: &'a Path,
}

impl<'a> CheckContext<'a> {
    /// Resolve a configured path against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Existence check: a filesystem stat, any error counts as absent
    pub fn exists(&self, path: &Path) -> bool {
        std::fs::metadata(self.resolve(path)).is_ok()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

/// Result of a single check
pub struct CheckResult {
    pub id: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    pub fn pass(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: CheckStatus::Pass,
            message: message.into(),
        }
    }

    pub fn warning(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: CheckStatus::Warning,
            message: message.into(),
        }
    }

    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: CheckStatus::Error,
            message: message.into(),
        }
    }
}

/// Trait for preflight checks
pub trait PreflightCheck {
    fn name(&self) -> &str;

    fn run(&self, context: &CheckContext) -> CheckResult;
}

/// One finished check in a report
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub id: String,
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

/// Aggregated result of all preflight checks
#[derive(Debug, Clone, Serialize)]
pub struct PreflightReport {
    pub overall_status: CheckStatus,
    pub checks: Vec<Check>,
}

impl PreflightReport {
    pub fn is_ok(&self) -> bool {
        self.overall_status != CheckStatus::Error
    }

    pub fn failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Error)
            .count()
    }
}

/// Preflight engine - aggregates and runs all checks
pub struct PreflightEngine {
    checks: Vec<Box<dyn PreflightCheck>>,
}

impl PreflightEngine {
    pub fn new() -> Self {
        let checks: Vec<Box<dyn PreflightCheck>> = vec![
            Box::new(TableCheck),
            Box::new(TemplateCheck),
            Box::new(OutputDirsCheck),
            Box::new(ImagesDirCheck),
            Box::new(RasterizerCheck),
        ];
        Self { checks }
    }

    /// Run all checks and aggregate the overall status
    /// (Error > Warning > Pass)
    pub fn run(&self, config: &Config, root: &Path) -> PreflightReport {
        let context = CheckContext { config, root };

        let mut all_checks = Vec::new();
        let mut overall_status = CheckStatus::Pass;

        for check in &self.checks {
            let result = check.run(&context);

            overall_status = match (&overall_status, &result.status) {
                (CheckStatus::Error, _) | (_, CheckStatus::Error) => CheckStatus::Error,
                (CheckStatus::Warning, _) | (_, CheckStatus::Warning) => CheckStatus::Warning,
                _ => CheckStatus::Pass,
            };

            all_checks.push(Check {
                id: result.id,
                name: check.name().to_string(),
                status: result.status,
                message: result.message,
            });
        }

        PreflightReport {
            overall_status,
            checks: all_checks,
        }
    }
}

impl Default for PreflightEngine {
    fn default() -> Self {
        Self::new()
    }
}
