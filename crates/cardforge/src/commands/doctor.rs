//! Doctor command - environment health check

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::env;

use cardforge_core::config::{consts, Config};
use cardforge_core::preflight::{Check, CheckStatus, PreflightEngine};
use cardforge_core::report::Reporter;

/// Doctor command JSON output schema
#[derive(Debug, Serialize)]
struct DoctorOutput {
    schema_version: String,
    project: ProjectInfo,
    timestamp: String,
    checks: Vec<Check>,
}

#[derive(Debug, Serialize)]
struct ProjectInfo {
    root: String,
}

/// Run environment health check
///
/// # Returns
///
/// Always returns Ok(()) - doctor command always exits 0
pub fn run(json: bool, verbose: bool, debug: bool) -> Result<()> {
    let reporter = Reporter::from_flags(verbose, debug);
    let current_dir = env::current_dir().unwrap_or_else(|_| ".".into());

    let mut checks = Vec::new();

    // Config check first; preflight runs against whatever config we end
    // up with so the remaining checks are still informative
    let (root, config) = match Config::find_root(&current_dir) {
        Some(root) => match Config::from_file(root.join(consts::CONFIG_FILE)) {
            Ok(config) => {
                checks.push(Check {
                    id: "config_valid".to_string(),
                    name: "Configuration file".to_string(),
                    status: CheckStatus::Pass,
                    message: "cardforge.toml is valid".to_string(),
                });
                (root, config)
            }
            Err(e) => {
                checks.push(Check {
                    id: "config_valid".to_string(),
                    name: "Configuration file".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Failed to load config: {}", e),
                });
                (root, Config::default())
            }
        },
        None => {
            checks.push(Check {
                id: "config_valid".to_string(),
                name: "Configuration file".to_string(),
                status: CheckStatus::Warning,
                message: "no cardforge.toml found; using defaults".to_string(),
            });
            (current_dir, Config::default())
        }
    };

    reporter.debug(format!("running preflight checks in {}", root.display()));
    let report = PreflightEngine::new().run(&config, &root);
    checks.extend(report.checks);

    let output = DoctorOutput {
        schema_version: "1.0".to_string(),
        project: ProjectInfo {
            root: root.display().to_string(),
        },
        timestamp: Utc::now().to_rfc3339(),
        checks,
    };

    if json {
        let json_str = serde_json::to_string_pretty(&output)?;
        println!("{}", json_str);
    } else {
        print_human_readable(&output);
    }

    Ok(())
}

fn print_human_readable(output: &DoctorOutput) {
    println!("{}", "Environment Health Check".bold());
    println!();

    println!("{}", "Project:".bold());
    println!("  Root: {}", output.project.root);
    println!();

    println!("{}", "Checks:".bold());
    for check in &output.checks {
        let status_str = match check.status {
            CheckStatus::Pass => "✓".green(),
            CheckStatus::Warning => "⚠".yellow(),
            CheckStatus::Error => "✗".red(),
        };

        println!("  {} {}: {}", status_str, check.name.bold(), check.message);
    }

    println!();
    println!("Timestamp: {}", output.timestamp);
}
