//! The generate pipeline - preflight, parse, render, write, rasterize
//!
//! Per row the progression is linear: Parse -> Render -> Write-SVG ->
//! Invoke-Rasterizer, with early termination on overwrite skips. Rows
//! are independent; processing order only affects log ordering.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{CardforgeError, Result};
use crate::preflight::PreflightEngine;
use crate::raster::{RasterJob, Rasterizer};
use crate::record::parse_table;
use crate::report::Reporter;
use crate::template::TemplateSet;
use crate::writer::{self, WriteOutcome};

/// Counters for one generate run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Rows seen after the header (excluding empty lines)
    pub rows: usize,
    /// Rows declined by the parser
    pub rows_skipped: usize,
    pub svg_written: usize,
    pub svg_skipped: usize,
    pub raster_spawned: usize,
    pub raster_skipped: usize,
    /// Only counted when awaiting rasterizer completion
    pub raster_failed: usize,
}

/// Run the whole pipeline for every row of the configured table
///
/// # Errors
///
/// Fails before touching any row when preflight checks fail, the table
/// or a template cannot be read, or strict header validation rejects the
/// table. Per-row problems (malformed rows, overwrite conflicts) are
/// warnings in the summary, never errors.
pub fn run(config: &Config, root: &Path, reporter: &Reporter) -> Result<RunSummary> {
    let report = PreflightEngine::new().run(config, root);
    for check in &report.checks {
        match check.status {
            crate::preflight::CheckStatus::Pass => {
                reporter.debug(format!("{}: {}", check.name, check.message))
            }
            crate::preflight::CheckStatus::Warning => {
                reporter.warn(format!("{}: {}", check.name, check.message))
            }
            crate::preflight::CheckStatus::Error => {
                reporter.warn(format!("{}: {}", check.name, check.message))
            }
        }
    }
    if !report.is_ok() {
        return Err(CardforgeError::PreflightFailed {
            failed: report.failed_count(),
        });
    }
    reporter.info("preflight checks passed");

    let rasterizer = Rasterizer::resolve(&config.raster)?;
    let templates = TemplateSet::load(&config.inputs, root)?;

    let table_path = resolve(root, &config.inputs.table);
    let table_text =
        std::fs::read_to_string(&table_path).map_err(|e| CardforgeError::TableReadError {
            path: table_path.clone(),
            reason: e.to_string(),
        })?;

    let parsed = parse_table(&table_text, &config.table)?;

    let mut summary = RunSummary {
        rows: parsed.records.len() + parsed.skipped.len(),
        rows_skipped: parsed.skipped.len(),
        ..RunSummary::default()
    };

    for skipped in &parsed.skipped {
        reporter.warn(format!(
            "line {}: {}: {}",
            skipped.line, skipped.reason, skipped.content
        ));
    }

    let svg_dir = resolve(root, &config.output.svg_dir);
    let png_dir = resolve(root, &config.output.png_dir);
    let mut jobs: Vec<RasterJob> = Vec::new();

    for record in &parsed.records {
        let template = templates.select(record.template_key());
        let rendered = crate::template::render(template, record, config.inputs.images_dir.as_deref());

        let svg_name = writer::svg_filename(record, &config.output.suffix);
        let svg_path = svg_dir.join(&svg_name);

        match writer::write_vector(&svg_path, &rendered, config.output.overwrite, reporter)? {
            WriteOutcome::SkippedExisting => {
                summary.svg_skipped += 1;
                continue;
            }
            WriteOutcome::Written => {
                summary.svg_written += 1;
                reporter.info(format!("wrote SVG: {}", svg_name));
            }
        }

        let png_name = writer::png_filename(&svg_name);
        let png_path = png_dir.join(&png_name);

        if writer::destination_exists(&png_path) && !config.output.overwrite {
            reporter.warn(format!(
                "new PNG would overwrite {}; skipping this PNG (use --overwrite if this is okay)",
                png_path.display()
            ));
            summary.raster_skipped += 1;
            continue;
        }

        let job = rasterizer.spawn(&svg_path, &png_path, reporter)?;
        summary.raster_spawned += 1;
        reporter.info(format!("rasterizing: {}", png_name));

        if config.raster.wait {
            jobs.push(job);
        } else {
            job.detach();
        }
    }

    for job in jobs {
        let outcome = job.wait()?;
        if !outcome.success {
            summary.raster_failed += 1;
            reporter.warn(format!(
                "rasterizer exited with {:?} for {}",
                outcome.exit_code,
                outcome.png.display()
            ));
        } else {
            reporter.info(format!("wrote PNG: {}", outcome.png.display()));
        }
    }

    Ok(summary)
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
