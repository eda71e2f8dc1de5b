//! Generate command - render the table into SVG cards and rasterize them

use anyhow::Result;
use chrono::Utc;

use cardforge_core::pipeline::{self, RunSummary};
use cardforge_core::report::Reporter;
use cardforge_core::state::{LastRun, State};

use crate::cli::GenerateArgs;
use crate::context::Context;

/// Run the generate pipeline and record the outcome in state.json
///
/// # Errors
///
/// Propagates any fatal pipeline error (failed preflight, unreadable
/// table or template, strict header mismatch, rasterizer failures at
/// spawn time). Per-row skips are warnings, not errors.
pub fn run(args: GenerateArgs, verbose: bool, debug: bool) -> Result<()> {
    let ctx = Context::new(verbose, debug)?;
    let mut config = ctx.config.clone();
    config.apply_overrides(&args.into_overrides(), &ctx.reporter);

    let started_at = Utc::now();
    let clock = std::time::Instant::now();

    let outcome = pipeline::run(&config, &ctx.root, &ctx.reporter);

    let finished_at = Utc::now();
    let duration_ms = clock.elapsed().as_millis() as u64;

    let state_path = ctx.state_path();
    let mut state = State::load_or_empty(&state_path);

    match outcome {
        Ok(summary) => {
            state.last_run = Some(LastRun::from_summary(
                &summary,
                started_at,
                finished_at,
                duration_ms,
            ));
            if let Err(e) = state.save(&state_path) {
                ctx.reporter.warn(format!("failed to save state: {}", e));
            }

            print_summary(&summary, config.raster.wait, &ctx.reporter);
            Ok(())
        }
        Err(e) => {
            state.last_run = Some(LastRun::failure(
                e.to_string(),
                started_at,
                finished_at,
                duration_ms,
            ));
            if let Err(save_err) = state.save(&state_path) {
                ctx.reporter.warn(format!("failed to save state: {}", save_err));
            }

            Err(e.into())
        }
    }
}

fn print_summary(summary: &RunSummary, waited: bool, reporter: &Reporter) {
    reporter.success(format!(
        "{} row(s) processed, {} skipped",
        summary.rows, summary.rows_skipped
    ));
    reporter.success(format!(
        "{} SVG file(s) written, {} left untouched",
        summary.svg_written, summary.svg_skipped
    ));

    if waited {
        let succeeded = summary.raster_spawned - summary.raster_failed;
        let line = format!(
            "{} PNG file(s) rasterized, {} skipped, {} failed",
            succeeded, summary.raster_skipped, summary.raster_failed
        );
        if summary.raster_failed == 0 {
            reporter.success(line);
        } else {
            reporter.warn(line);
        }
    } else {
        reporter.success(format!(
            "{} rasterizer job(s) running in the background, {} skipped",
            summary.raster_spawned, summary.raster_skipped
        ));
    }
}
