//! The individual preflight checks

use crate::preflight::engine::{CheckContext, CheckResult, PreflightCheck};
use crate::raster::Rasterizer;

/// Input table file must exist
pub struct TableCheck;

impl PreflightCheck for TableCheck {
    fn name(&self) -> &str {
        "table"
    }

    fn run(&self, context: &CheckContext) -> CheckResult {
        let table = &context.config.inputs.table;
        if context.exists(table) {
            CheckResult::pass("table_present", format!("table file {}", table.display()))
        } else {
            CheckResult::error(
                "table_present",
                format!("table file {} does not exist", table.display()),
            )
        }
    }
}

/// Default template and every named template must exist
pub struct TemplateCheck;

impl PreflightCheck for TemplateCheck {
    fn name(&self) -> &str {
        "templates"
    }

    fn run(&self, context: &CheckContext) -> CheckResult {
        let inputs = &context.config.inputs;

        let mut missing: Vec<String> = Vec::new();
        if !context.exists(&inputs.template) {
            missing.push(inputs.template.display().to_string());
        }
        for path in inputs.templates.values() {
            if !context.exists(path) {
                missing.push(path.display().to_string());
            }
        }

        if missing.is_empty() {
            CheckResult::pass(
                "templates_present",
                format!("1 default + {} named template(s)", inputs.templates.len()),
            )
        } else {
            CheckResult::error(
                "templates_present",
                format!("missing template(s): {}", missing.join(", ")),
            )
        }
    }
}

/// Both output directories must exist; they are never created implicitly
pub struct OutputDirsCheck;

impl PreflightCheck for OutputDirsCheck {
    fn name(&self) -> &str {
        "output dirs"
    }

    fn run(&self, context: &CheckContext) -> CheckResult {
        let output = &context.config.output;

        let mut missing: Vec<String> = Vec::new();
        for dir in [&output.svg_dir, &output.png_dir] {
            if !context.exists(dir) {
                missing.push(dir.display().to_string());
            }
        }

        if missing.is_empty() {
            CheckResult::pass(
                "output_dirs_present",
                format!("{} and {}", output.svg_dir.display(), output.png_dir.display()),
            )
        } else {
            CheckResult::error(
                "output_dirs_present",
                format!("missing output dir(s): {}", missing.join(", ")),
            )
        }
    }
}

/// Images directory is optional; when configured but absent, portraits
/// will silently fail to load in rendered cards, so warn
pub struct ImagesDirCheck;

impl PreflightCheck for ImagesDirCheck {
    fn name(&self) -> &str {
        "images dir"
    }

    fn run(&self, context: &CheckContext) -> CheckResult {
        match &context.config.inputs.images_dir {
            None => CheckResult::pass("images_dir_present", "not configured"),
            Some(dir) => {
                if context.exists(dir) {
                    CheckResult::pass("images_dir_present", format!("{}", dir.display()))
                } else {
                    CheckResult::warning(
                        "images_dir_present",
                        format!("images dir {} does not exist", dir.display()),
                    )
                }
            }
        }
    }
}

/// Rasterizer executable must resolve before the first use
pub struct RasterizerCheck;

impl PreflightCheck for RasterizerCheck {
    fn name(&self) -> &str {
        "rasterizer"
    }

    fn run(&self, context: &CheckContext) -> CheckResult {
        match Rasterizer::resolve(&context.config.raster) {
            Ok(rasterizer) => CheckResult::pass(
                "rasterizer_available",
                format!("{}", rasterizer.command().display()),
            ),
            Err(e) => CheckResult::error("rasterizer_available", e.to_string()),
        }
    }
}
