//! Output writer - derived filenames and overwrite-guarded writes

use std::path::Path;

use crate::error::{CardforgeError, Result};
use crate::record::Record;
use crate::report::Reporter;

/// Fallback stem prefix used when a record's name normalizes to nothing
const FALLBACK_PREFIX: &str = "card";

/// Outcome of an overwrite-guarded write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    SkippedExisting,
}

/// Derive the output filename stem for a record
///
/// Every space in the full name becomes an underscore. A name that
/// normalizes to the empty string falls back to `card_<selector>` (or
/// `card_default`). A unique id, when present, is prepended; the
/// configured suffix is appended.
pub fn derive_stem(record: &Record, suffix: &str) -> String {
    let cleaned = record.full_name().replace(' ', "_");

    let base = if cleaned.is_empty() {
        format!(
            "{}_{}",
            FALLBACK_PREFIX,
            record.template_key().unwrap_or("default")
        )
    } else {
        cleaned
    };

    let base = match record.id() {
        Some(id) => format!("{}_{}", id, base),
        None => base,
    };

    format!("{}{}", base, suffix)
}

pub fn svg_filename(record: &Record, suffix: &str) -> String {
    format!("{}.svg", derive_stem(record, suffix))
}

/// Bitmap filename for a vector filename, by extension substitution
pub fn png_filename(svg_name: &str) -> String {
    match svg_name.strip_suffix(".svg") {
        Some(stem) => format!("{}.png", stem),
        None => format!("{}.png", svg_name),
    }
}

/// True when a stat of the path succeeds; any error counts as absent
pub fn destination_exists(path: &Path) -> bool {
    std::fs::metadata(path).is_ok()
}

/// Write rendered vector content, honoring the overwrite policy
///
/// An existing destination with overwrite disallowed is skipped with a
/// warning naming the path. The check is advisory only; concurrent runs
/// against the same directory may still race.
pub fn write_vector(
    path: &Path,
    content: &str,
    overwrite: bool,
    reporter: &Reporter,
) -> Result<WriteOutcome> {
    if destination_exists(path) && !overwrite {
        reporter.warn(format!(
            "new SVG would overwrite {}; skipping this row (use --overwrite if this is okay)",
            path.display()
        ));
        return Ok(WriteOutcome::SkippedExisting);
    }

    std::fs::write(path, content).map_err(|e| CardforgeError::SvgWriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(WriteOutcome::Written)
}
