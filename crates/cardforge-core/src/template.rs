//! Template loading and placeholder substitution
//!
//! Templates are plain SVG text carrying `$TOKEN$` placeholders plus one
//! literal image-path anchor. Rendering is a single pass over a
//! token-to-value mapping; each token is replaced across the whole text
//! (every occurrence, not just the first). Tokens a template does not
//! reference are simply never found - that is not an error.

use std::collections::HashMap;
use std::path::Path;

use crate::config::InputsConfig;
use crate::error::{CardforgeError, Result};
use crate::record::Record;

pub const TOKEN_FULL_NAME: &str = "$FULL_NAME$";
pub const TOKEN_NICKNAME: &str = "$NICKNAME$";
pub const TOKEN_RELATIONSHIP: &str = "$RELATIONSHIP$";
pub const TOKEN_BIRTHDAY: &str = "$BIRTHDAY$";

/// Four description slots; the detail field is routed into one of the
/// first and third, the rest stay empty
pub const TOKEN_DESC: [&str; 4] = ["$DESC_1$", "$DESC_2$", "$DESC_3$", "$DESC_4$"];

/// Literal filename in the template replaced by a record's portrait path
pub const IMAGE_ANCHOR: &str = "default_person.png";

/// Nickname value meaning "use the full name"
pub const NICKNAME_SENTINEL: &str = "none";

/// Details shorter than this go to the short slot; at or beyond it, the
/// long slot. Tuned to the fixed-size text regions of the stock template.
pub const DETAIL_WRAP_THRESHOLD: usize = 94;

/// The default template plus any named templates selectable per-row
#[derive(Debug)]
pub struct TemplateSet {
    default: String,
    by_key: HashMap<String, String>,
}

impl TemplateSet {
    /// Load the default template and every named template, resolving
    /// relative paths against `root`
    pub fn load(inputs: &InputsConfig, root: &Path) -> Result<Self> {
        let default = read_template(root, &inputs.template)?;

        let mut by_key = HashMap::new();
        for (key, path) in &inputs.templates {
            by_key.insert(key.clone(), read_template(root, path)?);
        }

        Ok(Self { default, by_key })
    }

    /// Select a template by the record's template field
    ///
    /// Falls back to the default when the record selects nothing or names
    /// an unknown key.
    pub fn select(&self, key: Option<&str>) -> &str {
        key.and_then(|k| self.by_key.get(k))
            .map(String::as_str)
            .unwrap_or(&self.default)
    }

    pub fn named_count(&self) -> usize {
        self.by_key.len()
    }
}

fn read_template(root: &Path, path: &Path) -> Result<String> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    std::fs::read_to_string(&resolved).map_err(|e| CardforgeError::TemplateReadError {
        path: resolved,
        reason: e.to_string(),
    })
}

/// Render a template for one record
///
/// Business rules live here, not in the caller:
/// - a nickname equal to the `"none"` sentinel takes the full name;
/// - the free-text detail fills the short slot when under the wrap
///   threshold (the long slot is emptied) and the long slot otherwise;
/// - the image anchor becomes `../<images_dir>/<image>` when the record
///   carries an image reference (the extra `../` accounts for the svg
///   output directory sitting one level deeper than the template
///   directory); without a reference the anchor is left as a fallback.
pub fn render(template: &str, record: &Record, images_dir: Option<&Path>) -> String {
    let full_name = record.full_name();
    let nickname = if record.nickname() == NICKNAME_SENTINEL {
        full_name
    } else {
        record.nickname()
    };
    let (short_detail, long_detail) = route_detail(record.detail());

    let mut substitutions: Vec<(&str, String)> = vec![
        (TOKEN_FULL_NAME, full_name.to_string()),
        (TOKEN_NICKNAME, nickname.to_string()),
        (TOKEN_RELATIONSHIP, record.relationship().to_string()),
        (TOKEN_BIRTHDAY, record.birthday().to_string()),
        (TOKEN_DESC[0], short_detail),
        (TOKEN_DESC[1], String::new()),
        (TOKEN_DESC[2], long_detail),
        (TOKEN_DESC[3], String::new()),
    ];

    if let Some(image) = record.image_ref() {
        substitutions.push((IMAGE_ANCHOR, image_path(images_dir, image)));
    }

    substitutions
        .iter()
        .fold(template.to_string(), |text, (token, value)| {
            text.replace(token, value)
        })
}

/// Route the detail text into the short or long slot by length
///
/// Length is counted in characters. Exactly at the threshold resolves to
/// the long slot.
fn route_detail(detail: Option<&str>) -> (String, String) {
    match detail {
        None => (String::new(), String::new()),
        Some(text) => {
            if text.chars().count() < DETAIL_WRAP_THRESHOLD {
                (text.to_string(), String::new())
            } else {
                (String::new(), text.to_string())
            }
        }
    }
}

fn image_path(images_dir: Option<&Path>, image: &str) -> String {
    match images_dir {
        Some(dir) => format!("../{}/{}", dir.display(), image),
        None => image.to_string(),
    }
}
