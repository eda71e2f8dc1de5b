//! Table parsing - rows, field escaping, and strictness policies
//!
//! The table is a plain comma-delimited text file with one header line.
//! There is no real CSV quoting mechanism; instead one designated
//! free-text field carries 3-character escape markers for an embedded
//! comma or double quote.

use crate::config::TableConfig;
use crate::error::{CardforgeError, Result};

/// Escape marker restored to a literal comma
pub const COMMA_MARK: &str = r"\c\";

/// Escape marker restored to a literal double quote
pub const QUOTE_MARK: &str = r"\q\";

/// Field count of the basic row shape: name, nickname, relationship,
/// birthday, image
pub const BASIC_FIELDS: usize = 5;

/// Field count of the extended row shape: basic plus template selector,
/// free-text detail, unique id
pub const EXTENDED_FIELDS: usize = 8;

/// Restore escape markers in a free-text field
pub fn unescape_field(raw: &str) -> String {
    raw.replace(COMMA_MARK, ",").replace(QUOTE_MARK, "\"")
}

/// Apply escape markers so a free-text field survives the comma split
pub fn escape_field(raw: &str) -> String {
    raw.replace(',', COMMA_MARK).replace('"', QUOTE_MARK)
}

/// Supported row shapes, tagged per schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    Basic,
    Extended,
}

/// One parsed row of the input table
///
/// Fields are reached through accessors rather than positional indexing;
/// accessors for fields the row's shape does not carry return `None`.
#[derive(Debug, Clone)]
pub struct Record {
    shape: RowShape,
    fields: Vec<String>,
}

impl Record {
    fn from_fields(mut fields: Vec<String>) -> Self {
        let shape = if fields.len() >= EXTENDED_FIELDS {
            fields.truncate(EXTENDED_FIELDS);
            RowShape::Extended
        } else {
            fields.truncate(BASIC_FIELDS);
            RowShape::Basic
        };
        Self { shape, fields }
    }

    pub fn shape(&self) -> RowShape {
        self.shape
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Non-empty optional field: empty strings count as absent
    fn optional_field(&self, index: usize) -> Option<&str> {
        self.field(index).filter(|value| !value.is_empty())
    }

    pub fn full_name(&self) -> &str {
        self.field(0).unwrap_or("")
    }

    pub fn nickname(&self) -> &str {
        self.field(1).unwrap_or("")
    }

    pub fn relationship(&self) -> &str {
        self.field(2).unwrap_or("")
    }

    pub fn birthday(&self) -> &str {
        self.field(3).unwrap_or("")
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.optional_field(4)
    }

    pub fn template_key(&self) -> Option<&str> {
        self.optional_field(5)
    }

    pub fn detail(&self) -> Option<&str> {
        self.optional_field(6)
    }

    pub fn id(&self) -> Option<&str> {
        self.optional_field(7)
    }
}

/// A row the parser declined, with its reason
#[derive(Debug, Clone)]
pub struct SkippedRow {
    /// 1-based line number in the table file
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Outcome of parsing a whole table
#[derive(Debug, Default)]
pub struct TableReport {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedRow>,
}

/// Parse the full table text into records
///
/// Tolerates both `\n` and `\r\n` line endings. Exactly one leading
/// header line is discarded (validated against `policy.expected_header`
/// when `strict_header` is set). Empty lines are skipped silently;
/// malformed rows are reported in the returned `skipped` list, never as
/// errors.
///
/// # Errors
///
/// Returns `TableHeaderMismatch` when strict header validation fails.
pub fn parse_table(text: &str, policy: &TableConfig) -> Result<TableReport> {
    let mut report = TableReport::default();
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let Some(header) = lines.next() else {
        return Ok(report);
    };

    if policy.strict_header && header != policy.expected_header {
        return Err(CardforgeError::TableHeaderMismatch {
            expected: policy.expected_header.clone(),
            found: header.to_string(),
        });
    }

    for (index, line) in lines.enumerate() {
        // Header is line 1
        let line_no = index + 2;

        if line.is_empty() {
            continue;
        }

        let mut fields: Vec<String> = line.split(',').map(str::to_string).collect();

        if policy.strict_fields && fields.len() != BASIC_FIELDS {
            report.skipped.push(SkippedRow {
                line: line_no,
                content: line.to_string(),
                reason: format!("row of unexpected length ({})", fields.len()),
            });
            continue;
        }

        if fields.len() < BASIC_FIELDS {
            report.skipped.push(SkippedRow {
                line: line_no,
                content: line.to_string(),
                reason: format!("too few fields ({})", fields.len()),
            });
            continue;
        }

        // The free-text detail field is the only one carrying escape markers
        if fields.len() >= EXTENDED_FIELDS {
            fields[6] = unescape_field(&fields[6]);
        }

        report.records.push(Record::from_fields(fields));
    }

    Ok(report)
}
