//! Cursor plumbing shared by the navigation handlers.

use ampl_analysis::navigate;

/// The text of `line_number`, with indices past the document end treated as
/// an empty line rather than an error.
pub fn line_at(lines: &[String], line_number: usize) -> &str {
    lines.get(line_number).map(String::as_str).unwrap_or("")
}

/// The identifier under the cursor, if the cursor sits on one.
pub fn word_at(lines: &[String], line_number: usize, column: usize) -> Option<&str> {
    navigate::word_at_position(line_at(lines, line_number), column)
}
