//! Parser for chromosome sizes tables.
//!
//! Format: `name\tlength_bp`, one chromosome per line, no header.

use std::path::Path;

use crate::core::genome::GenomeSizes;
use crate::parsing::ParseError;

/// Parse a chromosome sizes file with columns: name, length
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::MalformedReference` if the content is invalid.
pub fn parse_sizes_file(path: &Path) -> Result<GenomeSizes, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_sizes_text(&content)
}

/// Parse chromosome sizes text with columns: name, length
///
/// Every line must carry exactly two tab-separated fields with an integer
/// length. When the same chromosome id appears more than once, the last
/// occurrence wins.
///
/// # Errors
///
/// Returns `ParseError::MalformedReference` if a line does not have exactly
/// two fields, the length is not a non-negative integer, or no chromosomes
/// are found.
pub fn parse_sizes_text(text: &str) -> Result<GenomeSizes, ParseError> {
    let mut genome = GenomeSizes::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 2 {
            return Err(ParseError::MalformedReference(format!(
                "Line {line_num} has {} fields, expected 2",
                fields.len()
            )));
        }

        let length: u64 = fields[1].trim().parse().map_err(|_| {
            ParseError::MalformedReference(format!(
                "Invalid length on line {}: '{}'",
                line_num, fields[1]
            ))
        })?;

        genome.insert(fields[0].trim(), length);
    }

    if genome.is_empty() {
        return Err(ParseError::MalformedReference(
            "No chromosomes found in sizes file".to_string(),
        ));
    }

    Ok(genome)
}
