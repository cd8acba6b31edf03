//! Line-level parser for GFF3 annotation streams.
//!
//! GFF3 is tab-separated with 9 columns per feature line (0-indexed):
//! 0=seqid, 1=source, 2=type, 3=start, 4=end, 5=score, 6=strand, 7=frame,
//! 8=attributes. Only seqid, type, start, end, and strand are consumed here;
//! the rest are ignored. Lines starting with `#` are comments.
//!
//! Supports both uncompressed and gzip compressed files.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::core::counters::Strand;
use crate::parsing::ParseError;

/// Minimum number of tab-separated fields for a valid feature line.
const MIN_FIELDS: usize = 9;

/// One feature line, borrowed from the input buffer. Not retained after
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRecord<'a> {
    /// Sequence/chromosome identifier (column 0)
    pub seqid: &'a str,
    /// Feature type, open vocabulary (column 2)
    pub feature_type: &'a str,
    /// 1-based inclusive start (column 3)
    pub start: u64,
    /// 1-based inclusive end (column 4)
    pub end: u64,
    /// Strand (column 6)
    pub strand: Strand,
}

/// Check if the path is a gzipped file
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open an annotation file for streaming, transparently decompressing
/// gzip input based on the file extension.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_annotation(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parse a single annotation line into a [`FeatureRecord`].
///
/// Returns `Ok(None)` for lines that carry no feature: comments and lines
/// with fewer than 9 fields (truncated lines are expected noise and are
/// skipped without complaint).
///
/// # Errors
///
/// Returns `ParseError::MalformedCoordinate` if start or end is not a valid
/// integer. This is fatal for the whole run: coordinate corruption indicates
/// a corrupt source, not a line to skip.
pub fn parse_feature_line(line: &str, line_num: usize) -> Result<Option<FeatureRecord<'_>>, ParseError> {
    if line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return Ok(None);
    }

    let start: u64 = fields[3].parse().map_err(|_| {
        ParseError::MalformedCoordinate(format!(
            "Invalid start on line {}: '{}'",
            line_num, fields[3]
        ))
    })?;
    let end: u64 = fields[4].parse().map_err(|_| {
        ParseError::MalformedCoordinate(format!(
            "Invalid end on line {}: '{}'",
            line_num, fields[4]
        ))
    })?;

    Ok(Some(FeatureRecord {
        seqid: fields[0],
        feature_type: fields[2],
        start,
        end,
        strand: Strand::parse(fields[6]),
    }))
}
