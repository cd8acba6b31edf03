//! Parsers for the two text inputs consumed by the tool.
//!
//! - **Chromosome sizes**: two-column `<chrom_id>\t<length_bp>` tables
//! - **GFF3 annotations**: tab-separated feature lines, plain or gzipped
//!
//! Both parsers are line-oriented and streaming. The sizes parser is strict:
//! every line must carry exactly two fields and an integer length. The GFF3
//! parser is deliberately lenient about line *shape* (comment lines and lines
//! with fewer than 9 fields are skipped) but strict about coordinate *values*:
//! a non-integer start or end aborts the whole run, since corrupt coordinates
//! indicate a corrupt source rather than expected noise.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gff_density::parsing::{gff, sizes};
//! use std::path::Path;
//!
//! let genome = sizes::parse_sizes_file(Path::new("chrom.sizes")).unwrap();
//! let reader = gff::open_annotation(Path::new("annotations.gff.gz")).unwrap();
//! ```

use thiserror::Error;

pub mod gff;
pub mod sizes;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed chromosome sizes entry: {0}")]
    MalformedReference(String),

    #[error("Malformed coordinate: {0}")]
    MalformedCoordinate(String),

    #[error("Chromosome '{0}' has zero length; densities are undefined")]
    ZeroLengthChromosome(String),
}
