//! Report writers for the aggregation output.
//!
//! The result table and the rejected-identifier list are written atomically:
//! content goes to a temp file in the destination directory which is then
//! persisted over the final path, so a failed run never leaves a partial
//! artifact behind.

use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::aggregate::{RejectedSeqids, ResultRow};

/// Column order of the result table.
pub const TABLE_HEADER: &str = "chrom\tchrom_length_bp\tn_gene\tn_exon_unique\tn_tRNA\tn_snoRNA\tgene_per_Mb\texon_unique_per_Mb\ttRNA_per_Mb\tsnoRNA_per_Mb";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Format one row the way it appears in the table (no trailing newline).
#[must_use]
pub fn format_row(row: &ResultRow) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}",
        row.chrom,
        row.chrom_length_bp,
        row.n_gene,
        row.n_exon_unique,
        row.n_trna,
        row.n_snorna,
        row.gene_per_mb,
        row.exon_unique_per_mb,
        row.trna_per_mb,
        row.snorna_per_mb,
    )
}

/// Write the result table as TSV with a header row.
///
/// # Errors
///
/// Returns `ReportError::Io` if writing fails, or `ReportError::Persist` if
/// the temp file cannot be moved over the final path.
pub fn write_table(rows: &[ResultRow], path: &Path) -> Result<(), ReportError> {
    write_atomic(path, |out| {
        writeln!(out, "{TABLE_HEADER}")?;
        for row in rows {
            writeln!(out, "{}", format_row(row))?;
        }
        Ok(())
    })
}

/// Write the rejected identifiers, one per line, ascending.
///
/// # Errors
///
/// Returns `ReportError::Io` if writing fails, or `ReportError::Persist` if
/// the temp file cannot be moved over the final path.
pub fn write_rejected(rejected: &RejectedSeqids, path: &Path) -> Result<(), ReportError> {
    write_atomic(path, |out| {
        for id in rejected.ids() {
            writeln!(out, "{id}")?;
        }
        Ok(())
    })
}

/// Write to a temp file next to `path`, then persist over it.
fn write_atomic<F>(path: &Path, write_content: F) -> Result<(), ReportError>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut temp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new()?,
    };

    write_content(&mut temp)?;
    temp.flush()?;
    temp.persist(path)?;

    debug!(path = %path.display(), "wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::Aggregator;
    use crate::core::genome::GenomeSizes;

    fn sample_rows() -> Vec<ResultRow> {
        let mut genome = GenomeSizes::new();
        genome.insert("chrI", 230_218);
        genome.insert("chrII", 813_184);

        let mut aggregator = Aggregator::new(&genome);
        aggregator
            .observe_line("chrI\tsgd\tgene\t1\t10\t.\t+\t.\tID=a", 1)
            .unwrap();
        aggregator.finalize().unwrap().rows
    }

    #[test]
    fn test_format_row_four_decimals() {
        let rows = sample_rows();
        let line = format_row(&rows[0]);
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[0], "chrI");
        // Densities always carry exactly 4 decimal places
        assert_eq!(fields[6], "4.3437");
        assert_eq!(fields[9], "0.0000");
    }

    #[test]
    fn test_write_table_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.tsv");
        let rows = sample_rows();

        write_table(&rows, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), rows.len() + 1);
        assert_eq!(lines[0], TABLE_HEADER);
        assert_eq!(lines[1], format_row(&rows[0]));
    }

    #[test]
    fn test_write_table_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path_a = dir.path().join("a.tsv");
        let path_b = dir.path().join("b.tsv");
        let rows = sample_rows();

        write_table(&rows, &path_a).unwrap();
        write_table(&rows, &path_b).unwrap();

        let a = std::fs::read(&path_a).unwrap();
        let b = std::fs::read(&path_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_rejected_sorted() {
        let mut rejected = RejectedSeqids::default();
        rejected.record("chrMT");
        rejected.record("2-micron");
        rejected.record("chrMT");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dropped.txt");
        write_rejected(&rejected, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "2-micron\nchrMT\n");
    }
}
