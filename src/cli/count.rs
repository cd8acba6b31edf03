//! Count command - stream an annotation file and write the density report.

use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::core::aggregate::{Aggregator, FeatureReport};
use crate::parsing::{gff, sizes};
use crate::report;

/// Arguments for the count command
#[derive(Args)]
pub struct CountArgs {
    /// GFF3 annotation file (plain text or gzipped)
    #[arg(required = true)]
    pub annotation: PathBuf,

    /// Chromosome sizes file: <chrom_id>\t<length_bp>, one per line
    #[arg(required = true)]
    pub chrom_sizes: PathBuf,

    /// Directory for output files (created if missing)
    #[arg(short, long, default_value = "results")]
    pub out_dir: PathBuf,

    /// File name for the result table, inside the output directory
    #[arg(long, default_value = "chr_feature_counts.tsv")]
    pub table_name: String,

    /// File name for the dropped seqid list, inside the output directory
    #[arg(long, default_value = "dropped_seqids.txt")]
    pub dropped_name: String,

    /// Number of top rows to echo in text output
    #[arg(long, default_value = "5")]
    pub top: usize,
}

/// Execute the count command
///
/// # Errors
///
/// Returns an error if an input cannot be parsed (including any non-integer
/// coordinate, which aborts the whole run) or an output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CountArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let genome = sizes::parse_sizes_file(&args.chrom_sizes)?;
    if verbose {
        eprintln!(
            "Loaded {} chromosomes from {}",
            genome.len(),
            args.chrom_sizes.display()
        );
    }

    let reader = gff::open_annotation(&args.annotation)?;
    let mut aggregator = Aggregator::new(&genome);
    aggregator.consume(reader)?;
    let report = aggregator.finalize()?;

    info!(
        chromosomes = report.rows.len(),
        dropped_seqids = report.rejected.id_count(),
        dropped_lines = report.rejected.line_count(),
        "aggregation complete"
    );
    if !report.rejected.is_empty() {
        warn!(
            count = report.rejected.id_count(),
            "annotation references seqids missing from the sizes table"
        );
    }

    std::fs::create_dir_all(&args.out_dir)?;
    let table_path = args.out_dir.join(&args.table_name);
    let dropped_path = args.out_dir.join(&args.dropped_name);

    report::write_table(&report.rows, &table_path)?;
    report::write_rejected(&report.rejected, &dropped_path)?;
    if verbose {
        eprintln!("Report written to {}", table_path.display());
    }

    match format {
        OutputFormat::Text => print_text_summary(&report, args.top),
        OutputFormat::Json => print_json_summary(&report)?,
        OutputFormat::Tsv => print_tsv_summary(&report),
    }

    Ok(())
}

fn print_text_summary(report: &FeatureReport, top: usize) {
    println!("Dropped seqids: {}", report.rejected.id_count());
    println!("Excluded feature lines: {}", report.rejected.line_count());

    if !report.rejected.is_empty() {
        let ids: Vec<&str> = report.rejected.ids().collect();
        println!("  {}", ids.join(", "));
    }

    let shown = top.min(report.rows.len());
    println!("\nTop {shown} chromosomes by gene density:");
    println!("{}", report::TABLE_HEADER);
    for row in report.rows.iter().take(shown) {
        println!("{}", report::format_row(row));
    }
}

fn print_json_summary(report: &FeatureReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_tsv_summary(report: &FeatureReport) {
    println!("{}", report::TABLE_HEADER);
    for row in &report.rows {
        println!("{}", report::format_row(row));
    }
}
