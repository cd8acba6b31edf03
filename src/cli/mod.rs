//! Command-line interface for gff-density.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **count**: Stream a GFF3 annotation, count features per chromosome, and
//!   write the ranked report and rejected-seqid list
//!
//! ## Usage
//!
//! ```text
//! # Count features against a chromosome sizes table
//! gff-density count annotations.gff.gz chrom.sizes
//!
//! # Custom output directory
//! gff-density count annotations.gff chrom.sizes --out-dir out
//!
//! # JSON output for scripting
//! gff-density count annotations.gff.gz chrom.sizes --format json
//! ```

use clap::{Parser, Subcommand};

pub mod count;

#[derive(Parser)]
#[command(name = "gff-density")]
#[command(version)]
#[command(about = "Count and rank genomic features per chromosome from GFF3 annotations")]
#[command(
    long_about = "gff-density streams a GFF3 annotation file (plain or gzipped), counts genes, unique exon-like regions, tRNAs, and snoRNAs per chromosome, and reports counts and densities per megabase.\n\nChromosomes come from a two-column sizes table; records referencing unknown sequence ids are dropped and reported. Output is a TSV table ranked by gene density plus a sorted list of dropped seqids, suitable for downstream plotting."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the console summary
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count features per chromosome and write the density report
    Count(count::CountArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
