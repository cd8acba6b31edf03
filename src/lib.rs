//! # gff-density
//!
//! A library for counting and ranking genomic features per chromosome from
//! GFF3 annotations.
//!
//! Given a chromosome sizes table and a GFF3 annotation stream (plain or
//! gzipped), `gff-density` makes a single streaming pass that counts genes,
//! tRNAs, and snoRNAs, deduplicates exon-like records (`exon`,
//! `noncoding_exon`, `CDS`) by their (start, end, strand) triple, and
//! normalizes every count to a density per megabase. Records referencing
//! seqids absent from the sizes table are dropped and reported, never counted.
//!
//! ## Features
//!
//! - **Pre-seeded counters**: every chromosome in the sizes table gets a row,
//!   even with zero observed records
//! - **Exon-like deduplication**: identical coordinate/strand triples count
//!   once across `exon`, `noncoding_exon`, and `CDS`
//! - **Deterministic output**: rows ranked by gene density descending, ties
//!   broken by chromosome id; rejected seqids sorted ascending
//! - **Fail-fast coordinates**: a non-integer start/end aborts the run;
//!   truncated lines are skipped as expected noise
//! - **Atomic reports**: output files are fully written or not written at all
//!
//! ## Example
//!
//! ```rust
//! use gff_density::{Aggregator, GenomeSizes};
//! use gff_density::parsing::sizes::parse_sizes_text;
//!
//! let genome: GenomeSizes = parse_sizes_text("chrI\t230218\nchrII\t813184\n").unwrap();
//!
//! let mut aggregator = Aggregator::new(&genome);
//! let gff = "chrI\tsgd\tgene\t335\t649\t.\t+\t.\tID=YAL069W\n";
//! aggregator.consume(gff.as_bytes()).unwrap();
//!
//! let report = aggregator.finalize().unwrap();
//! assert_eq!(report.rows.len(), 2);
//! assert_eq!(report.rows[0].chrom, "chrI");
//! assert_eq!(report.rows[0].n_gene, 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Genome sizes, per-chromosome counters, and the aggregator
//! - [`parsing`]: Chromosome sizes and GFF3 line parsers
//! - [`report`]: Atomic TSV and rejected-id writers for the finalized report
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod report;

// Re-export commonly used types for convenience
pub use crate::core::aggregate::{Aggregator, FeatureReport, RejectedSeqids, ResultRow};
pub use crate::core::counters::{FeatureClass, FeatureCounters, Strand};
pub use crate::core::genome::GenomeSizes;
pub use crate::parsing::ParseError;
