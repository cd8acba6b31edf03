//! Streaming annotation aggregator.
//!
//! [`Aggregator`] makes a single sequential pass over a GFF3 stream,
//! classifying each record and accumulating per-chromosome counters that were
//! pre-seeded from a [`GenomeSizes`] map. There is no auto-creation of
//! missing keys: a seqid either exists in the map or the record is rejected
//! and tracked in [`RejectedSeqids`].
//!
//! Finalization consumes the counters and emits immutable [`ResultRow`]s,
//! sorted by gene density descending (ties broken by chromosome id
//! ascending) so the output is deterministic and diffable.

use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;

use serde::Serialize;

use crate::core::counters::{FeatureClass, FeatureCounters};
use crate::core::genome::GenomeSizes;
use crate::parsing::gff::parse_feature_line;
use crate::parsing::ParseError;

/// Helper function to convert u64 count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Round to 4 decimal places, half away from zero.
#[must_use]
fn round4(x: f64) -> f64 {
    (x * 1.0e4).round() / 1.0e4
}

/// Seqids seen in the annotation stream but absent from the sizes table.
///
/// Many-to-one: one identifier may account for many rejected lines, so the
/// id set and the line counter are tracked separately.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RejectedSeqids {
    ids: BTreeSet<String>,
    n_lines: u64,
}

impl RejectedSeqids {
    /// Record one rejected line for the given seqid.
    pub fn record(&mut self, seqid: &str) {
        if !self.ids.contains(seqid) {
            self.ids.insert(seqid.to_string());
        }
        self.n_lines += 1;
    }

    /// Distinct rejected identifiers, ascending lexicographic order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Number of distinct rejected identifiers.
    #[must_use]
    pub fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Total number of lines rejected for an unknown seqid.
    #[must_use]
    pub fn line_count(&self) -> u64 {
        self.n_lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// One finalized row of the report. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub chrom: String,
    pub chrom_length_bp: u64,
    pub n_gene: u64,
    pub n_exon_unique: u64,
    #[serde(rename = "n_tRNA")]
    pub n_trna: u64,
    #[serde(rename = "n_snoRNA")]
    pub n_snorna: u64,
    #[serde(rename = "gene_per_Mb")]
    pub gene_per_mb: f64,
    #[serde(rename = "exon_unique_per_Mb")]
    pub exon_unique_per_mb: f64,
    #[serde(rename = "tRNA_per_Mb")]
    pub trna_per_mb: f64,
    #[serde(rename = "snoRNA_per_Mb")]
    pub snorna_per_mb: f64,
}

/// Output of a completed aggregation pass.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport {
    /// One row per reference chromosome, sorted per the ordering invariant
    pub rows: Vec<ResultRow>,
    /// Seqids dropped for not being in the sizes table
    pub rejected: RejectedSeqids,
}

/// Streaming annotation aggregator.
///
/// Counters are pre-populated for every chromosome in the sizes map, so a
/// chromosome with no observed records still yields a (zero-count) row.
#[derive(Debug)]
pub struct Aggregator<'a> {
    genome: &'a GenomeSizes,
    counters: HashMap<String, FeatureCounters>,
    rejected: RejectedSeqids,
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub fn new(genome: &'a GenomeSizes) -> Self {
        let counters = genome
            .iter()
            .map(|(name, _)| (name.to_string(), FeatureCounters::default()))
            .collect();

        Self {
            genome,
            counters,
            rejected: RejectedSeqids::default(),
        }
    }

    /// Consume an annotation stream line by line.
    ///
    /// May be called more than once to aggregate over several sources; all
    /// lines feed the same counters.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading fails, or
    /// `ParseError::MalformedCoordinate` on a non-integer start/end, which
    /// aborts the whole pass.
    pub fn consume<R: BufRead>(&mut self, reader: R) -> Result<(), ParseError> {
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            self.observe_line(&line, i + 1)?;
        }
        Ok(())
    }

    /// Apply the per-line processing rules to a single line.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MalformedCoordinate` on a non-integer start/end.
    pub fn observe_line(&mut self, line: &str, line_num: usize) -> Result<(), ParseError> {
        // Coordinates are parsed before the seqid check: a corrupt
        // coordinate aborts the run even on a line that would be rejected.
        let Some(record) = parse_feature_line(line, line_num)? else {
            return Ok(());
        };

        // Unknown seqids are tracked, not raised
        let Some(counters) = self.counters.get_mut(record.seqid) else {
            self.rejected.record(record.seqid);
            return Ok(());
        };

        if let Some(class) = FeatureClass::from_type(record.feature_type) {
            counters.record(class, record.start, record.end, record.strand);
        }

        Ok(())
    }

    /// Convert the accumulated counters into the final report.
    ///
    /// Consumes the aggregator: no further mutation is possible after
    /// finalization.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::ZeroLengthChromosome` if any reference
    /// chromosome has length zero, since its densities would be undefined.
    pub fn finalize(mut self) -> Result<FeatureReport, ParseError> {
        let mut rows = Vec::with_capacity(self.genome.len());

        for (chrom, length) in self.genome.iter() {
            if length == 0 {
                return Err(ParseError::ZeroLengthChromosome(chrom.to_string()));
            }

            let counters = self.counters.remove(chrom).unwrap_or_default();
            let megabases = count_to_f64(length) / 1.0e6;
            let n_exon_unique = counters.n_exon_unique();

            rows.push(ResultRow {
                chrom: chrom.to_string(),
                chrom_length_bp: length,
                n_gene: counters.n_gene,
                n_exon_unique,
                n_trna: counters.n_trna,
                n_snorna: counters.n_snorna,
                gene_per_mb: round4(count_to_f64(counters.n_gene) / megabases),
                exon_unique_per_mb: round4(count_to_f64(n_exon_unique) / megabases),
                trna_per_mb: round4(count_to_f64(counters.n_trna) / megabases),
                snorna_per_mb: round4(count_to_f64(counters.n_snorna) / megabases),
            });
        }

        rows.sort_by(|a, b| {
            b.gene_per_mb
                .total_cmp(&a.gene_per_mb)
                .then_with(|| a.chrom.cmp(&b.chrom))
        });

        Ok(FeatureReport {
            rows,
            rejected: self.rejected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genome() -> GenomeSizes {
        let mut genome = GenomeSizes::new();
        genome.insert("chrI", 230_218);
        genome.insert("chrII", 813_184);
        genome
    }

    fn feed(aggregator: &mut Aggregator<'_>, lines: &[&str]) {
        for (i, line) in lines.iter().enumerate() {
            aggregator.observe_line(line, i + 1).unwrap();
        }
    }

    fn row<'r>(report: &'r FeatureReport, chrom: &str) -> &'r ResultRow {
        report.rows.iter().find(|r| r.chrom == chrom).unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let genome = genome();
        let mut aggregator = Aggregator::new(&genome);
        feed(
            &mut aggregator,
            &[
                "chrI\tsgd\tgene\t335\t649\t.\t+\t.\tID=YAL069W",
                "chrI\tsgd\tCDS\t100\t200\t.\t+\t.\tID=a",
                "chrI\tsgd\tCDS\t100\t200\t.\t+\t.\tID=b",
                "chrII\tsgd\ttRNA\t1000\t1072\t.\t-\t.\tID=t1",
                "chrMT\tsgd\tgene\t1\t100\t.\t+\t.\tID=m1",
            ],
        );

        let report = aggregator.finalize().unwrap();
        assert_eq!(report.rows.len(), 2);

        let chr1 = row(&report, "chrI");
        assert_eq!(chr1.n_gene, 1);
        assert_eq!(chr1.n_exon_unique, 1);
        assert_eq!(chr1.n_trna, 0);

        let chr2 = row(&report, "chrII");
        assert_eq!(chr2.n_gene, 0);
        assert_eq!(chr2.n_trna, 1);

        let rejected: Vec<&str> = report.rejected.ids().collect();
        assert_eq!(rejected, vec!["chrMT"]);
        assert_eq!(report.rejected.line_count(), 1);
    }

    #[test]
    fn test_all_chromosomes_present_without_records() {
        let genome = genome();
        let aggregator = Aggregator::new(&genome);
        let report = aggregator.finalize().unwrap();

        assert_eq!(report.rows.len(), 2);
        for row in &report.rows {
            assert_eq!(row.n_gene, 0);
            assert_eq!(row.n_exon_unique, 0);
            assert_eq!(row.gene_per_mb, 0.0);
        }
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_exon_dedup_across_type_labels() {
        let genome = genome();
        let mut aggregator = Aggregator::new(&genome);
        feed(
            &mut aggregator,
            &[
                "chrI\tsgd\texon\t100\t200\t.\t+\t.\tID=a",
                "chrI\tsgd\tCDS\t100\t200\t.\t+\t.\tID=b",
                "chrI\tsgd\tnoncoding_exon\t100\t200\t.\t+\t.\tID=c",
            ],
        );

        let report = aggregator.finalize().unwrap();
        assert_eq!(row(&report, "chrI").n_exon_unique, 1);
    }

    #[test]
    fn test_density_invariant() {
        let genome = genome();
        let mut aggregator = Aggregator::new(&genome);
        for i in 0..7 {
            let line = format!("chrI\tsgd\tgene\t{}\t{}\t.\t+\t.\tID=g{i}", i * 10 + 1, i * 10 + 5);
            aggregator.observe_line(&line, i + 1).unwrap();
        }

        let report = aggregator.finalize().unwrap();
        let chr1 = row(&report, "chrI");
        assert_eq!(chr1.n_gene, 7);
        assert_eq!(chr1.gene_per_mb, round4(7.0 / (230_218.0 / 1.0e6)));
        assert_eq!(chr1.gene_per_mb, 30.406);
    }

    #[test]
    fn test_ordering_by_gene_density_desc() {
        let mut genome = GenomeSizes::new();
        genome.insert("chrA", 1_000_000);
        genome.insert("chrB", 1_000_000);
        genome.insert("chrC", 500_000);

        let mut aggregator = Aggregator::new(&genome);
        // chrC: 1 gene over 0.5 Mb -> 2.0/Mb; chrA and chrB: 1 gene over
        // 1 Mb -> 1.0/Mb each, tie broken by id
        feed(
            &mut aggregator,
            &[
                "chrB\tsgd\tgene\t1\t10\t.\t+\t.\tID=a",
                "chrA\tsgd\tgene\t1\t10\t.\t+\t.\tID=b",
                "chrC\tsgd\tgene\t1\t10\t.\t+\t.\tID=c",
            ],
        );

        let report = aggregator.finalize().unwrap();
        let order: Vec<&str> = report.rows.iter().map(|r| r.chrom.as_str()).collect();
        assert_eq!(order, vec!["chrC", "chrA", "chrB"]);
    }

    #[test]
    fn test_rejection_completeness() {
        let genome = genome();
        let mut aggregator = Aggregator::new(&genome);
        feed(
            &mut aggregator,
            &[
                "chrMT\tsgd\tgene\t1\t10\t.\t+\t.\tID=a",
                "chrMT\tsgd\tgene\t20\t30\t.\t+\t.\tID=b",
                "chrMT\tsgd\texon\t1\t10\t.\t+\t.\tID=c",
                "2-micron\tsgd\tgene\t1\t10\t.\t+\t.\tID=d",
            ],
        );

        let report = aggregator.finalize().unwrap();
        let rejected: Vec<&str> = report.rejected.ids().collect();
        assert_eq!(rejected, vec!["2-micron", "chrMT"]);
        assert_eq!(report.rejected.id_count(), 2);
        assert_eq!(report.rejected.line_count(), 4);
    }

    #[test]
    fn test_untracked_types_ignored() {
        let genome = genome();
        let mut aggregator = Aggregator::new(&genome);
        feed(
            &mut aggregator,
            &[
                "chrI\tsgd\tchromosome\t1\t230218\t.\t.\t.\tID=chrI",
                "chrI\tsgd\tmRNA\t1\t100\t.\t+\t.\tID=a",
                "chrI\tsgd\tARS\t1\t100\t.\t+\t.\tID=b",
            ],
        );

        let report = aggregator.finalize().unwrap();
        let chr1 = row(&report, "chrI");
        assert_eq!(chr1.n_gene, 0);
        assert_eq!(chr1.n_exon_unique, 0);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_bad_coordinate_aborts_even_for_unknown_seqid() {
        let genome = genome();
        let mut aggregator = Aggregator::new(&genome);
        let result = aggregator.observe_line("chrMT\tsgd\tgene\tNaN\t10\t.\t+\t.\tID=a", 1);
        assert!(matches!(result, Err(ParseError::MalformedCoordinate(_))));
    }

    #[test]
    fn test_zero_length_chromosome_fails() {
        let mut genome = GenomeSizes::new();
        genome.insert("chrI", 0);

        let aggregator = Aggregator::new(&genome);
        let result = aggregator.finalize();
        assert!(matches!(result, Err(ParseError::ZeroLengthChromosome(_))));
    }

    #[test]
    fn test_consume_reader_skips_comments_and_short_lines() {
        let genome = genome();
        let mut aggregator = Aggregator::new(&genome);
        let input = "##gff-version 3\n\
                     chrI\tsgd\tgene\t1\t10\t.\t+\t.\tID=a\n\
                     chrI\tsgd\tgene\t1\t10\n\
                     # trailing comment\n";
        aggregator.consume(input.as_bytes()).unwrap();

        let report = aggregator.finalize().unwrap();
        assert_eq!(row(&report, "chrI").n_gene, 1);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(1.0 / 3.0), 0.3333);
        assert_eq!(round4(2.0 / 3.0), 0.6667);
        assert_eq!(round4(2.0), 2.0);
        assert_eq!(round4(0.0), 0.0);
    }
}
