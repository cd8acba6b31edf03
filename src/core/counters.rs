use std::collections::HashSet;

/// Strand of a feature record (column 6 in GFF3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    /// `+`
    Forward,
    /// `-`
    Reverse,
    /// `.`
    Unstranded,
    /// Anything else (e.g. `?`); kept verbatim so distinct raw values stay
    /// distinct in the deduplication key
    Other(char),
}

impl Strand {
    /// Parse a strand field. An empty field is treated as unstranded.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.chars().next() {
            Some('+') => Strand::Forward,
            Some('-') => Strand::Reverse,
            Some('.') | None => Strand::Unstranded,
            Some(c) => Strand::Other(c),
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
            Self::Unstranded => write!(f, "."),
            Self::Other(c) => write!(f, "{c}"),
        }
    }
}

/// The tracked feature categories. GFF3 types are an open vocabulary;
/// anything that does not map here is ignored entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureClass {
    /// `gene`
    Gene,
    /// `exon`, `noncoding_exon`, or `CDS` - interchangeable for counting,
    /// deduplicated by (start, end, strand)
    ExonLike,
    /// `tRNA`
    TRna,
    /// `snoRNA`
    SnoRna,
}

impl FeatureClass {
    /// Classify a GFF3 type string. Returns `None` for untracked types.
    #[must_use]
    pub fn from_type(feature_type: &str) -> Option<Self> {
        match feature_type {
            "gene" => Some(Self::Gene),
            "exon" | "noncoding_exon" | "CDS" => Some(Self::ExonLike),
            "tRNA" => Some(Self::TRna),
            "snoRNA" => Some(Self::SnoRna),
            _ => None,
        }
    }
}

/// Accumulators for one chromosome. Mutated only during the streaming pass,
/// then consumed by finalization.
#[derive(Debug, Clone, Default)]
pub struct FeatureCounters {
    /// Number of `gene` records seen
    pub n_gene: u64,
    /// Number of `tRNA` records seen
    pub n_trna: u64,
    /// Number of `snoRNA` records seen
    pub n_snorna: u64,
    /// Unique (start, end, strand) triples from exon-like records
    exon_keys: HashSet<(u64, u64, Strand)>,
}

impl FeatureCounters {
    /// Record one classified feature. Exon-like insertion is idempotent: a
    /// triple seen under multiple type labels, or multiple times, counts once.
    pub fn record(&mut self, class: FeatureClass, start: u64, end: u64, strand: Strand) {
        match class {
            FeatureClass::Gene => self.n_gene += 1,
            FeatureClass::ExonLike => {
                self.exon_keys.insert((start, end, strand));
            }
            FeatureClass::TRna => self.n_trna += 1,
            FeatureClass::SnoRna => self.n_snorna += 1,
        }
    }

    /// Deduplicated exon-like count (cardinality of the key set).
    #[must_use]
    pub fn n_exon_unique(&self) -> u64 {
        self.exon_keys.len() as u64
    }
}
