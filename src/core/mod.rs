//! Core data types for per-chromosome feature counting.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`GenomeSizes`]: Immutable chromosome-id -> length mapping, the universe
//!   of valid seqids
//! - [`FeatureCounters`]: Per-chromosome accumulators, including the
//!   exon-like deduplication set
//! - [`Aggregator`]: Streaming pass over an annotation source
//! - [`ResultRow`], [`FeatureReport`], [`RejectedSeqids`]: Finalized,
//!   immutable output values
//!
//! Any record whose seqid is absent from the [`GenomeSizes`] map is rejected
//! and tracked, never counted. Every chromosome in the map appears in the
//! final report, even with zero observed records.

pub mod aggregate;
pub mod counters;
pub mod genome;

pub use aggregate::{Aggregator, FeatureReport, RejectedSeqids, ResultRow};
pub use counters::{FeatureClass, FeatureCounters, Strand};
pub use genome::GenomeSizes;
