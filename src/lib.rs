//! recover-mi: fix and recover multi-mapped read information in SAM files.
//!
//! Aligners may report secondary alignments with `*` in place of SEQ and
//! QUAL, leaving it to consumers to recover both from the read's primary
//! record. This crate performs that recovery once so every written record
//! is self-contained.
//!
//! # Library usage
//!
//! ```no_run
//! use recover_mi::{ReconcileConfig, pipeline, report::Report};
//! use std::io::BufReader;
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = BufReader::new(std::fs::File::open("reads.sam")?);
//! let mut sam_out = Vec::new();
//! let mut report = Report::begin(Vec::new(), "recover-mi reads.sam out/")?;
//! let summary = pipeline::process(input, &mut sam_out, &mut report, &ReconcileConfig::default())?;
//! println!("{} records fixed", summary.stats.multi_fixed);
//! let log = String::from_utf8(report.into_inner())?;
//! # Ok(())
//! # }
//! ```

pub mod cigar;
pub mod cli;
pub mod errors;
pub mod flags;
pub mod group;
pub mod pipeline;
pub mod reconcile;
pub mod record;
pub mod report;
pub mod sequence;
pub mod stats;

// Flat re-exports for the most commonly used types.
pub use errors::{RecoverError, Result};
pub use flags::FlagBits;
pub use group::{ReadGroup, ReadGroupAccumulator};
pub use reconcile::{Issue, ReconcileConfig, Reconciled, reconcile};
pub use record::AlignmentRecord;
pub use stats::Stats;
