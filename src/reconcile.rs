//! Per-read reconciliation of multi-mapped SAM records.
//!
//! Given all mapped records of one read, decides for each record whether it is
//! written unchanged, written with an adjusted FLAG/MAPQ, rebuilt from the
//! primary record's SEQ/QUAL, or dropped.

use crate::cigar;
use crate::flags::{self, FlagBits};
use crate::group::ReadGroup;
use crate::record::AlignmentRecord;
use crate::sequence;
use crate::stats::Stats;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Candidates are rebuilt only when their clip score is strictly below this.
    pub max_clip_score: f64,
    /// MAPQ written over a zero MAPQ on accepted multi-map records.
    pub rescued_mapq: u8,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            max_clip_score: 0.05,
            rescued_mapq: 60,
        }
    }
}

/// A problem found while reconciling a read, reported in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// No record of a multi-record group is primary; the whole group is dropped.
    UnresolvedPrimary { read: String, entries: Vec<AlignmentRecord> },
    /// Candidate and primary CIGARs cover a different number of read bases.
    CigarLengthMismatch { read: String, primary: AlignmentRecord, affected: AlignmentRecord },
    /// Replaying the candidate CIGAR ran off the end of the primary SEQ.
    ReconstructionFailed { read: String, primary: AlignmentRecord, affected: AlignmentRecord },
    /// A CIGAR needed for reconstruction could not be parsed.
    MalformedCigar { read: String, cigar: String, affected: AlignmentRecord },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+")?;
        match self {
            Issue::UnresolvedPrimary { read, entries } => {
                writeln!(f, "> No primary entry exists for read {read}.")?;
                writeln!(f, "> Entries:")?;
                for entry in entries {
                    writeln!(f, ">\t{entry}")?;
                }
            }
            Issue::CigarLengthMismatch { read, primary, affected } => {
                writeln!(
                    f,
                    "> CIGARs indicate different sequence length, unable to reconstruct sequence for entry of read {read}."
                )?;
                writeln!(f, "> Primary entry:\t{primary}")?;
                writeln!(f, "> Affected entry:\t{affected}")?;
            }
            Issue::ReconstructionFailed { read, primary, affected } => {
                writeln!(f, "> Processing failed for entry of read {read}.")?;
                writeln!(f, "> Primary entry:\t{primary}")?;
                writeln!(f, "> Affected entry:\t{affected}")?;
            }
            Issue::MalformedCigar { read, cigar, affected } => {
                writeln!(f, "> Malformed CIGAR {cigar} for entry of read {read}.")?;
                writeln!(f, "> Affected entry:\t{affected}")?;
            }
        }
        Ok(())
    }
}

/// Output of reconciling one read group.
#[derive(Debug, Default)]
pub struct Reconciled {
    /// Records to write, in input order.
    pub records: Vec<AlignmentRecord>,
    pub stats: Stats,
    pub issues: Vec<Issue>,
}

/// Reconcile all records of one read.
pub fn reconcile(group: ReadGroup, config: &ReconcileConfig) -> Reconciled {
    let mut out = Reconciled::default();

    match group.records.len() {
        0 => {}
        1 => {
            let mut records = group.records;
            let record = records.remove(0);
            if record.map_qual > 0 {
                out.records.push(record);
                out.stats.unique_confirmed += 1;
            } else {
                out.stats.unique_rejected += 1;
            }
        }
        _ => reconcile_multi(group, config, &mut out),
    }

    for issue in &out.issues {
        tracing::debug!(read = %issue_read(issue), "{}", issue.to_string().trim_end());
    }

    out
}

fn issue_read(issue: &Issue) -> &str {
    match issue {
        Issue::UnresolvedPrimary { read, .. }
        | Issue::CigarLengthMismatch { read, .. }
        | Issue::ReconstructionFailed { read, .. }
        | Issue::MalformedCigar { read, .. } => read,
    }
}

fn reconcile_multi(group: ReadGroup, config: &ReconcileConfig, out: &mut Reconciled) {
    let ReadGroup { name, records } = group;

    let Some(primary_idx) = records.iter().position(|r| r.flags().is_primary()) else {
        out.issues.push(Issue::UnresolvedPrimary { read: name, entries: records });
        return;
    };

    let mut primary = records[primary_idx].clone();
    if primary.map_qual == 0 {
        primary.map_qual = config.rescued_mapq;
    }
    let primary_flags = primary.flags();

    for (idx, record) in records.into_iter().enumerate() {
        if idx == primary_idx {
            out.records.push(primary.clone());
            out.stats.multi_confirmed += 1;
        } else if !record.is_missing_sequence() {
            let mut adopted = record;
            adopted.flag = flags::clear_secondary(adopted.flag);
            if adopted.map_qual == 0 {
                adopted.map_qual = config.rescued_mapq;
            }
            out.records.push(adopted);
            out.stats.multi_confirmed += 1;
        } else {
            match fix_from_primary(&name, &primary, primary_flags, &record, config) {
                Fix::Fixed(fixed) => {
                    out.records.push(fixed);
                    out.stats.multi_fixed += 1;
                }
                Fix::Rejected => out.stats.multi_rejected += 1,
                Fix::Failed(issue) => out.issues.push(issue),
            }
        }
    }
}

enum Fix {
    Fixed(AlignmentRecord),
    Rejected,
    Failed(Issue),
}

fn fix_from_primary(
    read: &str,
    primary: &AlignmentRecord,
    primary_flags: FlagBits,
    record: &AlignmentRecord,
    config: &ReconcileConfig,
) -> Fix {
    let mut record_flags = record.flags();
    record_flags.is_secondary = false;

    // Fields 0-10 come from the primary, optional fields from the candidate.
    let mut fixed = AlignmentRecord { tags: record.tags.clone(), ..primary.clone() };

    let same_strand = record_flags.is_reverse_strand == primary_flags.is_reverse_strand;
    if same_strand && record.cigar == primary.cigar {
        fixed.pos = record.pos;
        return Fix::Fixed(fixed);
    }

    let malformed = |cigar: &str| {
        Fix::Failed(Issue::MalformedCigar {
            read: read.to_string(),
            cigar: cigar.to_string(),
            affected: record.clone(),
        })
    };
    let Ok(primary_ops) = cigar::parse(&primary.cigar) else {
        return malformed(&primary.cigar);
    };
    let Ok(record_ops) = cigar::parse(&record.cigar) else {
        return malformed(&record.cigar);
    };

    let (ref_seq, ref_qual, ref_ops) = if same_strand {
        (primary.seq.clone(), primary.qual.clone(), primary_ops)
    } else {
        (
            sequence::reverse_complement(&primary.seq),
            sequence::reverse_qualities(&primary.qual),
            cigar::reverse(&primary_ops),
        )
    };

    let score = match cigar::score(&record_ops, &ref_ops) {
        Ok(score) => score,
        Err(_) => {
            return Fix::Failed(Issue::CigarLengthMismatch {
                read: read.to_string(),
                primary: primary.clone(),
                affected: record.clone(),
            });
        }
    };

    if score >= config.max_clip_score {
        return Fix::Rejected;
    }

    match sequence::reconstruct(&record_ops, &ref_seq, &ref_qual) {
        // A CIGAR without stored bases (e.g. deletions only) rebuilds nothing.
        Ok((seq, _)) if seq.is_empty() => Fix::Failed(Issue::ReconstructionFailed {
            read: read.to_string(),
            primary: primary.clone(),
            affected: record.clone(),
        }),
        Ok((seq, qual)) => {
            fixed.flag = flags::encode(record_flags);
            fixed.pos = record.pos;
            fixed.cigar = record.cigar.clone();
            fixed.seq = seq;
            fixed.qual = qual;
            Fix::Fixed(fixed)
        }
        Err(_) => Fix::Failed(Issue::ReconstructionFailed {
            read: read.to_string(),
            primary: primary.clone(),
            affected: record.clone(),
        }),
    }
}
