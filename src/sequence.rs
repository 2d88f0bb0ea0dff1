use crate::errors::{RecoverError, Result};
use noodles::sam::alignment::record::cigar::{op::Kind as CigarKind, Op as CigarOp};

/// Placeholder used by SAM for an omitted SEQ or QUAL.
pub const MISSING: &str = "*";

/// Reverse complement a nucleotide sequence. Unknown symbols become `N`,
/// and the `*` placeholder is returned unchanged.
pub fn reverse_complement(seq: &str) -> String {
    if seq == MISSING {
        return seq.to_string();
    }
    let mut bases = seq.as_bytes().to_vec();
    bases.reverse();
    for base in bases.iter_mut() {
        *base = match *base {
            b'A' | b'a' => b'T',
            b'T' | b't' => b'A',
            b'C' | b'c' => b'G',
            b'G' | b'g' => b'C',
            b'N' | b'n' => b'N',
            _ => b'N',
        };
    }
    String::from_utf8_lossy(&bases).into_owned()
}

/// Reverse a quality string. The `*` placeholder is returned unchanged.
pub fn reverse_qualities(qual: &str) -> String {
    qual.chars().rev().collect()
}

/// Replay `query` against a full-length source read and return the SEQ and
/// QUAL a record with that CIGAR stores.
///
/// Deletions consume nothing, hard clips skip source bases without emitting
/// them, and `M`, `I`, `S`, `=`, `X` copy source bases. Other operations
/// (`N`, `P`) consume nothing either. A source QUAL of `*` yields `*`.
pub fn reconstruct(query: &[CigarOp], seq: &str, qual: &str) -> Result<(String, String)> {
    let seq = seq.as_bytes();
    let qual = (qual != MISSING).then_some(qual.as_bytes());
    let available = qual.map_or(seq.len(), |q| q.len().min(seq.len()));

    let mut out_seq: Vec<u8> = Vec::new();
    let mut out_qual: Vec<u8> = Vec::new();
    let mut cursor = 0usize;

    for op in query {
        match op.kind() {
            CigarKind::HardClip => cursor = cursor.saturating_add(op.len()),
            CigarKind::Match
            | CigarKind::Insertion
            | CigarKind::SoftClip
            | CigarKind::SequenceMatch
            | CigarKind::SequenceMismatch => {
                let end = cursor.saturating_add(op.len());
                if end > available {
                    return Err(RecoverError::SequenceIndex { needed: end, available });
                }
                out_seq.extend_from_slice(&seq[cursor..end]);
                if let Some(q) = qual {
                    out_qual.extend_from_slice(&q[cursor..end]);
                }
                cursor = end;
            }
            CigarKind::Deletion | CigarKind::Skip | CigarKind::Pad => {}
        }
    }

    let out_seq = String::from_utf8_lossy(&out_seq).into_owned();
    let out_qual = if qual.is_some() {
        String::from_utf8_lossy(&out_qual).into_owned()
    } else {
        MISSING.to_string()
    };
    Ok((out_seq, out_qual))
}
