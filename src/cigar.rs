//! CIGAR algebra over noodles operation types.
//!
//! CIGARs arrive as text from the SAM line and are kept as text on the record;
//! they are parsed into [`Op`] sequences only where the reconciliation needs
//! to reason about their shape.

use crate::errors::{RecoverError, Result};
use noodles::sam::alignment::record::cigar::{op::Kind as CigarKind, Op as CigarOp};

/// Largest operation length a SAM/BAM CIGAR can encode (28 bits).
pub const MAX_OP_LEN: usize = (1 << 28) - 1;

/// Parse a CIGAR string such as `5H20M1D30M` into its operations.
pub fn parse(text: &str) -> Result<Vec<CigarOp>> {
    let malformed = || RecoverError::MalformedCigar { cigar: text.to_string() };

    if text.is_empty() {
        return Err(malformed());
    }

    let mut ops = Vec::new();
    let mut len: Option<usize> = None;

    for ch in text.chars() {
        if let Some(digit) = ch.to_digit(10) {
            let n = len.unwrap_or(0);
            len = Some(
                n.checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .ok_or_else(malformed)?,
            );
        } else {
            let kind = char_to_kind(ch).ok_or_else(malformed)?;
            let n = len.take().ok_or_else(malformed)?;
            if n > MAX_OP_LEN {
                return Err(malformed());
            }
            ops.push(CigarOp::new(kind, n));
        }
    }

    // Trailing digits without an operation letter.
    if len.is_some() {
        return Err(malformed());
    }

    Ok(ops)
}

pub fn char_to_kind(ch: char) -> Option<CigarKind> {
    match ch {
        'M' => Some(CigarKind::Match),
        'I' => Some(CigarKind::Insertion),
        'D' => Some(CigarKind::Deletion),
        'N' => Some(CigarKind::Skip),
        'S' => Some(CigarKind::SoftClip),
        'H' => Some(CigarKind::HardClip),
        'P' => Some(CigarKind::Pad),
        '=' => Some(CigarKind::SequenceMatch),
        'X' => Some(CigarKind::SequenceMismatch),
        _ => None,
    }
}

pub fn kind_to_char(kind: CigarKind) -> char {
    match kind {
        CigarKind::Match => 'M',
        CigarKind::Insertion => 'I',
        CigarKind::Deletion => 'D',
        CigarKind::Skip => 'N',
        CigarKind::SoftClip => 'S',
        CigarKind::HardClip => 'H',
        CigarKind::Pad => 'P',
        CigarKind::SequenceMatch => '=',
        CigarKind::SequenceMismatch => 'X',
    }
}

/// Render operations back into CIGAR text. An empty sequence renders as `*`.
pub fn to_string(ops: &[CigarOp]) -> String {
    if ops.is_empty() {
        return "*".to_string();
    }
    let mut out = String::new();
    for op in ops {
        out.push_str(&op.len().to_string());
        out.push(kind_to_char(op.kind()));
    }
    out
}

/// Number of read positions described by the CIGAR, i.e. the summed length of
/// every operation except deletions.
///
/// Two alignments of the same physical read must agree on this value,
/// whatever mix of clipping, matches and insertions they use.
pub fn non_deletion_len(ops: &[CigarOp]) -> usize {
    ops.iter()
        .filter(|op| op.kind() != CigarKind::Deletion)
        .fold(0usize, |acc, op| acc.saturating_add(op.len()))
}

/// Expand operations into one letter per read position, skipping deletions.
///
/// `3H2M1D1I` expands to `HHHMMI`.
pub fn expand(ops: &[CigarOp]) -> Vec<char> {
    let mut expanded = Vec::new();
    for op in ops {
        if op.kind() == CigarKind::Deletion {
            continue;
        }
        let ch = kind_to_char(op.kind());
        expanded.extend(std::iter::repeat_n(ch, op.len()));
    }
    expanded
}

/// Reverse the order of the operations, as seen from the opposite strand.
pub fn reverse(ops: &[CigarOp]) -> Vec<CigarOp> {
    ops.iter().rev().copied().collect()
}

/// Score how much of `candidate`'s hard clipping is aligned in `reference`.
///
/// Returns the fraction of read positions that `candidate` hard clips but
/// `reference` aligns (`M`, `I`, `D`, `=` or `X`). Lower is better; `0.0`
/// means every hard-clipped base is unaligned in the reference as well.
///
/// Fails with [`RecoverError::CigarMismatch`] when the two CIGARs do not
/// describe the same number of read positions.
pub fn score(candidate: &[CigarOp], reference: &[CigarOp]) -> Result<f64> {
    let cand_len = non_deletion_len(candidate);
    let ref_len = non_deletion_len(reference);

    if cand_len != ref_len {
        return Err(RecoverError::CigarMismatch { candidate: cand_len, reference: ref_len });
    }
    if cand_len == 0 {
        return Ok(0.0);
    }

    // Walk both run-length sequences in step rather than expanding them.
    let mut cand = read_runs(candidate);
    let mut refr = read_runs(reference);
    let mut cand_run = cand.next();
    let mut ref_run = refr.next();
    let mut clipped_but_aligned = 0usize;

    while let (Some((c_kind, c_left)), Some((r_kind, r_left))) = (cand_run, ref_run) {
        let step = c_left.min(r_left);
        if c_kind == CigarKind::HardClip && is_aligned(r_kind) {
            clipped_but_aligned += step;
        }
        cand_run = if c_left > step { Some((c_kind, c_left - step)) } else { cand.next() };
        ref_run = if r_left > step { Some((r_kind, r_left - step)) } else { refr.next() };
    }

    Ok(clipped_but_aligned as f64 / cand_len as f64)
}

/// Non-empty, non-deletion runs as `(kind, len)`.
fn read_runs(ops: &[CigarOp]) -> impl Iterator<Item = (CigarKind, usize)> + '_ {
    ops.iter()
        .filter(|op| op.kind() != CigarKind::Deletion && op.len() > 0)
        .map(|op| (op.kind(), op.len()))
}

fn is_aligned(kind: CigarKind) -> bool {
    matches!(
        kind,
        CigarKind::Match
            | CigarKind::Insertion
            | CigarKind::Deletion
            | CigarKind::SequenceMatch
            | CigarKind::SequenceMismatch
    )
}
