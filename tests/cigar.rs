use noodles::sam::alignment::record::cigar::{op::Kind as CigarKind, Op as CigarOp};
use recover_mi::RecoverError;
use recover_mi::cigar;

fn kinds(ops: &[CigarOp]) -> Vec<(CigarKind, usize)> {
    ops.iter().map(|op| (op.kind(), op.len())).collect()
}

#[test]
fn parse_mixed_operations() {
    let ops = cigar::parse("5H20M1D30M2I3S").unwrap();
    assert_eq!(
        kinds(&ops),
        vec![
            (CigarKind::HardClip, 5),
            (CigarKind::Match, 20),
            (CigarKind::Deletion, 1),
            (CigarKind::Match, 30),
            (CigarKind::Insertion, 2),
            (CigarKind::SoftClip, 3),
        ]
    );
}

#[test]
fn parse_all_operation_letters() {
    let ops = cigar::parse("1M2I3D4N5S6H7P8=9X").unwrap();
    assert_eq!(ops.len(), 9);
    assert_eq!(cigar::to_string(&ops), "1M2I3D4N5S6H7P8=9X");
}

#[test]
fn parse_rejects_malformed_text() {
    for text in ["", "M", "10", "5Q", "*", "5M3", "4MM"] {
        match cigar::parse(text) {
            Err(RecoverError::MalformedCigar { cigar }) => assert_eq!(cigar, text),
            other => panic!("expected MalformedCigar for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn reverse_twice_is_identity() {
    for text in ["10M", "5H20M1D30M", "3S4M2I1X6=2H", "1M1N1M1P1M"] {
        let ops = cigar::parse(text).unwrap();
        assert_eq!(cigar::reverse(&cigar::reverse(&ops)), ops, "{text}");
    }
}

#[test]
fn reverse_changes_order_only() {
    let ops = cigar::parse("2H4M1D3S").unwrap();
    assert_eq!(cigar::to_string(&cigar::reverse(&ops)), "3S1D4M2H");
}

#[test]
fn non_deletion_len_skips_deletions() {
    let ops = cigar::parse("3H2M1D1I").unwrap();
    assert_eq!(cigar::non_deletion_len(&ops), 6);
}

#[test]
fn expand_one_letter_per_read_position() {
    let ops = cigar::parse("3H2M1D1I").unwrap();
    assert_eq!(cigar::expand(&ops).into_iter().collect::<String>(), "HHHMMI");
}

#[test]
fn score_mismatch_when_lengths_differ() {
    let candidate = cigar::parse("6M").unwrap();
    let reference = cigar::parse("2M3D2M").unwrap();
    assert_eq!(
        cigar::score(&candidate, &reference),
        Err(RecoverError::CigarMismatch { candidate: 6, reference: 4 })
    );
}

#[test]
fn score_zero_without_hard_clipping() {
    let candidate = cigar::parse("2S4M").unwrap();
    let reference = cigar::parse("6M").unwrap();
    assert_eq!(cigar::score(&candidate, &reference).unwrap(), 0.0);
}

#[test]
fn score_zero_when_reference_also_clips() {
    let candidate = cigar::parse("2H4M").unwrap();
    let reference = cigar::parse("2S4M").unwrap();
    assert_eq!(cigar::score(&candidate, &reference).unwrap(), 0.0);
}

#[test]
fn score_counts_clipped_but_aligned_positions() {
    let candidate = cigar::parse("2H4M").unwrap();
    let reference = cigar::parse("6M").unwrap();
    let score = cigar::score(&candidate, &reference).unwrap();
    assert!((score - 2.0 / 6.0).abs() < 1e-12);

    let reference = cigar::parse("1S1I4M").unwrap();
    let score = cigar::score(&candidate, &reference).unwrap();
    assert!((score - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn score_ignores_deletions_in_either_cigar() {
    let candidate = cigar::parse("1H2M5D3M").unwrap();
    let reference = cigar::parse("1S5M").unwrap();
    assert_eq!(cigar::score(&candidate, &reference).unwrap(), 0.0);
}

#[test]
fn parse_rejects_lengths_beyond_sam_limit() {
    for text in ["18446744073709551615M1M", "268435456M", "99999999999999999999999M"] {
        assert!(
            matches!(cigar::parse(text), Err(RecoverError::MalformedCigar { .. })),
            "{text}"
        );
    }
    let ops = cigar::parse("268435455M").unwrap();
    assert_eq!(ops[0].len(), cigar::MAX_OP_LEN);
}

#[test]
fn score_long_runs_without_expanding() {
    let candidate = cigar::parse("100000000H168435455M").unwrap();
    let reference = cigar::parse("268435455M").unwrap();
    let score = cigar::score(&candidate, &reference).unwrap();
    assert!((score - 100000000.0 / 268435455.0).abs() < 1e-12);
}

#[test]
fn score_deletions_only_is_zero() {
    let candidate = cigar::parse("3D").unwrap();
    let reference = cigar::parse("5D").unwrap();
    assert_eq!(cigar::score(&candidate, &reference).unwrap(), 0.0);
}
