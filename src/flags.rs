//! Named view over the 12-bit SAM FLAG field.
//!
//! Bits are tested and rewritten through noodles' [`Flags`] bitset, so there is
//! no positional indexing into a decoded array anywhere in the crate.

use noodles::sam::alignment::record::Flags;

/// Largest value a SAM FLAG field may hold.
pub const MAX_FLAG: u16 = 0x0fff;

/// Every SAM FLAG bit as a named predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagBits {
    /// 0x1: template has multiple segments.
    pub is_paired: bool,
    /// 0x2: each segment properly aligned.
    pub is_proper_pair: bool,
    /// 0x4: segment unmapped.
    pub is_unmapped: bool,
    /// 0x8: next segment unmapped.
    pub is_mate_unmapped: bool,
    /// 0x10: SEQ is reverse complemented.
    pub is_reverse_strand: bool,
    /// 0x20: SEQ of the next segment is reverse complemented.
    pub is_mate_reverse_strand: bool,
    /// 0x40: first segment in the template.
    pub is_first_segment: bool,
    /// 0x80: last segment in the template.
    pub is_last_segment: bool,
    /// 0x100: secondary alignment.
    pub is_secondary: bool,
    /// 0x200: fails platform/vendor quality checks.
    pub is_qc_fail: bool,
    /// 0x400: PCR or optical duplicate.
    pub is_duplicate: bool,
    /// 0x800: supplementary alignment.
    pub is_supplementary: bool,
}

impl FlagBits {
    /// A record is primary when it is neither secondary nor supplementary.
    pub fn is_primary(&self) -> bool {
        !self.is_secondary && !self.is_supplementary
    }
}

/// Decode a raw FLAG value. Bits above the 12 defined ones are ignored.
pub fn decode(flag: u16) -> FlagBits {
    let flags = Flags::from(flag & MAX_FLAG);
    FlagBits {
        is_paired: flags.is_segmented(),
        is_proper_pair: flags.is_properly_segmented(),
        is_unmapped: flags.is_unmapped(),
        is_mate_unmapped: flags.is_mate_unmapped(),
        is_reverse_strand: flags.is_reverse_complemented(),
        is_mate_reverse_strand: flags.is_mate_reverse_complemented(),
        is_first_segment: flags.is_first_segment(),
        is_last_segment: flags.is_last_segment(),
        is_secondary: flags.is_secondary(),
        is_qc_fail: flags.is_qc_fail(),
        is_duplicate: flags.is_duplicate(),
        is_supplementary: flags.is_supplementary(),
    }
}

/// Encode named predicates back into a raw FLAG value.
pub fn encode(bits: FlagBits) -> u16 {
    let mut flags = Flags::empty();
    flags.set(Flags::SEGMENTED, bits.is_paired);
    flags.set(Flags::PROPERLY_SEGMENTED, bits.is_proper_pair);
    flags.set(Flags::UNMAPPED, bits.is_unmapped);
    flags.set(Flags::MATE_UNMAPPED, bits.is_mate_unmapped);
    flags.set(Flags::REVERSE_COMPLEMENTED, bits.is_reverse_strand);
    flags.set(Flags::MATE_REVERSE_COMPLEMENTED, bits.is_mate_reverse_strand);
    flags.set(Flags::FIRST_SEGMENT, bits.is_first_segment);
    flags.set(Flags::LAST_SEGMENT, bits.is_last_segment);
    flags.set(Flags::SECONDARY, bits.is_secondary);
    flags.set(Flags::QC_FAIL, bits.is_qc_fail);
    flags.set(Flags::DUPLICATE, bits.is_duplicate);
    flags.set(Flags::SUPPLEMENTARY, bits.is_supplementary);
    u16::from(flags)
}

/// Clear the secondary-alignment bit of a raw FLAG value.
pub fn clear_secondary(flag: u16) -> u16 {
    let mut flags = Flags::from(flag);
    flags.remove(Flags::SECONDARY);
    u16::from(flags)
}
