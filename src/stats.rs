use std::ops::AddAssign;

/// Tallies reported in the statistics section of the log.
///
/// Records dropped because of an unresolved primary, a CIGAR length mismatch,
/// a reconstruction overrun or a malformed CIGAR are counted nowhere; they
/// only appear in the issues section.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub unmapped_dropped: u64,
    pub unique_rejected: u64,
    pub unique_confirmed: u64,
    pub multi_rejected: u64,
    pub multi_confirmed: u64,
    pub multi_fixed: u64,
}

impl Stats {
    /// Labelled counters in report order.
    pub fn rows(&self) -> [(&'static str, u64); 6] {
        [
            ("Removed reads, unmapped:\t\t\t\t\t\t", self.unmapped_dropped),
            ("Removed reads, uniquely mapped with low quality:\t\t\t", self.unique_rejected),
            ("Adopted reads, uniquely mapped with high quality:\t\t\t", self.unique_confirmed),
            (
                "Removed multi-map entries, failed similarity check to primary entry:\t",
                self.multi_rejected,
            ),
            ("Adopted multi-map entries, mapped with high quality:\t\t\t", self.multi_confirmed),
            (
                "Fixed multi-map entries, passed similarity check to primary entry:\t",
                self.multi_fixed,
            ),
        ]
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Self) {
        self.unmapped_dropped += other.unmapped_dropped;
        self.unique_rejected += other.unique_rejected;
        self.unique_confirmed += other.unique_confirmed;
        self.multi_rejected += other.multi_rejected;
        self.multi_confirmed += other.multi_confirmed;
        self.multi_fixed += other.multi_fixed;
    }
}
