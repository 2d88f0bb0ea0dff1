use crate::record::AlignmentRecord;
use crate::stats::Stats;

/// Consecutive mapped records sharing a query name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadGroup {
    pub name: String,
    pub records: Vec<AlignmentRecord>,
}

/// Groups an already name-sorted record stream by adjacency.
///
/// Only one group is held open at a time. Records for the same read that are
/// not adjacent in the input end up in separate groups.
#[derive(Debug, Default)]
pub struct ReadGroupAccumulator {
    current_name: Option<String>,
    group: Vec<AlignmentRecord>,
}

impl ReadGroupAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, returning the previous group if this record closes it.
    ///
    /// Unmapped records are counted in `stats` and never enter a group.
    pub fn accept(&mut self, record: AlignmentRecord, stats: &mut Stats) -> Option<ReadGroup> {
        if record.flags().is_unmapped {
            stats.unmapped_dropped += 1;
            return None;
        }

        match &self.current_name {
            Some(curr) if *curr == record.query_name => {
                self.group.push(record);
                None
            }
            _ => {
                let closed = self.take_group();
                self.current_name = Some(record.query_name.clone());
                self.group.push(record);
                closed
            }
        }
    }

    /// Close and return the open group at end of stream.
    pub fn finish(&mut self) -> Option<ReadGroup> {
        self.take_group()
    }

    fn take_group(&mut self) -> Option<ReadGroup> {
        let name = self.current_name.take()?;
        let records = std::mem::take(&mut self.group);
        if records.is_empty() {
            return None;
        }
        Some(ReadGroup { name, records })
    }
}
