use crate::errors::{RecoverError, Result};
use crate::flags::{self, FlagBits, MAX_FLAG};
use crate::sequence::MISSING;
use std::fmt;

/// Number of mandatory SAM fields.
pub const MANDATORY_FIELDS: usize = 11;

/// One SAM alignment line, split into its mandatory fields plus the
/// optional fields, which are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub query_name: String,
    pub flag: u16,
    pub ref_name: String,
    pub pos: i64,
    pub map_qual: u8,
    pub cigar: String,
    pub r_next: String,
    pub p_next: String,
    pub template_len: i64,
    pub seq: String,
    pub qual: String,
    pub tags: Vec<String>,
}

impl AlignmentRecord {
    /// Parse a tab-separated SAM data line. `line_no` is 1-based and only
    /// used for error reporting.
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let malformed = |reason: String| RecoverError::MalformedRecord { line: line_no, reason };

        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        if fields.len() < MANDATORY_FIELDS {
            return Err(malformed(format!(
                "expected at least {MANDATORY_FIELDS} fields, found {}",
                fields.len()
            )));
        }

        let flag: u16 = fields[1]
            .parse()
            .map_err(|_| malformed(format!("invalid FLAG '{}'", fields[1])))?;
        if flag > MAX_FLAG {
            return Err(malformed(format!("FLAG {flag} does not fit in 12 bits")));
        }
        let pos: i64 = fields[3]
            .parse()
            .map_err(|_| malformed(format!("invalid POS '{}'", fields[3])))?;
        let map_qual: u8 = fields[4]
            .parse()
            .map_err(|_| malformed(format!("invalid MAPQ '{}'", fields[4])))?;
        let template_len: i64 = fields[8]
            .parse()
            .map_err(|_| malformed(format!("invalid TLEN '{}'", fields[8])))?;

        Ok(Self {
            query_name: fields[0].to_string(),
            flag,
            ref_name: fields[2].to_string(),
            pos,
            map_qual,
            cigar: fields[5].to_string(),
            r_next: fields[6].to_string(),
            p_next: fields[7].to_string(),
            template_len,
            seq: fields[9].to_string(),
            qual: fields[10].to_string(),
            tags: fields[MANDATORY_FIELDS..].iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn flags(&self) -> FlagBits {
        flags::decode(self.flag)
    }

    /// True when SEQ is the `*` placeholder.
    pub fn is_missing_sequence(&self) -> bool {
        self.seq == MISSING
    }
}

impl fmt::Display for AlignmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.query_name,
            self.flag,
            self.ref_name,
            self.pos,
            self.map_qual,
            self.cigar,
            self.r_next,
            self.p_next,
            self.template_len,
            self.seq,
            self.qual,
        )?;
        for tag in &self.tags {
            write!(f, "\t{tag}")?;
        }
        Ok(())
    }
}
