//! The `.fxd.log` report: invoking command, issues, statistics.

use crate::reconcile::Issue;
use crate::stats::Stats;
use std::io::{self, Write};

/// Streams the report as issues are found. Statistics are written once, by
/// [`Report::finish`], at end of input.
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    /// Write the command line and open the issues section.
    pub fn begin(mut out: W, command: &str) -> io::Result<Self> {
        write!(out, "Command: {command}\n\n")?;
        writeln!(out, "Issues:")?;
        Ok(Self { out })
    }

    pub fn issue(&mut self, issue: &Issue) -> io::Result<()> {
        write!(self.out, "{issue}")
    }

    /// Write the statistics section and flush.
    pub fn finish(&mut self, stats: &Stats) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Statistics:")?;
        for (label, count) in stats.rows() {
            writeln!(self.out, "{label}{count}")?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
