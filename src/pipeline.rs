use crate::cli::{self, Args};
use crate::group::{ReadGroup, ReadGroupAccumulator};
use crate::reconcile::{self, ReconcileConfig};
use crate::record::AlignmentRecord;
use crate::report::Report;
use crate::stats::Stats;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub stats: Stats,
    pub total_records: u64,
    pub read_groups: u64,
    pub issues: u64,
}

/// Validate the arguments, then fix `<input>` into `<output_dir>/<name>.fxd.sam`
/// with the report in `<output_dir>/<name>.fxd.log`.
pub fn run(args: &Args, command: &str) -> Result<Summary> {
    let paths = cli::validate(&args.input_sam, &args.output_dir)?;
    tracing::info!(
        input = %args.input_sam.display(),
        sam = %paths.sam.display(),
        log = %paths.log.display(),
        "recover-mi: starting"
    );

    let input = File::open(&args.input_sam)
        .with_context(|| format!("failed to open {}", args.input_sam.display()))?;
    let sam_file = File::create(&paths.sam)
        .with_context(|| format!("failed to create {}", paths.sam.display()))?;
    let log_file = File::create(&paths.log)
        .with_context(|| format!("failed to create {}", paths.log.display()))?;

    let mut sam_out = BufWriter::new(sam_file);
    let mut report = Report::begin(BufWriter::new(log_file), command)?;
    let config = args.reconcile_config();
    let summary = process(BufReader::new(input), &mut sam_out, &mut report, &config)?;
    sam_out.flush()?;

    Ok(summary)
}

/// Stream SAM text from `reader` to `sam_out`, reporting issues and the final
/// statistics to `report`.
///
/// Header lines are copied through. Data lines must be grouped by read name.
pub fn process<R: BufRead, W: Write, L: Write>(
    reader: R,
    sam_out: &mut W,
    report: &mut Report<L>,
    config: &ReconcileConfig,
) -> Result<Summary> {
    let mut summary = Summary::default();
    let mut stats = Stats::default();
    let mut groups = ReadGroupAccumulator::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("failed to read input line {line_no}"))?;

        if line.starts_with('@') {
            writeln!(sam_out, "{line}")?;
            continue;
        }
        if line.trim().is_empty() {
            tracing::warn!(line = line_no, "skipping empty line");
            continue;
        }

        let record = AlignmentRecord::parse(&line, line_no)?;
        summary.total_records += 1;

        if let Some(group) = groups.accept(record, &mut stats) {
            write_group(group, sam_out, report, config, &mut stats, &mut summary)?;
        }
    }

    if let Some(group) = groups.finish() {
        write_group(group, sam_out, report, config, &mut stats, &mut summary)?;
    }

    report.finish(&stats)?;
    summary.stats = stats;

    tracing::info!(
        total_records = summary.total_records,
        read_groups = summary.read_groups,
        issues = summary.issues,
        unmapped_dropped = stats.unmapped_dropped,
        unique_rejected = stats.unique_rejected,
        unique_confirmed = stats.unique_confirmed,
        multi_rejected = stats.multi_rejected,
        multi_confirmed = stats.multi_confirmed,
        multi_fixed = stats.multi_fixed,
        "recover-mi: processing complete"
    );

    Ok(summary)
}

fn write_group<W: Write, L: Write>(
    group: ReadGroup,
    sam_out: &mut W,
    report: &mut Report<L>,
    config: &ReconcileConfig,
    stats: &mut Stats,
    summary: &mut Summary,
) -> Result<()> {
    summary.read_groups += 1;
    let reconciled = reconcile::reconcile(group, config);

    for record in &reconciled.records {
        writeln!(sam_out, "{record}")?;
    }
    for issue in &reconciled.issues {
        report.issue(issue)?;
    }

    summary.issues += reconciled.issues.len() as u64;
    *stats += reconciled.stats;
    Ok(())
}
