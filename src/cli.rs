use crate::errors::{RecoverError, Result};
use crate::reconcile::ReconcileConfig;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "recover-mi",
    about = "Fix and recover equally well multi-mapped read information from SAM files",
    version
)]
pub struct Args {
    /// Input SAM file, sorted by read name (`samtools sort -n`)
    pub input_sam: PathBuf,

    /// Directory the fixed SAM and log are written to
    pub output_dir: PathBuf,

    /// Rebuild a record only if its clip score is below this value
    #[arg(long, value_name = "F", default_value_t = 0.05)]
    pub max_clip_score: f64,

    /// MAPQ assigned to accepted multi-map records reported with MAPQ 0
    #[arg(long, value_name = "N", default_value_t = 60)]
    pub rescued_mapq: u8,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Args {
    pub fn reconcile_config(&self) -> ReconcileConfig {
        ReconcileConfig {
            max_clip_score: self.max_clip_score,
            rescued_mapq: self.rescued_mapq,
        }
    }
}

/// Output locations derived from the input name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub sam: PathBuf,
    pub log: PathBuf,
}

/// Check the input file and output directory and derive the output paths.
///
/// `reads.sam` in `out/` yields `out/reads.fxd.sam` and `out/reads.fxd.log`.
pub fn validate(input: &Path, output_dir: &Path) -> Result<OutputPaths> {
    if !input.is_file() {
        return Err(RecoverError::InputNotFound { path: input.to_path_buf() });
    }
    let stem = input
        .file_name()
        .and_then(|s| s.to_str())
        .and_then(|s| s.strip_suffix(".sam"))
        .ok_or_else(|| RecoverError::InputWrongExtension { path: input.to_path_buf() })?;
    if !output_dir.is_dir() {
        return Err(RecoverError::OutputDirMissing { path: output_dir.to_path_buf() });
    }

    Ok(OutputPaths {
        sam: output_dir.join(format!("{stem}.fxd.sam")),
        log: output_dir.join(format!("{stem}.fxd.log")),
    })
}
