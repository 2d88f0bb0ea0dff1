//! Error types for SAM record recovery.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for recovery operations.
pub type Result<T> = std::result::Result<T, RecoverError>;

/// Error type for recovery operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecoverError {
    /// The input SAM file does not exist.
    #[error("The specified input file {} does not exist.", .path.display())]
    InputNotFound { path: PathBuf },

    /// The input file does not carry the `.sam` extension.
    #[error("The specified input file {} seems not to be a .sam file.", .path.display())]
    InputWrongExtension { path: PathBuf },

    /// The output path is missing or not a directory.
    #[error("The specified output directory {} is no directory.", .path.display())]
    OutputDirMissing { path: PathBuf },

    /// A CIGAR string could not be tokenized.
    #[error("malformed CIGAR string '{cigar}'")]
    MalformedCigar { cigar: String },

    /// A data line could not be split into a SAM record.
    #[error("malformed SAM record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Two CIGARs describe a different number of stored bases.
    #[error("CIGARs cover different sequence lengths ({candidate} vs {reference})")]
    CigarMismatch { candidate: usize, reference: usize },

    /// Sequence reconstruction ran past the end of the source sequence.
    #[error("reconstruction needs {needed} bases but only {available} are available")]
    SequenceIndex { needed: usize, available: usize },
}
