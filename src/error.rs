//! Error types for motif-chop

use thiserror::Error;

use crate::motif::SearchMode;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, ChopError>;

/// Fatal conditions. Per-read skips are not errors and never show up here.
#[derive(Debug, Error)]
pub enum ChopError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// htslib failure: missing index, truncated BGZF, bad fetch region
    #[error("BAM error: {0}")]
    Bam(#[from] rust_htslib::errors::Error),

    /// Requested contig is absent from the reference or the BAM header
    #[error("contig {contig} not found")]
    ContigNotFound { contig: String },

    #[error("motif {motif} not found")]
    MotifNotFound { motif: String },

    /// More than one best-scoring hit within the deciding tier
    #[error("ambiguous {mode} motif hits: {count} positions with edit distance {edit_distance}")]
    MotifAmbiguous {
        mode: SearchMode,
        count: usize,
        edit_distance: u32,
    },

    /// Window does not fit on the sequence
    #[error("window size {window_size} exceeds sequence length {sequence_length}")]
    WindowUnderflow {
        window_size: usize,
        sequence_length: usize,
    },

    #[error("invalid motif: {0}")]
    InvalidMotif(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed input record
    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },
}
