use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the scan and its configuration layer.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("output length {output} does not match input length {input}")]
    LengthMismatch { input: usize, output: usize },

    #[error("partition {index} starts at {start}, expected {expected}")]
    NonContiguous {
        index: usize,
        start: usize,
        expected: usize,
    },

    #[error("partition {index} is inverted: [{start}, {end})")]
    Inverted {
        index: usize,
        start: usize,
        end: usize,
    },

    #[error("partitions cover {covered} elements of a buffer of length {len}")]
    Coverage { covered: usize, len: usize },

    #[error("got {offsets} carry offsets for {partitions} partitions")]
    OffsetCount { offsets: usize, partitions: usize },

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
