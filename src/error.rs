use std::path::PathBuf;

use thiserror::Error;

/// Problems with the run configuration. Always reported before any record is
/// read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid output format in config: {0:?} (expected json, csv or table)")]
    UnknownFormat(String),

    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    #[error("outputColumns must not be empty")]
    NoColumns,

    #[error("duplicate output column {0:?}")]
    DuplicateColumn(String),
}

/// Failures of the input report. Any of these aborts the run without a result.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid license report in {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("reading {origin} was aborted")]
    Aborted { origin: String },
}
