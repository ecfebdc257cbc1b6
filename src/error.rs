//! Error types for loading and filtering trip data.

use std::path::PathBuf;

/// Failures raised while resolving, reading, or filtering a city's dataset.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The city is unknown, or no data source is mapped for it.
    #[error("Unsupported city: {0}")]
    UnsupportedCity(String),

    /// The mapped source could not be opened.
    #[error("Could not read {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required header is absent from the source.
    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A row could not be parsed.
    #[error("{} line {line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// A month or day selector outside the supported set.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The data source configuration file is unusable.
    #[error("Data source configuration error: {0}")]
    Config(String),
}

pub type LoadResult<T> = Result<T, LoadError>;
