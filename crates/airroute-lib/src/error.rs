use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the airroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an IATA code could not be resolved against the directory.
    #[error("unknown airport code: {code}")]
    UnknownAirport { code: String },

    /// Dataset could not be located at the resolved path.
    #[error("airport dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when the dataset parsed cleanly but yielded no usable airports.
    #[error("airport dataset at {path} contained no usable rows")]
    EmptyDataset { path: PathBuf },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
