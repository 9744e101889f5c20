//! Manager error types.

use thiserror::Error;

/// Loader manager errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A loader name was blank or had leading or trailing whitespace.
    #[error("invalid loader name: {0:?}")]
    InvalidName(String),

    /// A loader with this name is already registered.
    #[error("loader already registered: {0}")]
    Duplicate(String),

    /// No loader is registered under this name.
    #[error("loader not found: {0}")]
    NotFound(String),

    /// The catalog was written by a format version this build cannot read.
    #[error("unsupported catalog version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Failed to parse a catalog file.
    #[error("failed to parse catalog: {0}")]
    Parse(String),

    /// Failed to render a catalog as TOML.
    #[error("failed to serialize catalog: {0}")]
    Serialize(String),

    /// An I/O error occurred while reading or writing a catalog.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
