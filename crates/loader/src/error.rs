//! Loader error types.

use thiserror::Error;

/// Loader errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The envelope was written by a format version this build cannot read.
    #[error("unsupported envelope version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The envelope bytes could not be decoded into a loader.
    #[error("failed to decode loader: {0}")]
    Decode(#[source] serde_json::Error),

    /// A loader could not be encoded.
    #[error("failed to encode loader: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
