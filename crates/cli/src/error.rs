//! CLI errors.

use std::path::PathBuf;
use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The catalog file does not exist.
    #[error("catalog not found at {path}. Run 'crap add' or 'crap import' first")]
    CatalogNotFound { path: PathBuf },

    /// An error occurred in the manager layer.
    #[error(transparent)]
    Manager(#[from] manager::Error),

    /// An error occurred in the loader layer.
    #[error(transparent)]
    Loader(#[from] loader::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
