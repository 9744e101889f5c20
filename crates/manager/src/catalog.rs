//! Loader catalog loaded from TOML.

use crate::{Error, Result};
use loader::AnyLoader;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Current catalog format version.
pub const CATALOG_VERSION: u32 = 1;

/// A persisted set of loaders.
///
/// ```toml
/// version = 1
///
/// [[loader]]
/// kind = "forwarder"
/// name = "sd-forwarder"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default, rename = "loader")]
    pub loaders: Vec<AnyLoader>,
}

fn default_version() -> u32 {
    CATALOG_VERSION
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: CATALOG_VERSION,
            loaders: Vec::new(),
        }
    }
}

impl Catalog {
    /// Load a catalog from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))?;
        if catalog.version != CATALOG_VERSION {
            return Err(Error::UnsupportedVersion {
                found: catalog.version,
                supported: CATALOG_VERSION,
            });
        }
        Ok(catalog)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Write the catalog to a TOML file, replacing any existing content.
    ///
    /// The new content goes to a temporary file in the same directory which
    /// is then renamed over `path`, so a failed write leaves the old file intact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml()?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}
