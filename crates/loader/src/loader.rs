//! The base loader abstraction and the direct channel loader.

use serde::{Deserialize, Serialize};

/// Descriptive metadata shared by every loader variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderInfo {
    /// Name the loader is registered under.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LoaderInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Static discriminant of a loader variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderKind {
    Channel,
    Forwarder,
}

impl LoaderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoaderKind::Channel => "channel",
            LoaderKind::Forwarder => "forwarder",
        }
    }
}

impl std::fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source of channel content.
///
/// Consumers branch on [`Loader::is_forwarder`] rather than on the concrete
/// type, so new variants only have to answer the capability query.
pub trait Loader {
    /// Metadata shared by all variants.
    fn info(&self) -> &LoaderInfo;

    /// Which variant this is.
    fn kind(&self) -> LoaderKind;

    /// Whether output from this loader is passed onward instead of being
    /// consumed directly.
    fn is_forwarder(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        &self.info().name
    }
}

/// A loader that delivers channel content directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelLoader {
    info: LoaderInfo,
}

impl ChannelLoader {
    pub fn new(info: LoaderInfo) -> Self {
        Self { info }
    }
}

impl Loader for ChannelLoader {
    fn info(&self) -> &LoaderInfo {
        &self.info
    }

    fn kind(&self) -> LoaderKind {
        LoaderKind::Channel
    }
}
