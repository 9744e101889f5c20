//! Sum type over every loader variant.

use crate::{ChannelForwarder, ChannelLoader, Loader, LoaderInfo, LoaderKind};
use serde::{Deserialize, Serialize};

/// Any loader, tagged by its `kind` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyLoader {
    Channel(ChannelLoader),
    Forwarder(ChannelForwarder),
}

impl AnyLoader {
    pub fn channel(info: LoaderInfo) -> Self {
        AnyLoader::Channel(ChannelLoader::new(info))
    }

    pub fn forwarder(info: LoaderInfo) -> Self {
        AnyLoader::Forwarder(ChannelForwarder::new(info))
    }

    pub fn as_forwarder(&self) -> Option<&ChannelForwarder> {
        match self {
            AnyLoader::Forwarder(f) => Some(f),
            AnyLoader::Channel(_) => None,
        }
    }

    fn as_loader(&self) -> &dyn Loader {
        match self {
            AnyLoader::Channel(l) => l,
            AnyLoader::Forwarder(f) => f,
        }
    }
}

impl Loader for AnyLoader {
    fn info(&self) -> &LoaderInfo {
        self.as_loader().info()
    }

    fn kind(&self) -> LoaderKind {
        self.as_loader().kind()
    }

    fn is_forwarder(&self) -> bool {
        self.as_loader().is_forwarder()
    }
}

impl From<ChannelLoader> for AnyLoader {
    fn from(loader: ChannelLoader) -> Self {
        AnyLoader::Channel(loader)
    }
}

impl From<ChannelForwarder> for AnyLoader {
    fn from(forwarder: ChannelForwarder) -> Self {
        AnyLoader::Forwarder(forwarder)
    }
}
