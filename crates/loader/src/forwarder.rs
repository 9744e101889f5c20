//! Forwarding loader.

use crate::{Loader, LoaderInfo, LoaderKind};
use serde::{Deserialize, Serialize};

/// A loader whose output is forwarded onward rather than consumed directly.
///
/// Carries no state beyond [`LoaderInfo`]; the variant itself is the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelForwarder {
    info: LoaderInfo,
}

impl ChannelForwarder {
    pub fn new(info: LoaderInfo) -> Self {
        Self { info }
    }
}

impl Loader for ChannelForwarder {
    fn info(&self) -> &LoaderInfo {
        &self.info
    }

    fn kind(&self) -> LoaderKind {
        LoaderKind::Forwarder
    }

    fn is_forwarder(&self) -> bool {
        true
    }
}
