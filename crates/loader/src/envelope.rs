//! Versioned serialized form of a loader.
//!
//! The `kind` tag inside the envelope decides which variant is rebuilt, so a
//! forwarder always comes back as a forwarder.

use crate::{AnyLoader, Error, Loader, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Current envelope format version.
pub const FORMAT_VERSION: u32 = 1;

/// A loader together with the format version it was written with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    pub loader: AnyLoader,
}

#[derive(Deserialize)]
struct Header {
    version: u32,
}

impl Envelope {
    pub fn new(loader: AnyLoader) -> Self {
        Self {
            version: FORMAT_VERSION,
            loader,
        }
    }
}

/// Encode a loader into envelope bytes.
pub fn encode(loader: &AnyLoader) -> Result<Vec<u8>> {
    let envelope = Envelope::new(loader.clone());
    serde_json::to_vec(&envelope).map_err(Error::Encode)
}

/// Decode envelope bytes back into the loader variant they were written from.
pub fn decode(bytes: &[u8]) -> Result<AnyLoader> {
    let header: Header = serde_json::from_slice(bytes).map_err(Error::Decode)?;
    check_version(header.version)?;

    let envelope: Envelope = serde_json::from_slice(bytes).map_err(Error::Decode)?;
    debug!(
        name = %envelope.loader.name(),
        kind = %envelope.loader.kind(),
        "decoded loader envelope"
    );
    Ok(envelope.loader)
}

/// Fail unless `version` is readable by this build.
fn check_version(version: u32) -> Result<()> {
    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion {
            found: version,
            supported: FORMAT_VERSION,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoaderInfo, LoaderKind};

    #[test]
    fn test_forwarder_survives_round_trip() {
        let original = AnyLoader::forwarder(LoaderInfo::new("sd-forwarder"));
        assert!(original.is_forwarder());

        let bytes = encode(&original).unwrap();
        let restored = decode(&bytes).unwrap();

        assert!(restored.is_forwarder());
        assert!(restored.as_forwarder().is_some());
        assert_eq!(restored, original);
    }

    #[test]
    fn test_channel_not_promoted_to_forwarder() {
        let original = AnyLoader::channel(LoaderInfo::new("disc"));
        let restored = decode(&encode(&original).unwrap()).unwrap();
        assert!(!restored.is_forwarder());
        assert_eq!(restored.kind(), LoaderKind::Channel);
    }

    #[test]
    fn test_encoded_form_carries_version_and_tag() {
        let bytes = encode(&AnyLoader::forwarder(LoaderInfo::new("sd"))).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["loader"]["kind"], "forwarder");
    }

    #[test]
    fn test_rejects_future_version() {
        let bytes = br#"{"version": 2, "loader": {"kind": "forwarder", "name": "sd"}}"#;
        match decode(bytes) {
            Err(Error::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, 2);
                assert_eq!(supported, FORMAT_VERSION);
            }
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(decode(b"not json"), Err(Error::Decode(_))));
        assert!(matches!(
            decode(br#"{"version": 1, "loader": {"kind": "forwarder"}}"#),
            Err(Error::Decode(_))
        ));
    }
}
