//! Channel loader types.
//!
//! Every loader answers one capability query, [`Loader::is_forwarder`]:
//! does its output get passed onward, or is it consumed directly? The
//! [`ChannelForwarder`] variant always answers `true`; the plain
//! [`ChannelLoader`] keeps the default `false`.
//!
//! Loaders are persisted through a versioned [`Envelope`] whose `kind` tag
//! rebuilds the same variant on decode.
//!
//! # Example
//!
//! ```
//! use loader::{AnyLoader, Loader, LoaderInfo};
//!
//! let forwarder = AnyLoader::forwarder(LoaderInfo::new("sd-forwarder"));
//! assert!(forwarder.is_forwarder());
//!
//! let bytes = loader::encode(&forwarder)?;
//! let restored = loader::decode(&bytes)?;
//! assert!(restored.is_forwarder());
//! assert!(restored.as_forwarder().is_some());
//! # Ok::<(), loader::Error>(())
//! ```

mod any;
mod envelope;
mod error;
mod forwarder;
mod loader;

pub use any::AnyLoader;
pub use envelope::{FORMAT_VERSION, Envelope, decode, encode};
pub use error::{Error, Result};
pub use forwarder::ChannelForwarder;
pub use loader::{ChannelLoader, Loader, LoaderInfo, LoaderKind};
