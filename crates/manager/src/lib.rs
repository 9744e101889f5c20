//! Loader manager.
//!
//! Keeps a named set of loaders, loads and saves them as a TOML
//! [`Catalog`], and decides per loader whether its output is forwarded or
//! consumed ([`Route`]). The decision comes from [`loader::Loader::is_forwarder`]
//! alone, so new loader variants need no changes here.

mod catalog;
mod error;
mod manager;

pub use catalog::{CATALOG_VERSION, Catalog};
pub use error::{Error, Result};
pub use manager::{LoaderManager, Route, route_for};
