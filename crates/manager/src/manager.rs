//! Loader registry and routing.

use crate::{Catalog, Error, Result};
use loader::{AnyLoader, Loader};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// What the manager does with a loader's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Pass the output onward.
    Forward,
    /// Treat the output as terminal content.
    Consume,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Forward => "forward",
            Route::Consume => "consume",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry of loaders keyed by name.
///
/// Routing only consults [`Loader::is_forwarder`], never the concrete variant.
#[derive(Debug, Default)]
pub struct LoaderManager {
    loaders: BTreeMap<String, AnyLoader>,
}

impl LoaderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manager holding every loader in the catalog.
    pub fn from_catalog(catalog: Catalog) -> Result<Self> {
        let mut manager = Self::new();
        for loader in catalog.loaders {
            manager.register(loader)?;
        }
        Ok(manager)
    }

    pub fn to_catalog(&self) -> Catalog {
        Catalog {
            loaders: self.loaders.values().cloned().collect(),
            ..Catalog::default()
        }
    }

    /// Register a loader under its name.
    ///
    /// Names must be non-blank and carry no leading or trailing whitespace.
    pub fn register(&mut self, loader: AnyLoader) -> Result<()> {
        let name = loader.name();
        if name.trim().is_empty() || name.trim() != name {
            return Err(Error::InvalidName(name.to_string()));
        }
        if self.loaders.contains_key(name) {
            return Err(Error::Duplicate(name.to_string()));
        }

        info!(
            name = %name,
            kind = %loader.kind(),
            forwarder = loader.is_forwarder(),
            "registered loader"
        );
        self.loaders.insert(name.to_string(), loader);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<AnyLoader> {
        let loader = self
            .loaders
            .remove(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        info!(name = %name, "removed loader");
        Ok(loader)
    }

    pub fn get(&self, name: &str) -> Option<&AnyLoader> {
        self.loaders.get(name)
    }

    /// Iterate over all loaders in name order.
    pub fn iter(&self) -> impl Iterator<Item = &AnyLoader> {
        self.loaders.values()
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Loaders whose output is forwarded.
    pub fn forwarders(&self) -> impl Iterator<Item = &AnyLoader> {
        self.iter().filter(|l| l.is_forwarder())
    }

    /// Loaders whose output is consumed directly.
    pub fn direct_loaders(&self) -> impl Iterator<Item = &AnyLoader> {
        self.iter().filter(|l| !l.is_forwarder())
    }

    /// Decide what happens to the output of the named loader.
    pub fn route(&self, name: &str) -> Result<Route> {
        let loader = self
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        let route = route_for(loader);
        debug!(name = %name, route = %route, "routed loader");
        Ok(route)
    }
}

/// Route for any loader, based solely on its capability flag.
pub fn route_for(loader: &impl Loader) -> Route {
    if loader.is_forwarder() {
        Route::Forward
    } else {
        Route::Consume
    }
}
