//! Static registry of known adapters.
//!
//! A closed mapping between a stable integer identity, an API-facing name,
//! and an adapter factory. Persisted account references depend on the
//! numbers: an existing number is never reassigned, new providers only
//! append. The registry is an explicit constructed-once value, injected
//! where needed rather than reached for as ambient global state.

use crate::capability::AddonFamily;
use crate::config::AddonConfig;
use crate::imps::link::DataverseLinkAddon;
use crate::imps::storage::DropboxStorageAddon;
use crate::interfaces::{CitationAddon, ComputingAddon, LinkAddon, StorageAddon};
use crate::network::HttpRequestor;

/// A ready-to-use adapter behind its family contract.
pub enum AddonInstance {
    Storage(Box<dyn StorageAddon>),
    Citation(Box<dyn CitationAddon>),
    Computing(Box<dyn ComputingAddon>),
    Link(Box<dyn LinkAddon>),
}

impl AddonInstance {
    pub fn family(&self) -> AddonFamily {
        match self {
            AddonInstance::Storage(_) => AddonFamily::Storage,
            AddonInstance::Citation(_) => AddonFamily::Citation,
            AddonInstance::Computing(_) => AddonFamily::Computing,
            AddonInstance::Link(_) => AddonFamily::Link,
        }
    }
}

type AddonFactory = fn(HttpRequestor, AddonConfig) -> AddonInstance;

/// One known adapter: its stable number, API-facing name, family, and
/// factory.
pub struct AddonEntry {
    pub number: u32,
    pub name: &'static str,
    pub family: AddonFamily,
    factory: AddonFactory,
}

impl AddonEntry {
    pub fn instantiate(&self, network: HttpRequestor, config: AddonConfig) -> AddonInstance {
        (self.factory)(network, config)
    }
}

pub struct AddonRegistry {
    entries: Vec<AddonEntry>,
}

impl AddonRegistry {
    /// All adapters known to this build. Append-only; see the snapshot test
    /// below before touching the numbers.
    pub fn known() -> Self {
        Self {
            entries: vec![
                AddonEntry {
                    number: 1006,
                    name: "DROPBOX",
                    family: AddonFamily::Storage,
                    factory: |network, _config| {
                        AddonInstance::Storage(Box::new(DropboxStorageAddon::new(network)))
                    },
                },
                AddonEntry {
                    number: 1030,
                    name: "LINK_DATAVERSE",
                    family: AddonFamily::Link,
                    factory: |network, config| {
                        AddonInstance::Link(Box::new(DataverseLinkAddon::new(network, config)))
                    },
                },
            ],
        }
    }

    pub fn entries(&self) -> &[AddonEntry] {
        &self.entries
    }

    pub fn by_number(&self, number: u32) -> Option<&AddonEntry> {
        self.entries.iter().find(|entry| entry.number == number)
    }

    pub fn by_name(&self, name: &str) -> Option<&AddonEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Reverse lookup, name to stable number.
    pub fn number_for(&self, name: &str) -> Option<u32> {
        self.by_name(name).map(|entry| entry.number)
    }

    pub fn numbers(&self) -> Vec<u32> {
        self.entries.iter().map(|entry| entry.number).collect()
    }

    pub fn numbers_for_family(&self, family: AddonFamily) -> Vec<u32> {
        self.entries
            .iter()
            .filter(|entry| entry.family == family)
            .map(|entry| entry.number)
            .collect()
    }
}
