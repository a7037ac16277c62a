//! Capability-gated adapter framework for driving many unrelated third-party
//! content providers through one normalized vocabulary of operations.
//!
//! Callers resolve an account to an [`registry::AddonEntry`] via the
//! [`registry::AddonRegistry`], instantiate the adapter with a
//! [`network::HttpRequestor`] and an [`config::AddonConfig`], and invoke the
//! family contract ([`interfaces`]). Adapters translate to provider-specific
//! HTTP calls and parse the responses back into the normalized model
//! ([`model`]); provider-specific shapes never reach the caller.

pub mod capability;
pub mod config;
pub mod cursor;
pub mod error;
pub mod imps;
pub mod interfaces;
pub mod model;
pub mod network;
pub mod registry;

pub use capability::{AddonCapability, AddonFamily, OperationDecl, OperationKind};
pub use config::AddonConfig;
pub use cursor::{Cursor, PageCursor};
pub use error::{AddonError, AddonResult};
pub use interfaces::{CitationAddon, ComputingAddon, LinkAddon, StorageAddon};
pub use model::{Item, ItemSample, ItemType, SupportedResourceType};
pub use network::{HttpRequestor, HttpResponse};
pub use registry::{AddonEntry, AddonInstance, AddonRegistry};
