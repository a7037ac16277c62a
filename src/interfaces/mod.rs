//! Operation contracts, one per provider family.
//!
//! Each family fixes the set of asynchronous operations an adapter must
//! implement and publishes the capability each one requires (see
//! [`crate::capability`]). Callers only ever see the normalized model;
//! provider-specific shapes never cross these traits.

pub mod citation;
pub mod computing;
pub mod link;
pub mod storage;

pub use citation::CitationAddon;
pub use computing::ComputingAddon;
pub use link::LinkAddon;
pub use storage::StorageAddon;
