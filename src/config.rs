//! Injected per-account configuration.

use serde::{Deserialize, Serialize};

/// Immutable value bundle handed to an adapter at construction, alongside
/// its network requestor. Read-only for the adapter's lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddonConfig {
    /// Provider base URL used for display and browse-URL construction.
    pub external_api_url: String,
    /// Root item the account's integration is anchored on, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_root_id: Option<String>,
    /// Account-scoped identifier baked into requests, when the provider
    /// requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_account_id: Option<String>,
}

impl AddonConfig {
    pub fn new(external_api_url: impl Into<String>) -> Self {
        Self {
            external_api_url: external_api_url.into(),
            ..Self::default()
        }
    }
}
