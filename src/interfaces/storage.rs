//! Contract for hierarchical storage providers: a tree of folders and files
//! addressed by provider-native node ids.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::capability::{AddonCapability, OperationDecl};
use crate::error::AddonResult;
use crate::model::{Item, ItemSample, ItemType};

/// Capability metadata for every storage operation, discoverable without
/// instantiating an adapter.
pub const OPERATIONS: &[OperationDecl] = &[
    OperationDecl::immediate("get_external_account_id", AddonCapability::Access),
    OperationDecl::immediate("get_item_info", AddonCapability::Access),
    OperationDecl::immediate("list_root_items", AddonCapability::Access),
    OperationDecl::immediate("list_child_items", AddonCapability::Access),
];

#[async_trait]
pub trait StorageAddon: Send + Sync {
    /// Identify the remote account, given any provider-specific
    /// auth-callback extras. Used once at account-linking time.
    async fn get_external_account_id(
        &self,
        auth_extras: &HashMap<String, String>,
    ) -> AddonResult<String>;

    /// Resolve a single id to its item. The empty id denotes the provider's
    /// implicit root and resolves to [`Item::root`] without a network call.
    async fn get_item_info(&self, item_id: &str) -> AddonResult<Item>;

    /// Enumerate the provider's top-level collection.
    async fn list_root_items(&self, page_cursor: &str) -> AddonResult<ItemSample>;

    /// Enumerate the children of a container. An empty `item_id` delegates
    /// to [`list_root_items`](Self::list_root_items); a non-container id
    /// yields an empty sample, not an error.
    async fn list_child_items(
        &self,
        item_id: &str,
        page_cursor: &str,
        item_type: Option<ItemType>,
    ) -> AddonResult<ItemSample>;
}
