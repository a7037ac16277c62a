//! Contract for citation-manager providers (reference libraries and their
//! collections). No worked adapter ships in this crate yet; the contract and
//! its capability metadata are part of the closed family set.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::capability::{AddonCapability, OperationDecl};
use crate::error::AddonResult;
use crate::model::{Item, ItemSample, ItemType};

/// Capability metadata for every citation operation.
pub const OPERATIONS: &[OperationDecl] = &[
    OperationDecl::immediate("get_external_account_id", AddonCapability::Access),
    OperationDecl::immediate("get_item_info", AddonCapability::Access),
    OperationDecl::immediate("list_root_items", AddonCapability::Access),
    OperationDecl::immediate("list_child_items", AddonCapability::Access),
];

#[async_trait]
pub trait CitationAddon: Send + Sync {
    async fn get_external_account_id(
        &self,
        auth_extras: &HashMap<String, String>,
    ) -> AddonResult<String>;

    /// Resolve a single id to its item. The empty id denotes the provider's
    /// implicit root and resolves to [`Item::root`] without a network call.
    async fn get_item_info(&self, item_id: &str) -> AddonResult<Item>;

    async fn list_root_items(&self, page_cursor: &str) -> AddonResult<ItemSample>;

    async fn list_child_items(
        &self,
        item_id: &str,
        page_cursor: &str,
        item_type: Option<ItemType>,
    ) -> AddonResult<ItemSample>;
}
