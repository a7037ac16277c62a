//! Storage on dropbox.com.
//!
//! See <https://www.dropbox.com/developers/documentation/http/documentation>
//!
//! Continuation-token pagination: upstream's `cursor` is relayed verbatim as
//! the next-sample cursor while `has_more` holds, and resuming goes through
//! the dedicated `files/list_folder/continue` endpoint rather than
//! re-sending the original query.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{AddonError, AddonResult};
use crate::interfaces::storage::StorageAddon;
use crate::model::{Item, ItemSample, ItemType};
use crate::network::HttpRequestor;

/// Id of the folder presented by `list_root_items`. Distinct from the
/// reserved empty-string sentinel, so both round-trip through
/// `get_item_info`.
const ROOT_FOLDER_ID: &str = "/";

pub struct DropboxStorageAddon {
    network: HttpRequestor,
}

impl DropboxStorageAddon {
    pub fn new(network: HttpRequestor) -> Self {
        Self { network }
    }

    fn root_folder_item() -> Item {
        Item::new(ROOT_FOLDER_ID, "Root", ItemType::Folder)
    }

    /// Dropbox addresses entries by path (`/...`) or opaque id (`id:...`).
    fn check_item_id(item_id: &str) -> AddonResult<()> {
        if item_id.starts_with('/') || item_id.starts_with("id:") {
            Ok(())
        } else {
            Err(AddonError::InvalidId(item_id.to_string()))
        }
    }

    /// Dropbox reports path problems as 409 conflicts; the ones the contract
    /// distinguishes are picked apart by body tag.
    fn conflict_error(body: String) -> AddonError {
        if body.contains("not_found") {
            AddonError::NotFound { status: 409 }
        } else {
            AddonError::Upstream { status: 409, body }
        }
    }

    async fn fetch_metadata(&self, item_id: &str) -> AddonResult<DropboxEntry> {
        let response = self
            .network
            .post_json("files/get_metadata", &json!({ "path": item_id }))
            .await?;
        if response.status().as_u16() == 409 {
            let body = response.text_body().await?;
            return Err(Self::conflict_error(body));
        }
        response.classify_status().await?.json_body().await
    }
}

#[async_trait]
impl StorageAddon for DropboxStorageAddon {
    async fn get_external_account_id(
        &self,
        _auth_extras: &HashMap<String, String>,
    ) -> AddonResult<String> {
        let response = self
            .network
            .post_json("users/get_current_account", &serde_json::Value::Null)
            .await?;
        let account: CurrentAccount = response.classify_status().await?.json_body().await?;
        Ok(account.account_id)
    }

    async fn get_item_info(&self, item_id: &str) -> AddonResult<Item> {
        if item_id.is_empty() {
            return Ok(Item::root());
        }
        if item_id == ROOT_FOLDER_ID {
            return Ok(Self::root_folder_item());
        }
        Self::check_item_id(item_id)?;
        let entry = self.fetch_metadata(item_id).await?;
        entry.into_item()
    }

    async fn list_root_items(&self, _page_cursor: &str) -> AddonResult<ItemSample> {
        // Dropbox has no listable top level beyond the account root itself.
        Ok(ItemSample::of(vec![Self::root_folder_item()]))
    }

    async fn list_child_items(
        &self,
        item_id: &str,
        page_cursor: &str,
        item_type: Option<ItemType>,
    ) -> AddonResult<ItemSample> {
        if item_id.is_empty() {
            return self.list_root_items(page_cursor).await;
        }
        Self::check_item_id(item_id)?;

        let response = if page_cursor.is_empty() {
            let path = if item_id == ROOT_FOLDER_ID { "" } else { item_id };
            self.network
                .post_json(
                    "files/list_folder",
                    &json!({ "path": path, "recursive": false }),
                )
                .await?
        } else {
            self.network
                .post_json("files/list_folder/continue", &json!({ "cursor": page_cursor }))
                .await?
        };

        if response.status().as_u16() == 409 {
            let body = response.text_body().await?;
            if body.contains("not_folder") {
                // listing a file is an empty sample, not an error
                return Ok(ItemSample::empty());
            }
            return Err(Self::conflict_error(body));
        }

        let page: ListFolderResponse = response.classify_status().await?.json_body().await?;
        let next_cursor = page.next_cursor()?;
        let items = page
            .entries
            .into_iter()
            .map(DropboxEntry::into_item)
            .collect::<AddonResult<Vec<_>>>()?
            .into_iter()
            .filter(|item| item_type.map_or(true, |wanted| item.item_type == wanted))
            .collect::<Vec<_>>();
        debug!(count = items.len(), has_more = next_cursor.is_some(), "listed folder page");
        Ok(ItemSample::of(items).with_next_cursor(next_cursor))
    }
}

#[derive(Debug, Deserialize)]
struct CurrentAccount {
    account_id: String,
}

#[derive(Debug, Deserialize)]
struct ListFolderResponse {
    entries: Vec<DropboxEntry>,
    cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

impl ListFolderResponse {
    fn next_cursor(&self) -> AddonResult<Option<String>> {
        if !self.has_more {
            return Ok(None);
        }
        self.cursor
            .clone()
            .map(Some)
            .ok_or_else(|| AddonError::parse("list_folder", "has_more set but cursor missing"))
    }
}

#[derive(Debug, Deserialize)]
struct DropboxEntry {
    #[serde(rename = ".tag")]
    tag: String,
    id: Option<String>,
    name: String,
}

impl DropboxEntry {
    fn into_item(self) -> AddonResult<Item> {
        let item_type = match self.tag.as_str() {
            "folder" => ItemType::Folder,
            "file" => ItemType::Resource,
            other => {
                return Err(AddonError::parse(
                    "metadata entry",
                    format!("unknown entry tag {other:?}"),
                ))
            }
        };
        let item_id = self
            .id
            .ok_or_else(|| AddonError::parse("metadata entry", "entry without an id"))?;
        Ok(Item::new(item_id, self.name, item_type))
    }
}
