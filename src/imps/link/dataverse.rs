//! Link addon for Dataverse installations.
//!
//! See <https://guides.dataverse.org/en/latest/api/native-api.html>
//!
//! Three native key spaces are multiplexed into one id grammar with an
//! explicit tag prefix: `dataverse/<int>` for collections, `dataset/<pid>`
//! for records addressed by persistent identifier, and `file/<int>` for
//! files within a record. The grammar is private to this module.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::debug;

use crate::config::AddonConfig;
use crate::cursor::PageCursor;
use crate::error::{AddonError, AddonResult};
use crate::interfaces::link::LinkAddon;
use crate::model::{Item, ItemSample, ItemType, SupportedResourceType};
use crate::network::HttpRequestor;

const DATAVERSE_TAG: &str = "dataverse/";
const DATASET_TAG: &str = "dataset/";
const FILE_TAG: &str = "file/";

/// The entity kinds multiplexed into this adapter's item ids.
#[derive(Debug, PartialEq, Eq)]
enum DataverseId<'a> {
    /// A collection, keyed by small integer id.
    Dataverse(&'a str),
    /// A dataset record, keyed by persistent identifier.
    Dataset(&'a str),
    /// A file within a dataset, keyed by integer id.
    File(&'a str),
}

fn parse_item_id(item_id: &str) -> AddonResult<DataverseId<'_>> {
    if let Some(id) = item_id.strip_prefix(DATAVERSE_TAG) {
        if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(DataverseId::Dataverse(id));
        }
    } else if let Some(pid) = item_id.strip_prefix(DATASET_TAG) {
        if !pid.is_empty() {
            return Ok(DataverseId::Dataset(pid));
        }
    } else if let Some(id) = item_id.strip_prefix(FILE_TAG) {
        if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(DataverseId::File(id));
        }
    }
    Err(AddonError::InvalidId(item_id.to_string()))
}

pub struct DataverseLinkAddon {
    network: HttpRequestor,
    config: AddonConfig,
}

impl DataverseLinkAddon {
    pub fn new(network: HttpRequestor, config: AddonConfig) -> Self {
        Self { network, config }
    }

    fn display_base(&self) -> &str {
        self.config.external_api_url.trim_end_matches('/')
    }

    fn dataset_url(&self, persistent_id: &str) -> String {
        format!(
            "{}/dataset.xhtml?persistentId={}",
            self.display_base(),
            urlencoding::encode(persistent_id),
        )
    }

    async fn fetch_dataverse(&self, dataverse_id: &str) -> AddonResult<Item> {
        let response = self
            .network
            .get(&format!("api/dataverses/{dataverse_id}"), &[])
            .await?;
        let envelope: Envelope<DataverseInfo> =
            response.classify_status().await?.json_body().await?;
        Ok(Item::new(
            format!("{DATAVERSE_TAG}{}", envelope.data.id),
            envelope.data.name,
            ItemType::Folder,
        ))
    }

    async fn fetch_dataset_by_pid(&self, persistent_id: &str) -> AddonResult<Item> {
        let response = self
            .network
            .get(
                "api/datasets/:persistentId",
                &[("persistentId", persistent_id)],
            )
            .await?;
        let envelope: Envelope<DatasetInfo> = response.classify_status().await?.json_body().await?;
        self.dataset_item(envelope.data.latest_version)
    }

    async fn fetch_dataset_by_entity_id(&self, entity_id: u64) -> AddonResult<Item> {
        let response = self
            .network
            .get(&format!("api/datasets/{entity_id}"), &[])
            .await?;
        let envelope: Envelope<DatasetInfo> = response.classify_status().await?.json_body().await?;
        self.dataset_item(envelope.data.latest_version)
    }

    async fn fetch_file(&self, file_id: &str) -> AddonResult<Item> {
        let response = self.network.get(&format!("api/files/{file_id}"), &[]).await?;
        let envelope: Envelope<FileInfo> = response.classify_status().await?.json_body().await?;
        let mut item = Item::new(
            format!("{FILE_TAG}{file_id}"),
            envelope.data.label,
            ItemType::Resource,
        )
        .with_link(format!("{}/file.xhtml?fileId={file_id}", self.display_base()));
        item.can_be_root = false;
        item.may_contain_root_candidates = false;
        Ok(item)
    }

    fn dataset_item(&self, version: DatasetVersion) -> AddonResult<Item> {
        let title = version.title()?;
        let item = Item::new(
            format!("{DATASET_TAG}{}", version.persistent_id),
            title,
            ItemType::Folder,
        )
        .with_link(self.dataset_url(&version.persistent_id))
        .with_resource_type(SupportedResourceType::Dataset);
        Ok(item)
    }

    /// One upstream call lists the entries; every dataset entry then needs
    /// its own metadata fetch for the title. Those reads are independent, so
    /// they are launched together and joined; input order is preserved and
    /// the first failure aborts the whole listing.
    async fn list_dataverse_children(&self, dataverse_id: &str) -> AddonResult<Vec<Item>> {
        let response = self
            .network
            .get(&format!("api/dataverses/{dataverse_id}/contents"), &[])
            .await?;
        let envelope: Envelope<Vec<ContentsEntry>> =
            response.classify_status().await?.json_body().await?;
        debug!(count = envelope.data.len(), %dataverse_id, "fetched dataverse contents");
        try_join_all(envelope.data.into_iter().map(|entry| self.child_item(entry))).await
    }

    async fn child_item(&self, entry: ContentsEntry) -> AddonResult<Item> {
        match entry.entry_type.as_str() {
            "dataverse" => {
                let title = entry.title.ok_or_else(|| {
                    AddonError::parse("dataverse contents", "dataverse entry without a title")
                })?;
                Ok(Item::new(
                    format!("{DATAVERSE_TAG}{}", entry.id),
                    title,
                    ItemType::Folder,
                ))
            }
            "dataset" => self.fetch_dataset_by_entity_id(entry.id).await,
            other => Err(AddonError::parse(
                "dataverse contents",
                format!("unknown entry type {other:?}"),
            )),
        }
    }
}

#[async_trait]
impl LinkAddon for DataverseLinkAddon {
    /// Every id kind carries its native key, so all three URLs are composed
    /// without touching the network.
    async fn build_url_for_id(&self, item_id: &str) -> AddonResult<String> {
        match parse_item_id(item_id)? {
            DataverseId::Dataset(pid) => Ok(self.dataset_url(pid)),
            DataverseId::Dataverse(id) => {
                Ok(format!("{}/dataverse.xhtml?id={id}", self.display_base()))
            }
            DataverseId::File(id) => {
                Ok(format!("{}/file.xhtml?fileId={id}", self.display_base()))
            }
        }
    }

    async fn get_external_account_id(
        &self,
        _auth_extras: &HashMap<String, String>,
    ) -> AddonResult<String> {
        let response = self.network.get("api/v1/users/:me", &[]).await?;
        let envelope: Envelope<UserInfo> = response.classify_status().await?.json_body().await?;
        Ok(envelope.data.id.to_string())
    }

    async fn get_item_info(&self, item_id: &str) -> AddonResult<Item> {
        if item_id.is_empty() {
            return Ok(Item::root());
        }
        match parse_item_id(item_id)? {
            DataverseId::Dataverse(id) => self.fetch_dataverse(id).await,
            DataverseId::Dataset(pid) => self.fetch_dataset_by_pid(pid).await,
            DataverseId::File(id) => self.fetch_file(id).await,
        }
    }

    async fn list_root_items(&self, page_cursor: &str) -> AddonResult<ItemSample> {
        let page = PageCursor::parse(page_cursor);
        let selected_page = page.page.to_string();
        let mut query: Vec<(&str, &str)> = vec![("selected_page", selected_page.as_str())];
        for role in ["1", "2", "3", "4", "5", "6", "7", "8"] {
            query.push(("role_ids", role));
        }
        query.push(("dvobject_types", "Dataverse"));
        for state in [
            "Unpublished",
            "Published",
            "Draft",
            "Deaccessioned",
            "In Review",
        ] {
            query.push(("published_states", state));
        }

        let response = self.network.get("api/mydata/retrieve", &query).await?;
        let envelope: MyDataEnvelope = response.classify_status().await?.json_body().await?;
        let Some(data) = envelope.data else {
            return Ok(ItemSample::empty());
        };

        let items = data
            .items
            .into_iter()
            .map(|entry| {
                Item::new(
                    format!("{DATAVERSE_TAG}{}", entry.entity_id),
                    entry.name,
                    ItemType::Folder,
                )
            })
            .collect::<Vec<_>>();
        let next_page = data.pagination.next_page()?;
        Ok(ItemSample::of(items).with_cursor(page.cursor(next_page)))
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
        match parse_item_id(item_id)? {
            DataverseId::Dataverse(id) => {
                let mut items = self.list_dataverse_children(id).await?;
                if let Some(wanted) = item_type {
                    items.retain(|item| item.item_type == wanted);
                }
                Ok(ItemSample::of(items))
            }
            // datasets and files are not containers in this hierarchy
            DataverseId::Dataset(_) | DataverseId::File(_) => Ok(ItemSample::empty()),
        }
    }
}

//
// upstream payload shapes, private to this adapter

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct DataverseInfo {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    label: String,
}

#[derive(Debug, Deserialize)]
struct DatasetInfo {
    #[serde(rename = "latestVersion")]
    latest_version: DatasetVersion,
}

#[derive(Debug, Deserialize)]
struct DatasetVersion {
    #[serde(rename = "datasetPersistentId")]
    persistent_id: String,
    #[serde(rename = "metadataBlocks")]
    metadata_blocks: MetadataBlocks,
}

impl DatasetVersion {
    /// The title lives in the citation metadata block, tagged by field name
    /// rather than position. A missing or empty match is a parse failure,
    /// never an empty-string substitute.
    fn title(&self) -> AddonResult<&str> {
        self.metadata_blocks
            .citation
            .fields
            .iter()
            .find(|field| field.type_name == "title")
            .and_then(|field| field.value.as_str())
            .filter(|title| !title.is_empty())
            .ok_or_else(|| AddonError::parse("dataset metadata", "missing or empty title field"))
    }
}

#[derive(Debug, Deserialize)]
struct MetadataBlocks {
    citation: CitationBlock,
}

#[derive(Debug, Deserialize)]
struct CitationBlock {
    fields: Vec<CitationField>,
}

#[derive(Debug, Deserialize)]
struct CitationField {
    #[serde(rename = "typeName")]
    type_name: String,
    value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    id: u64,
    #[serde(rename = "type")]
    entry_type: String,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MyDataEnvelope {
    data: Option<MyDataResponse>,
}

#[derive(Debug, Deserialize)]
struct MyDataResponse {
    items: Vec<MyDataItem>,
    pagination: MyDataPagination,
}

#[derive(Debug, Deserialize)]
struct MyDataItem {
    entity_id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct MyDataPagination {
    #[serde(rename = "hasNextPageNumber", default)]
    has_next: bool,
    #[serde(rename = "nextPageNumber")]
    next_page_number: Option<u64>,
}

impl MyDataPagination {
    fn next_page(&self) -> AddonResult<Option<u64>> {
        if !self.has_next {
            return Ok(None);
        }
        self.next_page_number.map(Some).ok_or_else(|| {
            AddonError::parse("mydata pagination", "hasNextPageNumber set but no nextPageNumber")
        })
    }
}
