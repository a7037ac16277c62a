//! The normalized result vocabulary every adapter produces and every caller
//! consumes. Values here are pure and immutable: constructed fresh on every
//! call, never cached or mutated, and free of network or database handles.

use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;

/// The two shapes a provider entity can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Resource,
    Folder,
}

/// Scholarly resource kinds a registry-style provider may classify its
/// items with. Single-valued per item; only meaningful for registry-style
/// providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportedResourceType {
    Audiovisual,
    Award,
    Book,
    BookChapter,
    Collection,
    ComputationalNotebook,
    ConferencePaper,
    ConferenceProceeding,
    DataPaper,
    Dataset,
    Dissertation,
    Event,
    Image,
    Instrument,
    InteractiveResource,
    Journal,
    JournalArticle,
    Model,
    OutputManagementPlan,
    PeerReview,
    PhysicalObject,
    Preprint,
    Project,
    Report,
    Service,
    Software,
    Sound,
    Standard,
    StudyRegistration,
    Text,
    Workflow,
    Other,
}

/// A single addressable entity exposed by a provider.
///
/// `item_id` is opaque to everything but the adapter that produced it, and
/// round-trips: feeding it back into `get_item_info` yields the same item.
/// The empty string is reserved for the provider's implicit root and never
/// collides with a real entity id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,
    pub item_name: String,
    pub item_type: ItemType,
    /// Resolvable external URL for the item, when the provider has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<SupportedResourceType>,
    /// Whether this item may anchor a configured integration.
    #[serde(default = "default_true")]
    pub can_be_root: bool,
    #[serde(default = "default_true")]
    pub may_contain_root_candidates: bool,
}

fn default_true() -> bool {
    true
}

impl Item {
    pub fn new(
        item_id: impl Into<String>,
        item_name: impl Into<String>,
        item_type: ItemType,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            item_name: item_name.into(),
            item_type,
            item_link: None,
            resource_type: None,
            can_be_root: true,
            may_contain_root_candidates: true,
        }
    }

    /// The synthetic item every adapter returns for the empty-string id,
    /// without touching the network.
    pub fn root() -> Self {
        Self::new("", "", ItemType::Folder)
    }

    pub fn with_link(mut self, item_link: impl Into<String>) -> Self {
        self.item_link = Some(item_link.into());
        self
    }

    pub fn with_resource_type(mut self, resource_type: SupportedResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }
}

/// One page sampled from a possibly unbounded listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemSample {
    pub items: Vec<Item>,
    /// Count of items in this page, not the whole collection; providers
    /// rarely expose true totals.
    pub total_count: Option<usize>,
    pub this_sample_cursor: String,
    /// `None` marks the terminal page.
    pub next_sample_cursor: Option<String>,
    pub prev_sample_cursor: Option<String>,
    pub first_sample_cursor: String,
}

impl ItemSample {
    pub fn of(items: Vec<Item>) -> Self {
        Self {
            total_count: Some(items.len()),
            items,
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::of(Vec::new())
    }

    /// Continuation-token style: carry upstream's token verbatim, or nothing
    /// when upstream says there is no more data.
    pub fn with_next_cursor(mut self, next_sample_cursor: Option<String>) -> Self {
        self.next_sample_cursor = next_sample_cursor;
        self
    }

    /// Attach a full cursor quadruple.
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.this_sample_cursor = cursor.this;
        self.next_sample_cursor = cursor.next;
        self.prev_sample_cursor = cursor.prev;
        self.first_sample_cursor = cursor.first;
        self
    }
}
