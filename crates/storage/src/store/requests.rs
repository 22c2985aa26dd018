#![forbid(unsafe_code)]

use bk_core::{ItemId, ItemKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemCreateRequest {
    pub title: String,
    pub url: String,
    pub tag_names: Vec<String>,
    pub kind: ItemKind,
    pub notes: Option<String>,
    pub favicon_url: Option<String>,
    /// Creation time to record instead of now; later values are clamped to now.
    pub added_at_ms: Option<i64>,
}

/// Partial update. `None` leaves a field unchanged; `tag_names` is always the
/// complete desired tag set (empty means no tags).
///
/// `Some("")` for `notes` or `favicon_url` clears the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemUpdateRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub kind: Option<ItemKind>,
    pub starred: Option<bool>,
    pub read: Option<bool>,
    pub notes: Option<String>,
    pub favicon_url: Option<String>,
    pub tag_names: Vec<String>,
}

impl ItemUpdateRequest {
    pub fn has_field_changes(&self) -> bool {
        self.title.is_some()
            || self.url.is_some()
            || self.kind.is_some()
            || self.starred.is_some()
            || self.read.is_some()
            || self.notes.is_some()
            || self.favicon_url.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: Vec<ItemId>,
    pub skipped: usize,
}
