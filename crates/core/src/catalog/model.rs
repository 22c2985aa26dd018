#![forbid(unsafe_code)]

use super::ids::{ItemId, TagId};
use super::kind::ItemKind;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Item aggregate as returned by read paths: scalar fields plus the tags it
/// carries, in association order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub starred: bool,
    pub read: bool,
    pub notes: Option<String>,
    pub favicon_url: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub tags: Vec<Tag>,
}

impl Item {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.name.as_str()).collect()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemFieldError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("url must not be empty")]
    EmptyUrl,
}

impl ItemFieldError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title must not be empty",
            Self::EmptyUrl => "url must not be empty",
        }
    }
}

pub fn validate_title(title: &str) -> Result<(), ItemFieldError> {
    if title.trim().is_empty() {
        return Err(ItemFieldError::EmptyTitle);
    }
    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), ItemFieldError> {
    if url.trim().is_empty() {
        return Err(ItemFieldError::EmptyUrl);
    }
    Ok(())
}
