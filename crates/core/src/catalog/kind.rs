#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which list an item lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    #[default]
    Bookmark,
    ReadingList,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bookmark => "bookmark",
            Self::ReadingList => "reading-list",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ItemKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "bookmark" => Ok(Self::Bookmark),
            "reading-list" => Ok(Self::ReadingList),
            _ => Err(ItemKindError::Unknown),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemKindError {
    #[error("item type must be bookmark or reading-list")]
    Unknown,
}

impl ItemKindError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unknown => "item type must be bookmark or reading-list",
        }
    }
}
