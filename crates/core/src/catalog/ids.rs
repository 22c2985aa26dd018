#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque item identity. Assigned once at creation and never reused.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn try_new(value: impl Into<String>) -> Result<Self, ItemIdError> {
        let value = value.into();
        validate_item_id(&value)?;
        Ok(Self(value))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemIdError {
    #[error("item id must not be empty")]
    Empty,
    #[error("item id is too long")]
    TooLong,
    #[error("item id contains control characters")]
    ContainsControl,
}

impl ItemIdError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "item id must not be empty",
            Self::TooLong => "item id is too long",
            Self::ContainsControl => "item id contains control characters",
        }
    }
}

fn validate_item_id(value: &str) -> Result<(), ItemIdError> {
    if value.trim().is_empty() {
        return Err(ItemIdError::Empty);
    }
    if value.len() > 128 {
        return Err(ItemIdError::TooLong);
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(ItemIdError::ContainsControl);
    }
    Ok(())
}

/// Surrogate tag identity assigned by the store on first creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(i64);

impl TagId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
