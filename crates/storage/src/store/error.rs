#![forbid(unsafe_code)]

use bk_core::{ItemFieldError, ItemIdError, TagNameError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("unknown id")]
    UnknownId,
    #[error("unknown tag")]
    UnknownTag,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("corrupt row: {0}")]
    Corrupt(&'static str),
}

/// Coarse classification for callers that translate store failures into
/// user-facing responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Storage,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::Validation,
            Self::UnknownId | Self::UnknownTag => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Io(_) | Self::Sql(_) | Self::Corrupt(_) => ErrorKind::Storage,
        }
    }
}

impl From<TagNameError> for StoreError {
    fn from(value: TagNameError) -> Self {
        Self::InvalidInput(value.message())
    }
}

impl From<ItemFieldError> for StoreError {
    fn from(value: ItemFieldError) -> Self {
        Self::InvalidInput(value.message())
    }
}

impl From<ItemIdError> for StoreError {
    fn from(value: ItemIdError) -> Self {
        Self::InvalidInput(value.message())
    }
}
