#![forbid(unsafe_code)]

use bk_core::ItemIdError;
use bk_storage::{ErrorKind, StoreError};

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid item id: {0}")]
    ItemId(#[from] ItemIdError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// 2 validation, 3 not found, 4 conflict, 1 anything else.
    pub(crate) fn exit_code(&self) -> u8 {
        match self {
            Self::Store(err) => match err.kind() {
                ErrorKind::Validation => 2,
                ErrorKind::NotFound => 3,
                ErrorKind::Conflict => 4,
                ErrorKind::Storage => 1,
            },
            Self::ItemId(_) => 2,
            Self::Io(_) | Self::Json(_) => 1,
        }
    }
}
