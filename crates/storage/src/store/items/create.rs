#![forbid(unsafe_code)]

use super::super::*;
use super::stored_text;
use bk_core::{ItemId, validate_title, validate_url};
use rusqlite::params;
use tracing::info;
use uuid::Uuid;

impl SqliteStore {
    pub fn item_create(&mut self, request: ItemCreateRequest) -> Result<ItemId, StoreError> {
        let now_ms = now_ms();
        let id = self.atomic(|tx| create_item_tx(tx, &request, now_ms))?;
        info!(
            item = %id,
            kind = %request.kind,
            tags = request.tag_names.len(),
            "item created"
        );
        Ok(id)
    }
}

pub(super) fn create_item_tx(
    tx: &Transaction<'_>,
    request: &ItemCreateRequest,
    now_ms: i64,
) -> Result<ItemId, StoreError> {
    validate_title(&request.title)?;
    validate_url(&request.url)?;

    let created_at_ms = request
        .added_at_ms
        .map_or(now_ms, |added_at_ms| added_at_ms.min(now_ms));

    let id = ItemId::try_new(Uuid::new_v4().to_string())?;
    tx.execute(
        r#"
        INSERT INTO items(id, title, url, type, starred, read, notes, favicon_url, created_at_ms, updated_at_ms)
        VALUES (?1, ?2, ?3, ?4, 0, 0, ?5, ?6, ?7, ?8)
        "#,
        params![
            id.as_str(),
            request.title,
            request.url,
            request.kind.as_str(),
            stored_text(request.notes.as_deref()),
            stored_text(request.favicon_url.as_deref()),
            created_at_ms,
            now_ms,
        ],
    )?;

    AssociationReconciler::new(tx).reconcile_names(&id, &request.tag_names)?;
    Ok(id)
}
