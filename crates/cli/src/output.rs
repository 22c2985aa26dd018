#![forbid(unsafe_code)]

use super::error::CliError;
use bk_core::{Item, ItemKind, Tag};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Wire shape of an item: camelCase keys, RFC 3339 timestamps.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemView<'a> {
    id: &'a str,
    title: &'a str,
    url: &'a str,
    #[serde(rename = "type")]
    kind: ItemKind,
    starred: bool,
    read: bool,
    notes: Option<&'a str>,
    favicon_url: Option<&'a str>,
    created_at: String,
    updated_at: String,
    tags: &'a [Tag],
}

impl<'a> From<&'a Item> for ItemView<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: item.id.as_str(),
            title: &item.title,
            url: &item.url,
            kind: item.kind,
            starred: item.starred,
            read: item.read,
            notes: item.notes.as_deref(),
            favicon_url: item.favicon_url.as_deref(),
            created_at: ts_ms_to_rfc3339(item.created_at_ms),
            updated_at: ts_ms_to_rfc3339(item.updated_at_ms),
            tags: &item.tags,
        }
    }
}

pub(crate) fn ts_ms_to_rfc3339(ts_ms: i64) -> String {
    let nanos = (ts_ms as i128) * 1_000_000i128;
    let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    dt.format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
