#![forbid(unsafe_code)]

mod conflict;
mod schema;
mod time;

pub(super) use conflict::map_tag_insert_error;
pub(super) use schema::migrate_sqlite_schema;
pub(super) use time::{next_updated_at_ms, now_ms};
