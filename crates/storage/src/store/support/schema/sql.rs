#![forbid(unsafe_code)]

pub(super) const TABLES: &str = r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        -- AUTOINCREMENT: ids freed by orphan cleanup are never handed out again.
        CREATE TABLE IF NOT EXISTS tags (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS items_tags (
          item_id TEXT NOT NULL,
          tag_id INTEGER NOT NULL,
          PRIMARY KEY (item_id, tag_id),
          FOREIGN KEY(item_id) REFERENCES items(id) ON DELETE RESTRICT,
          FOREIGN KEY(tag_id) REFERENCES tags(id) ON DELETE RESTRICT
        );
"#;

/// Current shape of the items table under `name`; rebuilds create it under a
/// scratch name before swapping it in.
pub(super) fn items_table(name: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {name} (
          id TEXT PRIMARY KEY,
          title TEXT NOT NULL,
          url TEXT NOT NULL,
          type TEXT NOT NULL DEFAULT 'bookmark' CHECK(type IN ('bookmark', 'reading-list')),
          starred INTEGER NOT NULL DEFAULT 0,
          read INTEGER NOT NULL DEFAULT 0,
          notes TEXT,
          favicon_url TEXT,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          CHECK(updated_at_ms >= created_at_ms)
        );
"#
    )
}

pub(super) const INDEXES: &str = r#"
        CREATE INDEX IF NOT EXISTS idx_items_url ON items(url);
        CREATE INDEX IF NOT EXISTS idx_items_type ON items(type);
        CREATE INDEX IF NOT EXISTS idx_items_tags_tag ON items_tags(tag_id);
"#;
