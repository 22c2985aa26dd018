#![forbid(unsafe_code)]

use super::error::CliError;
use bk_storage::{DB_FILE_NAME, ItemCreateRequest, SqliteStore, StoreError};
use std::path::Path;
use tracing::info;

const SAMPLES: &[(&str, &str, &[&str])] = &[
    (
        "Go Blog: Error handling and Go",
        "https://go.dev/blog/error-handling-and-go",
        &["go", "errors"],
    ),
    (
        "SQLite Documentation",
        "https://www.sqlite.org/docs.html",
        &["database", "sqlite"],
    ),
    (
        "React Query Overview",
        "https://tanstack.com/query/latest/docs/framework/react/overview",
        &["react", "data"],
    ),
    ("Vite Guide", "https://vite.dev/guide/", &["frontend", "tooling"]),
    ("REST API Design", "https://restfulapi.net/", &["api", "design"]),
    (
        "Go Concurrency Patterns",
        "https://go.dev/blog/pipelines",
        &["go", "concurrency"],
    ),
    (
        "HTTP RFC 9110",
        "https://www.rfc-editor.org/rfc/rfc9110",
        &["http", "standards"],
    ),
    (
        "MDN: HTTP CORS",
        "https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS",
        &["http", "cors"],
    ),
    (
        "SQLite Query Planner",
        "https://www.sqlite.org/queryplanner.html",
        &["database", "performance"],
    ),
    (
        "React Hooks Reference",
        "https://react.dev/reference/react",
        &["react", "hooks"],
    ),
    (
        "Vite Environment Variables",
        "https://vite.dev/guide/env-and-mode.html",
        &["frontend", "config"],
    ),
    ("SQL Style Guide", "https://www.sqlstyle.guide/", &["sql", "style"]),
];

/// Removes the database together with its WAL side files.
pub(crate) fn reset_database(storage_dir: &Path) -> Result<(), CliError> {
    for suffix in ["", "-wal", "-shm"] {
        let path = storage_dir.join(format!("{DB_FILE_NAME}{suffix}"));
        match std::fs::remove_file(&path) {
            Ok(()) => info!(path = %path.display(), "removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

pub(crate) fn seed(store: &mut SqliteStore) -> Result<usize, StoreError> {
    for (title, url, tags) in SAMPLES {
        store.item_create(ItemCreateRequest {
            title: title.to_string(),
            url: url.to_string(),
            tag_names: tags.iter().map(|tag| tag.to_string()).collect(),
            ..ItemCreateRequest::default()
        })?;
    }
    Ok(SAMPLES.len())
}
