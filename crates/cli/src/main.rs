#![forbid(unsafe_code)]

mod error;
mod output;
mod seed;

use bk_core::import::parse_bookmarks_html;
use bk_core::{ItemId, ItemKind, TagId};
use bk_storage::{ItemCreateRequest, ItemUpdateRequest, SqliteStore};
use clap::{ArgAction, Parser, Subcommand};
use error::CliError;
use output::{ItemView, print_json};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bookmarks", author, version, about = "Personal bookmark catalog", long_about = None)]
struct Cli {
    /// Directory holding the catalog database
    #[arg(long, env = "BOOKMARKS_STORAGE_DIR", default_value = "./data")]
    storage_dir: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "BOOKMARKS_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List every item with its tags
    List {
        /// Only items of this type (bookmark or reading-list)
        #[arg(long = "type")]
        kind: Option<ItemKind>,
    },
    /// Show one item
    Get { id: String },
    /// Add a bookmark
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        /// Tag name, repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long = "type", default_value = "bookmark")]
        kind: ItemKind,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        favicon_url: Option<String>,
    },
    /// Change fields of an item and replace its tag set
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long = "type")]
        kind: Option<ItemKind>,
        #[arg(long, action = ArgAction::Set)]
        starred: Option<bool>,
        #[arg(long, action = ArgAction::Set)]
        read: Option<bool>,
        /// New notes; an empty value clears them
        #[arg(long)]
        notes: Option<String>,
        /// New favicon url; an empty value clears it
        #[arg(long)]
        favicon_url: Option<String>,
        /// Complete tag set after the update, repeatable; omit to clear all tags
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Add one tag to an item
    Tag { id: String, name: String },
    /// Remove one tag (by tag id) from an item
    Untag { id: String, tag_id: i64 },
    /// Add tags to several items at once, keeping their other tags
    BulkTag {
        /// Item id, repeatable
        #[arg(long = "item", required = true)]
        ids: Vec<String>,
        /// Tag name, repeatable
        #[arg(long = "tag", required = true)]
        tags: Vec<String>,
    },
    /// Mark items read (or unread with --unread)
    MarkRead {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        unread: bool,
    },
    /// List every tag
    Tags,
    /// Find the item saved under a url
    Lookup { url: String },
    /// Recreate the database with sample bookmarks
    Seed,
    /// Import a browser bookmark export (Netscape HTML)
    Import { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_logging(default_filter: &str) {
    // Logs go to stderr; stdout carries command output.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        storage_dir,
        command,
        ..
    } = cli;

    if command == Command::Seed {
        seed::reset_database(&storage_dir)?;
    }

    let mut store = SqliteStore::open(&storage_dir)?;
    debug!(path = %store.db_path().display(), ?command, "dispatching");

    match command {
        Command::List { kind } => {
            let items = store.items_list()?;
            let views: Vec<ItemView<'_>> = items
                .iter()
                .filter(|item| kind.is_none_or(|kind| item.kind == kind))
                .map(ItemView::from)
                .collect();
            print_json(&views)
        }
        Command::Get { id } => {
            let item = store.item_get(&ItemId::try_new(id)?)?;
            print_json(&ItemView::from(&item))
        }
        Command::Create {
            title,
            url,
            tags,
            kind,
            notes,
            favicon_url,
        } => {
            let id = store.item_create(ItemCreateRequest {
                title,
                url,
                tag_names: tags,
                kind,
                notes,
                favicon_url,
                added_at_ms: None,
            })?;
            print_json(&json!({ "id": id }))
        }
        Command::Update {
            id,
            title,
            url,
            kind,
            starred,
            read,
            notes,
            favicon_url,
            tags,
        } => {
            let id = ItemId::try_new(id)?;
            store.item_update(
                &id,
                ItemUpdateRequest {
                    title,
                    url,
                    kind,
                    starred,
                    read,
                    notes,
                    favicon_url,
                    tag_names: tags,
                },
            )?;
            print_json(&ItemView::from(&store.item_get(&id)?))
        }
        Command::Tag { id, name } => {
            let tag_id = store.item_tag(&ItemId::try_new(id)?, &name)?;
            print_json(&json!({ "tagId": tag_id }))
        }
        Command::Untag { id, tag_id } => {
            let id = ItemId::try_new(id)?;
            store.item_untag(&id, TagId::new(tag_id))?;
            print_json(&ItemView::from(&store.item_get(&id)?))
        }
        Command::BulkTag { ids, tags } => {
            let ids = parse_item_ids(ids)?;
            let changed = store.items_bulk_tag(&ids, &tags)?;
            print_json(&json!({ "changed": changed }))
        }
        Command::MarkRead { ids, unread } => {
            let ids = parse_item_ids(ids)?;
            let changed = store.items_mark_read(&ids, !unread)?;
            print_json(&json!({ "changed": changed }))
        }
        Command::Tags => print_json(&store.tags_list()?),
        Command::Lookup { url } => match store.item_find_by_url(&url)? {
            Some(item) => print_json(&json!({ "found": true, "item": ItemView::from(&item) })),
            None => print_json(&json!({ "found": false })),
        },
        Command::Seed => {
            let created = seed::seed(&mut store)?;
            info!(created, "seed complete");
            print_json(&json!({ "created": created }))
        }
        Command::Import { file } => {
            let html = std::fs::read_to_string(&file)?;
            let requests = parse_bookmarks_html(&html)
                .into_iter()
                .map(|bookmark| ItemCreateRequest {
                    title: bookmark.title,
                    url: bookmark.url,
                    tag_names: bookmark.tags,
                    kind: bookmark.kind,
                    added_at_ms: bookmark.added_at_ms,
                    ..ItemCreateRequest::default()
                })
                .collect();
            let report = store.items_import(requests)?;
            print_json(&json!({
                "created": report.created,
                "skipped": report.skipped,
            }))
        }
    }
}

fn parse_item_ids(ids: Vec<String>) -> Result<Vec<ItemId>, CliError> {
    Ok(ids
        .into_iter()
        .map(ItemId::try_new)
        .collect::<Result<Vec<_>, _>>()?)
}
