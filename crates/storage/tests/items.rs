#![forbid(unsafe_code)]

use bk_core::{ItemId, ItemKind, TagId};
use bk_storage::{ErrorKind, ItemCreateRequest, ItemUpdateRequest, SqliteStore, StoreError};
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("bk_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn create(store: &mut SqliteStore, title: &str, url: &str, tags: &[&str]) -> ItemId {
    store
        .item_create(ItemCreateRequest {
            title: title.to_string(),
            url: url.to_string(),
            tag_names: names(tags),
            ..ItemCreateRequest::default()
        })
        .expect("create item")
}

fn set_tags(store: &mut SqliteStore, id: &ItemId, tags: &[&str]) {
    store
        .item_update(
            id,
            ItemUpdateRequest {
                tag_names: names(tags),
                ..ItemUpdateRequest::default()
            },
        )
        .expect("update tags");
}

fn all_tag_names(store: &SqliteStore) -> Vec<String> {
    store
        .tags_list()
        .expect("tags")
        .into_iter()
        .map(|tag| tag.name)
        .collect()
}

fn tag_id(store: &SqliteStore, name: &str) -> TagId {
    store
        .tags_list()
        .expect("tags")
        .into_iter()
        .find(|tag| tag.name == name)
        .map(|tag| tag.id)
        .expect("tag exists")
}

#[test]
fn create_update_untag_scenario() {
    let storage_dir = temp_dir("create_update_untag_scenario");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let id = create(&mut store, "A", "http://a", &["x", "y"]);
    let item = store.item_get(&id).expect("get");
    assert_eq!(item.title, "A");
    assert_eq!(item.url, "http://a");
    assert!(!item.starred);
    assert_eq!(item.created_at_ms, item.updated_at_ms);
    assert_eq!(item.tag_names(), vec!["x", "y"]);

    set_tags(&mut store, &id, &["y", "z"]);
    assert_eq!(store.item_get(&id).expect("get").tag_names(), vec!["y", "z"]);
    assert_eq!(all_tag_names(&store), names(&["y", "z"]));

    let z = tag_id(&store, "z");
    store.item_untag(&id, z).expect("untag");
    assert_eq!(store.item_get(&id).expect("get").tag_names(), vec!["y"]);
    assert_eq!(all_tag_names(&store), names(&["y"]));
}

#[test]
fn reconciliation_converges_and_repeats_as_noop() {
    let storage_dir = temp_dir("reconciliation_converges");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let id = create(&mut store, "A", "http://a", &[]);

    set_tags(&mut store, &id, &["a", "b", "a"]);
    let first = store.item_get(&id).expect("get");
    assert_eq!(first.tag_names(), vec!["a", "b"]);
    let tags_before = store.tags_list().expect("tags");

    set_tags(&mut store, &id, &["b", "a"]);
    let second = store.item_get(&id).expect("get");
    assert_eq!(second.tags, first.tags);
    assert_eq!(second.updated_at_ms, first.updated_at_ms, "no-op must not bump");
    assert_eq!(store.tags_list().expect("tags"), tags_before);
}

#[test]
fn orphan_tag_deleted_unless_shared() {
    let storage_dir = temp_dir("orphan_tag_deleted_unless_shared");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let x = create(&mut store, "X", "http://x", &["a"]);
    set_tags(&mut store, &x, &[]);
    assert!(store.item_get(&x).expect("get").tags.is_empty());
    assert!(all_tag_names(&store).is_empty());

    set_tags(&mut store, &x, &["a"]);
    let y = create(&mut store, "Y", "http://y", &["a"]);
    set_tags(&mut store, &x, &[]);
    assert_eq!(all_tag_names(&store), names(&["a"]));
    assert_eq!(store.item_get(&y).expect("get").tag_names(), vec!["a"]);
}

#[test]
fn update_fields_respect_absent_means_unchanged() {
    let storage_dir = temp_dir("update_fields_absent_means_unchanged");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let id = create(&mut store, "A", "http://a", &["keep"]);
    let before = store.item_get(&id).expect("get");

    store
        .item_update(
            &id,
            ItemUpdateRequest {
                starred: Some(true),
                tag_names: names(&["keep"]),
                ..ItemUpdateRequest::default()
            },
        )
        .expect("star");

    let after = store.item_get(&id).expect("get");
    assert!(after.starred);
    assert_eq!(after.title, "A");
    assert_eq!(after.url, "http://a");
    assert_eq!(after.created_at_ms, before.created_at_ms);
    assert!(after.updated_at_ms > before.updated_at_ms);
    assert_eq!(after.tag_names(), vec!["keep"]);
}

#[test]
fn tag_only_changes_bump_updated_at() {
    let storage_dir = temp_dir("tag_only_changes_bump_updated_at");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let id = create(&mut store, "A", "http://a", &[]);
    let created = store.item_get(&id).expect("get").updated_at_ms;

    let tag = store.item_tag(&id, "new").expect("tag");
    let tagged = store.item_get(&id).expect("get").updated_at_ms;
    assert!(tagged > created);

    let again = store.item_tag(&id, "new").expect("tag again");
    assert_eq!(again, tag);
    assert_eq!(store.item_get(&id).expect("get").updated_at_ms, tagged);

    store.item_untag(&id, tag).expect("untag");
    let untagged = store.item_get(&id).expect("get").updated_at_ms;
    assert!(untagged > tagged);
}

#[test]
fn tag_keeps_existing_associations() {
    let storage_dir = temp_dir("tag_keeps_existing_associations");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let id = create(&mut store, "A", "http://a", &["b", "a"]);

    store.item_tag(&id, "c").expect("tag");
    assert_eq!(store.item_get(&id).expect("get").tag_names(), vec!["b", "a", "c"]);
}

#[test]
fn untag_of_unassociated_tag_is_noop() {
    let storage_dir = temp_dir("untag_of_unassociated_tag_is_noop");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let x = create(&mut store, "X", "http://x", &["a"]);
    let y = create(&mut store, "Y", "http://y", &["b"]);
    let before = store.item_get(&x).expect("get");

    store.item_untag(&x, tag_id(&store, "b")).expect("untag");
    assert_eq!(store.item_get(&x).expect("get"), before);
    assert_eq!(store.item_get(&y).expect("get").tag_names(), vec!["b"]);
}

#[test]
fn unknown_ids_are_not_found() {
    let storage_dir = temp_dir("unknown_ids_are_not_found");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let ghost = ItemId::try_new("nonexistent").expect("item id");

    let err = store.item_get(&ghost).expect_err("get ghost");
    assert!(matches!(err, StoreError::UnknownId), "got {err:?}");

    let err = store
        .item_update(&ghost, ItemUpdateRequest::default())
        .expect_err("update ghost");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = store.item_tag(&ghost, "a").expect_err("tag ghost");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(store.tags_list().expect("tags").is_empty(), "tag creation rolled back");

    let id = create(&mut store, "A", "http://a", &[]);
    let err = store
        .item_untag(&id, TagId::new(9_999))
        .expect_err("unknown tag");
    assert!(matches!(err, StoreError::UnknownTag), "got {err:?}");
}

#[test]
fn blank_fields_are_rejected() {
    let storage_dir = temp_dir("blank_fields_are_rejected");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let err = store
        .item_create(ItemCreateRequest {
            title: String::new(),
            url: "http://a".to_string(),
            tag_names: Vec::new(),
            ..ItemCreateRequest::default()
        })
        .expect_err("empty title");
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = store
        .item_create(ItemCreateRequest {
            title: "A".to_string(),
            url: "  ".to_string(),
            tag_names: Vec::new(),
            ..ItemCreateRequest::default()
        })
        .expect_err("empty url");
    assert_eq!(err.kind(), ErrorKind::Validation);

    let id = create(&mut store, "A", "http://a", &[]);
    let err = store
        .item_update(
            &id,
            ItemUpdateRequest {
                title: Some(String::new()),
                ..ItemUpdateRequest::default()
            },
        )
        .expect_err("empty title on update");
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = store.item_tag(&id, "").expect_err("empty tag");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(store.items_list().expect("items").len(), 1);
}

#[test]
fn list_is_ordered_by_id_with_tags_in_association_order() {
    let storage_dir = temp_dir("list_is_ordered_by_id");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    for n in 0..5 {
        create(&mut store, &format!("T{n}"), &format!("http://{n}"), &["z", "m", "a"]);
    }
    create(&mut store, "bare", "http://bare", &[]);

    let items = store.items_list().expect("items");
    assert_eq!(items.len(), 6);
    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    for item in items.iter().filter(|item| item.title != "bare") {
        assert_eq!(item.tag_names(), vec!["z", "m", "a"]);
    }
    assert_eq!(store.items_list().expect("items again"), items);
}

#[test]
fn find_by_url_returns_item_with_tags() {
    let storage_dir = temp_dir("find_by_url_returns_item_with_tags");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let id = create(&mut store, "A", "http://a", &["x"]);

    let found = store
        .item_find_by_url("http://a")
        .expect("lookup")
        .expect("found");
    assert_eq!(found.id, id);
    assert_eq!(found.tag_names(), vec!["x"]);
    assert_eq!(store.item_find_by_url("http://missing").expect("lookup"), None);
}

#[test]
fn import_skips_known_urls() {
    let storage_dir = temp_dir("import_skips_known_urls");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    create(&mut store, "A", "http://a", &[]);

    let report = store
        .items_import(vec![
            ItemCreateRequest {
                title: "A again".to_string(),
                url: "http://a".to_string(),
                tag_names: names(&["dup"]),
                ..ItemCreateRequest::default()
            },
            ItemCreateRequest {
                title: "B".to_string(),
                url: "http://b".to_string(),
                tag_names: names(&["rust"]),
                ..ItemCreateRequest::default()
            },
            ItemCreateRequest {
                title: "B twice".to_string(),
                url: "http://b".to_string(),
                tag_names: Vec::new(),
                ..ItemCreateRequest::default()
            },
        ])
        .expect("import");

    assert_eq!(report.created.len(), 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(all_tag_names(&store), names(&["rust"]));
    let b = store.item_get(&report.created[0]).expect("get b");
    assert_eq!(b.title, "B");
}

#[test]
fn data_survives_reopen() {
    let storage_dir = temp_dir("data_survives_reopen");
    let id = {
        let mut store = SqliteStore::open(&storage_dir).expect("open store");
        create(&mut store, "A", "http://a", &["x"])
    };

    let store = SqliteStore::open(&storage_dir).expect("reopen");
    assert_eq!(store.item_get(&id).expect("get").tag_names(), vec!["x"]);
}

#[test]
fn reading_list_fields_round_through_update() {
    let storage_dir = temp_dir("reading_list_fields_round_through_update");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let id = store
        .item_create(ItemCreateRequest {
            title: "Paper".to_string(),
            url: "http://paper".to_string(),
            kind: ItemKind::ReadingList,
            notes: Some("skim section 3".to_string()),
            favicon_url: Some("  ".to_string()),
            ..ItemCreateRequest::default()
        })
        .expect("create");

    let created = store.item_get(&id).expect("get");
    assert_eq!(created.kind, ItemKind::ReadingList);
    assert!(!created.read);
    assert_eq!(created.notes.as_deref(), Some("skim section 3"));
    assert_eq!(created.favicon_url, None);

    store
        .item_update(
            &id,
            ItemUpdateRequest {
                read: Some(true),
                favicon_url: Some("http://paper/favicon.ico".to_string()),
                ..ItemUpdateRequest::default()
            },
        )
        .expect("mark read");
    let read = store.item_get(&id).expect("get");
    assert!(read.read);
    assert_eq!(read.title, "Paper");
    assert_eq!(read.notes.as_deref(), Some("skim section 3"));
    assert_eq!(read.favicon_url.as_deref(), Some("http://paper/favicon.ico"));
    assert!(read.updated_at_ms > created.updated_at_ms);

    store
        .item_update(
            &id,
            ItemUpdateRequest {
                kind: Some(ItemKind::Bookmark),
                notes: Some(String::new()),
                ..ItemUpdateRequest::default()
            },
        )
        .expect("move to bookmarks");
    let moved = store.item_get(&id).expect("get");
    assert_eq!(moved.kind, ItemKind::Bookmark);
    assert_eq!(moved.notes, None);
    assert!(moved.read);
}

#[test]
fn added_at_becomes_creation_time_but_never_in_the_future() {
    let storage_dir = temp_dir("added_at_becomes_creation_time_but_never_in_the_future");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let past = store
        .item_create(ItemCreateRequest {
            title: "Old".to_string(),
            url: "http://old".to_string(),
            added_at_ms: Some(1_000),
            ..ItemCreateRequest::default()
        })
        .expect("create past");
    let past = store.item_get(&past).expect("get");
    assert_eq!(past.created_at_ms, 1_000);
    assert!(past.updated_at_ms > past.created_at_ms);

    let future = store
        .item_create(ItemCreateRequest {
            title: "Later".to_string(),
            url: "http://later".to_string(),
            added_at_ms: Some(i64::MAX),
            ..ItemCreateRequest::default()
        })
        .expect("create future");
    let future = store.item_get(&future).expect("get");
    assert_eq!(future.created_at_ms, future.updated_at_ms);
}

#[test]
fn bulk_tag_adds_to_every_item_and_keeps_existing_tags() {
    let storage_dir = temp_dir("bulk_tag_adds_to_every_item_and_keeps_existing_tags");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let a = create(&mut store, "A", "http://a", &["a"]);
    let b = create(&mut store, "B", "http://b", &["shared"]);
    let b_before = store.item_get(&b).expect("get b");

    let changed = store
        .items_bulk_tag(&[a.clone(), b.clone()], &names(&["shared", "new", "shared"]))
        .expect("bulk tag");
    assert_eq!(changed, 2);
    assert_eq!(store.item_get(&a).expect("get a").tag_names(), vec!["a", "shared", "new"]);
    let b_after = store.item_get(&b).expect("get b");
    assert_eq!(b_after.tag_names(), vec!["shared", "new"]);
    assert!(b_after.updated_at_ms > b_before.updated_at_ms);

    let again = store
        .items_bulk_tag(&[a.clone(), b.clone()], &names(&["new"]))
        .expect("repeat");
    assert_eq!(again, 0);
    assert_eq!(
        store.items_bulk_tag(&[], &names(&["x"])).expect("no items"),
        0
    );
    assert_eq!(all_tag_names(&store), names(&["a", "shared", "new"]));
}

#[test]
fn bulk_tag_with_unknown_item_changes_nothing() {
    let storage_dir = temp_dir("bulk_tag_with_unknown_item_changes_nothing");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let a = create(&mut store, "A", "http://a", &[]);
    let ghost = ItemId::try_new("ghost").expect("item id");

    let err = store
        .items_bulk_tag(&[a.clone(), ghost], &names(&["fresh"]))
        .expect_err("unknown item");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(store.item_get(&a).expect("get").tags.is_empty());
    assert!(all_tag_names(&store).is_empty());

    let err = store
        .items_bulk_tag(&[a], &names(&[" "]))
        .expect_err("blank tag");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn mark_read_only_touches_items_that_change() {
    let storage_dir = temp_dir("mark_read_only_touches_items_that_change");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let a = create(&mut store, "A", "http://a", &[]);
    let b = create(&mut store, "B", "http://b", &[]);

    assert_eq!(store.items_mark_read(&[a.clone()], true).expect("read a"), 1);
    let b_before = store.item_get(&b).expect("get b");
    let a_read = store.item_get(&a).expect("get a");

    assert_eq!(
        store.items_mark_read(&[a.clone(), b.clone()], true).expect("read both"),
        1
    );
    assert_eq!(store.item_get(&a).expect("get a").updated_at_ms, a_read.updated_at_ms);
    let b_after = store.item_get(&b).expect("get b");
    assert!(b_after.read);
    assert!(b_after.updated_at_ms > b_before.updated_at_ms);

    assert_eq!(store.items_mark_read(&[a.clone()], false).expect("unread"), 1);
    assert!(!store.item_get(&a).expect("get a").read);

    let ghost = ItemId::try_new("ghost").expect("item id");
    let err = store
        .items_mark_read(&[b.clone(), ghost], false)
        .expect_err("unknown item");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(store.item_get(&b).expect("get b").read);
}
