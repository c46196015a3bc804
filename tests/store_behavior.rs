// Behavioral tests for the in-memory planner store.
use scoutdesk::context::TestContext;
use scoutdesk::model::{ItemKind, ItemStatus, PlanItem};
use scoutdesk::store::PlannerStore;
use std::collections::HashSet;
use std::sync::Arc;

fn open(ctx: &Arc<TestContext>) -> PlannerStore {
    PlannerStore::open(ctx.clone()).unwrap()
}

fn item(kind: ItemKind, title: &str, parent: Option<&str>) -> PlanItem {
    PlanItem::new(kind, title, parent.map(str::to_string))
}

#[test]
fn test_add_persists_across_reopen() {
    let ctx = Arc::new(TestContext::new());
    let mut store = open(&ctx);
    store.add(item(ItemKind::Video, "Episode 1", None)).unwrap();

    let reopened = open(&ctx);
    assert_eq!(reopened.items.len(), 1);
    assert_eq!(reopened.items[0].title, "Episode 1");
}

#[test]
fn test_update_replaces_by_id_and_touches() {
    let ctx = Arc::new(TestContext::new());
    let mut store = open(&ctx);
    let original = item(ItemKind::Video, "Working title", None);
    let id = original.id.clone();
    store.add(original.clone()).unwrap();

    let mut edited = original;
    edited.title = "Final title".to_string();
    store.update(edited).unwrap();

    let stored = store.get(&id).unwrap();
    assert_eq!(stored.title, "Final title");
    assert!(stored.updated_at >= stored.created_at);
    assert_eq!(store.items.len(), 1);
}

#[test]
fn test_remove_reparents_children() {
    let ctx = Arc::new(TestContext::new());
    let mut store = open(&ctx);

    let series = item(ItemKind::Series, "Rust deep dives", None);
    let series_id = series.id.clone();
    store.add(series).unwrap();

    let video = item(ItemKind::Video, "Borrow checker", Some(&series_id));
    let video_id = video.id.clone();
    store.add(video).unwrap();

    let short = item(ItemKind::Short, "Teaser", Some(&video_id));
    let short_id = short.id.clone();
    store.add(short).unwrap();

    // Removing the middle item hoists its child to the series.
    let removed = store.remove(&video_id).unwrap().unwrap();
    assert_eq!(removed.id, video_id);
    assert_eq!(
        store.get(&short_id).unwrap().parent_id.as_deref(),
        Some(series_id.as_str())
    );

    // And the change is durable.
    let reopened = open(&ctx);
    assert_eq!(
        reopened.get(&short_id).unwrap().parent_id.as_deref(),
        Some(series_id.as_str())
    );
}

#[test]
fn test_remove_root_item_children_become_roots() {
    let ctx = Arc::new(TestContext::new());
    let mut store = open(&ctx);

    let series = item(ItemKind::Series, "Series", None);
    let series_id = series.id.clone();
    store.add(series).unwrap();
    let video = item(ItemKind::Video, "Video", Some(&series_id));
    let video_id = video.id.clone();
    store.add(video).unwrap();

    store.remove(&series_id).unwrap();
    assert_eq!(store.get(&video_id).unwrap().parent_id, None);
    assert_eq!(store.roots().len(), 1);
}

#[test]
fn test_status_cycle_wraps_around() {
    let ctx = Arc::new(TestContext::new());
    let mut store = open(&ctx);
    let entry = item(ItemKind::Video, "Cycle me", None);
    let id = entry.id.clone();
    store.add(entry).unwrap();

    let expected = [
        ItemStatus::Scripting,
        ItemStatus::Filming,
        ItemStatus::Editing,
        ItemStatus::Published,
        ItemStatus::Shelved,
        ItemStatus::Idea, // wraps
    ];
    for status in expected {
        let updated = store.cycle_status(&id).unwrap().unwrap();
        assert_eq!(updated.status, status);
    }
}

#[test]
fn test_set_status_on_unknown_id_is_noop() {
    let ctx = Arc::new(TestContext::new());
    let mut store = open(&ctx);
    assert!(
        store
            .set_status("missing", ItemStatus::Editing)
            .unwrap()
            .is_none()
    );
    assert!(store.cycle_status("missing").unwrap().is_none());
}

#[test]
fn test_tree_flattening_and_collapse() {
    let ctx = Arc::new(TestContext::new());
    let mut store = open(&ctx);

    let series = item(ItemKind::Series, "S", None);
    let series_id = series.id.clone();
    store.add(series).unwrap();
    let v1 = item(ItemKind::Video, "V1", Some(&series_id));
    let v1_id = v1.id.clone();
    store.add(v1).unwrap();
    store.add(item(ItemKind::Short, "Sh", Some(&v1_id))).unwrap();
    store
        .add(item(ItemKind::Video, "V2", Some(&series_id)))
        .unwrap();
    store.add(item(ItemKind::Video, "Standalone", None)).unwrap();

    let open_tree = store.tree(&HashSet::new());
    let titles: Vec<(&str, usize)> = open_tree
        .iter()
        .map(|(d, i)| (i.title.as_str(), *d))
        .collect();
    assert_eq!(
        titles,
        vec![("S", 0), ("V1", 1), ("Sh", 2), ("V2", 1), ("Standalone", 0)]
    );

    let mut collapsed = HashSet::new();
    collapsed.insert(v1_id);
    let folded = store.tree(&collapsed);
    let titles: Vec<&str> = folded.iter().map(|(_, i)| i.title.as_str()).collect();
    assert_eq!(titles, vec!["S", "V1", "V2", "Standalone"]);
}

#[test]
fn test_orphaned_parent_reference_renders_at_root() {
    let ctx = Arc::new(TestContext::new());
    let mut store = open(&ctx);
    let mut orphan = item(ItemKind::Video, "Orphan", None);
    orphan.parent_id = Some("never-existed".to_string());
    store.add(orphan).unwrap();

    let tree = store.tree(&HashSet::new());
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].0, 0);
}
