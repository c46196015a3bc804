// Export format and export -> import roundtrip.
use scoutdesk::context::TestContext;
use scoutdesk::model::{ItemKind, ItemStatus, PlanItem};
use scoutdesk::storage::LocalStorage;

fn board() -> Vec<PlanItem> {
    let series = PlanItem::new(ItemKind::Series, "Channel relaunch", None);
    let mut video = PlanItem::new(ItemKind::Video, "Trailer", Some(series.id.clone()));
    video.status = ItemStatus::Editing;
    video.notes = "Needs music license".to_string();
    vec![series, video]
}

#[test]
fn test_export_is_a_plain_json_array() {
    let exported = LocalStorage::export_string(&board()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
    // Interchange format: a bare array, no version wrapper.
    assert!(value.is_array());
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert!(value.get("version").is_none());
}

#[test]
fn test_export_import_roundtrip_preserves_items() {
    let original = board();
    let exported = LocalStorage::export_string(&original).unwrap();
    let imported = LocalStorage::import_from_str(&exported).unwrap();
    assert_eq!(imported, original);
}

#[test]
fn test_roundtrip_through_disk_and_merge() {
    let ctx = TestContext::new();
    let original = board();
    LocalStorage::save(&ctx, &original).unwrap();

    // Export the stored board, wipe it, import the backup.
    let stored = LocalStorage::load(&ctx).unwrap();
    let backup = LocalStorage::export_string(&stored).unwrap();

    LocalStorage::save(&ctx, &[]).unwrap();
    assert!(LocalStorage::load(&ctx).unwrap().is_empty());

    let imported = LocalStorage::import_from_str(&backup).unwrap();
    let (merged, count) = LocalStorage::merge_import(&[], imported);
    LocalStorage::save(&ctx, &merged).unwrap();

    assert_eq!(count, 2);
    assert_eq!(LocalStorage::load(&ctx).unwrap(), original);
}

#[test]
fn test_merge_is_idempotent_for_same_backup() {
    let original = board();
    let backup = LocalStorage::export_string(&original).unwrap();

    let first = LocalStorage::import_from_str(&backup).unwrap();
    let (merged_once, _) = LocalStorage::merge_import(&original, first);
    let second = LocalStorage::import_from_str(&backup).unwrap();
    let (merged_twice, _) = LocalStorage::merge_import(&merged_once, second);

    assert_eq!(merged_once, merged_twice);
    assert_eq!(merged_twice.len(), original.len());
}
