// Data-loss prevention: a failed load blocks ordinary saves until the
// file is recovered or force_save is used deliberately.
use scoutdesk::context::{AppContext, TestContext};
use scoutdesk::model::{ItemKind, PlanItem};
use scoutdesk::storage::LocalStorage;
use serial_test::serial;

#[test]
#[serial]
fn test_corrupt_file_blocks_save() {
    let ctx = TestContext::new();
    let path = ctx.get_planner_path().unwrap();

    LocalStorage::atomic_write(&path, "{ this is not json").unwrap();

    let load = LocalStorage::load(&ctx);
    assert!(load.is_err(), "corrupt file must fail the load");
    assert!(!LocalStorage::can_save(&ctx));

    let save = LocalStorage::save(&ctx, &[]);
    assert!(save.is_err(), "save must refuse after a failed load");

    // The corrupt bytes are still on disk, untouched.
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, "{ this is not json");
}

#[test]
#[serial]
fn test_force_save_recovers_and_unblocks() {
    let ctx = TestContext::new();
    let path = ctx.get_planner_path().unwrap();

    LocalStorage::atomic_write(&path, "garbage").unwrap();
    assert!(LocalStorage::load(&ctx).is_err());
    assert!(LocalStorage::save(&ctx, &[]).is_err());

    let recovered = vec![PlanItem::new(ItemKind::Video, "Recovered", None)];
    LocalStorage::force_save(&ctx, &recovered).unwrap();

    // A successful load clears the failed state and saving works again.
    let loaded = LocalStorage::load(&ctx).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(LocalStorage::can_save(&ctx));
    LocalStorage::save(&ctx, &loaded).unwrap();
}

#[test]
#[serial]
fn test_wrong_version_document_is_not_overwritten() {
    let ctx = TestContext::new();
    let path = ctx.get_planner_path().unwrap();

    let future = r#"{"version": 99, "items": []}"#;
    LocalStorage::atomic_write(&path, future).unwrap();

    assert!(LocalStorage::load(&ctx).is_err());
    assert!(LocalStorage::save(&ctx, &[]).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), future);
}

#[test]
#[serial]
fn test_atomic_write_replaces_content() {
    let ctx = TestContext::new();
    let path = ctx.get_planner_path().unwrap();

    LocalStorage::atomic_write(&path, "first").unwrap();
    LocalStorage::atomic_write(&path, "second").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    // No stray tmp file left behind.
    assert!(!path.with_extension("tmp").exists());
}
