// Import behavior: only a top-level JSON array is accepted, and a
// rejected import leaves the stored board untouched.
use scoutdesk::context::TestContext;
use scoutdesk::model::{ItemKind, ItemStatus, PlanItem};
use scoutdesk::storage::{ImportError, LocalStorage};

fn sample_board() -> Vec<PlanItem> {
    vec![
        PlanItem::new(ItemKind::Series, "Existing series", None),
        PlanItem::new(ItemKind::Video, "Existing video", None),
    ]
}

#[test]
fn test_import_minimal_records() {
    // Records with only a title are valid: id, kind, status and
    // timestamps all default.
    let imported = LocalStorage::import_from_str(
        r#"[
            {"title": "From the browser"},
            {"title": "With status", "status": "Filming", "kind": "Short"}
        ]"#,
    )
    .unwrap();

    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].title, "From the browser");
    assert_eq!(imported[0].status, ItemStatus::Idea);
    assert!(!imported[0].id.is_empty());
    assert_eq!(imported[1].status, ItemStatus::Filming);
    assert_eq!(imported[1].kind, ItemKind::Short);
}

#[test]
fn test_import_rejects_object_top_level() {
    let err = LocalStorage::import_from_str(r#"{"title": "not an array"}"#).unwrap_err();
    assert!(matches!(err, ImportError::NotAnArray));
}

#[test]
fn test_import_rejects_scalar_and_invalid_json() {
    assert!(matches!(
        LocalStorage::import_from_str("42").unwrap_err(),
        ImportError::NotAnArray
    ));
    assert!(matches!(
        LocalStorage::import_from_str("not json at all").unwrap_err(),
        ImportError::Parse(_)
    ));
}

#[test]
fn test_import_rejects_malformed_element_entirely() {
    // One bad element fails the whole document; no prefix import.
    let err = LocalStorage::import_from_str(
        r#"[{"title": "ok"}, {"status": "NoSuchStatus", "title": "bad"}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, ImportError::Parse(_)));
}

#[test]
fn test_rejected_import_leaves_collection_unchanged() {
    let ctx = TestContext::new();
    let board = sample_board();
    LocalStorage::save(&ctx, &board).unwrap();

    let result = LocalStorage::import_from_str(r#"{"oops": true}"#);
    assert!(result.is_err());

    // Nothing was merged or saved on the error path.
    let after = LocalStorage::load(&ctx).unwrap();
    assert_eq!(after, board);
}

#[test]
fn test_merge_import_updates_and_appends() {
    let board = sample_board();
    let known_id = board[0].id.clone();

    let mut replacement = PlanItem::new(ItemKind::Series, "Renamed series", None);
    replacement.id = known_id.clone();
    let fresh = PlanItem::new(ItemKind::Short, "Brand new", None);

    let (merged, count) = LocalStorage::merge_import(&board, vec![replacement, fresh]);
    assert_eq!(count, 2);
    assert_eq!(merged.len(), 3);
    assert_eq!(
        merged.iter().find(|i| i.id == known_id).unwrap().title,
        "Renamed series"
    );
    assert!(merged.iter().any(|i| i.title == "Brand new"));
}
