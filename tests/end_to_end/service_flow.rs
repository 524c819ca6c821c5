//! Single-threaded request flows through WidgetDb

use crate::common::*;
use widgetdb::WidgetRepository;

// ============================================================================
// Creation and stacking
// ============================================================================

#[test]
fn test_default_placement_stacks_upwards() {
    let db = open_db();
    let first = db.create(CreateWidget::new(0, 0, 1, 1)).unwrap();
    let second = db.create(CreateWidget::new(0, 0, 1, 1)).unwrap();
    let third = db.create(CreateWidget::new(0, 0, 1, 1)).unwrap();

    assert_eq!(second.z_index(), first.z_index() + 1);
    assert_eq!(third.z_index(), second.z_index() + 1);
    assert_eq!(db.repository().get_max_z_index(), Some(third.z_index()));
}

#[test]
fn test_insert_in_middle_shifts_contiguous_run_only() {
    let db = open_db();
    for z in [0, 1, 2, 4, 5] {
        create_at(&db, z);
    }
    create_at(&db, 1);
    assert_eq!(z_indexes(&db), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_insert_into_gap_moves_nothing() {
    let db = open_db();
    let low = create_at(&db, 0);
    let high = create_at(&db, 2);
    create_at(&db, 1);

    assert_eq!(db.get_by_id(low.id()).unwrap().z_index(), 0);
    assert_eq!(db.get_by_id(high.id()).unwrap().z_index(), 2);
}

#[test]
fn test_shift_keeps_ids_and_geometry() {
    let db = open_db();
    let bottom = db
        .create(CreateWidget::new(3, 4, 5, 6).with_z_index(0))
        .unwrap();
    create_at(&db, 0);

    let moved = db.get_by_id(bottom.id()).unwrap();
    assert_eq!(moved.z_index(), 1);
    assert_eq!(moved.geometry(), bottom.geometry());
    assert_eq!(moved.updated_at(), bottom.updated_at());
}

// ============================================================================
// Updates
// ============================================================================

#[test]
fn test_update_moves_widget_out_of_area() {
    let db = open_db();
    let widget = db.create(CreateWidget::new(0, 0, 10, 10)).unwrap();
    assert_eq!(db.get_in_area(0, 10, 0, 10).unwrap().len(), 1);

    db.update(UpdateWidget::new(*widget.id()).with_x(50))
        .unwrap()
        .unwrap();
    assert!(db.get_in_area(0, 10, 0, 10).unwrap().is_empty());
    assert_eq!(db.get_in_area(50, 60, 0, 10).unwrap().len(), 1);
}

#[test]
fn test_update_onto_occupied_z_is_rejected() {
    let db = open_db();
    let a = create_at(&db, 0);
    let b = create_at(&db, 1);

    let err = db
        .update(UpdateWidget::new(*b.id()).with_z_index(0).with_x(99))
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(db.get_by_id(a.id()), Some(a));
    assert_eq!(db.get_by_id(b.id()), Some(b));
}

#[test]
fn test_update_with_negative_size_is_rejected() {
    let db = open_db();
    let widget = create_at(&db, 0);
    let err = db
        .update(UpdateWidget::new(*widget.id()).with_width(-1))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(_)));
    assert_eq!(db.get_by_id(widget.id()), Some(widget));
}

#[test]
fn test_update_after_delete_is_none() {
    let db = open_db();
    let widget = create_at(&db, 0);
    assert!(db.delete(widget.id()));
    assert_eq!(db.update(UpdateWidget::new(*widget.id()).with_x(1)).unwrap(), None);
}

// ============================================================================
// Queries and export
// ============================================================================

#[test]
fn test_area_results_are_z_ordered() {
    let db = open_db();
    let top = create_at(&db, 9);
    let bottom = create_at(&db, -3);
    let middle = create_at(&db, 4);

    assert_eq!(db.get_in_area(0, 10, 0, 10).unwrap(), vec![bottom, middle, top]);
}

#[test]
fn test_widget_serializes_with_camel_case_keys() {
    let db = open_db();
    let widget = db
        .create(CreateWidget::new(1, 2, 3, 4).with_z_index(5))
        .unwrap();
    let json = serde_json::to_value(&widget).unwrap();

    assert_eq!(json["id"], 0);
    assert_eq!(json["x"], 1);
    assert_eq!(json["y"], 2);
    assert_eq!(json["width"], 3);
    assert_eq!(json["height"], 4);
    assert_eq!(json["zIndex"], 5);
    assert!(json.get("updatedAt").is_some());
}

#[test]
fn test_clear_all_then_reuse() {
    let db = open_db();
    create_at(&db, 0);
    create_at(&db, 1);
    db.clear_all();
    assert!(db.get_all().is_empty());

    let widget = db.create(CreateWidget::new(0, 0, 1, 1)).unwrap();
    assert_eq!(widget.z_index(), i32::MIN + 1);
}
