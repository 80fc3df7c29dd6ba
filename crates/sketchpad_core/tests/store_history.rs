use sketchpad_core::{
    ShapeInput, ShapeKind, ShapePatch, ShapeStore, StoreConfig, StoreError,
};

fn store() -> ShapeStore {
    ShapeStore::with_config(StoreConfig {
        seed: Some(2024),
        ..StoreConfig::default()
    })
}

fn circle(radius: f32) -> ShapeInput {
    ShapeInput {
        radius,
        fill: "red".to_string(),
        ..ShapeInput::of_kind("circle")
    }
}

fn radius_patch(radius: f32) -> ShapePatch {
    ShapePatch {
        radius: Some(radius),
        ..ShapePatch::default()
    }
}

#[test]
fn undo_then_redo_of_add_restores_shape() {
    let mut store = store();
    let a = store.add_new_shape(&circle(5.0)).unwrap();
    assert_eq!(store.get_all().len(), 1);

    let after_undo = store.undo().unwrap();
    assert!(after_undo.is_empty());

    let after_redo = store.redo().unwrap();
    assert_eq!(after_redo.len(), 1);
    let restored = &after_redo[&a.id()];
    assert_eq!(restored, &a);
    assert_eq!(restored.kind, ShapeKind::Circle { radius: 5.0 });
}

#[test]
fn undo_of_delete_all_restores_every_shape() {
    let mut store = store();
    let a = store.add_new_shape(&circle(1.0)).unwrap();
    let b = store
        .add_new_shape(&ShapeInput {
            length: 3.0,
            width: 2.0,
            ..ShapeInput::of_kind("rectangle")
        })
        .unwrap();

    store.delete_all();
    assert!(store.is_empty());

    let restored = store.undo().unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored[&a.id()], a);
    assert_eq!(restored[&b.id()], b);
}

#[test]
fn successive_updates_undo_one_step_at_a_time() {
    let mut store = store();
    let a = store.add_new_shape(&circle(5.0)).unwrap();
    store.update_shape(a.id(), &radius_patch(8.0)).unwrap();
    store.update_shape(a.id(), &radius_patch(12.0)).unwrap();

    let state = store.undo().unwrap();
    assert_eq!(state[&a.id()].kind, ShapeKind::Circle { radius: 8.0 });

    let state = store.undo().unwrap();
    assert_eq!(state[&a.id()].kind, ShapeKind::Circle { radius: 5.0 });

    let state = store.undo().unwrap();
    assert!(state.is_empty());

    assert!(matches!(store.undo(), Err(StoreError::NothingToUndo)));
}

#[test]
fn redo_replays_updates_in_order() {
    let mut store = store();
    let a = store.add_new_shape(&circle(5.0)).unwrap();
    store.update_shape(a.id(), &radius_patch(8.0)).unwrap();
    store.update_shape(a.id(), &radius_patch(12.0)).unwrap();
    for _ in 0..3 {
        store.undo().unwrap();
    }

    store.redo().unwrap();
    assert_eq!(
        store.get_shape(a.id()).unwrap().kind,
        ShapeKind::Circle { radius: 5.0 }
    );
    store.redo().unwrap();
    assert_eq!(
        store.get_shape(a.id()).unwrap().kind,
        ShapeKind::Circle { radius: 8.0 }
    );
    store.redo().unwrap();
    assert_eq!(
        store.get_shape(a.id()).unwrap().kind,
        ShapeKind::Circle { radius: 12.0 }
    );
    assert!(matches!(store.redo(), Err(StoreError::NothingToRedo)));
}

#[test]
fn fresh_mutation_after_undo_invalidates_redo() {
    let mut store = store();
    store.add_new_shape(&circle(1.0)).unwrap();
    store.undo().unwrap();
    assert!(store.can_redo());

    store.add_new_shape(&circle(2.0)).unwrap();
    assert!(matches!(store.redo(), Err(StoreError::NothingToRedo)));
}

#[test]
fn copy_of_absent_id_changes_nothing() {
    let mut store = store();
    let a = store.add_new_shape(&circle(1.0)).unwrap();
    store.add_new_shape(&circle(2.0)).unwrap();
    store.undo().unwrap();
    let absent = (a.id() + 1) % sketchpad_core::ID_SPACE;
    let before = store.get_all().clone();
    assert_eq!(store.undo_depth(), 1);
    assert_eq!(store.redo_depth(), 1);

    let err = store.add_copy(absent).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == absent));
    assert_eq!(store.get_all(), &before);
    assert_eq!(store.undo_depth(), 1);
    assert_eq!(store.redo_depth(), 1);
    assert!(store.redo().is_ok());
}

#[test]
fn copy_gets_new_id_and_same_fields() {
    let mut store = store();
    let a = store.add_new_shape(&circle(4.0)).unwrap();
    let copy = store.add_copy(a.id()).unwrap();

    assert_ne!(copy.id(), a.id());
    assert_eq!(copy.kind, a.kind);
    assert_eq!(copy.fill, a.fill);
    assert_eq!(store.get_all().len(), 2);

    store.undo().unwrap();
    assert_eq!(store.get_all().len(), 1);
    assert!(store.get_shape(a.id()).is_ok());
}

#[test]
fn update_of_absent_id_is_not_found() {
    let mut store = store();
    let err = store.update_shape(17, &radius_patch(2.0)).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(17)));
    assert!(!store.can_undo());
}

#[test]
fn delete_of_absent_id_is_a_true_noop() {
    let mut store = store();
    let a = store.add_new_shape(&circle(1.0)).unwrap();
    store.undo().unwrap();
    store.redo().unwrap();
    store.undo().unwrap();
    let absent = a.id();

    assert!(!store.delete_shape(absent));
    assert_eq!(store.undo_depth(), 0);
    assert_eq!(store.redo_depth(), 1);
    assert!(store.can_redo());
}

#[test]
fn delete_then_undo_restores_original_fields() {
    let mut store = store();
    let a = store.add_new_shape(&circle(3.0)).unwrap();
    let updated = store
        .update_shape(
            a.id(),
            &ShapePatch {
                stroke: Some("navy".to_string()),
                x: Some(40.0),
                ..ShapePatch::default()
            },
        )
        .unwrap();

    assert!(store.delete_shape(a.id()));
    assert!(store.get_shape(a.id()).is_err());

    store.undo().unwrap();
    assert_eq!(store.get_shape(a.id()).unwrap(), &updated);

    store.redo().unwrap();
    assert!(store.get_shape(a.id()).is_err());
}

#[test]
fn update_ignores_fields_of_other_variants() {
    let mut store = store();
    let line = store
        .add_new_shape(&ShapeInput {
            end_x: 10.0,
            end_y: 20.0,
            ..ShapeInput::of_kind("LINE")
        })
        .unwrap();

    let updated = store
        .update_shape(
            line.id(),
            &ShapePatch {
                radius: Some(9.0),
                end_y: Some(25.0),
                ..ShapePatch::default()
            },
        )
        .unwrap();

    assert_eq!(
        updated.kind,
        ShapeKind::Line {
            end_x: 10.0,
            end_y: 25.0,
        }
    );
}

#[test]
fn delete_all_on_empty_registry_is_still_undoable() {
    let mut store = store();
    store.delete_all();
    assert_eq!(store.undo_depth(), 1);
    assert!(store.undo().unwrap().is_empty());
}

#[test]
fn replace_all_clears_history() {
    let mut store = store();
    let a = store.add_new_shape(&circle(1.0)).unwrap();
    store.add_new_shape(&circle(2.0)).unwrap();
    store.undo().unwrap();

    let mut replacement = sketchpad_core::ShapeMap::new();
    replacement.insert(a.id(), a.clone());
    store.replace_all(replacement);

    assert!(!store.can_undo());
    assert!(!store.can_redo());
    assert_eq!(store.get_all().len(), 1);
}

#[test]
fn update_leaves_corner_radius_untouched() {
    let mut store = store();
    let square = store
        .add_new_shape(&ShapeInput {
            length: 10.0,
            corner_radius: 1.0,
            ..ShapeInput::of_kind("square")
        })
        .unwrap();

    let patch: ShapePatch =
        serde_json::from_str(r#"{"cornerRadius": 7.0, "length": 12.0}"#).unwrap();
    let updated = store.update_shape(square.id(), &patch).unwrap();

    assert_eq!(
        updated.kind,
        ShapeKind::Square {
            length: 12.0,
            corner_radius: 1.0,
        }
    );
}
