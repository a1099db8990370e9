use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use egui::pos2;
use svg_state_machine::{
    EditMode, EditorContext, EditorEvent, ObjectPatch, ObjectType, PathPoint, PositionPatch,
};

// Editor with a rect and a text in the seed layer
fn create_test_editor() -> EditorContext {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut editor = EditorContext::default();
    editor.add_new_object_to_layer(
        ObjectType::Rect,
        ObjectPatch::position(PositionPatch {
            width: Some(30.0),
            height: Some(40.0),
            ..PositionPatch::anchor(pos2(10.0, 20.0))
        }),
    );
    editor.add_new_object_to_layer(ObjectType::Text, ObjectPatch::text("hello"));
    editor
}

#[test]
fn test_add_new_object_merges_attributes() {
    let editor = create_test_editor();

    let rect = editor.get_object_by_id("rect0").unwrap();
    assert_eq!(rect.position.x, 10.0);
    assert_eq!(rect.position.height, 40.0);
    assert_eq!(rect.position.scale, 1.0);

    let text = editor.get_object_by_id("text1").unwrap();
    assert_eq!(text.text(), Some("hello"));
    assert_eq!(text.position.width, 100.0);

    assert_eq!(editor.document().layers[0].object_ids, vec!["rect0", "text1"]);
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn test_add_polygon_with_outline() {
    let mut editor = create_test_editor();
    let outline = vec![
        PathPoint::move_to(pos2(0.0, 0.0)),
        PathPoint::line_to(pos2(4.0, 0.0)),
        PathPoint::line_to(pos2(4.0, 4.0)),
    ];
    editor.add_new_object_to_layer(ObjectType::Polygon, ObjectPatch::polygon(outline.clone()));
    assert_eq!(editor.get_object_by_id("polygon2").unwrap().polygon(), Some(&outline[..]));

    // an outline without a leading move-to is rejected
    let before = editor.get_image();
    editor.add_new_object_to_layer(
        ObjectType::Polygon,
        ObjectPatch::polygon(vec![PathPoint::line_to(pos2(0.0, 0.0)), PathPoint::line_to(pos2(1.0, 1.0))]),
    );
    assert!(Arc::ptr_eq(&before, &editor.get_image()));
}

#[test]
fn test_update_attributes_keeps_missing_fields() {
    let mut editor = create_test_editor();
    editor.update_object_attributes("Layer1", "text1", ObjectPatch::text("bye"));

    let text = editor.get_object_by_id("text1").unwrap();
    assert_eq!(text.text(), Some("bye"));
    assert_eq!(text.position.width, 100.0);
}

#[test]
fn test_update_attributes_rejects_wrong_payload() {
    let mut editor = create_test_editor();
    let before = editor.get_image();

    editor.update_object_attributes("Layer1", "rect0", ObjectPatch::text("nope"));
    editor.update_object_attributes("Layer9", "text1", ObjectPatch::text("nope"));
    editor.update_object_attributes("Layer1", "rect7", ObjectPatch::text("nope"));

    assert!(Arc::ptr_eq(&before, &editor.get_image()));
}

#[test]
fn test_change_position_wrappers() {
    let mut editor = create_test_editor();
    editor.scale_object("Layer1", "rect0", 2.0);
    editor.rotate_object("Layer1", "rect0", 45.0);
    editor.move_object("Layer1", "rect0", pos2(1.0, 2.0));

    let position = editor.get_object_by_id("rect0").unwrap().position;
    assert_eq!(position.scale, 2.0);
    assert_eq!(position.rotation, 45.0);
    assert_eq!((position.x, position.y), (1.0, 2.0));
    assert_eq!(position.width, 30.0);
    assert_eq!(editor.history().len(), 6);
}

#[test]
fn test_select_requires_selected_layer_membership() {
    let mut editor = create_test_editor();
    editor.add_new_layer();
    let before = editor.get_image();

    editor.select_object_in_selected_layer("Layer2", "rect0");
    editor.select_object_in_selected_layer("Layer1", "rect9");
    assert!(Arc::ptr_eq(&before, &editor.get_image()));

    editor.select_object_in_selected_layer("Layer1", "rect0");
    assert_eq!(editor.get_selected_object().unwrap().id, "rect0");
    assert_eq!(editor.document().edit_mode(), EditMode::SelectObj);
}

#[test]
fn test_remove_selected_object_orphans_it() {
    let mut editor = create_test_editor();
    editor.select_object_in_selected_layer("Layer1", "rect0");
    editor.remove_selected_object();

    let document = editor.document();
    assert_eq!(document.layers[0].object_ids, vec!["text1"]);
    assert!(document.selected_object_id.is_none());
    assert!(document.object("rect0").is_some());
    document.validate().unwrap();

    // nothing selected anymore
    let before = editor.get_image();
    editor.remove_selected_object();
    assert!(Arc::ptr_eq(&before, &editor.get_image()));
}

#[test]
fn test_move_gesture_tracks_pool_copy() {
    let mut editor = create_test_editor();
    editor.select_object_in_selected_layer("Layer1", "rect0");
    let history_before = editor.history().len();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    editor.subscribe(Box::new(move |event: &EditorEvent| {
        if let EditorEvent::DocumentChanged { operation, recorded, .. } = event {
            sink.borrow_mut().push((*operation, *recorded));
        }
    }));

    editor.start_selected_object_move(pos2(0.0, 0.0));
    assert_eq!(editor.document().edit_mode(), EditMode::SelectedObjMove);

    editor.continue_selected_object_move(pos2(5.0, 5.0));
    assert_eq!(editor.get_object_by_id("rect0").unwrap().position.x, 15.0);
    editor.continue_selected_object_move(pos2(10.0, 0.0));
    editor.finish_selected_object_move();

    let rect = editor.get_selected_object().unwrap();
    assert_eq!((rect.position.x, rect.position.y), (20.0, 20.0));
    assert_eq!(editor.document().edit_mode(), EditMode::SelectObj);
    assert_eq!(editor.history().len(), history_before + 1);

    assert_eq!(
        *events.borrow(),
        vec![
            ("start_selected_object_move", false),
            ("continue_selected_object_move", false),
            ("continue_selected_object_move", false),
            ("finish_selected_object_move", true),
        ]
    );
}

#[test]
fn test_move_without_selection_is_ignored() {
    let mut editor = create_test_editor();
    let before = editor.get_image();

    editor.start_selected_object_move(pos2(0.0, 0.0));
    editor.continue_selected_object_move(pos2(5.0, 5.0));
    editor.finish_selected_object_move();

    assert!(Arc::ptr_eq(&before, &editor.get_image()));
}
