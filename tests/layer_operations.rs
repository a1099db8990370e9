use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use egui::pos2;
use svg_state_machine::{EditorContext, EditorEvent, ObjectPatch, ObjectType, PositionPatch};

// Seed layer holding one rect, plus an empty Layer2
fn create_test_editor() -> EditorContext {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut editor = EditorContext::default();
    editor.add_new_object_to_layer(
        ObjectType::Rect,
        ObjectPatch::position(PositionPatch::anchor(pos2(5.0, 5.0))),
    );
    editor.add_new_layer();
    editor
}

fn layer_names(editor: &EditorContext) -> Vec<String> {
    editor.document().layers.iter().map(|layer| layer.name.clone()).collect()
}

fn count_events(editor: &EditorContext) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    editor.subscribe(Box::new(move |_: &EditorEvent| sink.set(sink.get() + 1)));
    count
}

#[test]
fn test_add_new_layer_names() {
    let mut editor = create_test_editor();
    editor.add_new_layer();
    assert_eq!(layer_names(&editor), vec!["Layer1", "Layer2", "Layer3"]);

    let added = &editor.document().layers[2];
    assert!(added.visible);
    assert!(!added.selected);
    assert!(added.object_ids.is_empty());
}

#[test]
fn test_add_new_layer_skips_taken_name() {
    let mut editor = create_test_editor();
    editor.select_layer("Layer1");
    editor.delete_selected_layer();
    // one layer left, named Layer2
    editor.add_new_layer();
    assert_eq!(layer_names(&editor), vec!["Layer2", "Layer3"]);
}

#[test]
fn test_select_layer_is_exclusive() {
    let mut editor = create_test_editor();
    editor.select_object_in_selected_layer("Layer1", "rect0");

    editor.select_layer("Layer2");
    let document = editor.document();
    assert!(!document.layers[0].selected);
    assert!(document.layers[1].selected);
    assert!(document.selected_object_id.is_none());
    document.validate().unwrap();
}

#[test]
fn test_missing_layer_is_a_silent_no_op() {
    let mut editor = create_test_editor();
    let events = count_events(&editor);
    let before = editor.get_image();
    let history = editor.history().len();

    editor.select_layer("Nope");
    editor.change_layer_visibility("Nope");
    editor.pre_select_layer("Nope");
    editor.un_pre_select_layer("Nope");
    editor.apply_mask_to_layer("Nope");
    editor.remove_mask_from_layer("Nope");

    assert!(Arc::ptr_eq(&before, &editor.get_image()));
    assert_eq!(events.get(), 0);
    assert_eq!(editor.history().len(), history);
}

#[test]
fn test_visibility_toggle_is_recorded() {
    let mut editor = create_test_editor();
    editor.select_object_in_selected_layer("Layer1", "rect0");
    let history = editor.history().len();

    editor.change_layer_visibility("Layer1");
    assert!(!editor.document().layers[0].visible);
    assert!(editor.document().selected_object_id.is_none());
    editor.change_layer_visibility("Layer1");
    assert!(editor.document().layers[0].visible);

    assert_eq!(editor.history().len(), history + 2);
}

#[test]
fn test_pre_select_is_transient() {
    let mut editor = create_test_editor();
    let history = editor.history().len();
    let events = count_events(&editor);

    editor.pre_select_layer("Layer1");
    editor.pre_select_layer("Layer2");
    let document = editor.document();
    assert!(!document.layers[0].pre_selected);
    assert!(document.layers[1].pre_selected);

    editor.un_pre_select_layer("Layer2");
    assert!(editor.document().layers.iter().all(|layer| !layer.pre_selected));

    assert_eq!(events.get(), 3);
    assert_eq!(editor.history().len(), history);
}

#[test]
fn test_move_selected_layer_boundaries() {
    let mut editor = create_test_editor();

    // Layer1 is first and selected
    let before = editor.get_image();
    editor.move_up_selected_layer();
    assert!(Arc::ptr_eq(&before, &editor.get_image()));

    editor.move_down_selected_layer();
    assert_eq!(layer_names(&editor), vec!["Layer2", "Layer1"]);

    let before = editor.get_image();
    editor.move_down_selected_layer();
    assert!(Arc::ptr_eq(&before, &editor.get_image()));

    editor.move_up_selected_layer();
    assert_eq!(layer_names(&editor), vec!["Layer1", "Layer2"]);
}

#[test]
fn test_delete_selected_layer() {
    let mut editor = create_test_editor();
    editor.delete_selected_layer();
    assert_eq!(layer_names(&editor), vec!["Layer2"]);
    // objects stay in the pool
    assert_eq!(editor.document().objects.len(), 1);

    // no layer is selected now
    let before = editor.get_image();
    editor.delete_selected_layer();
    editor.move_up_selected_layer();
    assert!(Arc::ptr_eq(&before, &editor.get_image()));
}

#[test]
fn test_mask_lifecycle() {
    let mut editor = create_test_editor();
    editor.create_mask_from_selected_layer();

    let document = editor.get_image();
    assert_eq!(layer_names(&editor), vec!["Layer1", "Layer2", "Layer1Mask"]);
    let mask = document.layer("Layer1Mask").unwrap();
    assert!(mask.mask);
    assert!(!mask.selected);
    assert_eq!(mask.object_ids, vec!["rect0"]);

    // the selected layer is not a mask
    editor.apply_mask_to_layer("Layer2");
    assert!(Arc::ptr_eq(&document, &editor.get_image()));

    editor.select_layer("Layer1Mask");
    editor.apply_mask_to_layer("Layer2");
    assert_eq!(
        editor.document().layer("Layer2").unwrap().mask_added.as_deref(),
        Some("Layer1Mask")
    );
    editor.apply_mask_to_layer("Layer1");

    editor.remove_mask_from_layer("Layer1");
    assert!(editor.document().layer("Layer1").unwrap().mask_added.is_none());

    // deleting the mask detaches it everywhere
    editor.delete_selected_layer();
    let document = editor.document();
    assert_eq!(layer_names(&editor), vec!["Layer1", "Layer2"]);
    assert!(document.layers.iter().all(|layer| layer.mask_added.is_none()));
    document.validate().unwrap();
}

#[test]
fn test_recreating_mask_replaces_it() {
    let mut editor = create_test_editor();
    editor.create_mask_from_selected_layer();
    editor.add_new_object_to_layer(ObjectType::Text, ObjectPatch::default());
    editor.create_mask_from_selected_layer();

    let document = editor.document();
    assert_eq!(document.layers.len(), 3);
    assert_eq!(document.layer("Layer1Mask").unwrap().object_ids, vec!["rect0", "text1"]);
}
