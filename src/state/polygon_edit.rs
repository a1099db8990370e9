//! Dragging outline points and control handles of committed polygons.
use egui::Pos2;

use super::context::{Change, EditorContext};
use crate::document::{CurveHandle, Document, EditMode, EditState, PointDrag};
use crate::error::{EditError, EditResult};

/// Builds the drag state for one handle of one point, checking that the handle exists.
fn begin_drag(
    document: &Document,
    screen: Pos2,
    object_id: &str,
    point_index: usize,
    handle: CurveHandle,
) -> EditResult<PointDrag> {
    let index = document.object_index(object_id)?;
    let object = document.objects[index].clone();
    if object.point(point_index)?.handle(handle).is_none() {
        return Err(EditError::NotACurve {
            id: object.id,
            index: point_index,
        });
    }
    Ok(PointDrag {
        object,
        point_index,
        handle,
        last_screen_pos: screen,
    })
}

fn drag_to(document: &mut Document, mode: EditMode, screen: Pos2, operation: &'static str) -> EditResult<Change> {
    let drag = document
        .edit_state
        .point_drag_mut(mode)
        .ok_or(EditError::MissingEditBuffer { operation })?;
    let delta = screen - drag.last_screen_pos;
    drag.object.nudge_point(drag.point_index, drag.handle, delta)?;
    drag.last_screen_pos = screen;
    Ok(Change::Transient)
}

/// Re-centers the dragged polygon and writes it back over its pool entry.
fn finish_drag(document: &mut Document, mode: EditMode, operation: &'static str) -> EditResult<Change> {
    let mut object = document
        .edit_state
        .point_drag(mode)
        .map(|drag| drag.object.clone())
        .ok_or(EditError::MissingEditBuffer { operation })?;
    object.normalize_polygon();
    let unchanged = document.object(&object.id) == Some(&object);
    document.replace_object(object)?;
    document.edit_state = EditState::SelectObj;
    if unchanged {
        Ok(Change::Transient)
    } else {
        Ok(Change::Undoable)
    }
}

impl EditorContext {
    /// Grab the endpoint `point_index` of polygon `object_id`.
    pub fn switch_to_edit_polygon_edit_mode(&mut self, screen: Pos2, object_id: &str, point_index: usize) {
        self.apply("switch_to_edit_polygon_edit_mode", |document, _| {
            let edit = begin_drag(document, screen, object_id, point_index, CurveHandle::Endpoint)?;
            document.edit_state = EditState::EditPolygonPoint { edit };
            Ok(Change::Transient)
        });
    }

    pub fn move_point_polygon_edit_mode(&mut self, screen: Pos2) {
        self.apply("move_point_polygon_edit_mode", |document, _| {
            drag_to(document, EditMode::EditPolygonPoint, screen, "move_point_polygon_edit_mode")
        });
    }

    pub fn finish_edit_point_polygon_edit_mode(&mut self) {
        self.apply("finish_edit_point_polygon_edit_mode", |document, _| {
            finish_drag(document, EditMode::EditPolygonPoint, "finish_edit_point_polygon_edit_mode")
        });
    }

    /// Grab a control handle of the curve point `point_index`.
    ///
    /// Fails on anything but a curve point, or when `handle` is the endpoint.
    pub fn switch_to_edit_curve_polygon_edit_mode(
        &mut self,
        screen: Pos2,
        object_id: &str,
        point_index: usize,
        handle: CurveHandle,
    ) {
        self.apply("switch_to_edit_curve_polygon_edit_mode", |document, _| {
            if handle == CurveHandle::Endpoint {
                return Err(EditError::NotACurve {
                    id: object_id.to_string(),
                    index: point_index,
                });
            }
            let edit = begin_drag(document, screen, object_id, point_index, handle)?;
            document.edit_state = EditState::EditPolygonCurvePoint { edit };
            Ok(Change::Transient)
        });
    }

    pub fn move_curve_point_polygon_edit_mode(&mut self, screen: Pos2) {
        self.apply("move_curve_point_polygon_edit_mode", |document, _| {
            drag_to(
                document,
                EditMode::EditPolygonCurvePoint,
                screen,
                "move_curve_point_polygon_edit_mode",
            )
        });
    }

    pub fn finish_edit_curve_point_polygon_edit_mode(&mut self) {
        self.apply("finish_edit_curve_point_polygon_edit_mode", |document, _| {
            finish_drag(
                document,
                EditMode::EditPolygonCurvePoint,
                "finish_edit_curve_point_polygon_edit_mode",
            )
        });
    }

    /// Turn the segment ending at `point_index` into a curve.
    ///
    /// Only acts in add-curve mode; returns to the resting mode afterwards.
    pub fn add_curve_to_polygon(&mut self, object_id: &str, point_index: usize) {
        self.apply("add_curve_to_polygon", |document, _| {
            if document.edit_mode() != EditMode::AddCurveToPolygon {
                return Err(EditError::MissingEditBuffer {
                    operation: "add_curve_to_polygon",
                });
            }
            let index = document.object_index(object_id)?;
            document.objects[index].convert_segment_to_curve(point_index)?;
            document.edit_state = EditState::SelectObj;
            Ok(Change::Undoable)
        });
    }
}
