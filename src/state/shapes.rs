//! Mode switches and the gestures that create new objects.
use egui::Pos2;
use log::{debug, trace};

use super::context::{Change, EditorContext};
use crate::document::{Document, EditState, ObjectType, PathPoint, Position, SvgObject, factory};
use crate::error::{EditError, EditResult};

/// Commits a finished object to the selected layer.
///
/// Without a selected layer the gesture still ends, but nothing is added or recorded.
fn commit_new_object(document: &mut Document, object: SvgObject) -> Change {
    match document.add_object_to_selected_layer(object) {
        Ok(id) => {
            debug!("Added {} to the selected layer", id);
            Change::Undoable
        }
        Err(err) => {
            trace!("Dropped finished object: {}", err);
            Change::Transient
        }
    }
}

/// Ends the polygon gesture: drops the live point, re-centers and commits.
///
/// A polygon left with fewer than two vertices is discarded.
fn finish_polygon(document: &mut Document, operation: &'static str) -> EditResult<Change> {
    let mut polygon = document
        .edit_state
        .polygon_in_progress()
        .cloned()
        .ok_or(EditError::MissingEditBuffer { operation })?;
    document.edit_state = EditState::AddPolygon;

    let points = polygon.polygon_mut()?;
    points.pop();
    if points.len() < 2 {
        trace!("Discarding polygon with {} points", points.len());
        return Ok(Change::Transient);
    }

    polygon.normalize_polygon();
    Ok(commit_new_object(document, polygon))
}

impl EditorContext {
    pub fn switch_to_select_object_edit_mode(&mut self) {
        self.switch_mode("switch_to_select_object_edit_mode", EditState::SelectObj);
    }

    pub fn switch_to_add_rect_edit_mode(&mut self) {
        self.switch_mode("switch_to_add_rect_edit_mode", EditState::AddRect);
    }

    pub fn switch_to_add_text_edit_mode(&mut self) {
        self.switch_mode("switch_to_add_text_edit_mode", EditState::AddText);
    }

    pub fn switch_to_add_polygon_edit_mode(&mut self) {
        self.switch_mode("switch_to_add_polygon_edit_mode", EditState::AddPolygon);
    }

    pub fn switch_to_add_curve_polygon_edit_mode(&mut self) {
        self.switch_mode("switch_to_add_curve_polygon_edit_mode", EditState::AddCurveToPolygon);
    }

    /// First click of a rectangle: a zero-sized rect anchored at `point`.
    pub fn start_add_rect(&mut self, point: Pos2) {
        self.apply("start_add_rect", |document, config| {
            let mut rect = factory::empty_object(ObjectType::Rect, config);
            rect.position = Position::at(point);
            document.edit_state = EditState::AddRectFirstPointAdded { rect };
            Ok(Change::Transient)
        });
    }

    /// Pointer moved while drawing a rectangle
    pub fn continue_add_rect(&mut self, point: Pos2) {
        self.apply("continue_add_rect", |document, _| {
            let mut rect = document
                .edit_state
                .rect_in_progress()
                .cloned()
                .ok_or(EditError::MissingEditBuffer {
                    operation: "continue_add_rect",
                })?;
            rect.position.stretch_to(point);
            document.edit_state = EditState::AddRectSecondPointAdded { rect };
            Ok(Change::Transient)
        });
    }

    /// Release: size the rectangle one last time and commit it.
    pub fn finish_add_rect(&mut self, point: Pos2) {
        self.apply("finish_add_rect", |document, _| {
            let mut rect = document
                .edit_state
                .rect_in_progress()
                .cloned()
                .ok_or(EditError::MissingEditBuffer {
                    operation: "finish_add_rect",
                })?;
            rect.position.stretch_to(point);
            document.edit_state = EditState::AddRect;
            Ok(commit_new_object(document, rect))
        });
    }

    /// Single click in text mode: a fixed-size text box centered at `point`.
    pub fn add_new_text_to_position(&mut self, point: Pos2) {
        self.apply("add_new_text_to_position", |document, config| {
            let mut text = factory::empty_object(ObjectType::Text, config);
            text.position = Position::at(point);
            text.position.set_size(config.text_size);
            document.add_object_to_selected_layer(text)?;
            Ok(Change::Undoable)
        });
    }

    /// First click of a polygon
    pub fn start_add_polygon(&mut self, point: Pos2) {
        self.apply("start_add_polygon", |document, config| {
            let polygon = factory::polygon_seed(point, config);
            document.edit_state = EditState::AddPolygonFirstTwoPointsAdded { polygon };
            Ok(Change::Transient)
        });
    }

    /// Pointer moved: the live point follows it without adding a vertex.
    pub fn change_position_for_last_polygon_point(&mut self, point: Pos2) {
        self.apply("change_position_for_last_polygon_point", |document, _| {
            let polygon = document
                .edit_state
                .polygon_in_progress_mut()
                .ok_or(EditError::MissingEditBuffer {
                    operation: "change_position_for_last_polygon_point",
                })?;
            let local = polygon.position.to_local(point);
            if let Some(last) = polygon.polygon_mut()?.last_mut() {
                *last = PathPoint::line_to(local);
            }
            Ok(Change::Transient)
        });
    }

    /// Click while drawing a polygon.
    ///
    /// A click within [`close_path_threshold`](crate::config::EditorConfig::close_path_threshold)
    /// of the anchor closes the polygon; anywhere else adds a vertex.
    pub fn continue_add_polygon(&mut self, point: Pos2) {
        self.apply("continue_add_polygon", |document, config| {
            let mut polygon = document
                .edit_state
                .polygon_in_progress()
                .cloned()
                .ok_or(EditError::MissingEditBuffer {
                    operation: "continue_add_polygon",
                })?;

            let local = polygon.position.to_local(point);
            if local.x.abs() + local.y.abs() < config.close_path_threshold {
                return finish_polygon(document, "continue_add_polygon");
            }

            polygon.polygon_mut()?.push(PathPoint::line_to(local));
            document.edit_state = EditState::AddPolygonNextPointAdded { polygon };
            Ok(Change::Transient)
        });
    }

    /// Close the polygon being drawn and commit it
    pub fn finish_add_polygon(&mut self) {
        self.apply("finish_add_polygon", |document, _| {
            finish_polygon(document, "finish_add_polygon")
        });
    }
}
