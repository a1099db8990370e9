use std::fmt;

use egui::{Pos2, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};

use super::path::{self, CurveHandle, PathPoint};
use crate::error::{EditError, EditResult};

/// The local transform of an object.
///
/// `(x, y)` is the anchor: the object's own bounding-box center in layer coordinates.
/// Scale and rotation pivot around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    /// Rotation in degrees
    pub rotation: f32,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Position {
    /// Unscaled, unrotated, zero-sized position at `anchor`
    pub fn at(anchor: Pos2) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            ..Self::default()
        }
    }

    pub fn anchor(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.width = size.x;
        self.height = size.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Sizes the box to the absolute distance between the anchor and `corner`.
    pub fn stretch_to(&mut self, corner: Pos2) {
        self.width = (self.x - corner.x).abs();
        self.height = (self.y - corner.y).abs();
    }

    /// Converts a layer-space point into this object's local, unscaled space.
    pub fn to_local(&self, point: Pos2) -> Pos2 {
        (point - self.anchor()).to_pos2()
    }

    /// Overwrites the fields present in `patch`
    pub fn apply(&mut self, patch: &PositionPatch) {
        let PositionPatch {
            x,
            y,
            width,
            height,
            scale,
            rotation,
        } = *patch;
        let fields = [
            (&mut self.x, x),
            (&mut self.y, y),
            (&mut self.width, width),
            (&mut self.height, height),
            (&mut self.scale, scale),
            (&mut self.rotation, rotation),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

/// A partial [`Position`]: only the `Some` fields are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
}

impl PositionPatch {
    pub fn anchor(anchor: Pos2) -> Self {
        Self {
            x: Some(anchor.x),
            y: Some(anchor.y),
            ..Self::default()
        }
    }

    pub fn size(size: Vec2) -> Self {
        Self {
            width: Some(size.x),
            height: Some(size.y),
            ..Self::default()
        }
    }

    pub fn scale(scale: f32) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn rotation(rotation: f32) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }
}

/// Discriminant of [`Shape`], also the prefix of generated object ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Rect,
    Text,
    Polygon,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Text => "text",
            Self::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload of an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rect,
    Text { text: String },
    Polygon { polygon: Vec<PathPoint> },
}

/// A drawable object in the document's object pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgObject {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    #[serde(flatten)]
    pub shape: Shape,
}

/// A partial object update: only the `Some` fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionPatch>,
    /// Only valid for text objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Only valid for polygons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<PathPoint>>,
}

impl ObjectPatch {
    pub fn position(position: PositionPatch) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn polygon(polygon: Vec<PathPoint>) -> Self {
        Self {
            polygon: Some(polygon),
            ..Self::default()
        }
    }
}

impl SvgObject {
    pub fn new(id: impl Into<String>, position: Position, shape: Shape) -> Self {
        Self {
            id: id.into(),
            position,
            shape,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self.shape {
            Shape::Rect => ObjectType::Rect,
            Shape::Text { .. } => ObjectType::Text,
            Shape::Polygon { .. } => ObjectType::Polygon,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Outline points, `None` unless this is a polygon
    pub fn polygon(&self) -> Option<&[PathPoint]> {
        match &self.shape {
            Shape::Polygon { polygon } => Some(polygon),
            _ => None,
        }
    }

    pub fn polygon_mut(&mut self) -> EditResult<&mut Vec<PathPoint>> {
        match &mut self.shape {
            Shape::Polygon { polygon } => Ok(polygon),
            _ => Err(EditError::NotAPolygon(self.id.clone())),
        }
    }

    /// A single outline point, checking both the shape and the index.
    pub fn point(&self, index: usize) -> EditResult<&PathPoint> {
        let polygon = self
            .polygon()
            .ok_or_else(|| EditError::NotAPolygon(self.id.clone()))?;
        polygon.get(index).ok_or_else(|| EditError::PointOutOfRange {
            id: self.id.clone(),
            index,
        })
    }

    /// Merges `patch` into this object.
    ///
    /// The patch is rejected as a whole if it carries a payload of another shape or an
    /// invalid outline.
    pub fn apply_patch(&mut self, patch: &ObjectPatch) -> EditResult<()> {
        let mismatch = || EditError::AttributeMismatch {
            id: self.id.clone(),
            kind: self.object_type(),
        };
        if patch.text.is_some() && !matches!(self.shape, Shape::Text { .. }) {
            return Err(mismatch());
        }
        if let Some(points) = &patch.polygon {
            if !matches!(self.shape, Shape::Polygon { .. }) {
                return Err(mismatch());
            }
            path::check_outline(&self.id, points)?;
        }

        if let Some(position) = &patch.position {
            self.position.apply(position);
        }
        match (&mut self.shape, &patch.text, &patch.polygon) {
            (Shape::Text { text }, Some(new_text), _) => text.clone_from(new_text),
            (Shape::Polygon { polygon }, _, Some(points)) => polygon.clone_from(points),
            _ => {}
        }
        Ok(())
    }

    /// Moves one handle of one outline point by `delta` (local units).
    pub fn nudge_point(&mut self, index: usize, handle: CurveHandle, delta: Vec2) -> EditResult<()> {
        let id = self.id.clone();
        let point = self
            .polygon_mut()?
            .get_mut(index)
            .ok_or_else(|| EditError::PointOutOfRange { id: id.clone(), index })?;
        if point.move_handle(handle, delta) {
            Ok(())
        } else {
            Err(EditError::NotACurve { id, index })
        }
    }

    /// Re-centers a polygon on its endpoint bounding box.
    ///
    /// Width and height become the bounds' extents and the anchor moves to the bounds' center
    /// while all points move the opposite way, so nothing moves on screen. Running it twice
    /// is the same as running it once. Non-polygons are left untouched.
    pub fn normalize_polygon(&mut self) {
        let Shape::Polygon { polygon } = &mut self.shape else {
            return;
        };
        if let Some((center, size)) = path::recenter(polygon) {
            if (size - self.position.size()).abs().max_elem() > path::RECENTER_EPSILON {
                self.position.set_size(size);
            }
            self.position.translate(center);
        }
    }

    /// Turns the segment ending at `index` into a cubic Bézier that still traces the
    /// straight segment, returning the index of the new curve point.
    ///
    /// Converting the first point converts the closing segment instead: a copy of the
    /// first point is appended as the new last point and that copy becomes the curve.
    pub fn convert_segment_to_curve(&mut self, index: usize) -> EditResult<usize> {
        let id = self.id.clone();
        let points = self.polygon_mut()?;
        let point = *points.get(index).ok_or_else(|| EditError::PointOutOfRange {
            id: id.clone(),
            index,
        })?;

        let target = match point {
            PathPoint::CurveTo { .. } => return Err(EditError::AlreadyCurve { id, index }),
            PathPoint::MoveTo { .. } => {
                let closing = points.last().map(PathPoint::pos);
                if closing == Some(point.pos()) {
                    return Err(EditError::CurveAlreadyPrepared { id });
                }
                points.push(PathPoint::line_to(point.pos()));
                points.len() - 1
            }
            PathPoint::LineTo { .. } => index,
        };

        let previous = target
            .checked_sub(1)
            .map(|i| points[i].pos())
            .ok_or(EditError::PointOutOfRange { id, index })?;
        let end = points[target].pos();
        let (control1, control2) = path::curve_controls(previous, end);
        points[target] = PathPoint::curve_to(end, control1, control2);
        Ok(target)
    }
}
