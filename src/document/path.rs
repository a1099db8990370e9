use egui::{Pos2, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A single command of a polygon outline.
///
/// Coordinates are local to the owning object, relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum PathPoint {
    /// Start of the outline; only ever the first point
    #[serde(rename = "M")]
    MoveTo { x: f32, y: f32 },
    /// Straight segment ending at `(x, y)`
    #[serde(rename = "L")]
    LineTo { x: f32, y: f32 },
    /// Cubic Bézier ending at `(x, y)` with control points `(x1, y1)` and `(x2, y2)`
    #[serde(rename = "C")]
    CurveTo {
        x: f32,
        y: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

/// Which part of a path point a drag gesture moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveHandle {
    /// The point itself
    Endpoint,
    /// First control point of a curve (`x1`, `y1`)
    Control1,
    /// Second control point of a curve (`x2`, `y2`)
    Control2,
}

impl CurveHandle {
    /// Maps the 1-based control point number used by the control handles.
    pub fn from_curve_point_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Control1),
            2 => Some(Self::Control2),
            _ => None,
        }
    }
}

impl PathPoint {
    pub fn move_to(pos: Pos2) -> Self {
        Self::MoveTo { x: pos.x, y: pos.y }
    }

    pub fn line_to(pos: Pos2) -> Self {
        Self::LineTo { x: pos.x, y: pos.y }
    }

    pub fn curve_to(pos: Pos2, control1: Pos2, control2: Pos2) -> Self {
        Self::CurveTo {
            x: pos.x,
            y: pos.y,
            x1: control1.x,
            y1: control1.y,
            x2: control2.x,
            y2: control2.y,
        }
    }

    /// SVG path command letter
    pub fn command(&self) -> char {
        match self {
            Self::MoveTo { .. } => 'M',
            Self::LineTo { .. } => 'L',
            Self::CurveTo { .. } => 'C',
        }
    }

    pub fn is_curve(&self) -> bool {
        matches!(self, Self::CurveTo { .. })
    }

    /// The endpoint of this command
    pub fn pos(&self) -> Pos2 {
        match *self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } | Self::CurveTo { x, y, .. } => pos2(x, y),
        }
    }

    /// Position of the given handle, `None` if this point has no such handle.
    pub fn handle(&self, handle: CurveHandle) -> Option<Pos2> {
        match (handle, *self) {
            (CurveHandle::Endpoint, _) => Some(self.pos()),
            (CurveHandle::Control1, Self::CurveTo { x1, y1, .. }) => Some(pos2(x1, y1)),
            (CurveHandle::Control2, Self::CurveTo { x2, y2, .. }) => Some(pos2(x2, y2)),
            _ => None,
        }
    }

    /// Moves a single handle by `delta`. Returns `false` if the handle does not exist.
    pub fn move_handle(&mut self, handle: CurveHandle, delta: Vec2) -> bool {
        match (handle, self) {
            (CurveHandle::Endpoint, Self::MoveTo { x, y })
            | (CurveHandle::Endpoint, Self::LineTo { x, y })
            | (CurveHandle::Endpoint, Self::CurveTo { x, y, .. })
            | (CurveHandle::Control1, Self::CurveTo { x1: x, y1: y, .. })
            | (CurveHandle::Control2, Self::CurveTo { x2: x, y2: y, .. }) => {
                *x += delta.x;
                *y += delta.y;
                true
            }
            _ => false,
        }
    }

    /// Moves the endpoint and, for curves, both control points.
    pub fn translate(&mut self, delta: Vec2) {
        self.move_handle(CurveHandle::Endpoint, delta);
        if self.is_curve() {
            self.move_handle(CurveHandle::Control1, delta);
            self.move_handle(CurveHandle::Control2, delta);
        }
    }
}

/// Axis-aligned bounds of the endpoints. Control points are ignored.
///
/// Returns `Rect::NOTHING` for an empty slice.
pub fn endpoint_bounds(points: &[PathPoint]) -> Rect {
    let mut bounds = Rect::NOTHING;
    for point in points {
        bounds.extend_with(point.pos());
    }
    bounds
}

/// Offsets and extents closer than this (in local units) count as equal when re-centering.
pub const RECENTER_EPSILON: f32 = 1e-3;

/// Moves the local origin to the center of the endpoint bounds.
///
/// Every point (control points included) is shifted by the negated center, so the outline
/// keeps its place relative to the parent once the anchor is moved by the returned vector.
/// An outline already centered within [`RECENTER_EPSILON`] is left as is and the returned
/// center is zero.
/// Returns `(center, size)` of the bounds, or `None` for an empty outline.
pub fn recenter(points: &mut [PathPoint]) -> Option<(Vec2, Vec2)> {
    if points.is_empty() {
        return None;
    }

    let bounds = endpoint_bounds(points);
    let center = bounds.center().to_vec2();
    if center.abs().max_elem() <= RECENTER_EPSILON {
        return Some((Vec2::ZERO, bounds.size()));
    }
    for point in points.iter_mut() {
        point.translate(-center);
    }
    Some((center, bounds.size()))
}

/// Control points that make a cubic Bézier from `from` to `to` trace the straight segment,
/// placed at 1/3 and 2/3 along the chord.
pub fn curve_controls(from: Pos2, to: Pos2) -> (Pos2, Pos2) {
    let chord = to - from;
    (to - chord * (2.0 / 3.0), to - chord * (1.0 / 3.0))
}

/// Checks the structural rules of an outline: at least two points, a move-to first and
/// nowhere else.
pub fn check_outline(id: &str, points: &[PathPoint]) -> Result<(), ModelError> {
    if points.len() < 2 {
        return Err(ModelError::PolygonTooShort {
            id: id.to_string(),
            count: points.len(),
        });
    }
    if !matches!(points[0], PathPoint::MoveTo { .. }) {
        return Err(ModelError::PolygonMissingMoveTo(id.to_string()));
    }
    if let Some(index) = points
        .iter()
        .skip(1)
        .position(|point| matches!(point, PathPoint::MoveTo { .. }))
    {
        return Err(ModelError::MisplacedMoveTo {
            id: id.to_string(),
            index: index + 1,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<PathPoint> {
        vec![
            PathPoint::move_to(pos2(0.0, 0.0)),
            PathPoint::line_to(pos2(10.0, 0.0)),
            PathPoint::line_to(pos2(10.0, 10.0)),
            PathPoint::line_to(pos2(0.0, 10.0)),
        ]
    }

    #[test]
    fn test_bounds_ignore_control_points() {
        let points = vec![
            PathPoint::move_to(pos2(0.0, 0.0)),
            PathPoint::curve_to(pos2(10.0, 0.0), pos2(-50.0, 80.0), pos2(60.0, -90.0)),
        ];
        let bounds = endpoint_bounds(&points);
        assert_eq!(bounds.min, pos2(0.0, 0.0));
        assert_eq!(bounds.max, pos2(10.0, 0.0));
    }

    #[test]
    fn test_recenter_square() {
        let mut points = square();
        let (center, size) = recenter(&mut points).unwrap();
        assert_eq!(center, Vec2::new(5.0, 5.0));
        assert_eq!(size, Vec2::new(10.0, 10.0));
        assert_eq!(points[0].pos(), pos2(-5.0, -5.0));
        assert_eq!(points[2].pos(), pos2(5.0, 5.0));
    }

    #[test]
    fn test_recenter_leaves_centered_outline() {
        let mut points = vec![
            PathPoint::move_to(pos2(-6.6349998, 1.54)),
            PathPoint::line_to(pos2(6.635, -1.5400001)),
        ];
        let before = points.clone();
        let (center, _) = recenter(&mut points).unwrap();
        assert_eq!(center, Vec2::ZERO);
        assert_eq!(points, before);
    }

    #[test]
    fn test_recenter_moves_control_points() {
        let mut points = vec![
            PathPoint::move_to(pos2(0.0, 0.0)),
            PathPoint::curve_to(pos2(20.0, 10.0), pos2(1.0, 2.0), pos2(3.0, 4.0)),
        ];
        recenter(&mut points).unwrap();
        assert_eq!(points[1].handle(CurveHandle::Control1), Some(pos2(-9.0, -3.0)));
        assert_eq!(points[1].handle(CurveHandle::Control2), Some(pos2(-7.0, -1.0)));
    }

    #[test]
    fn test_curve_controls_on_chord() {
        let (c1, c2) = curve_controls(pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((c1.x - 10.0 / 3.0).abs() < 1e-4);
        assert!((c2.x - 20.0 / 3.0).abs() < 1e-4);
        assert_eq!(c1.y, 0.0);
        assert_eq!(c2.y, 0.0);
    }

    #[test]
    fn test_move_handle_on_line_only_moves_endpoint() {
        let mut point = PathPoint::line_to(pos2(1.0, 1.0));
        assert!(point.move_handle(CurveHandle::Endpoint, Vec2::new(2.0, 3.0)));
        assert!(!point.move_handle(CurveHandle::Control1, Vec2::new(2.0, 3.0)));
        assert_eq!(point.pos(), pos2(3.0, 4.0));
    }

    #[test]
    fn test_check_outline() {
        assert!(check_outline("polygon0", &square()).is_ok());
        assert_eq!(
            check_outline("polygon0", &square()[..1]),
            Err(ModelError::PolygonTooShort {
                id: "polygon0".to_string(),
                count: 1
            })
        );
        let mut points = square();
        points.swap(0, 1);
        assert_eq!(
            check_outline("polygon0", &points),
            Err(ModelError::PolygonMissingMoveTo("polygon0".to_string()))
        );
    }

    #[test]
    fn test_point_serialization_uses_commands() {
        let json = serde_json::to_value(PathPoint::line_to(pos2(1.0, 2.0))).unwrap();
        assert_eq!(json["cmd"], "L");
        assert_eq!(json["x"], 1.0);
    }
}
