//! Edit modes of the gesture state machine.
//!
//! Resting modes carry no data. Every in-progress mode carries its edit buffer, so a
//! buffer exists exactly while a multi-step gesture is running:
//!
//! ```text
//! AddRect ──start──► AddRectFirstPointAdded ──continue──► AddRectSecondPointAdded
//!    ▲                         │                              │   ▲ continue
//!    └─────────finish──────────┴──────────────────────────────┘───┘
//!
//! AddPolygon ──start──► AddPolygonFirstTwoPointsAdded ──continue──► AddPolygonNextPointAdded
//!    ▲                            │                                   │   ▲ continue
//!    └──finish / close────────────┴───────────────────────────────────┘───┘
//!
//! SelectObj ──switch_to_edit_polygon──► EditPolygonPoint ──finish──► SelectObj
//! SelectObj ──switch_to_edit_curve────► EditPolygonCurvePoint ─finish─► SelectObj
//! SelectObj ──start_move──────────────► SelectedObjectMove ────finish──► SelectObj
//! AddCurveToPolygon ──add_curve_to_polygon──► SelectObj
//! ```
use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::object::SvgObject;
use super::path::CurveHandle;

/// Mode names, without the attached buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditMode {
    SelectObj,
    AddRect,
    AddRectFirstPointAdded,
    AddRectSecondPointAdded,
    AddText,
    AddPolygon,
    AddPolygonFirstTwoPointsAdded,
    AddPolygonNextPointAdded,
    EditPolygonPoint,
    EditPolygonCurvePoint,
    AddCurveToPolygon,
    SelectedObjMove,
}

impl EditMode {
    /// Modes that only exist in the middle of a gesture
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            Self::AddRectFirstPointAdded
                | Self::AddRectSecondPointAdded
                | Self::AddPolygonFirstTwoPointsAdded
                | Self::AddPolygonNextPointAdded
                | Self::EditPolygonPoint
                | Self::EditPolygonCurvePoint
                | Self::SelectedObjMove
        )
    }
}

/// An outline point being dragged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDrag {
    /// Working copy of the polygon; written back to the pool when the drag finishes
    pub object: SvgObject,
    pub point_index: usize,
    pub handle: CurveHandle,
    /// Screen position of the previous drag frame
    pub last_screen_pos: Pos2,
}

/// The current mode together with its edit buffer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum EditState {
    #[default]
    SelectObj,
    AddRect,
    AddRectFirstPointAdded {
        rect: SvgObject,
    },
    AddRectSecondPointAdded {
        rect: SvgObject,
    },
    AddText,
    AddPolygon,
    AddPolygonFirstTwoPointsAdded {
        polygon: SvgObject,
    },
    AddPolygonNextPointAdded {
        polygon: SvgObject,
    },
    EditPolygonPoint {
        edit: PointDrag,
    },
    EditPolygonCurvePoint {
        edit: PointDrag,
    },
    AddCurveToPolygon,
    SelectedObjectMove {
        object: SvgObject,
        last_screen_pos: Pos2,
    },
}

impl EditState {
    pub fn mode(&self) -> EditMode {
        match self {
            Self::SelectObj => EditMode::SelectObj,
            Self::AddRect => EditMode::AddRect,
            Self::AddRectFirstPointAdded { .. } => EditMode::AddRectFirstPointAdded,
            Self::AddRectSecondPointAdded { .. } => EditMode::AddRectSecondPointAdded,
            Self::AddText => EditMode::AddText,
            Self::AddPolygon => EditMode::AddPolygon,
            Self::AddPolygonFirstTwoPointsAdded { .. } => EditMode::AddPolygonFirstTwoPointsAdded,
            Self::AddPolygonNextPointAdded { .. } => EditMode::AddPolygonNextPointAdded,
            Self::EditPolygonPoint { .. } => EditMode::EditPolygonPoint,
            Self::EditPolygonCurvePoint { .. } => EditMode::EditPolygonCurvePoint,
            Self::AddCurveToPolygon => EditMode::AddCurveToPolygon,
            Self::SelectedObjectMove { .. } => EditMode::SelectedObjMove,
        }
    }

    /// The object held by the edit buffer, if a gesture is in progress
    pub fn buffer(&self) -> Option<&SvgObject> {
        match self {
            Self::AddRectFirstPointAdded { rect } | Self::AddRectSecondPointAdded { rect } => Some(rect),
            Self::AddPolygonFirstTwoPointsAdded { polygon } | Self::AddPolygonNextPointAdded { polygon } => {
                Some(polygon)
            }
            Self::EditPolygonPoint { edit } | Self::EditPolygonCurvePoint { edit } => Some(&edit.object),
            Self::SelectedObjectMove { object, .. } => Some(object),
            Self::SelectObj | Self::AddRect | Self::AddText | Self::AddPolygon | Self::AddCurveToPolygon => None,
        }
    }

    /// Returns true if no gesture is in progress
    pub fn is_resting(&self) -> bool {
        self.buffer().is_none()
    }

    /// The rectangle being drawn
    pub fn rect_in_progress(&self) -> Option<&SvgObject> {
        match self {
            Self::AddRectFirstPointAdded { rect } | Self::AddRectSecondPointAdded { rect } => Some(rect),
            _ => None,
        }
    }

    /// The polygon being drawn
    pub fn polygon_in_progress(&self) -> Option<&SvgObject> {
        match self {
            Self::AddPolygonFirstTwoPointsAdded { polygon } | Self::AddPolygonNextPointAdded { polygon } => {
                Some(polygon)
            }
            _ => None,
        }
    }

    pub fn polygon_in_progress_mut(&mut self) -> Option<&mut SvgObject> {
        match self {
            Self::AddPolygonFirstTwoPointsAdded { polygon } | Self::AddPolygonNextPointAdded { polygon } => {
                Some(polygon)
            }
            _ => None,
        }
    }

    /// The point drag of the given mode, `None` if a different mode is active
    pub fn point_drag(&self, mode: EditMode) -> Option<&PointDrag> {
        match self {
            Self::EditPolygonPoint { edit } | Self::EditPolygonCurvePoint { edit } if self.mode() == mode => {
                Some(edit)
            }
            _ => None,
        }
    }

    pub fn point_drag_mut(&mut self, mode: EditMode) -> Option<&mut PointDrag> {
        if self.mode() != mode {
            return None;
        }
        match self {
            Self::EditPolygonPoint { edit } | Self::EditPolygonCurvePoint { edit } => Some(edit),
            _ => None,
        }
    }
}
