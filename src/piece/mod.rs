//! Piece state: grid position, rectangle, role, joints, and the lifecycle
//! stage machine.
//!
//! A piece is created once by the board partitioner and then progressively
//! enriched in place (role, joints, cut rectangle, pixel buffer), never
//! recreated. Stages advance strictly forward.

use std::path::PathBuf;

use image::RgbaImage;
use serde::Serialize;

use crate::geom::{Rect, Side};

/// Topological role of a piece, derived from its position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Touches the board boundary on both axes.
    Corner,
    /// Touches the board boundary on exactly one axis.
    Edge,
    /// Touches no board boundary.
    Center,
}

/// One side-joint of a piece.
///
/// `external` means a Tab (convex protrusion beyond the base rectangle);
/// internal means a Blank (concave notch carved into it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Joint {
    pub side: Side,
    pub external: bool,
}

/// Lifecycle stage of a piece. Strictly sequential, never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Planned,
    Classified,
    JointsAssigned,
    BoundsExpanded,
    Extracted,
    Carved,
    Done,
}

/// One jigsaw piece.
///
/// `rect` is the unexpanded grid cell; `cut_rect` the Tab-expanded bounds
/// actually extracted from the source. The pixel buffer is exclusively owned
/// once extracted; there is no live reference back into the source image.
#[derive(Debug, Clone, Serialize)]
pub struct Piece {
    pub index: usize,
    pub row: u32,
    pub col: u32,
    pub name: String,
    /// Unexpanded cell rectangle in board coordinates.
    pub rect: Rect,
    pub role: Option<Role>,
    /// Joints in fixed Top, Right, Bottom, Left order.
    pub joints: Vec<Joint>,
    /// Post-expansion bounds; equals `rect` until the expander runs.
    pub cut_rect: Rect,
    /// Where the carved PNG was written.
    pub path: Option<PathBuf>,
    #[serde(skip)]
    pub image: Option<RgbaImage>,
    #[serde(skip)]
    pub(crate) stage: Stage,
}

impl Piece {
    pub(crate) fn planned(index: usize, row: u32, col: u32, rect: Rect) -> Self {
        Self {
            index,
            row,
            col,
            name: format!("piece{index}"),
            rect,
            role: None,
            joints: Vec::new(),
            cut_rect: rect,
            path: None,
            image: None,
            stage: Stage::Planned,
        }
    }

    /// Output file name, unique per piece by construction.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }

    pub fn joint(&self, side: Side) -> Option<Joint> {
        self.joints.iter().copied().find(|j| j.side == side)
    }

    pub fn has_external(&self, side: Side) -> bool {
        self.joint(side).is_some_and(|j| j.external)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn advance(&mut self, next: Stage) {
        debug_assert!(
            next > self.stage,
            "piece {} regressed from {:?} to {:?}",
            self.index,
            self.stage,
            next
        );
        self.stage = next;
    }
}

/// Classify a cell rectangle against the board's covered grid area.
///
/// Corner: touches the grid boundary on both axes. Edge: on exactly one.
/// Center: on neither. Exactly one role applies.
pub fn classify(rect: Rect, grid: Rect) -> Role {
    let horizontal = rect.min.x == grid.min.x || rect.max.x == grid.max.x;
    let vertical = rect.min.y == grid.min.y || rect.max.y == grid.max.y;
    match (horizontal, vertical) {
        (true, true) => Role::Corner,
        (true, false) | (false, true) => Role::Edge,
        (false, false) => Role::Center,
    }
}
