//! Bounds expansion for Tab-carrying sides.

use crate::geom::{Rect, Side};
use crate::piece::Piece;

/// Allowance in whole pixels: `percent` of the cell's largest dimension.
///
/// This single value is both the bounds-expansion distance and the carve
/// circle radius, so Tabs and the Blanks that receive them stay congruent.
pub fn allowance(rect: Rect, percent: f32) -> i32 {
    let longest = rect.width().max(rect.height());
    ((percent / 100.0) * longest as f32).round() as i32
}

/// Grow the piece's rectangle outward on every side carrying a Tab.
///
/// Internal joints carve within the existing rectangle and cause no growth.
/// Perimeter sides never carry external joints, so the result stays inside
/// the board by construction, so no clamping.
pub fn expand_bounds(piece: &Piece, percent: f32) -> Rect {
    let a = allowance(piece.rect, percent);
    let mut rect = piece.rect;
    for joint in &piece.joints {
        if !joint.external {
            continue;
        }
        match joint.side {
            Side::Top => rect.min.y -= a,
            Side::Right => rect.max.x += a,
            Side::Bottom => rect.max.y += a,
            Side::Left => rect.min.x -= a,
        }
    }
    rect
}
