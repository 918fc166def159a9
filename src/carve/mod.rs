//! Alpha carving of the tab/blank silhouette.
//!
//! All geometry lives in the cut buffer's local frame. The piece's
//! pre-expansion rectangle sits inside the buffer inset by the allowance on
//! every Tab side; each joint carves relative to that inner rectangle:
//!
//! - Blank: a circle at the midpoint of the inner side punches a concave
//!   transparent notch into the piece.
//! - Tab: the allowance band beyond the inner side goes transparent except
//!   for the circle centered on the side's midpoint, leaving a round island
//!   of material protruding past the original edge.
//!
//! Carving only ever clears alpha, never restores it, so the fixed
//! Top → Right → Bottom → Left order is reproducible by construction.

use image::RgbaImage;

use crate::geom::{Point, Rect, Side, in_circle};
use crate::piece::Piece;

/// The pre-expansion rectangle positioned inside the cut buffer.
struct Frame {
    inner: Rect,
    width: i32,
    height: i32,
}

impl Frame {
    fn new(piece: &Piece, allowance: i32, width: i32, height: i32) -> Self {
        let left = if piece.has_external(Side::Left) { allowance } else { 0 };
        let top = if piece.has_external(Side::Top) { allowance } else { 0 };
        let right = if piece.has_external(Side::Right) { allowance } else { 0 };
        let bottom = if piece.has_external(Side::Bottom) { allowance } else { 0 };
        Self {
            inner: Rect::new(left, top, width - right, height - bottom),
            width,
            height,
        }
    }

    /// Midpoint of the inner rectangle's side: the carve circle center.
    ///
    /// Adjacent Tab allowances shift the inner rectangle within the buffer,
    /// so this midpoint already carries the corner compensation: two Tabs
    /// meeting at a corner cannot misplace each other's circle.
    fn side_midpoint(&self, side: Side) -> Point {
        let cx = (self.inner.min.x + self.inner.max.x) / 2;
        let cy = (self.inner.min.y + self.inner.max.y) / 2;
        match side {
            Side::Top => Point::new(cx, self.inner.min.y),
            Side::Right => Point::new(self.inner.max.x, cy),
            Side::Bottom => Point::new(cx, self.inner.max.y),
            Side::Left => Point::new(self.inner.min.x, cy),
        }
    }

    /// Allowance band beyond the inner edge on `side`, spanning the whole
    /// buffer on the other axis. Empty when the side was never expanded.
    fn band(&self, side: Side) -> Rect {
        match side {
            Side::Top => Rect::new(0, 0, self.width, self.inner.min.y),
            Side::Right => Rect::new(self.inner.max.x, 0, self.width, self.height),
            Side::Bottom => Rect::new(0, self.inner.max.y, self.width, self.height),
            Side::Left => Rect::new(0, 0, self.inner.min.x, self.height),
        }
    }
}

#[inline]
fn clear_alpha(img: &mut RgbaImage, x: i32, y: i32) {
    img.get_pixel_mut(x as u32, y as u32).0[3] = 0;
}

/// Punch a transparent circular notch into the piece at `side`.
fn carve_blank(img: &mut RgbaImage, frame: &Frame, side: Side, radius: i32) {
    let center = frame.side_midpoint(side);
    // Only the circle's bounding box needs visiting.
    let x0 = (center.x - radius).max(0);
    let y0 = (center.y - radius).max(0);
    let x1 = (center.x + radius).min(frame.width);
    let y1 = (center.y + radius).min(frame.height);
    for y in y0..y1 {
        for x in x0..x1 {
            if in_circle(x, y, center, radius) {
                clear_alpha(img, x, y);
            }
        }
    }
}

/// Clear the allowance band beyond `side` except for the tab circle.
///
/// The circle is centered on the original edge line (one allowance inward
/// from the buffer's outer edge), so half of it lies inside the piece and
/// half protrudes through the band. Pixels inside the inner rectangle are
/// never touched.
fn carve_tab(img: &mut RgbaImage, frame: &Frame, side: Side, radius: i32) {
    let center = frame.side_midpoint(side);
    let band = frame.band(side);
    for y in band.min.y..band.max.y {
        for x in band.min.x..band.max.x {
            if !in_circle(x, y, center, radius) {
                clear_alpha(img, x, y);
            }
        }
    }
}

/// Apply every joint of `piece` to its extracted buffer, in the fixed
/// Top, Right, Bottom, Left order.
pub fn carve_piece(piece: &Piece, img: &mut RgbaImage, allowance: i32) {
    let frame = Frame::new(piece, allowance, img.width() as i32, img.height() as i32);
    for side in Side::ALL {
        let Some(joint) = piece.joint(side) else {
            continue;
        };
        if joint.external {
            carve_tab(img, &frame, side, allowance);
        } else {
            carve_blank(img, &frame, side, allowance);
        }
    }
}
