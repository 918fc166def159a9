//! Board construction and grid partitioning.
//!
//! The board divides the source image's pixel rectangle into an R×C grid of
//! equal cells with R = C = √N. Cell sizes use floor division; when the
//! image dimensions are not exact multiples, the remainder strip on the
//! right/bottom is simply never covered by a cell.

use serde::Serialize;

use crate::error::Error;
use crate::geom::Rect;
use crate::piece::Piece;

/// Immutable board geometry shared read-only by all pieces.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    /// Full source image rectangle.
    pub bounds: Rect,
    /// Area actually covered by cells (floor-divided).
    pub grid: Rect,
    pub rows: u32,
    pub cols: u32,
    pub piece_width: i32,
    pub piece_height: i32,
}

/// Integer square root, exact matches only.
fn exact_sqrt(n: u32) -> Option<u32> {
    let root = f64::from(n).sqrt().round() as u32;
    (root.checked_mul(root) == Some(n)).then_some(root)
}

impl Board {
    /// Validate the piece count and lay out the grid.
    pub fn new(width: u32, height: u32, piece_count: u32) -> Result<Self, Error> {
        let side = exact_sqrt(piece_count)
            .filter(|s| *s > 0)
            .ok_or(Error::InvalidPieceCount(piece_count))?;

        let rows = side;
        let cols = side;
        let piece_width = width as i32 / cols as i32;
        let piece_height = height as i32 / rows as i32;

        Ok(Self {
            bounds: Rect::new(0, 0, width as i32, height as i32),
            grid: Rect::new(0, 0, piece_width * cols as i32, piece_height * rows as i32),
            rows,
            cols,
            piece_width,
            piece_height,
        })
    }

    pub fn piece_count(&self) -> u32 {
        self.rows * self.cols
    }

    /// Create every piece in row-major order, geometry only.
    pub fn partition(&self) -> Vec<Piece> {
        let mut pieces = Vec::with_capacity(self.piece_count() as usize);
        for row in 0..self.rows {
            let y0 = row as i32 * self.piece_height;
            for col in 0..self.cols {
                let x0 = col as i32 * self.piece_width;
                let rect = Rect::new(x0, y0, x0 + self.piece_width, y0 + self.piece_height);
                let index = (row * self.cols + col) as usize;
                pieces.push(Piece::planned(index, row, col, rect));
            }
        }
        pieces
    }
}
