//! Pixel extraction: crop the cut rectangle out of the source image.

use image::{RgbaImage, imageops};

use crate::error::ExtractionError;
use crate::geom::Rect;

/// Copy the cut rectangle into an independently owned buffer.
///
/// The source is only read; per-piece buffers never alias it.
pub fn extract(source: &RgbaImage, cut: Rect) -> Result<RgbaImage, ExtractionError> {
    let bounds = Rect::new(0, 0, source.width() as i32, source.height() as i32);
    if !bounds.encloses(cut) {
        return Err(ExtractionError::OutOfBounds { rect: cut, bounds });
    }

    Ok(imageops::crop_imm(
        source,
        cut.min.x as u32,
        cut.min.y as u32,
        cut.width() as u32,
        cut.height() as u32,
    )
    .to_image())
}
