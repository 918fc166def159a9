//! Orchestration: the full partition → classify → joints → expand →
//! extract → carve → persist pipeline.
//!
//! The topology phase needs whole-board adjacency knowledge and runs
//! sequentially; it is O(piece count) and cheap. Once every piece knows its
//! joints and cut rectangle, pieces share nothing mutable: extraction,
//! carving, and persistence run on the rayon pool, fail-fast on the first
//! error. Completion order is irrelevant; the returned piece list keeps
//! index order.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use image::{ImageFormat, RgbaImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::carve::carve_piece;
use crate::cut::{allowance, expand_bounds, extract};
use crate::error::{Error, ExtractionError};
use crate::geom::Rect;
use crate::joints;
use crate::piece::{Piece, Stage, classify};
use crate::{debug, log};

/// Default Tab/Blank allowance as a percentage of the cell's largest
/// dimension.
pub const DEFAULT_ALLOWANCE_PERCENT: f32 = 10.0;

/// How a source image is cut.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CutConfig {
    /// Total piece count; must have an integer square root.
    pub piece_count: u32,
    /// Tab protrusion / Blank intrusion distance, as a percentage of the
    /// cell's largest dimension.
    pub allowance_percent: f32,
    /// Directory the carved PNGs are written under.
    pub output_dir: PathBuf,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            piece_count: 9,
            allowance_percent: DEFAULT_ALLOWANCE_PERCENT,
            output_dir: PathBuf::from("pieces"),
        }
    }
}

impl CutConfig {
    /// Reject configurations before any geometry is built.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.allowance_percent.is_finite() || self.allowance_percent <= 0.0 {
            return Err(Error::Config(format!(
                "allowance_percent must be positive, got {}",
                self.allowance_percent
            )));
        }
        // Past 25% adjacent carve circles start overlapping.
        if self.allowance_percent > 25.0 {
            return Err(Error::Config(format!(
                "allowance_percent must be at most 25, got {}",
                self.allowance_percent
            )));
        }
        Ok(())
    }
}

/// The finished piece set plus board metadata.
#[derive(Debug, Serialize)]
pub struct Jigsaw {
    pub bounds: Rect,
    pub rows: u32,
    pub cols: u32,
    /// Pieces in original index order.
    pub pieces: Vec<Piece>,
}

/// Cuts one source image into a jigsaw.
pub struct Assembler<'a> {
    source: &'a RgbaImage,
    config: CutConfig,
    cancel: Arc<AtomicBool>,
}

impl<'a> Assembler<'a> {
    pub fn new(source: &'a RgbaImage, config: CutConfig) -> Self {
        Self {
            source,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for cancelling the batch from another thread.
    ///
    /// A set flag stops dispatching new piece jobs; in-flight jobs run to
    /// completion and their partial outputs are not valid results.
    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Run the whole pipeline and persist one PNG per piece.
    pub fn assemble(&self) -> Result<Jigsaw, Error> {
        self.config.validate()?;
        let board = Board::new(
            self.source.width(),
            self.source.height(),
            self.config.piece_count,
        )?;
        debug!("board"; "{}x{} grid, cell {}x{} px",
            board.rows, board.cols, board.piece_width, board.piece_height);

        // Topology phase: sequential, needs whole-board adjacency.
        let mut pieces = board.partition();
        for piece in &mut pieces {
            piece.role = Some(classify(piece.rect, board.grid));
            piece.advance(Stage::Classified);
        }
        joints::assign(&mut pieces, board.rows, board.cols);
        for piece in &mut pieces {
            piece.cut_rect = expand_bounds(piece, self.config.allowance_percent);
            piece.advance(Stage::BoundsExpanded);
        }

        log!("cut"; "cutting {} pieces into {}",
            pieces.len(), self.config.output_dir.display());

        // Cut phase: embarrassingly parallel, first failure halts dispatch.
        let failure: Mutex<Option<Error>> = Mutex::new(None);
        let halted = AtomicBool::new(false);
        pieces
            .par_iter_mut()
            .try_for_each(|piece| {
                if halted.load(Ordering::Relaxed) {
                    return Err(());
                }
                if self.cancel.load(Ordering::Relaxed) {
                    halted.store(true, Ordering::Relaxed);
                    return Err(());
                }
                if let Err(source) = self.cut_piece(piece) {
                    if !halted.swap(true, Ordering::Relaxed)
                        && let Ok(mut slot) = failure.lock()
                    {
                        *slot = Some(Error::extraction(piece.index, &piece.name, source));
                    }
                    return Err(());
                }
                Ok(())
            })
            .ok();

        let failure = match failure.into_inner() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(err) = failure {
            return Err(err);
        }
        if self.cancel.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }

        log!("cut"; "finished {} pieces", pieces.len());
        Ok(Jigsaw {
            bounds: board.bounds,
            rows: board.rows,
            cols: board.cols,
            pieces,
        })
    }

    /// Extract, carve, and persist a single piece.
    fn cut_piece(&self, piece: &mut Piece) -> Result<(), ExtractionError> {
        let mut img = extract(self.source, piece.cut_rect)?;
        piece.advance(Stage::Extracted);

        carve_piece(piece, &mut img, allowance(piece.rect, self.config.allowance_percent));
        piece.advance(Stage::Carved);

        let path = self.config.output_dir.join(piece.file_name());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ExtractionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        img.save_with_format(&path, ImageFormat::Png)?;
        debug!("cut"; "{}", path.display());

        piece.path = Some(path);
        piece.image = Some(img);
        piece.advance(Stage::Done);
        Ok(())
    }
}

/// One-call convenience over [`Assembler`].
pub fn cut(source: &RgbaImage, config: CutConfig) -> Result<Jigsaw, Error> {
    Assembler::new(source, config).assemble()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use image::{Rgba, RgbaImage};

    use super::{Assembler, CutConfig, cut};
    use crate::error::Error;
    use crate::piece::Stage;

    fn opaque_gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
        })
    }

    fn config_in(dir: &std::path::Path, piece_count: u32) -> CutConfig {
        CutConfig {
            piece_count,
            output_dir: dir.to_path_buf(),
            ..CutConfig::default()
        }
    }

    #[test]
    fn nine_piece_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let source = opaque_gradient(300, 300);
        let jigsaw = cut(&source, config_in(dir.path(), 9)).unwrap();

        assert_eq!((jigsaw.rows, jigsaw.cols), (3, 3));
        assert_eq!(jigsaw.pieces.len(), 9);

        for (i, piece) in jigsaw.pieces.iter().enumerate() {
            assert_eq!(piece.index, i, "index order preserved");
            assert_eq!(piece.stage(), Stage::Done);
            let path = piece.path.as_ref().expect("piece path set");
            assert_eq!(path, &dir.path().join(format!("piece{i}.png")));
            assert!(path.exists(), "missing {}", path.display());
        }

        // Written files keep their alpha channel.
        let reloaded = image::open(jigsaw.pieces[4].path.as_ref().unwrap())
            .unwrap()
            .to_rgba8();
        assert!(reloaded.pixels().any(|p| p[3] == 0), "no transparency");
        assert!(reloaded.pixels().any(|p| p[3] == 255), "no material");
    }

    #[test]
    fn invalid_piece_count_fails_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = opaque_gradient(300, 300);
        let err = cut(&source, config_in(dir.path(), 10)).unwrap_err();
        assert!(matches!(err, Error::InvalidPieceCount(10)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn pre_set_cancel_token_stops_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let source = opaque_gradient(300, 300);
        let assembler = Assembler::new(&source, config_in(dir.path(), 9));
        assembler.cancel_token().store(true, Ordering::Relaxed);

        let err = assembler.assemble().unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn config_rejects_bad_allowance() {
        for percent in [0.0, -3.0, 26.0, f32::NAN] {
            let config = CutConfig {
                allowance_percent: percent,
                ..CutConfig::default()
            };
            assert!(matches!(config.validate(), Err(Error::Config(_))));
        }
    }

    #[test]
    fn unwritable_output_dir_carries_piece_identity() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the output directory should be.
        let clash = dir.path().join("not-a-dir");
        std::fs::write(&clash, b"x").unwrap();

        let source = opaque_gradient(300, 300);
        let err = cut(&source, config_in(&clash, 9)).unwrap_err();
        match err {
            Error::Extraction { index, name, .. } => {
                assert!(index < 9);
                assert_eq!(name, format!("piece{index}"));
            }
            other => panic!("expected Extraction, got {other:?}"),
        }
    }
}
