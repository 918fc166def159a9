//! Error taxonomy for jigsaw cutting.
//!
//! Everything here is terminal: the pipeline is fail-fast and performs no
//! retries. The only recoverable condition is `InvalidPieceCount`, which the
//! caller can fix by choosing a perfect-square count.

use std::path::PathBuf;

use thiserror::Error;

use crate::geom::Rect;

/// Top-level error for building a jigsaw.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested piece count has no integer square root.
    #[error("piece count {0} has no integer square root (try 4, 9, 16, 25, ...)")]
    InvalidPieceCount(u32),

    /// Extraction, carving, or persistence failed for one piece.
    ///
    /// Aborts the whole batch; pieces already written are not rolled back.
    #[error("failed to cut piece {index} (`{name}`)")]
    Extraction {
        index: usize,
        name: String,
        #[source]
        source: ExtractionError,
    },

    /// A raw joint side value did not map to Top/Right/Bottom/Left.
    ///
    /// Internal-consistency error: sides are a closed enum inside the crate,
    /// so this can only arise from external data fed back in (e.g. a
    /// manifest consumer).
    #[error("joint side value {0} is not one of 0..=3")]
    InvalidJointSide(u8),

    /// The cancel token was set before the batch completed.
    #[error("jigsaw build cancelled")]
    Cancelled,

    /// Configuration rejected before any geometry was built.
    #[error("invalid cut config: {0}")]
    Config(String),
}

/// Cause of a per-piece extraction failure.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("cut rectangle {rect:?} escapes the source bounds {bounds:?}")]
    OutOfBounds { rect: Rect, bounds: Rect },

    #[error("failed to encode piece image")]
    Image(#[from] image::ImageError),

    #[error("failed to write `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Attach a piece identity to an extraction cause.
    pub(crate) fn extraction(index: usize, name: &str, source: ExtractionError) -> Self {
        Self::Extraction {
            index,
            name: name.to_string(),
            source,
        }
    }
}
