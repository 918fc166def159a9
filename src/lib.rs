//! Cut a raster image into an interlocking jigsaw piece set.
//!
//! The pipeline partitions the source image into an R×C grid (R = C = √N),
//! classifies each cell as corner/edge/center, assigns complementary
//! Tab/Blank joints across every internal boundary, expands each piece's
//! bounds for its protruding Tabs, then extracts and alpha-carves each
//! piece into its own PNG.
//!
//! ```no_run
//! use jigcut::{CutConfig, cut};
//!
//! let source = image::open("photo.jpg")?.to_rgba8();
//! let jigsaw = cut(&source, CutConfig {
//!     piece_count: 16,
//!     output_dir: "out/pieces".into(),
//!     ..CutConfig::default()
//! })?;
//! jigcut::report::write_manifest(&jigsaw, "out/jigsaw.json".as_ref())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assemble;
pub mod board;
pub mod carve;
pub mod cut;
pub mod error;
pub mod geom;
pub mod joints;
pub mod logger;
pub mod piece;
pub mod report;

pub use assemble::{Assembler, CutConfig, DEFAULT_ALLOWANCE_PERCENT, Jigsaw, cut};
pub use board::Board;
pub use error::{Error, ExtractionError};
pub use geom::{Point, Rect, Side};
pub use piece::{Joint, Piece, Role, Stage};
