//! JSON manifest of a finished jigsaw.
//!
//! A side artifact for external consumers (solvers, renderers): board
//! bounds, grid shape, and per-piece topology, never pixel data. Writing
//! it is a separate call over the finished result, not a build side effect.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use crate::assemble::Jigsaw;

/// Pretty-printed manifest document.
pub fn to_json(jigsaw: &Jigsaw) -> serde_json::Result<String> {
    serde_json::to_string_pretty(jigsaw)
}

/// Write the manifest next to the piece images (or wherever the caller
/// points it).
pub fn write_manifest(jigsaw: &Jigsaw, path: &Path) -> io::Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, jigsaw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use serde_json::Value;

    use super::{to_json, write_manifest};
    use crate::assemble::{CutConfig, cut};

    fn sample_jigsaw(dir: &std::path::Path) -> crate::assemble::Jigsaw {
        let source = RgbaImage::from_pixel(300, 300, Rgba([10, 20, 30, 255]));
        let config = CutConfig {
            piece_count: 9,
            output_dir: dir.to_path_buf(),
            ..CutConfig::default()
        };
        cut(&source, config).unwrap()
    }

    #[test]
    fn manifest_shape() {
        let dir = tempfile::tempdir().unwrap();
        let jigsaw = sample_jigsaw(dir.path());
        let doc: Value = serde_json::from_str(&to_json(&jigsaw).unwrap()).unwrap();

        assert_eq!(doc["rows"], 3);
        assert_eq!(doc["cols"], 3);
        let pieces = doc["pieces"].as_array().unwrap();
        assert_eq!(pieces.len(), 9);

        let corner = &pieces[0];
        assert_eq!(corner["index"], 0);
        assert_eq!(corner["role"], "corner");
        assert_eq!(corner["joints"].as_array().unwrap().len(), 2);
        assert_eq!(corner["joints"][0]["side"], "right");
        assert_eq!(corner["joints"][0]["external"], true);
        assert!(corner["path"].as_str().unwrap().ends_with("piece0.png"));
        // Pixel buffers never leak into the manifest.
        assert!(corner.get("image").is_none());
    }

    #[test]
    fn manifest_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let jigsaw = sample_jigsaw(dir.path());
        let path = dir.path().join("jigsaw.json");
        write_manifest(&jigsaw, &path).unwrap();

        let doc: Value = serde_json::from_reader(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(doc["pieces"].as_array().unwrap().len(), 9);
    }
}
