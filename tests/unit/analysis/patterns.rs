//! Tests for source decoding and tiling plans

#[cfg(test)]
mod tests {
    use crate::fixtures::{color, raster};
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;
    use wfctile::AlgorithmError;
    use wfctile::analysis::patterns::{SourceRaster, Tiling};

    // Tests exact tilings report no excluded pixels
    // Verified by rounding block counts up
    #[test]
    fn test_exact_tiling() {
        let tiling = Tiling::plan(64, 32, 16).unwrap();
        assert_eq!((tiling.columns, tiling.rows), (4, 2));
        assert!(tiling.is_exact());
        assert!(tiling.diagnostic().is_none());
    }

    // Tests partial strips are excluded and described
    // Verified by wrapping partial blocks around the edge
    #[test]
    fn test_partial_tiling_excludes_strips() {
        let tiling = Tiling::plan(70, 33, 16).unwrap();
        assert_eq!((tiling.columns, tiling.rows), (4, 2));
        assert_eq!((tiling.excluded_width, tiling.excluded_height), (6, 1));
        assert!(!tiling.is_exact());

        let note = tiling.diagnostic().unwrap();
        assert!(note.contains("16"));
        assert!(note.contains("4x2"));
    }

    // Tests degenerate tile sizes are rejected
    // Verified by dividing by a zero edge
    #[test]
    fn test_invalid_tile_edges() {
        assert!(matches!(
            Tiling::plan(10, 10, 0),
            Err(AlgorithmError::InvalidParameter { parameter: "tile_size", .. })
        ));
        assert!(matches!(
            Tiling::plan(10, 40, 16),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
        assert!(Tiling::plan(16, 16, 16).is_ok());
    }

    // Tests block extraction copies the right pixel region
    // Verified by swapping column and row offsets
    #[test]
    fn test_block_extraction() {
        let source = raster(&["AB", "CD"], 3);
        let block = source.block(1, 1, 3);

        assert_eq!(block.dimensions(), (3, 3));
        assert!(block.pixels().all(|pixel| *pixel == color('D')));
        assert_eq!(source.block(0, 1, 3).get_pixel(2, 2), &color('C'));
    }

    // Tests decoding converts any supported image to RGBA
    // Verified by loading the file as RGB only
    #[test]
    fn test_decode_rgb_file_to_rgba() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("source.png");
        RgbImage::from_pixel(5, 3, Rgb([9, 8, 7])).save(&path).unwrap();

        let source = SourceRaster::from_image_file(&path).unwrap();
        assert_eq!((source.width(), source.height()), (5, 3));
        assert_eq!(source.pixels().get_pixel(4, 2).0, [9, 8, 7, 255]);
    }

    // Tests undecodable input reports its path
    // Verified by returning an empty raster
    #[test]
    fn test_decode_failure() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.png");
        assert!(matches!(
            SourceRaster::from_image_file(&missing),
            Err(AlgorithmError::ImageLoad { path, .. }) if path == missing
        ));

        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"not an image").unwrap();
        assert!(SourceRaster::from_image_file(&garbage).is_err());
    }
}
