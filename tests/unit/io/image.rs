//! Tests for tile map rendering and PNG export

#[cfg(test)]
mod tests {
    use crate::fixtures::{color, raster, tile_of};
    use image::RgbaImage;
    use tempfile::TempDir;
    use wfctile::AlgorithmError;
    use wfctile::io::image::{export_png, render_tile_map};
    use wfctile::spatial::tiles::{TileCatalog, TileMap};

    // Tests rendering the source map reproduces the source raster
    // Verified by painting tiles transposed
    #[test]
    fn test_source_map_round_trip() {
        let source = raster(&["ABC", "CAB"], 3);
        let (catalog, map) = TileCatalog::build(&source, 3).unwrap();

        let rendered = render_tile_map(&map, &catalog).unwrap();
        assert_eq!(&rendered, source.pixels());
    }

    // Tests each cell is painted at its tile offset
    // Verified by painting at cell coordinates without scaling
    #[test]
    fn test_render_places_tiles() {
        let (catalog, _) = TileCatalog::build(&raster(&["AB"], 2), 2).unwrap();
        let map = TileMap::from_row_major(
            2,
            2,
            vec![
                tile_of('B', 2),
                tile_of('B', 2),
                tile_of('A', 2),
                tile_of('B', 2),
            ],
        )
        .unwrap();

        let rendered = render_tile_map(&map, &catalog).unwrap();
        assert_eq!(rendered.dimensions(), (4, 4));
        assert_eq!(rendered.get_pixel(1, 3), &color('A'));
        assert_eq!(rendered.get_pixel(2, 3), &color('B'));
        assert_eq!(rendered.get_pixel(3, 0), &color('B'));
    }

    // Tests rendering a fingerprint missing from the catalog
    // Verified by leaving unknown cells transparent
    #[test]
    fn test_render_unknown_tile() {
        let (catalog, _) = TileCatalog::build(&raster(&["A"], 1), 1).unwrap();
        let map = TileMap::from_row_major(1, 1, vec![tile_of('Q', 1)]).unwrap();
        assert!(matches!(
            render_tile_map(&map, &catalog),
            Err(AlgorithmError::UnknownFingerprint { .. })
        ));
    }

    // Tests export creates missing directories and writes a readable PNG
    // Verified by saving without creating the parent
    #[test]
    fn test_export_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("out.png");
        let expected = RgbaImage::from_pixel(3, 2, color('K'));

        export_png(&expected, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, expected);
    }

    // Tests export into a path blocked by a file
    // Verified by ignoring directory creation errors
    #[test]
    fn test_export_png_blocked_parent() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let blank = RgbaImage::new(1, 1);
        assert!(matches!(
            export_png(&blank, &blocker.join("out.png")),
            Err(AlgorithmError::FileSystem { .. })
        ));
    }
}
