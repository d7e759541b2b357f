//! Tile map rendering and PNG export

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::tiles::{TileCatalog, TileMap};
use image::{RgbaImage, imageops};
use std::path::Path;

/// Paint every cell's catalog tile into a new image
///
/// The output is `columns * tile_edge` by `rows * tile_edge` pixels.
///
/// # Errors
///
/// Returns an error if:
/// - A cell references a fingerprint missing from the catalog
/// - The output size does not fit in `u32` pixels
pub fn render_tile_map(map: &TileMap, catalog: &TileCatalog) -> Result<RgbaImage> {
    let edge = catalog.tile_edge();
    let width = pixel_extent("output_width", map.columns(), edge)?;
    let height = pixel_extent("output_height", map.rows(), edge)?;

    let mut canvas = RgbaImage::new(width, height);
    for ((x, y), fingerprint) in map.iter() {
        let tile = catalog.lookup(&fingerprint)?;
        imageops::replace(
            &mut canvas,
            tile.pixels(),
            x as i64 * i64::from(edge),
            y as i64 * i64::from(edge),
        );
    }

    Ok(canvas)
}

fn pixel_extent(parameter: &'static str, tiles: usize, edge: u32) -> Result<u32> {
    u32::try_from(tiles)
        .ok()
        .and_then(|count| count.checked_mul(edge))
        .ok_or_else(|| {
            invalid_parameter(
                parameter,
                &tiles,
                &format!("{tiles} tiles of {edge}px exceed the maximum image size"),
            )
        })
}

/// Save an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
