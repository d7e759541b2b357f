//! Unit tests mirroring the `src/` layout


/// Raster builders shared by the unit tests
mod fixtures {
    use image::{Rgba, RgbaImage};
    use wfctile::analysis::patterns::SourceRaster;
    use wfctile::spatial::fingerprint::Fingerprint;

    /// Distinct opaque color for a tile key
    pub fn color(key: char) -> Rgba<u8> {
        let v = key as u8;
        Rgba([v, v.wrapping_mul(7), 255 - v, 255])
    }

    /// Raster where each character of `rows` becomes a solid `tile_edge` block
    pub fn raster(rows: &[&str], tile_edge: u32) -> SourceRaster {
        let keys: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        let columns = keys.first().map_or(0, Vec::len) as u32;
        let height = keys.len() as u32 * tile_edge;
        let width = columns * tile_edge;

        SourceRaster::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
            color(keys[(y / tile_edge) as usize][(x / tile_edge) as usize])
        }))
    }

    /// Fingerprint of a solid `tile_edge` block of `key`
    pub fn tile_of(key: char, tile_edge: u32) -> Fingerprint {
        Fingerprint::of_block(&RgbaImage::from_pixel(tile_edge, tile_edge, color(key)))
    }
}
