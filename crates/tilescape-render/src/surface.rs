//! Drawing targets for tilemaps.

use image::{imageops, RgbaImage};
use std::path::Path;
use tilescape_core::{Error, Result, TileGrid};
use tracing::info;

/// A 2D target that accepts image draw requests at pixel offsets
pub trait Surface {
    type Image;

    fn blit(&mut self, image: &Self::Image, dest: (u32, u32));
}

/// Draw every tile of `tilemap` at `(column * tile_size, row * tile_size)`
pub fn draw_tiles<S: Surface>(
    tilemap: &TileGrid,
    tile_size: u32,
    tile_images: &[S::Image],
    surface: &mut S,
) -> Result<()> {
    for (pos, &index) in tilemap.iter() {
        let tile = tile_images.get(index).ok_or_else(|| {
            Error::Validation(format!(
                "Tile index {} at {} has no image ({} loaded)",
                index,
                pos,
                tile_images.len()
            ))
        })?;

        let x = pixel_offset(pos.x, tile_size)?;
        let y = pixel_offset(pos.y, tile_size)?;
        surface.blit(tile, (x, y));
    }
    Ok(())
}

/// `cells * tile_size` in pixels; an error past the `u32` range
fn pixel_offset(cells: i32, tile_size: u32) -> Result<u32> {
    u32::try_from(cells.max(0))
        .ok()
        .and_then(|cells| cells.checked_mul(tile_size))
        .ok_or_else(|| {
            Error::Validation(format!(
                "{} tiles of {} pixels exceed the canvas range",
                cells, tile_size
            ))
        })
}

/// In-memory RGBA canvas
pub struct ImageSurface {
    canvas: RgbaImage,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
        }
    }

    /// Canvas just large enough for `tilemap` at `tile_size` pixels per tile
    pub fn for_tilemap(tilemap: &TileGrid, tile_size: u32) -> Result<Self> {
        Ok(Self::new(
            pixel_offset(tilemap.width(), tile_size)?,
            pixel_offset(tilemap.height(), tile_size)?,
        ))
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.canvas.save(path).map_err(|e| Error::Image {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!("Rendered scene written to {:?}", path);
        Ok(())
    }
}

impl Surface for ImageSurface {
    type Image = RgbaImage;

    fn blit(&mut self, image: &RgbaImage, dest: (u32, u32)) {
        imageops::overlay(&mut self.canvas, image, dest.0 as i64, dest.1 as i64);
    }
}
