//! Tile image loading.

use image::RgbaImage;
use std::path::{Path, PathBuf};
use tilescape_core::{Error, Result};
use tracing::{debug, info};

/// Path of tile `index` inside `folder`
pub fn tile_path(folder: &Path, index: usize) -> PathBuf {
    folder.join(format!("tile_{}.png", index))
}

/// Load `tile_0.png ..= tile_{num_of_tiles}.png` from `folder`, in index order
pub fn load_tile_images(folder: &Path, num_of_tiles: usize) -> Result<Vec<RgbaImage>> {
    let images = (0..=num_of_tiles)
        .map(|index| load_image(&tile_path(folder, index)))
        .collect::<Result<Vec<_>>>()?;

    info!("Loaded {} tile images from {:?}", images.len(), folder);
    Ok(images)
}

fn load_image(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .map_err(|e| Error::Image {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_rgba8();

    debug!("Loaded tile {:?} ({}x{})", path, image.width(), image.height());
    Ok(image)
}
