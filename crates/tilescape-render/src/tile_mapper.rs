//! Character to tile translation for one scene.

use crate::assets::load_tile_images;
use crate::surface::{draw_tiles, Surface};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tilescape_core::{Error, Result, SceneGrid, TileConfig, TileGrid};
use tracing::debug;

/// Maps the characters of one scene to tile indices and draws the result
pub struct TileMapper<'a> {
    folder: PathBuf,
    num_of_tiles: usize,
    scene: &'a SceneGrid,
    tile_images: Vec<RgbaImage>,
    tilemap: Option<TileGrid>,
    mapping: HashMap<char, usize>,
}

impl<'a> TileMapper<'a> {
    pub fn new(folder: impl Into<PathBuf>, num_of_tiles: usize, scene: &'a SceneGrid) -> Self {
        Self {
            folder: folder.into(),
            num_of_tiles,
            scene,
            tile_images: Vec::new(),
            tilemap: None,
            mapping: HashMap::new(),
        }
    }

    /// Mapper with the folder, tile count and mapping table from `config`
    pub fn from_config(config: &TileConfig, scene: &'a SceneGrid) -> Self {
        let mut mapper = Self::new(config.folder.clone(), config.num_of_tiles, scene);
        for &(ch, index) in &config.mapping {
            mapper.add_char_to_dict(ch, index);
        }
        mapper
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn mapping(&self) -> &HashMap<char, usize> {
        &self.mapping
    }

    /// Register `ch -> tile_index`, replacing any earlier entry for `ch`
    pub fn add_char_to_dict(&mut self, ch: char, tile_index: usize) {
        if let Some(old) = self.mapping.insert(ch, tile_index) {
            debug!("Remapped {:?} from tile {} to {}", ch, old, tile_index);
        }
    }

    /// Translate every character of the scene. Fails on the first character
    /// without a mapping.
    pub fn map_chars_to_tiles(&mut self) -> Result<&TileGrid> {
        let mapping = &self.mapping;
        let tilemap = self.scene.try_map(|position, &ch| {
            mapping
                .get(&ch)
                .copied()
                .ok_or(Error::UnmappedChar { ch, position })
        })?;

        Ok(&*self.tilemap.insert(tilemap))
    }

    /// The tilemap built by the last successful `map_chars_to_tiles`
    pub fn get_tilemap(&self) -> Option<&TileGrid> {
        self.tilemap.as_ref()
    }

    /// Load the tile images from the folder, replacing any loaded before
    pub fn get_tile_images_list(&mut self) -> Result<&[RgbaImage]> {
        self.tile_images = load_tile_images(&self.folder, self.num_of_tiles)?;
        Ok(&self.tile_images)
    }

    /// Width of the first loaded tile
    pub fn get_tile_size(&self) -> Result<u32> {
        self.tile_images
            .first()
            .map(RgbaImage::width)
            .ok_or_else(|| Error::InvalidState("No tile images loaded".to_string()))
    }

    /// Draw the mapped scene with the loaded tiles
    pub fn draw<S>(&self, surface: &mut S) -> Result<()>
    where
        S: Surface<Image = RgbaImage>,
    {
        let tilemap = self
            .tilemap
            .as_ref()
            .ok_or_else(|| Error::InvalidState("Scene has not been mapped to tiles".to_string()))?;

        draw_tiles(tilemap, self.get_tile_size()?, &self.tile_images, surface)
    }
}
