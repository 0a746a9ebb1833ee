//! Turning generated scenes into tile images.

pub mod assets;
pub mod surface;
pub mod tile_mapper;

pub use assets::{load_tile_images, tile_path};
pub use surface::{draw_tiles, ImageSurface, Surface};
pub use tile_mapper::TileMapper;
