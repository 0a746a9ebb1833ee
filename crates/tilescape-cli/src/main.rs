//! Generates a world of scenes, dumps the last one and optionally renders it.
//!
//! Usage: `tilescape [config.json]`. Without a config file the defaults apply.

mod telemetry;

use anyhow::{Context, Result};
use std::path::Path;
use tilescape_core::{AppConfig, SceneGrid, TileConfig};
use tilescape_render::{ImageSurface, TileMapper};
use tilescape_world::World;
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(Path::new(&path))
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => AppConfig::default(),
    };

    info!("Starting Tilescape");
    let world = run(&config)?;
    println!("{}", world.generator());

    Ok(())
}

/// Fill the world, dump the generator's last scene and render it when tiles are configured
fn run(config: &AppConfig) -> Result<World> {
    let mut world = World::with_config(config.world.clone())?;
    world.generate_all(&config.passes);

    world
        .generator()
        .save_with_layout(&config.dump_path, &config.dump_layout)
        .with_context(|| format!("Failed to write dump to {:?}", config.dump_path))?;

    if let Some(tiles) = &config.tiles {
        render_scene(world.generator().scene(), tiles)?;
    }

    Ok(world)
}

fn render_scene(scene: &SceneGrid, tiles: &TileConfig) -> Result<()> {
    let mut mapper = TileMapper::from_config(tiles, scene);
    mapper
        .get_tile_images_list()
        .with_context(|| format!("Failed to load tiles from {:?}", tiles.folder))?;

    let tile_size = mapper.get_tile_size()?;
    let tilemap = mapper.map_chars_to_tiles()?;
    let mut surface = ImageSurface::for_tilemap(tilemap, tile_size)?;

    mapper.draw(&mut surface)?;
    surface.save(&tiles.output)?;

    info!("Rendered {}x{} scene", scene.width(), scene.height());
    Ok(())
}
