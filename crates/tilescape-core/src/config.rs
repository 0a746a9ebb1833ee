//! Configuration types for generation, dumping and rendering.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Scene generator parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Columns per generated scene
    pub width: i32,
    /// Rows per generated scene
    pub height: i32,
    /// Alphabet drawn from by `generate_tile`
    pub chars: Vec<char>,
    /// Weight table, one entry per alphabet character, each in [0, 1]
    pub weights: Vec<f64>,
    /// The "empty" character; must be part of the alphabet
    pub blank: char,
    /// Chance that a matching cell grows into its neighbourhood when clustering
    pub cluster_chance: f64,
    /// Fixed RNG seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 60,
            chars: vec!['M', ' ', 'T'],
            weights: vec![0.06, 0.02, 0.2],
            blank: ' ',
            cluster_chance: 0.1,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Largest scene accepted by `validate`, in cells
    pub const MAX_CELLS: i64 = 1 << 24;

    /// Check that the alphabet and weight table form a usable distribution
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::Validation(format!(
                "Scene dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if i64::from(self.width) * i64::from(self.height) > Self::MAX_CELLS {
            return Err(Error::Validation(format!(
                "Scene of {}x{} exceeds {} cells",
                self.width,
                self.height,
                Self::MAX_CELLS
            )));
        }

        if self.chars.is_empty() {
            return Err(Error::Validation("Alphabet is empty".to_string()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.chars.iter().find(|c| !seen.insert(**c)) {
            return Err(Error::Validation(format!(
                "Alphabet contains {:?} more than once",
                dup
            )));
        }

        if !self.chars.contains(&self.blank) {
            return Err(Error::Validation(format!(
                "Blank character {:?} is not part of the alphabet",
                self.blank
            )));
        }

        if self.weights.len() != self.chars.len() {
            return Err(Error::Validation(format!(
                "Weight table has {} entries for {} characters",
                self.weights.len(),
                self.chars.len()
            )));
        }

        if let Some((idx, weight)) = self
            .weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(0.0..=1.0).contains(*w))
        {
            return Err(Error::Validation(format!(
                "Weight {} is {}, expected a value in [0, 1]",
                idx, weight
            )));
        }

        if !(0.0..=1.0).contains(&self.cluster_chance) {
            return Err(Error::Validation(format!(
                "Cluster chance is {}, expected a value in [0, 1]",
                self.cluster_chance
            )));
        }

        Ok(())
    }
}

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of scene cells per world row; also the scene width
    pub width: i32,
    /// Number of world rows; also the scene height
    pub height: i32,
    /// Generator settings. Its width and height are replaced by the world's.
    pub generator: GeneratorConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 2,
            height: 5,
            generator: GeneratorConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Generator config with the world's dimensions applied
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            width: self.width,
            height: self.height,
            ..self.generator.clone()
        }
    }
}

/// Post-processing pass applied to a generator's scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pass", content = "char", rename_all = "snake_case")]
pub enum PostProcess {
    /// Grow regions of one character into neighbouring blanks
    ClusterCharacters(char),
    /// Grow each cell's local majority character
    ClusterByMajority,
    /// Blank cells whose left and right neighbours are both blank
    RemoveStrays,
}

/// Layout of the bordered text dump
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpLayout {
    /// Characters per block
    pub block_width: usize,
    /// Blocks written per line; anything past them is cut off
    pub blocks_per_line: usize,
    /// Rows between border lines
    pub rows_per_band: usize,
}

impl Default for DumpLayout {
    fn default() -> Self {
        Self {
            block_width: 20,
            blocks_per_line: 3,
            rows_per_band: 20,
        }
    }
}

impl DumpLayout {
    pub fn validate(&self) -> Result<()> {
        if self.block_width == 0 || self.blocks_per_line == 0 || self.rows_per_band == 0 {
            return Err(Error::Validation(
                "Dump layout sizes must all be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tile asset and mapping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Folder containing `tile_0.png ..= tile_N.png`
    pub folder: PathBuf,
    /// Highest tile index to load
    pub num_of_tiles: usize,
    /// Character to tile index table
    pub mapping: Vec<(char, usize)>,
    /// Where the rendered scene is written
    pub output: PathBuf,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("./assets/tiles"),
            num_of_tiles: 2,
            mapping: vec![(' ', 0), ('M', 1), ('T', 2)],
            output: PathBuf::from("generated_scene.png"),
        }
    }
}

/// Top-level configuration for the `tilescape` binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    /// Passes run on every generated scene, in order
    pub passes: Vec<PostProcess>,
    pub dump_path: PathBuf,
    pub dump_layout: DumpLayout,
    /// Rendering is skipped when absent
    pub tiles: Option<TileConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            passes: vec![
                PostProcess::ClusterCharacters('M'),
                PostProcess::ClusterCharacters('T'),
                PostProcess::RemoveStrays,
            ],
            dump_path: PathBuf::from("generated_world.txt"),
            dump_layout: DumpLayout::default(),
            tiles: None,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.world.generator_config().validate()?;
        config.dump_layout.validate()?;
        Ok(config)
    }
}
