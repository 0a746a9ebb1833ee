//! Procedural scene generation and post-processing.

use crate::dump::{render_dump, write_dump};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::path::Path;
use tilescape_core::{
    DumpLayout, Error, GeneratorConfig, Grid, PostProcess, Position, Result, SceneGrid,
};
use tracing::{debug, instrument, trace};

/// Generates character grids and post-processes the one it holds.
///
/// `generate_scene` hands out fresh grids without touching the held scene;
/// the clustering and stray-removal passes only ever work on the held scene.
pub struct SceneGenerator {
    config: GeneratorConfig,
    scene: SceneGrid,
    rng: ChaCha8Rng,
}

impl SceneGenerator {
    /// Validate the config and generate the first held scene
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut generator = Self {
            scene: Grid::new(config.width, config.height, config.blank),
            config,
            rng,
        };
        generator.regenerate();
        Ok(generator)
    }

    /// Generator with the default alphabet and weights
    pub fn with_size(width: i32, height: i32) -> Result<Self> {
        Self::new(GeneratorConfig {
            width,
            height,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.config.width
    }

    pub fn height(&self) -> i32 {
        self.config.height
    }

    /// The held scene
    pub fn scene(&self) -> &SceneGrid {
        &self.scene
    }

    /// Replace the held scene with an externally built one of the same shape
    pub fn load_scene(&mut self, scene: SceneGrid) -> Result<()> {
        if scene.width() != self.width() || scene.height() != self.height() {
            return Err(Error::Validation(format!(
                "Scene is {}x{}, generator is {}x{}",
                scene.width(),
                scene.height(),
                self.width(),
                self.height()
            )));
        }
        self.scene = scene;
        Ok(())
    }

    /// Draw one character: with a chance picked at random from the weight
    /// table, a random alphabet character, otherwise blank
    pub fn generate_tile(&mut self) -> char {
        let roll = self.rng.gen::<f64>();
        let chance = self.config.weights.choose(&mut self.rng).copied().unwrap_or(0.0);

        if roll < chance {
            self.config
                .chars
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(self.config.blank)
        } else {
            self.config.blank
        }
    }

    /// A fresh grid of independently drawn tiles
    pub fn generate_scene(&mut self) -> SceneGrid {
        let mut scene = Grid::new(self.width(), self.height(), self.config.blank);
        for y in 0..self.height() {
            for x in 0..self.width() {
                let tile = self.generate_tile();
                scene.set(Position::new(x, y), tile);
            }
        }
        scene
    }

    /// Replace the held scene with a freshly generated one
    pub fn regenerate(&mut self) {
        self.scene = self.generate_scene();
        debug!(
            "Generated {}x{} scene",
            self.scene.width(),
            self.scene.height()
        );
    }

    /// Run passes over the held scene, in order
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn apply(&mut self, passes: &[PostProcess]) {
        for pass in passes {
            match *pass {
                PostProcess::ClusterCharacters(thing) => self.cluster_characters(thing),
                PostProcess::ClusterByMajority => self.cluster_by_majority(),
                PostProcess::RemoveStrays => {
                    let removed = self.remove_strays();
                    debug!("Removed {} strays", removed);
                }
            }
        }
    }

    /// Give every `thing` cell a chance to spread into neighbouring blanks.
    /// Cells converted earlier in the sweep can spread again later in it.
    pub fn cluster_characters(&mut self, thing: char) {
        let mut grown = 0;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let pos = Position::new(x, y);
                if self.scene.get(pos) == Some(&thing)
                    && self.rng.gen::<f64>() < self.config.cluster_chance
                {
                    grown += self.cluster_neighbors(pos, thing);
                }
            }
        }
        debug!("Clustered {:?}: {} cells converted", thing, grown);
    }

    /// Turn every blank cell in the 3x3 window around `pos` into `thing`.
    /// Returns how many cells changed.
    pub fn cluster_neighbors(&mut self, pos: Position, thing: char) -> usize {
        let blank = self.config.blank;
        let mut converted = 0;

        for neighbor in pos.window() {
            if let Some(cell) = self.scene.get_mut(neighbor) {
                if *cell == blank && thing != blank {
                    *cell = thing;
                    converted += 1;
                }
            }
        }

        trace!("Cluster at {} converted {} cells to {:?}", pos, converted, thing);
        converted
    }

    /// Blank every interior cell whose left and right neighbours are blank.
    /// Works along rows only. Returns how many cells changed.
    pub fn remove_strays(&mut self) -> usize {
        let blank = self.config.blank;
        let mut removed = 0;

        for y in 0..self.height() {
            let Some(row) = self.scene.row_mut(y) else {
                continue;
            };
            for x in 1..row.len().saturating_sub(1) {
                if row[x - 1] == blank && row[x + 1] == blank && row[x] != blank {
                    row[x] = blank;
                    removed += 1;
                }
            }
        }

        removed
    }

    /// Grow the character that dominates the window around `pos`.
    ///
    /// Blank holds the lead to begin with; alphabet characters are then tried
    /// from last to first and take the lead only with a strictly higher count.
    /// Returns the winning character.
    pub fn cluster_plants(&mut self, pos: Position) -> char {
        let blank = self.config.blank;
        let mut winner = blank;
        let mut best = self.surrounding_char_count(pos, blank);

        for &c in self.config.chars.iter().rev().filter(|&&c| c != blank) {
            let count = self.surrounding_char_count(pos, c);
            if count > best {
                winner = c;
                best = count;
            }
        }

        self.cluster_neighbors(pos, winner);
        winner
    }

    /// Run `cluster_plants` on every cell, row by row
    pub fn cluster_by_majority(&mut self) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.cluster_plants(Position::new(x, y));
            }
        }
    }

    /// Count cells equal to `count_char` in the 3x3 window around `pos`,
    /// the centre included
    pub fn surrounding_char_count(&self, pos: Position, count_char: char) -> usize {
        pos.window()
            .filter(|&p| self.scene.get(p) == Some(&count_char))
            .count()
    }

    /// The held scene in the default dump layout
    pub fn render_dump(&self) -> Result<String> {
        render_dump(&self.scene, &DumpLayout::default())
    }

    /// Write the held scene in the default dump layout
    pub fn save_world_to_file(&self, path: &Path) -> Result<()> {
        self.save_with_layout(path, &DumpLayout::default())
    }

    pub fn save_with_layout(&self, path: &Path, layout: &DumpLayout) -> Result<()> {
        write_dump(path, &self.scene, layout)
    }
}

impl fmt::Display for SceneGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.scene.rows() {
            let line: Vec<String> = row.iter().map(char::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
