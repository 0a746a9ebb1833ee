//! The world: a fixed grid of scene containers.

use crate::generator::SceneGenerator;
use serde::{Deserialize, Serialize};
use tilescape_core::{Grid, PostProcess, Position, Result, SceneGrid, WorldConfig};
use tracing::{debug, info, instrument, warn};

/// Every scene generated or added for one world cell, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub contents: Vec<SceneGrid>,
}

/// Fixed-size grid of scenes plus the generator that fills them
pub struct World {
    cells: Grid<Scene>,
    generator: SceneGenerator,
}

impl World {
    /// World of `width x height` cells whose scenes are `width x height` characters
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_config(WorldConfig {
            width,
            height,
            ..Default::default()
        })
    }

    pub fn with_config(config: WorldConfig) -> Result<Self> {
        let generator = SceneGenerator::new(config.generator_config())?;
        info!("Created {}x{} world", config.width, config.height);

        Ok(Self {
            cells: Grid::new(config.width, config.height, Scene::default()),
            generator,
        })
    }

    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    pub fn generator(&self) -> &SceneGenerator {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut SceneGenerator {
        &mut self.generator
    }

    /// Snapshot of every cell's contents, `height` rows of `width` cells
    pub fn get_world(&self) -> Vec<Vec<Vec<SceneGrid>>> {
        self.cells
            .rows()
            .map(|row| row.iter().map(|scene| scene.contents.clone()).collect())
            .collect()
    }

    /// Contents of cell `(x, y)`, `None` when out of range
    pub fn get_scene(&self, x: i32, y: i32) -> Option<&[SceneGrid]> {
        self.cells
            .get(Position::new(x, y))
            .map(|scene| scene.contents.as_slice())
    }

    /// Append a freshly generated scene to cell `(x, y)`.
    /// Returns false, generating nothing, when the cell is out of range.
    pub fn generate_scene(&mut self, x: i32, y: i32) -> bool {
        if !self.cells.contains(Position::new(x, y)) {
            warn!("Cannot generate scene at ({}, {}): outside world", x, y);
            return false;
        }

        let contents = self.generator.generate_scene();
        self.add_scene_contents(x, y, contents)
    }

    /// Regenerate the generator's held scene, run `passes` over it and append a
    /// copy to cell `(x, y)`
    pub fn generate_processed_scene(&mut self, x: i32, y: i32, passes: &[PostProcess]) -> bool {
        if !self.cells.contains(Position::new(x, y)) {
            warn!("Cannot generate scene at ({}, {}): outside world", x, y);
            return false;
        }

        self.generator.regenerate();
        self.generator.apply(passes);
        let contents = self.generator.scene().clone();
        self.add_scene_contents(x, y, contents)
    }

    /// Append a scene to cell `(x, y)`. Out of range is a no-op returning false.
    pub fn add_scene_contents(&mut self, x: i32, y: i32, contents: SceneGrid) -> bool {
        match self.cells.get_mut(Position::new(x, y)) {
            Some(scene) => {
                scene.contents.push(contents);
                debug!(
                    "Cell ({}, {}) now holds {} scenes",
                    x,
                    y,
                    scene.contents.len()
                );
                true
            }
            None => {
                warn!("Dropping scene for ({}, {}): outside world", x, y);
                false
            }
        }
    }

    /// Append one processed scene to every cell, row by row
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn generate_all(&mut self, passes: &[PostProcess]) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.generate_processed_scene(x, y, passes);
            }
        }
        info!("Filled {} cells", self.width() * self.height());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tilescape_core::{Error, GeneratorConfig};

    fn seeded_world(width: i32, height: i32) -> World {
        World::with_config(WorldConfig {
            width,
            height,
            generator: GeneratorConfig {
                seed: Some(17),
                ..Default::default()
            },
        })
        .unwrap()
    }

    #[test]
    fn test_blank_world() {
        let world = seeded_world(2, 5);
        let snapshot = world.get_world();
        assert_eq!(snapshot.len(), 5);
        assert!(snapshot.iter().all(|row| row.len() == 2));
        assert!(snapshot.iter().flatten().all(Vec::is_empty));
    }

    #[test]
    fn test_generate_twice_accumulates() {
        let mut world = seeded_world(2, 3);
        assert!(world.generate_scene(0, 0));
        assert!(world.generate_scene(0, 0));

        let contents = world.get_scene(0, 0).unwrap();
        assert_eq!(contents.len(), 2);
        for grid in contents {
            assert_eq!(grid.height(), 3);
            assert_eq!(grid.width(), 2);
        }
        assert_eq!(world.get_scene(1, 0).unwrap().len(), 0);
    }

    #[test]
    fn test_out_of_range_is_absent() {
        let mut world = seeded_world(2, 3);
        assert!(world.get_scene(2, 0).is_none());
        assert!(world.get_scene(0, 3).is_none());
        assert!(world.get_scene(-1, 0).is_none());

        let before = world.get_world();
        assert!(!world.add_scene_contents(5, 5, Grid::new(2, 3, 'M')));
        assert!(!world.generate_scene(-1, 1));
        assert!(!world.generate_processed_scene(0, 9, &[PostProcess::RemoveStrays]));
        assert_eq!(world.get_world(), before);
    }

    #[test]
    fn test_add_external_contents() {
        let mut world = seeded_world(2, 3);
        let grid = Grid::from_rows(vec![vec!['M', ' '], vec![' ', 'T']]).unwrap();
        assert!(world.add_scene_contents(1, 2, grid.clone()));
        assert_eq!(world.get_scene(1, 2), Some(&[grid.clone()][..]));
        assert_eq!(world.get_world()[2][1], vec![grid]);
    }

    #[test]
    fn test_generate_processed_scene_copies_held_scene() {
        let mut world = seeded_world(4, 4);
        assert!(world.generate_processed_scene(3, 3, &[PostProcess::RemoveStrays]));
        let stored = &world.get_scene(3, 3).unwrap()[0];
        assert_eq!(stored, world.generator().scene());
    }

    #[test]
    fn test_generate_all() {
        let mut world = seeded_world(2, 5);
        world.generate_all(&[PostProcess::ClusterCharacters('M')]);
        world.generate_all(&[]);
        for row in world.get_world() {
            for contents in row {
                assert_eq!(contents.len(), 2);
            }
        }
    }

    #[test]
    fn test_invalid_world() {
        assert!(matches!(World::new(0, 3), Err(Error::Validation(_))));
    }

    proptest! {
        #[test]
        fn prop_generate_appends_one(x in -3i32..6, y in -3i32..6) {
            let mut world = seeded_world(3, 3);
            let before = world.get_scene(x, y).map(<[SceneGrid]>::len);
            let generated = world.generate_scene(x, y);
            let after = world.get_scene(x, y).map(<[SceneGrid]>::len);

            match before {
                Some(len) => {
                    prop_assert!(generated);
                    prop_assert_eq!(after, Some(len + 1));
                }
                None => {
                    prop_assert!(!generated);
                    prop_assert_eq!(after, None);
                }
            }
        }
    }
}
