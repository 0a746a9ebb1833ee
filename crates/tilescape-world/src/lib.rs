//! Scene generation and the world of scenes.
//!
//! A [`World`] is a fixed grid of cells, each holding the scenes generated for it.
//! Scenes come from a [`SceneGenerator`], which fills a character grid from a
//! weighted alphabet and can post-process it into clumps.

pub mod dump;
pub mod generator;
pub mod world;

pub use dump::{render_dump, write_dump};
pub use generator::SceneGenerator;
pub use world::{Scene, World};
