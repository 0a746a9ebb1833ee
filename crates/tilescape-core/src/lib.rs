//! Core types and utilities for the Tilescape scene generator.

pub mod types;
pub mod grid;
pub mod config;
pub mod error;

pub use error::{Error, Result};
pub use types::*;
pub use grid::*;
pub use config::*;
