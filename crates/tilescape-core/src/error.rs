//! Error types for scene generation and tile rendering.

use crate::types::Position;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No tile mapped for character {ch:?} at {position}")]
    UnmappedChar { ch: char, position: Position },

    #[error("Image error for {}: {message}", .path.display())]
    Image { path: PathBuf, message: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
