//! Core type definitions shared by the generator and the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position in a grid. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// `add` that returns `None` instead of overflowing
    pub fn checked_add(&self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Whether the position lies inside `[0, width) x [0, height)`
    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.x) && (0..height).contains(&self.y)
    }

    /// Positions of the inclusive 3x3 window centred here, centre included.
    /// Out-of-range positions are not filtered; offsets past the `i32` range are skipped.
    pub fn window(&self) -> impl Iterator<Item = Position> {
        let centre = *self;
        (-1..=1).flat_map(move |dy| (-1..=1).filter_map(move |dx| centre.checked_add(dx, dy)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
