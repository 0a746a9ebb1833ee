//! Dense 2D grid used for both scene characters and tile indices.

use crate::error::{Error, Result};
use crate::types::Position;
use serde::{Deserialize, Serialize};

/// A scene: one generated grid of characters
pub type SceneGrid = Grid<char>;

/// Tile indices derived from a scene
pub type TileGrid = Grid<usize>;

/// A bounded, row-major 2D grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![fill; cell_count(width, height)],
        }
    }

    /// Build a grid from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(Error::Validation(format!(
                "Row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }

        Ok(Self {
            width: width as i32,
            height: height as i32,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.in_bounds(self.width, self.height)
    }

    /// Get the cell at a position, `None` when out of range
    pub fn get(&self, pos: Position) -> Option<&T> {
        let index = self.pos_to_index(pos)?;
        Some(&self.cells[index])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        let index = self.pos_to_index(pos)?;
        Some(&mut self.cells[index])
    }

    /// Set the cell at a position. Returns false (and changes nothing) when out of range.
    pub fn set(&mut self, pos: Position, value: T) -> bool {
        match self.get_mut(pos) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Iterator over rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks() rejects a zero chunk size
        self.cells.chunks(self.width.max(1) as usize)
    }

    pub fn row_mut(&mut self, y: i32) -> Option<&mut [T]> {
        if !(0..self.height).contains(&y) {
            return None;
        }
        let width = self.width as usize;
        let start = y as usize * width;
        Some(&mut self.cells[start..start + width])
    }

    /// Iterator over all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), cell))
    }

    /// Build a same-shaped grid by mapping every cell, stopping at the first error
    pub fn try_map<U, E, F>(&self, mut f: F) -> std::result::Result<Grid<U>, E>
    where
        F: FnMut(Position, &T) -> std::result::Result<U, E>,
    {
        let cells = self
            .iter()
            .map(|(pos, cell)| f(pos, cell))
            .collect::<std::result::Result<Vec<_>, E>>()?;

        Ok(Grid {
            width: self.width,
            height: self.height,
            cells,
        })
    }

    fn pos_to_index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }
}

/// Cells in a `width x height` grid, computed in `usize`. Saturates rather
/// than wrapping to a short grid.
fn cell_count(width: i32, height: i32) -> usize {
    (width.max(0) as usize).saturating_mul(height.max(0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 4, ' ');
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.cells.len(), 40);
        assert_eq!(grid.rows().count(), 4);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::new(2, 3, ' ');
        assert_eq!(grid.get(Position::new(-1, 0)), None);
        assert_eq!(grid.get(Position::new(2, 0)), None);
        assert!(!grid.set(Position::new(0, 3), 'M'));
        assert!(grid.iter().all(|(_, &c)| c == ' '));
    }

    #[test]
    fn test_from_rows_round_trip_shape() {
        let rows = vec![vec!['M', ' '], vec![' ', 'T']];
        let grid = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(Position::new(1, 1)), Some(&'T'));
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = Grid::from_rows(vec![vec!['M', ' '], vec!['T']]);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_empty_grid_has_no_rows() {
        let grid: Grid<char> = Grid::from_rows(Vec::new()).unwrap();
        assert_eq!(grid.rows().count(), 0);
        assert_eq!(grid.positions().count(), 0);
    }

    #[test]
    fn test_try_map_keeps_shape() {
        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let doubled: Grid<i32> = grid.try_map(|_, v| Ok::<_, ()>(v * 2)).unwrap();
        assert_eq!(doubled.to_rows(), vec![vec![2, 4, 6], vec![8, 10, 12]]);

        let failed = grid.try_map(|pos, v| if *v == 5 { Err(pos) } else { Ok(*v) });
        assert_eq!(failed, Err(Position::new(1, 1)));
    }

    #[test]
    fn test_cell_count_past_i32() {
        assert!(cell_count(100_000, 100_000) > i32::MAX as usize);
        assert_eq!(cell_count(i32::MAX, 2), (i32::MAX as usize).saturating_mul(2));
        assert_eq!(cell_count(-3, 7), 0);
    }

    #[test]
    fn test_wide_grid_indexing() {
        // 70_000 * 70_000 overflows i32; a one-row grid that wide still indexes correctly
        let mut grid = Grid::new(70_000, 1, ' ');
        assert!(grid.set(Position::new(69_999, 0), 'T'));
        assert_eq!(grid.get(Position::new(69_999, 0)), Some(&'T'));
        assert_eq!(grid.positions().last(), Some(Position::new(69_999, 0)));
        assert_eq!(grid.get(Position::new(0, 70_000)), None);
    }

    #[test]
    fn test_row_mut() {
        let mut grid = Grid::new(3, 2, ' ');
        grid.row_mut(1).unwrap()[2] = 'T';
        assert_eq!(grid.get(Position::new(2, 1)), Some(&'T'));
        assert!(grid.row_mut(2).is_none());
    }
}
