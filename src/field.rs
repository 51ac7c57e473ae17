//! Playfield: grid of cells, collision test, freezing and line resolution.

use crate::brick::ColorKey;
use std::collections::VecDeque;

/// Single cell: either empty or occupied by a frozen brick of the given colour key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(ColorKey),
}

impl Cell {
    #[inline]
    pub fn is_occupied(self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    #[inline]
    pub fn color_key(self) -> Option<ColorKey> {
        match self {
            Self::Empty => None,
            Self::Occupied(key) => Some(key),
        }
    }
}

/// Grid of cells. y=0 is top; rows are stored [0..rows].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    columns: usize,
    rows: usize,
    /// cells[y][x]; cells[0] is the top row.
    cells: VecDeque<Vec<Cell>>,
}

impl Field {
    pub fn new(columns: u16, rows: u16) -> Self {
        let (columns, rows) = (columns as usize, rows as usize);
        Self {
            columns,
            rows,
            cells: (0..rows).map(|_| vec![Cell::Empty; columns]).collect(),
        }
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    /// Every cell as (x, y, cell), row by row from the top.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &cell)| (x, y, cell)))
    }

    /// True if any cell lies outside the grid or on an occupied cell.
    pub fn collides<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        cells.into_iter().any(|(x, y)| {
            if x < 0 || y < 0 {
                return true;
            }
            self.get(x as usize, y as usize)
                .is_none_or(Cell::is_occupied)
        })
    }

    /// Marks each cell occupied with `color_key`. Cells off the grid are skipped.
    pub fn freeze<I>(&mut self, cells: I, color_key: ColorKey)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        for (x, y) in cells {
            if x >= 0 && y >= 0 {
                self.set(x as usize, y as usize, Cell::Occupied(color_key));
            }
        }
    }

    #[inline]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells
            .get(y)
            .is_some_and(|row| row.iter().all(|c| c.is_occupied()))
    }

    /// Clears every full row in one top-to-bottom sweep and returns how many were cleared.
    ///
    /// Clearing row `y` moves rows `0..y` down by one and leaves row 0 empty; rows
    /// below `y` are untouched, so the sweep visits each starting row exactly once.
    pub fn resolve_lines(&mut self) -> u32 {
        let mut lines = 0;
        for y in 0..self.rows {
            if self.is_row_full(y) {
                self.cells.remove(y);
                self.cells.push_front(vec![Cell::Empty; self.columns]);
                lines += 1;
            }
        }
        lines
    }
}
