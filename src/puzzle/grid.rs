//! Grid representation for Hashiwokakero puzzles

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular puzzle grid. Cells hold 0 for water or 1-8 for an island
/// requiring that many bridge endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid from a 2D array of cell values
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let height = rows.len();
        let width = rows[0].len();

        if width == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
            for (j, &value) in row.iter().enumerate() {
                if value > 8 {
                    anyhow::bail!(
                        "Cell ({}, {}) has value {}, islands require 1-8 bridges",
                        i,
                        j,
                        value
                    );
                }
            }
        }

        let cells: Vec<u8> = rows.into_iter().flatten().collect();

        Ok(Self {
            rows: height,
            cols: width,
            cells,
        })
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Cell value at coordinates; out-of-bounds reads as water
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row < self.rows && col < self.cols {
            self.cells[self.index(row, col)]
        } else {
            0
        }
    }

    /// Check if position (row, col) holds an island
    pub fn is_island(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.get(row, col) > 0
    }

    /// Check if position (row, col) is an in-bounds empty cell
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.get(row, col) == 0
    }

    /// All island positions with their values, in row-major scan order
    pub fn island_cells(&self) -> Vec<(usize, usize, u8)> {
        let mut islands = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let value = self.get(row, col);
                if value > 0 {
                    islands.push((row, col, value));
                }
            }
        }
        islands
    }

    /// Count islands in the grid
    pub fn island_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell > 0).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.get(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
