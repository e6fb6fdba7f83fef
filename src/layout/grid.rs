//! The fixed-size planting plot

use super::types::{Cell, CellTag, Region};

/// Rows and columns in a plot
pub const GRID_SIZE: usize = 10;

/// A 10×10 matrix of cell tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cells: [[CellTag; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Create a grid with every cell `Empty`
    pub fn new() -> Self {
        Self {
            cells: [[CellTag::Empty; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn get(&self, cell: Cell) -> CellTag {
        self.cells[cell.row][cell.col]
    }

    /// Overwrite one cell, returning the tag it held before
    pub fn set(&mut self, cell: Cell, tag: CellTag) -> CellTag {
        std::mem::replace(&mut self.cells[cell.row][cell.col], tag)
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellTag; GRID_SIZE]> {
        self.cells.iter()
    }

    /// Every cell with its tag, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellTag)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, tag)| (Cell::new(r, c), *tag))
        })
    }

    /// True iff every cell in `region` is empty or already carries `tag`
    pub fn can_place(&self, region: &Region, tag: CellTag) -> bool {
        region.cells().all(|cell| {
            let current = self.get(cell);
            current.is_empty() || current == tag
        })
    }

    /// Overwrite every cell in `region`
    pub fn place(&mut self, region: &Region, tag: CellTag) {
        for cell in region.cells() {
            self.set(cell, tag);
        }
    }

    /// Write `tag` only into an empty cell
    pub fn place_if_empty(&mut self, cell: Cell, tag: CellTag) -> bool {
        if self.get(cell).is_empty() {
            self.set(cell, tag);
            true
        } else {
            false
        }
    }

    /// Write `tag` into a cell that is empty or already carries it
    pub fn place_if_compatible(&mut self, cell: Cell, tag: CellTag) -> bool {
        let current = self.get(cell);
        if current.is_empty() || current == tag {
            self.set(cell, tag);
            true
        } else {
            false
        }
    }

    /// Convert all remaining empty cells to `Unusable`
    pub fn finalize(&mut self) {
        for row in self.cells.iter_mut() {
            for tag in row.iter_mut() {
                if tag.is_empty() {
                    *tag = CellTag::Unusable;
                }
            }
        }
    }

    /// Number of cells holding exactly `tag`
    pub fn count(&self, tag: CellTag) -> usize {
        self.iter().filter(|(_, t)| *t == tag).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
