//! Undo log for backtracking over grid writes.
//!
//! Every logged write records the cell and the tag it replaced. Checkpoints
//! mark positions in the log; rewinding to a checkpoint restores the recorded
//! tags in reverse order, so a search branch can be undone without copying
//! the grid.

use super::grid::Grid;
use super::types::{Cell, CellTag};

#[derive(Debug, Clone, Copy)]
struct TrailEntry {
    cell: Cell,
    previous: CellTag,
}

/// Write log with nested checkpoints
#[derive(Debug, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
    checkpoints: Vec<usize>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the current position; returns the checkpoint depth
    pub fn checkpoint(&mut self) -> usize {
        self.checkpoints.push(self.entries.len());
        self.checkpoints.len()
    }

    /// Write `tag` into `cell`, recording the previous tag
    pub fn write(&mut self, grid: &mut Grid, cell: Cell, tag: CellTag) {
        let previous = grid.set(cell, tag);
        self.entries.push(TrailEntry { cell, previous });
    }

    /// Undo every write since the most recent checkpoint.
    ///
    /// Returns false when there is no checkpoint to rewind to.
    pub fn rewind(&mut self, grid: &mut Grid) -> bool {
        let Some(mark) = self.checkpoints.pop() else {
            return false;
        };
        while self.entries.len() > mark {
            if let Some(entry) = self.entries.pop() {
                grid.set(entry.cell, entry.previous);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Symbol;

    #[test]
    fn test_rewind_restores_previous_tags() {
        let mut grid = Grid::new();
        let mut trail = Trail::new();
        let cell = Cell::new(2, 2);

        trail.checkpoint();
        trail.write(&mut grid, cell, CellTag::Footprint);
        trail.checkpoint();
        trail.write(&mut grid, cell, CellTag::Companion(Symbol::nth(3)));
        assert_eq!(grid.get(cell), CellTag::Companion(Symbol::nth(3)));

        assert!(trail.rewind(&mut grid));
        assert_eq!(grid.get(cell), CellTag::Footprint);
        assert!(trail.rewind(&mut grid));
        assert_eq!(grid, Grid::new());
        assert!(trail.is_empty());
    }

    #[test]
    fn test_rewind_without_checkpoint() {
        let mut grid = Grid::new();
        let mut trail = Trail::new();
        assert!(!trail.rewind(&mut grid));
        assert_eq!(trail.depth(), 0);
    }

    #[test]
    fn test_nested_depth() {
        let mut grid = Grid::new();
        let mut trail = Trail::new();
        assert_eq!(trail.checkpoint(), 1);
        trail.write(&mut grid, Cell::new(0, 0), CellTag::Footprint);
        assert_eq!(trail.checkpoint(), 2);
        trail.write(&mut grid, Cell::new(0, 1), CellTag::Footprint);
        trail.write(&mut grid, Cell::new(0, 2), CellTag::Footprint);
        assert_eq!(trail.len(), 3);
        trail.rewind(&mut grid);
        assert_eq!(trail.len(), 1);
        assert_eq!(grid.count(CellTag::Footprint), 1);
    }
}
