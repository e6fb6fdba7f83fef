//! Backtracking placer for 2×2 footprints that need 3×3 companions.
//!
//! Each footprint claims two non-overlapping 3×3 companion blocks that touch
//! it and six filler cells around it. The search scans candidate anchors in
//! row-major order and recurses depth-first; grid writes go through a
//! [`Trail`] so each branch is undone in place.
//!
//! The target footprint count is probed from [`MAX_TARGET`] down to 1 and the
//! first satisfiable target wins. That range, the 1-cell touch distance and
//! the per-footprint block and filler counts are fixed constants of the
//! layout, not derived from geometry.

use tracing::{debug, trace};

use super::grid::{Grid, GRID_SIZE};
use super::symbols::SymbolTable;
use super::trail::Trail;
use super::types::{Cell, CellTag, FootprintSize, Placement, Region, Symbol};

/// Highest footprint count the search attempts
pub const MAX_TARGET: usize = 4;

/// Filler cells each footprint needs around it
pub const FILLERS_PER_FOOTPRINT: usize = 6;

const FOOTPRINT_SIDE: isize = 2;
const BLOCK_SIDE: isize = 3;

/// A block counts as touching when it meets the footprint grown by this much
const TOUCH_DISTANCE: isize = 1;

/// Top-left positions per axis where a 2×2 footprint fits
const ANCHOR_SPAN: usize = GRID_SIZE - 1;

/// Anchor tried first for a destructive item
const CENTER_ANCHOR: Cell = Cell { row: 4, col: 4 };

/// Cells around a 2×2 footprint: top row, bottom row, then the sides
const FILLER_OFFSETS: [(isize, isize); 12] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (-1, 2),
    (2, -1),
    (2, 0),
    (2, 1),
    (2, 2),
    (0, -1),
    (0, 2),
    (1, -1),
    (1, 2),
];

/// Place as many footprints as the search can satisfy.
///
/// A destructive item only ever probes a single footprint, scanning from the
/// center anchor. When no target is satisfiable the grid is left untouched
/// and the placement is empty.
pub fn place(grid: &mut Grid, symbols: &SymbolTable, destructive: bool) -> Placement {
    let block = symbols
        .of_size(FootprintSize::Three)
        .next()
        .map(|e| e.symbol)
        .unwrap_or(Symbol::UNKNOWN);
    let filler = symbols
        .of_size(FootprintSize::One)
        .next()
        .or_else(|| {
            symbols
                .entries()
                .iter()
                .find(|e| e.size != FootprintSize::Three && e.quantity > 0)
        })
        .map(|e| e.symbol)
        .unwrap_or(Symbol::UNKNOWN);

    let max_target = if destructive { 1 } else { MAX_TARGET };
    let anchors = anchor_order(destructive);
    for target in (1..=max_target).rev() {
        let mut search = Search::new(*grid, block, filler, anchors.clone());
        if let Some(solution) = search.solve(target, 0) {
            debug!(footprints = target, %block, %filler, "search satisfied target");
            *grid = solution.grid;
            return solution.placement;
        }
        debug!(footprints = target, "search target unsatisfiable");
    }
    Placement::default()
}

/// Candidate footprint anchors, row-major, with the center moved to the front
/// for a destructive item
fn anchor_order(destructive: bool) -> Vec<Cell> {
    let row_major =
        (0..ANCHOR_SPAN * ANCHOR_SPAN).map(|i| Cell::new(i / ANCHOR_SPAN, i % ANCHOR_SPAN));
    if destructive {
        std::iter::once(CENTER_ANCHOR)
            .chain(row_major.filter(|cell| *cell != CENTER_ANCHOR))
            .collect()
    } else {
        row_major.collect()
    }
}

/// Block offsets relative to a footprint's top-left, row-major.
///
/// A block qualifies when it does not overlap the footprint but meets the
/// footprint expanded by [`TOUCH_DISTANCE`].
fn block_offsets() -> Vec<(isize, isize)> {
    let meets = |start: isize, low: isize, high: isize| start <= high && start + BLOCK_SIDE > low;
    let overlaps = |d: isize| meets(d, 0, FOOTPRINT_SIDE - 1);
    let touches = |d: isize| meets(d, -TOUCH_DISTANCE, FOOTPRINT_SIDE - 1 + TOUCH_DISTANCE);

    let reach = -BLOCK_SIDE..FOOTPRINT_SIDE + 1;
    let mut offsets = Vec::new();
    for dr in reach.clone() {
        for dc in reach.clone() {
            if !(overlaps(dr) && overlaps(dc)) && touches(dr) && touches(dc) {
                offsets.push((dr, dc));
            }
        }
    }
    offsets
}

struct Solution {
    grid: Grid,
    placement: Placement,
}

struct Search {
    grid: Grid,
    trail: Trail,
    block: CellTag,
    filler: CellTag,
    anchors: Vec<Cell>,
    offsets: Vec<(isize, isize)>,
    placement: Placement,
}

impl Search {
    fn new(grid: Grid, block: Symbol, filler: Symbol, anchors: Vec<Cell>) -> Self {
        Self {
            grid,
            trail: Trail::new(),
            block: CellTag::Companion(block),
            filler: CellTag::Companion(filler),
            anchors,
            offsets: block_offsets(),
            placement: Placement::default(),
        }
    }

    /// Place `remaining` more footprints using anchors from `start` onward
    fn solve(&mut self, remaining: usize, start: usize) -> Option<Solution> {
        if remaining == 0 {
            return Some(Solution {
                grid: self.grid,
                placement: self.placement.clone(),
            });
        }

        for index in start..self.anchors.len() {
            let anchor = self.anchors[index];
            let (row, col) = (anchor.row as isize, anchor.col as isize);
            let Some(footprint) = Region::at(row, col, FootprintSize::Two.side()) else {
                continue;
            };
            if !footprint.cells().all(|cell| self.grid.get(cell).is_empty()) {
                continue;
            }

            self.trail.checkpoint();
            for cell in footprint.cells() {
                self.trail.write(&mut self.grid, cell, CellTag::Footprint);
            }
            self.placement.footprints.push(footprint);

            let blocks = self.block_candidates(&footprint);
            trace!(index, candidates = blocks.len(), "footprint placed");
            for (i, first) in blocks.iter().enumerate() {
                for second in &blocks[i + 1..] {
                    if first.intersects(second) {
                        continue;
                    }
                    if let Some(solution) = self.try_blocks(&footprint, *first, *second, remaining, index) {
                        return Some(solution);
                    }
                }
            }

            self.placement.footprints.pop();
            self.trail.rewind(&mut self.grid);
        }
        None
    }

    /// Claim a pair of blocks plus fillers for `footprint`, then recurse
    fn try_blocks(
        &mut self,
        footprint: &Region,
        first: Region,
        second: Region,
        remaining: usize,
        index: usize,
    ) -> Option<Solution> {
        self.trail.checkpoint();
        for cell in first.cells().chain(second.cells()) {
            self.trail.write(&mut self.grid, cell, self.block);
        }

        let mut found = None;
        if self.fill_neighbors(footprint) {
            self.placement.companion_blocks.extend([first, second]);
            found = self.solve(remaining - 1, index + 1);
            let kept = self.placement.companion_blocks.len() - 2;
            self.placement.companion_blocks.truncate(kept);
        }

        self.trail.rewind(&mut self.grid);
        found
    }

    /// In-bounds 3×3 regions touching `footprint` that could hold the block symbol
    fn block_candidates(&self, footprint: &Region) -> Vec<Region> {
        let (row, col) = (footprint.row as isize, footprint.col as isize);
        self.offsets
            .iter()
            .filter_map(|&(dr, dc)| Region::at(row + dr, col + dc, BLOCK_SIDE as usize))
            .filter(|region| self.grid.can_place(region, self.block))
            .collect()
    }

    /// Top up the footprint's neighbors to [`FILLERS_PER_FOOTPRINT`] filler cells.
    ///
    /// Existing filler cells count first. Open cells are taken from the end of
    /// the neighbor order. Returns false without writing when there is not
    /// enough room.
    fn fill_neighbors(&mut self, footprint: &Region) -> bool {
        let anchor = footprint.top_left();
        let neighbors: Vec<Cell> = FILLER_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| anchor.offset(dr, dc))
            .collect();

        let present = neighbors
            .iter()
            .filter(|cell| self.grid.get(**cell) == self.filler)
            .count();
        let open: Vec<Cell> = neighbors
            .into_iter()
            .filter(|cell| self.grid.get(*cell).is_empty())
            .collect();

        let needed = FILLERS_PER_FOOTPRINT.saturating_sub(present);
        if needed > open.len() {
            return false;
        }
        for &cell in open.iter().rev().take(needed) {
            self.trail.write(&mut self.grid, cell, self.filler);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::ItemSpec;

    fn synthetic() -> ItemSpec {
        ItemSpec::new(FootprintSize::Two)
            .with_companion("SHADE", 2, FootprintSize::Three)
            .with_companion("TWIG", 6, FootprintSize::One)
    }

    #[test]
    fn test_block_offsets() {
        let offsets = block_offsets();
        assert_eq!(offsets.len(), 20);
        assert_eq!(offsets.first(), Some(&(-3, -3)));
        assert_eq!(offsets.last(), Some(&(2, 2)));
        // Overlapping placements are excluded
        assert!(!offsets.contains(&(-1, -1)));
        assert!(!offsets.contains(&(1, -2)));
        assert!(offsets.contains(&(-3, 0)));
        assert!(offsets.contains(&(2, -2)));
    }

    #[test]
    fn test_search_reaches_max_target() {
        let spec = synthetic();
        let symbols = SymbolTable::assign(&spec.companions);
        let mut grid = Grid::new();
        let placement = place(&mut grid, &symbols, false);

        assert_eq!(placement.footprints.len(), MAX_TARGET);
        assert_eq!(placement.companion_blocks.len(), 2 * MAX_TARGET);
        assert_eq!(grid.count(CellTag::Footprint), 4 * MAX_TARGET);
        assert_eq!(grid.count(CellTag::Companion(Symbol::UNKNOWN)), 0);
    }

    #[test]
    fn test_search_destructive_places_one() {
        let spec = synthetic().with_destructive(true);
        let symbols = SymbolTable::assign(&spec.companions);
        let mut grid = Grid::new();
        let placement = place(&mut grid, &symbols, true);

        assert_eq!(placement.footprints.len(), 1);
        assert_eq!(placement.companion_blocks.len(), 2);
    }

    #[test]
    fn test_destructive_footprint_is_centered() {
        let spec = synthetic().with_destructive(true);
        let symbols = SymbolTable::assign(&spec.companions);
        let mut grid = Grid::new();
        let placement = place(&mut grid, &symbols, true);

        assert_eq!(placement.footprints[0].top_left(), CENTER_ANCHOR);
        assert_eq!(
            placement.companion_blocks,
            vec![Region::at(1, 1, 3).unwrap(), Region::at(1, 4, 3).unwrap()]
        );
        // Fillers come from the end of the neighbor order
        assert_eq!(grid.get(Cell::new(5, 6)), CellTag::Companion(Symbol::nth(1)));
        assert_eq!(grid.get(Cell::new(6, 3)), CellTag::Empty);
    }

    #[test]
    fn test_first_footprint_is_earliest_anchor() {
        let mut search = Search::new(
            Grid::new(),
            Symbol::nth(0),
            Symbol::nth(1),
            anchor_order(false),
        );
        let solution = search.solve(1, 0).unwrap();

        // Blocks touching a corner footprint would overlap each other
        assert_eq!(solution.placement.footprints[0].top_left(), Cell::new(0, 3));
        assert_eq!(
            solution.placement.companion_blocks,
            vec![Region::at(2, 0, 3).unwrap(), Region::at(2, 5, 3).unwrap()]
        );
        assert_eq!(solution.grid.get(Cell::new(0, 2)), CellTag::Companion(Symbol::nth(1)));
    }

    #[test]
    fn test_anchor_order() {
        let plain = anchor_order(false);
        let centered = anchor_order(true);
        assert_eq!(plain.len(), 81);
        assert_eq!(centered.len(), 81);
        assert_eq!(plain[0], Cell::new(0, 0));
        assert_eq!(centered[0], CENTER_ANCHOR);
        assert_eq!(centered[1], Cell::new(0, 0));
    }

    #[test]
    fn test_fill_neighbors_counts_existing_filler() {
        let mut search = Search::new(
            Grid::new(),
            Symbol::nth(0),
            Symbol::nth(1),
            anchor_order(false),
        );
        let footprint = Region::at(4, 4, 2).unwrap();
        for cell in footprint.neighbors().into_iter().take(4) {
            search.grid.set(cell, search.filler);
        }

        assert!(search.fill_neighbors(&footprint));
        assert_eq!(search.grid.count(search.filler), FILLERS_PER_FOOTPRINT);
    }

    #[test]
    fn test_fill_neighbors_rejects_crowded_footprint() {
        let mut search = Search::new(
            Grid::new(),
            Symbol::nth(0),
            Symbol::nth(1),
            anchor_order(false),
        );
        let footprint = Region::at(4, 4, 2).unwrap();
        for cell in footprint.neighbors().into_iter().take(7) {
            search.grid.set(cell, search.block);
        }

        assert!(!search.fill_neighbors(&footprint));
        assert_eq!(search.grid.count(search.filler), 0);
    }
}
