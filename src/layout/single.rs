//! Placers for 1×1 footprints

use tracing::trace;

use super::claim_footprint;
use super::grid::{Grid, GRID_SIZE};
use super::symbols::SymbolTable;
use super::types::{Cell, CellTag, FootprintSize, Placement, Symbol};

/// Up, down, left, right
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Clockwise from the top-left corner
const RING: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Ring slots that should share a symbol: corners, verticals, horizontals
const RING_GROUPS: [&[usize]; 3] = [&[0, 2, 4, 6], &[1, 5], &[3, 7]];

const CHECKERBOARD_SPAN: std::ops::RangeInclusive<usize> = 1..=8;
const SINGLE_CENTER: Cell = Cell { row: 5, col: 5 };

const NEIGHBORHOOD_AXIS: [usize; 4] = [1, 3, 5, 7];
const NEIGHBORHOOD_DESTRUCTIVE_AXIS: [usize; 1] = [5];

const BLOCK_AXIS: [usize; 2] = [2, 7];
const BLOCK_DESTRUCTIVE_AXIS: [usize; 1] = [4];

/// Diagonal 2×2 blocks, then vertical and horizontal neighbors
const BLOCK_OFFSETS: [(isize, isize); 20] = [
    (-2, -2),
    (-2, -1),
    (-1, -2),
    (-1, -1),
    (-2, 1),
    (-2, 2),
    (-1, 1),
    (-1, 2),
    (1, -2),
    (1, -1),
    (2, -2),
    (2, -1),
    (1, 1),
    (1, 2),
    (2, 1),
    (2, 2),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

/// Footprints on alternating interior cells, every other cell a companion.
pub fn checkerboard(grid: &mut Grid, symbols: &SymbolTable, destructive: bool) -> Placement {
    let cycle = companion_cycle(symbols);
    let pick = |i: usize| {
        if cycle.is_empty() {
            Symbol::UNKNOWN
        } else {
            cycle[i % cycle.len()]
        }
    };
    let mut placement = Placement::default();

    if destructive {
        if claim_footprint(grid, SINGLE_CENTER, FootprintSize::One, &mut placement).is_some() {
            for (i, &(dr, dc)) in ORTHOGONAL.iter().enumerate() {
                if let Some(cell) = SINGLE_CENTER.offset(dr, dc) {
                    grid.place_if_empty(cell, CellTag::Companion(pick(i)));
                }
            }
        }
        return placement;
    }

    for row in CHECKERBOARD_SPAN {
        for col in CHECKERBOARD_SPAN {
            if (row + col) % 2 == 0 {
                claim_footprint(grid, Cell::new(row, col), FootprintSize::One, &mut placement);
            }
        }
    }

    // Every open cell takes the first symbol on even rows, the second on odd rows
    let row_symbol = |row: usize| match cycle.as_slice() {
        [] => Symbol::UNKNOWN,
        [only] => *only,
        [even, odd, ..] => {
            if row % 2 == 0 {
                *even
            } else {
                *odd
            }
        }
    };
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            grid.place_if_empty(Cell::new(row, col), CellTag::Companion(row_symbol(row)));
        }
    }
    placement
}

/// Distinct symbols of companions that have supply, in symbol order
fn companion_cycle(symbols: &SymbolTable) -> Vec<Symbol> {
    let mut cycle: Vec<Symbol> = symbols
        .entries()
        .iter()
        .filter(|e| e.quantity > 0)
        .map(|e| e.symbol)
        .collect();
    cycle.dedup();
    cycle
}

/// Footprints with their full 8-cell neighborhood assigned in groups.
pub fn neighborhood(grid: &mut Grid, symbols: &SymbolTable, destructive: bool) -> Placement {
    let pool = neighborhood_pool(symbols);
    trace!(?pool, "neighborhood pool");

    let axis: &[usize] = if destructive {
        &NEIGHBORHOOD_DESTRUCTIVE_AXIS
    } else {
        &NEIGHBORHOOD_AXIS
    };
    let swap_horizontal = pool[3] != pool[7];
    let swap_vertical = pool[1] != pool[5];
    let mut placement = Placement::default();

    for (row_index, &row) in axis.iter().enumerate() {
        for (col_index, &col) in axis.iter().enumerate() {
            // Mirror every other footprint so adjacent rings agree on shared cells
            let mut local = pool;
            if swap_horizontal && col_index % 2 == 1 {
                local.swap(3, 7);
            }
            if swap_vertical && row_index % 2 == 1 {
                local.swap(1, 5);
            }

            let center = Cell::new(row, col);
            if claim_footprint(grid, center, FootprintSize::One, &mut placement).is_none() {
                continue;
            }
            for (slot, &(dr, dc)) in RING.iter().enumerate() {
                if let Some(cell) = center.offset(dr, dc) {
                    grid.place_if_empty(cell, CellTag::Companion(local[slot]));
                }
            }
        }
    }
    placement
}

/// Assign one symbol per ring group where supply allows, otherwise fragment.
fn neighborhood_pool(symbols: &SymbolTable) -> [Symbol; 8] {
    let mut supply = symbols.supply();
    supply.sort_by(|a, b| b.1.cmp(&a.1));

    let mut pool = [Symbol::UNKNOWN; 8];
    for group in RING_GROUPS {
        let needed = group.len() as u32;
        if let Some(entry) = supply.iter_mut().find(|(_, q)| *q >= needed) {
            entry.1 -= needed;
            for &slot in group {
                pool[slot] = entry.0;
            }
            continue;
        }
        for &slot in group {
            pool[slot] = match supply.iter_mut().find(|(_, q)| *q > 0) {
                Some(entry) => {
                    entry.1 -= 1;
                    entry.0
                }
                None => Symbol::UNKNOWN,
            };
        }
    }
    pool
}

/// Footprints framed by diagonal 2×2 companion blocks.
pub fn block_companions(grid: &mut Grid, symbols: &SymbolTable, destructive: bool) -> Placement {
    let block = symbols
        .of_size(FootprintSize::Two)
        .next()
        .map(|e| e.symbol)
        .unwrap_or(Symbol::UNKNOWN);
    let mut singles = symbols.of_size(FootprintSize::One).map(|e| e.symbol);
    let vertical = singles.next().unwrap_or(Symbol::UNKNOWN);
    let horizontal = singles.next().unwrap_or(vertical);

    let axis: &[usize] = if destructive {
        &BLOCK_DESTRUCTIVE_AXIS
    } else {
        &BLOCK_AXIS
    };
    let mut placement = Placement::default();

    for &row in axis {
        for &col in axis {
            let center = Cell::new(row, col);
            if claim_footprint(grid, center, FootprintSize::One, &mut placement).is_none() {
                continue;
            }
            for &(dr, dc) in &BLOCK_OFFSETS {
                let symbol = if dr != 0 && dc != 0 {
                    block
                } else if dc == 0 {
                    vertical
                } else {
                    horizontal
                };
                if let Some(cell) = center.offset(dr, dc) {
                    grid.place_if_empty(cell, CellTag::Companion(symbol));
                }
            }
        }
    }
    placement
}
