//! Ring placers for 2×2 and 3×3 footprints.
//!
//! Companion cells are laid out as a clockwise ring starting at the cell
//! diagonally above-left of the footprint. Neighboring footprints share the
//! cells between them, so fills only write into cells that are empty or
//! already hold the same symbol.

use std::cmp::Reverse;
use std::collections::VecDeque;

use tracing::trace;

use super::claim_footprint;
use super::grid::Grid;
use super::symbols::SymbolTable;
use super::types::{Cell, CellTag, FootprintSize, Placement, Symbol};

const SMALL_RING: [(isize, isize); 12] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (-1, 2),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, 1),
    (2, 0),
    (2, -1),
    (1, -1),
    (0, -1),
];

const SMALL_RING_CORNERS: [usize; 4] = [0, 3, 6, 9];

/// Slots facing each other across the footprint
const SMALL_RING_PAIRS: [(usize, usize); 4] = [(1, 8), (2, 7), (4, 11), (5, 10)];

const SMALL_AXIS: [usize; 3] = [1, 4, 7];

const LARGE_RING: [(isize, isize); 16] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (-1, 2),
    (-1, 3),
    (0, 3),
    (1, 3),
    (2, 3),
    (3, 3),
    (3, 2),
    (3, 1),
    (3, 0),
    (3, -1),
    (2, -1),
    (1, -1),
    (0, -1),
];

const LARGE_AXIS: [usize; 2] = [1, 5];

const DESTRUCTIVE_AXIS: [usize; 1] = [4];

/// 2×2 footprints on a 3-cell pitch with a 12-slot ring.
pub fn small_ring(grid: &mut Grid, symbols: &SymbolTable, destructive: bool) -> Placement {
    let pool = small_ring_pool(symbols);
    trace!(?pool, "small ring pool");
    let axis: &[usize] = if destructive { &DESTRUCTIVE_AXIS } else { &SMALL_AXIS };
    place_rings(grid, axis, FootprintSize::Two, &SMALL_RING, &pool)
}

/// 3×3 footprints on a 4-cell pitch with a 16-slot ring.
pub fn large_ring(grid: &mut Grid, symbols: &SymbolTable, destructive: bool) -> Placement {
    let pool = large_ring_pool(symbols);
    trace!(?pool, "large ring pool");
    let axis: &[usize] = if destructive { &DESTRUCTIVE_AXIS } else { &LARGE_AXIS };
    place_rings(grid, axis, FootprintSize::Three, &LARGE_RING, &pool)
}

fn place_rings(
    grid: &mut Grid,
    axis: &[usize],
    size: FootprintSize,
    ring: &[(isize, isize)],
    pool: &[Symbol],
) -> Placement {
    let mut placement = Placement::default();
    for &row in axis {
        for &col in axis {
            let anchor = Cell::new(row, col);
            if claim_footprint(grid, anchor, size, &mut placement).is_none() {
                continue;
            }
            for (slot, &(dr, dc)) in ring.iter().enumerate() {
                if let Some(cell) = anchor.offset(dr, dc) {
                    grid.place_if_compatible(cell, CellTag::Companion(pool[slot % pool.len()]));
                }
            }
        }
    }
    placement
}

/// Fill the 12 slots so that opposite sides of a footprint carry matching symbols.
///
/// Corners take the best-supplied symbol when it has at least 4 units. Facing
/// slot pairs are filled two units at a time in descending supply order.
/// Whatever is left over fills the gaps, then `UNKNOWN`.
fn small_ring_pool(symbols: &SymbolTable) -> [Symbol; 12] {
    let mut supply = symbols.supply();
    let mut slots: [Option<Symbol>; 12] = [None; 12];

    let corners = SMALL_RING_CORNERS.len() as u32;
    if let Some(best) = supply.iter_mut().min_by_key(|(_, q)| Reverse(*q)) {
        if best.1 >= corners {
            best.1 -= corners;
            for &slot in &SMALL_RING_CORNERS {
                slots[slot] = Some(best.0);
            }
        }
    }

    supply.sort_by(|a, b| b.1.cmp(&a.1));
    let mut pairs = SMALL_RING_PAIRS.iter();
    let mut leftovers = VecDeque::new();
    for (symbol, quantity) in supply {
        for _ in 0..quantity / 2 {
            if let Some(&(a, b)) = pairs.next() {
                slots[a] = Some(symbol);
                slots[b] = Some(symbol);
            } else if leftovers.len() < slots.len() {
                leftovers.extend([symbol, symbol]);
            } else {
                break;
            }
        }
        if quantity % 2 == 1 {
            leftovers.push_back(symbol);
        }
    }

    slots.map(|slot| slot.unwrap_or_else(|| leftovers.pop_front().unwrap_or(Symbol::UNKNOWN)))
}

/// Each symbol repeated by its quantity, padded with `UNKNOWN` to the ring length.
fn large_ring_pool(symbols: &SymbolTable) -> Vec<Symbol> {
    let mut pool: Vec<Symbol> = symbols
        .entries()
        .iter()
        .flat_map(|e| std::iter::repeat(e.symbol).take(e.quantity as usize))
        .take(LARGE_RING.len())
        .collect();
    pool.resize(LARGE_RING.len(), Symbol::UNKNOWN);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::ItemSpec;
    use pretty_assertions::assert_eq;

    fn table(spec: &ItemSpec) -> SymbolTable {
        SymbolTable::assign(&spec.companions)
    }

    #[test]
    fn test_small_ring_pool_corners_and_pairs() {
        let spec = ItemSpec::new(FootprintSize::Two)
            .with_companion("A", 2, FootprintSize::One)
            .with_companion("B", 6, FootprintSize::One)
            .with_companion("C", 3, FootprintSize::One);
        let pool = small_ring_pool(&table(&spec));
        let (a, b, c) = (Symbol::nth(0), Symbol::nth(1), Symbol::nth(2));

        // B takes the corners and one pair, C a pair and a leftover, A a pair.
        // Once leftovers run out the remaining counts are not drawn from again.
        let u = Symbol::UNKNOWN;
        assert_eq!(pool, [b, c, a, b, b, c, b, a, c, b, u, b]);
    }

    #[test]
    fn test_small_ring_pool_exhausted() {
        let spec = ItemSpec::new(FootprintSize::Two).with_companion("A", 4, FootprintSize::One);
        let pool = small_ring_pool(&table(&spec));
        let a = Symbol::nth(0);

        for (slot, symbol) in pool.iter().enumerate() {
            if SMALL_RING_CORNERS.contains(&slot) {
                assert_eq!(*symbol, a);
            } else {
                assert_eq!(*symbol, Symbol::UNKNOWN);
            }
        }
    }

    #[test]
    fn test_small_ring_places_nine() {
        let spec = ItemSpec::new(FootprintSize::Two).with_companion("A", 12, FootprintSize::One);
        let mut grid = Grid::new();
        let placement = small_ring(&mut grid, &table(&spec), false);

        assert_eq!(placement.footprints.len(), 9);
        assert_eq!(grid.count(CellTag::Footprint), 36);
        assert_eq!(grid.get(Cell::new(0, 0)), CellTag::Companion(Symbol::nth(0)));
        assert_eq!(grid.get(Cell::new(3, 3)), CellTag::Companion(Symbol::nth(0)));
    }

    #[test]
    fn test_large_ring_pool_padding() {
        let spec = ItemSpec::new(FootprintSize::Three)
            .with_companion("A", 3, FootprintSize::One)
            .with_companion("B", 2, FootprintSize::One);
        let pool = large_ring_pool(&table(&spec));

        assert_eq!(pool.len(), 16);
        let (a, b) = (Symbol::nth(0), Symbol::nth(1));
        assert_eq!(&pool[..5], &[a, a, a, b, b]);
        assert!(pool[5..].iter().all(|s| *s == Symbol::UNKNOWN));
    }

    #[test]
    fn test_large_ring_destructive_center() {
        let spec = ItemSpec::new(FootprintSize::Three)
            .with_companion("A", 16, FootprintSize::One)
            .with_destructive(true);
        let mut grid = Grid::new();
        let placement = large_ring(&mut grid, &table(&spec), true);

        assert_eq!(placement.footprints.len(), 1);
        assert_eq!(placement.footprints[0].top_left(), Cell::new(4, 4));
        assert_eq!(grid.count(CellTag::Companion(Symbol::nth(0))), 16);
    }
}
