//! Layout solver for packing crop footprints into the plot grid
//!
//! This module takes an item's footprint size and companion needs and
//! computes the tile grid, producing a PlacementResult with the placed
//! footprints and a legend.

pub mod grid;
pub mod legend;
pub mod lint;
pub mod ring;
pub mod search;
pub mod single;
pub mod strategy;
pub mod symbols;
pub mod trail;
pub mod types;

pub use grid::{Grid, GRID_SIZE};
pub use legend::{Legend, LegendEntry};
pub use strategy::Strategy;
pub use symbols::{SymbolEntry, SymbolTable};
pub use types::*;

use tracing::debug;

/// Compute the layout for one item.
///
/// Symbols are assigned once, the item selects a single strategy, and the
/// filled grid is finalized before it is returned.
pub fn solve(spec: &ItemSpec) -> PlacementResult {
    let symbols = SymbolTable::assign(&spec.companions);
    let strategy = Strategy::select(spec);
    debug!(
        %strategy,
        footprint = %spec.footprint,
        destructive = spec.destructive,
        companions = symbols.len(),
        "selected strategy"
    );

    let mut grid = Grid::new();
    let placement = strategy.place(spec, &symbols, &mut grid);
    grid.finalize();
    debug!(count = placement.footprints.len(), "placement complete");

    PlacementResult {
        grid,
        footprint_count: placement.footprints.len(),
        footprints: placement.footprints,
        companion_blocks: placement.companion_blocks,
        strategy,
        legend: Legend::from_symbols(&symbols),
    }
}

/// Place a footprint at `top_left` when its whole region is empty.
pub(crate) fn claim_footprint(
    grid: &mut Grid,
    top_left: Cell,
    size: FootprintSize,
    placement: &mut Placement,
) -> Option<Region> {
    let region = Region::from_cell(top_left, size)?;
    if !region.cells().all(|cell| grid.get(cell).is_empty()) {
        return None;
    }
    grid.place(&region, CellTag::Footprint);
    placement.footprints.push(region);
    Some(region)
}
