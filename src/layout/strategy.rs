//! Placement strategy selection

use std::fmt;

use super::grid::Grid;
use super::symbols::SymbolTable;
use super::types::{FootprintSize, ItemSpec, Placement};
use super::{ring, search, single};

/// Above this total companion quantity a 1×1 footprint needs its full 8-cell neighborhood
const ORTHOGONAL_SLOTS: u64 = 4;

/// The placer chosen for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// 1×1 footprints on a checkerboard, companions in every other cell
    Checkerboard,
    /// 1×1 footprints with grouped 8-cell neighborhoods
    Neighborhood,
    /// 1×1 footprints surrounded by 2×2 companion blocks
    BlockCompanions,
    /// 2×2 footprints with a 12-cell companion ring
    SmallRing,
    /// 3×3 footprints with a 16-cell companion ring
    LargeRing,
    /// 2×2 footprints needing 3×3 companions, placed by backtracking search
    Search,
}

impl Strategy {
    /// Pick the placer for an item
    pub fn select(spec: &ItemSpec) -> Self {
        match spec.footprint {
            FootprintSize::Two if spec.has_companion_of_size(FootprintSize::Three) => {
                Strategy::Search
            }
            FootprintSize::Three => Strategy::LargeRing,
            FootprintSize::Two => Strategy::SmallRing,
            FootprintSize::One if spec.has_companion_of_size(FootprintSize::Two) => {
                Strategy::BlockCompanions
            }
            FootprintSize::One
                if spec.total_companion_quantity() > ORTHOGONAL_SLOTS
                    || spec.explodes_on_harvest =>
            {
                Strategy::Neighborhood
            }
            FootprintSize::One => Strategy::Checkerboard,
        }
    }

    /// Run the placer against an empty grid
    pub fn place(self, spec: &ItemSpec, symbols: &SymbolTable, grid: &mut Grid) -> Placement {
        let destructive = spec.destructive;
        match self {
            Strategy::Checkerboard => single::checkerboard(grid, symbols, destructive),
            Strategy::Neighborhood => single::neighborhood(grid, symbols, destructive),
            Strategy::BlockCompanions => single::block_companions(grid, symbols, destructive),
            Strategy::SmallRing => ring::small_ring(grid, symbols, destructive),
            Strategy::LargeRing => ring::large_ring(grid, symbols, destructive),
            Strategy::Search => search::place(grid, symbols, destructive),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Checkerboard => "checkerboard",
            Strategy::Neighborhood => "neighborhood",
            Strategy::BlockCompanions => "block-companions",
            Strategy::SmallRing => "small-ring",
            Strategy::LargeRing => "large-ring",
            Strategy::Search => "search",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_search_for_large_companion() {
        let spec = ItemSpec::new(FootprintSize::Two).with_companion("S", 2, FootprintSize::Three);
        assert_eq!(Strategy::select(&spec), Strategy::Search);
    }

    #[test]
    fn test_select_by_footprint() {
        assert_eq!(
            Strategy::select(&ItemSpec::new(FootprintSize::Three)),
            Strategy::LargeRing
        );
        assert_eq!(
            Strategy::select(&ItemSpec::new(FootprintSize::Two)),
            Strategy::SmallRing
        );
        assert_eq!(
            Strategy::select(&ItemSpec::new(FootprintSize::One)),
            Strategy::Checkerboard
        );
    }

    #[test]
    fn test_select_single_variants() {
        let blocks =
            ItemSpec::new(FootprintSize::One).with_companion("B", 1, FootprintSize::Two);
        assert_eq!(Strategy::select(&blocks), Strategy::BlockCompanions);

        let four = ItemSpec::new(FootprintSize::One).with_companion("A", 4, FootprintSize::One);
        assert_eq!(Strategy::select(&four), Strategy::Checkerboard);

        let five = ItemSpec::new(FootprintSize::One).with_companion("A", 5, FootprintSize::One);
        assert_eq!(Strategy::select(&five), Strategy::Neighborhood);

        let explodes = ItemSpec::new(FootprintSize::One).with_explodes(true);
        assert_eq!(Strategy::select(&explodes), Strategy::Neighborhood);
    }

    #[test]
    fn test_large_companion_ignored_for_large_footprint() {
        let spec = ItemSpec::new(FootprintSize::Three).with_companion("S", 2, FootprintSize::Three);
        assert_eq!(Strategy::select(&spec), Strategy::LargeRing);
    }
}
