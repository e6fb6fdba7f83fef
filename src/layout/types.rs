//! Core types for the layout solver

use std::collections::BTreeMap;
use std::fmt;

use super::grid::{Grid, GRID_SIZE};
use super::legend::Legend;
use super::strategy::Strategy;

/// Side length of a square footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FootprintSize {
    One,
    Two,
    Three,
}

impl FootprintSize {
    /// Number of cells along one edge
    pub fn side(self) -> usize {
        match self {
            FootprintSize::One => 1,
            FootprintSize::Two => 2,
            FootprintSize::Three => 3,
        }
    }
}

impl TryFrom<u8> for FootprintSize {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FootprintSize::One),
            2 => Ok(FootprintSize::Two),
            3 => Ok(FootprintSize::Three),
            other => Err(other),
        }
    }
}

impl fmt::Display for FootprintSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side();
        write!(f, "{}x{}", side, side)
    }
}

/// A companion ingredient requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Companion {
    /// Units required per footprint
    pub quantity: u32,
    /// Footprint size of the ingredient itself
    pub size: FootprintSize,
}

/// The solver's input: one already-parsed catalog item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub footprint: FootprintSize,
    /// Companion requirements keyed by ingredient id
    pub companions: BTreeMap<String, Companion>,
    /// Only a single footprint is planted
    pub destructive: bool,
    pub explodes_on_harvest: bool,
}

impl ItemSpec {
    /// Create a spec with no companions and both flags cleared
    pub fn new(footprint: FootprintSize) -> Self {
        Self {
            footprint,
            companions: BTreeMap::new(),
            destructive: false,
            explodes_on_harvest: false,
        }
    }

    /// Add a companion requirement
    pub fn with_companion(
        mut self,
        ingredient: impl Into<String>,
        quantity: u32,
        size: FootprintSize,
    ) -> Self {
        self.companions
            .insert(ingredient.into(), Companion { quantity, size });
        self
    }

    /// Set the destructive flag
    pub fn with_destructive(mut self, destructive: bool) -> Self {
        self.destructive = destructive;
        self
    }

    /// Set the explodes-on-harvest flag
    pub fn with_explodes(mut self, explodes: bool) -> Self {
        self.explodes_on_harvest = explodes;
        self
    }

    /// Sum of all companion quantities
    pub fn total_companion_quantity(&self) -> u64 {
        self.companions.values().map(|c| u64::from(c.quantity)).sum()
    }

    /// Whether any companion has the given footprint size
    pub fn has_companion_of_size(&self, size: FootprintSize) -> bool {
        self.companions.values().any(|c| c.size == size)
    }
}

/// A single display symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(char);

impl Symbol {
    /// Reserved symbol for footprint cells
    pub const FOOTPRINT: Symbol = Symbol('.');
    /// Reserved symbol for cells nothing could use
    pub const UNUSABLE: Symbol = Symbol('#');
    /// Reserved symbol for overflowing or exhausted companion supply
    pub const UNKNOWN: Symbol = Symbol('?');

    /// Symbols handed out to ingredients, in assignment order
    pub const ALPHABET: &'static str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    /// The symbol at `index` in the ingredient alphabet, or `UNKNOWN` past its end
    pub fn nth(index: usize) -> Symbol {
        Self::ALPHABET
            .chars()
            .nth(index)
            .map(Symbol)
            .unwrap_or(Self::UNKNOWN)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn is_reserved(self) -> bool {
        matches!(self, Self::FOOTPRINT | Self::UNUSABLE | Self::UNKNOWN)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic category of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellTag {
    #[default]
    Empty,
    Footprint,
    Companion(Symbol),
    Unusable,
}

impl CellTag {
    pub fn is_empty(self) -> bool {
        self == CellTag::Empty
    }
}

/// Coordinates of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cell at a signed position, if it lies inside the grid
    pub fn at(row: isize, col: isize) -> Option<Cell> {
        let in_range = |v: isize| v >= 0 && (v as usize) < GRID_SIZE;
        (in_range(row) && in_range(col)).then(|| Cell::new(row as usize, col as usize))
    }

    /// Neighbor at a relative offset, if it lies inside the grid
    pub fn offset(self, dr: isize, dc: isize) -> Option<Cell> {
        Cell::at(self.row as isize + dr, self.col as isize + dc)
    }
}

/// A square region identified by its top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub row: usize,
    pub col: usize,
    pub side: usize,
}

impl Region {
    /// Region with a signed top-left corner, if it lies entirely inside the grid
    pub fn at(row: isize, col: isize, side: usize) -> Option<Region> {
        let fits = |v: isize| v >= 0 && v as usize + side <= GRID_SIZE;
        (fits(row) && fits(col)).then(|| Region {
            row: row as usize,
            col: col as usize,
            side,
        })
    }

    /// Region whose top-left is `cell`, if it fits
    pub fn from_cell(cell: Cell, size: FootprintSize) -> Option<Region> {
        Region::at(cell.row as isize, cell.col as isize, size.side())
    }

    pub fn top_left(&self) -> Cell {
        Cell::new(self.row, self.col)
    }

    pub fn area(&self) -> usize {
        self.side * self.side
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.row..self.row + self.side)
            .flat_map(move |r| (self.col..self.col + self.side).map(move |c| Cell::new(r, c)))
    }

    pub fn intersects(&self, other: &Region) -> bool {
        self.row < other.row + other.side
            && other.row < self.row + self.side
            && self.col < other.col + other.side
            && other.col < self.col + self.side
    }

    /// Cells outside the region that share an edge or a corner with it
    pub fn neighbors(&self) -> Vec<Cell> {
        let (r, c, s) = (self.row as isize, self.col as isize, self.side as isize);
        let mut cells = Vec::new();
        for dr in -1..=s {
            for dc in -1..=s {
                let inside = (0..s).contains(&dr) && (0..s).contains(&dc);
                if !inside {
                    if let Some(cell) = Cell::at(r + dr, c + dc) {
                        cells.push(cell);
                    }
                }
            }
        }
        cells
    }
}

/// Footprints and companion blocks produced by one placer run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    pub footprints: Vec<Region>,
    pub companion_blocks: Vec<Region>,
}

/// The complete, finalized outcome of one solve
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementResult {
    pub grid: Grid,
    /// Number of footprints placed; always `footprints.len()`
    pub footprint_count: usize,
    pub footprints: Vec<Region>,
    /// Multi-cell companion regions claimed per footprint (search placer only)
    pub companion_blocks: Vec<Region>,
    pub strategy: Strategy,
    pub legend: Legend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_size_from_u8() {
        assert_eq!(FootprintSize::try_from(2), Ok(FootprintSize::Two));
        assert_eq!(FootprintSize::try_from(4), Err(4));
        assert_eq!(FootprintSize::Three.to_string(), "3x3");
    }

    #[test]
    fn test_symbol_alphabet() {
        assert_eq!(Symbol::nth(0).as_char(), '0');
        assert_eq!(Symbol::nth(10).as_char(), 'A');
        assert_eq!(Symbol::nth(35).as_char(), 'Z');
        assert_eq!(Symbol::nth(36), Symbol::UNKNOWN);
        assert!(Symbol::ALPHABET.chars().all(|c| !Symbol(c).is_reserved()));
    }

    #[test]
    fn test_region_bounds() {
        assert!(Region::at(8, 8, 2).is_some());
        assert!(Region::at(9, 8, 2).is_none());
        assert!(Region::at(-1, 0, 3).is_none());
        assert_eq!(Region::at(1, 1, 3).map(|r| r.cells().count()), Some(9));
    }

    #[test]
    fn test_region_intersects() {
        let a = Region::at(0, 0, 3).unwrap();
        let b = Region::at(2, 2, 2).unwrap();
        let c = Region::at(3, 0, 3).unwrap();
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_region_neighbors_clipped_at_edge() {
        let corner = Region::at(0, 0, 2).unwrap();
        assert_eq!(corner.neighbors().len(), 5);
        let inner = Region::at(4, 4, 2).unwrap();
        assert_eq!(inner.neighbors().len(), 12);
    }

    #[test]
    fn test_item_spec_builder() {
        let spec = ItemSpec::new(FootprintSize::One)
            .with_companion("B", 3, FootprintSize::One)
            .with_companion("A", 2, FootprintSize::Two)
            .with_destructive(true);
        assert_eq!(spec.total_companion_quantity(), 5);
        assert!(spec.has_companion_of_size(FootprintSize::Two));
        assert!(!spec.has_companion_of_size(FootprintSize::Three));
        assert!(spec.destructive);
        assert!(!spec.explodes_on_harvest);
    }
}
