//! Lint engine for detecting defects in solved layouts.
//!
//! Runs after placement to check for mechanical issues: cells left
//! unassigned, overlapping footprints, count mismatches, and footprint
//! cells that no placed region accounts for.

use std::collections::HashSet;
use std::fmt;

use super::types::{Cell, CellTag, PlacementResult};

/// A lint warning about a layout defect
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Unassigned,
    Overlap,
    Count,
    Stray,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Unassigned => write!(f, "unassigned"),
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Count => write!(f, "count"),
            LintCategory::Stray => write!(f, "stray"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all lint checks on a solved layout.
pub fn check(result: &PlacementResult) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_unassigned(result, &mut warnings);
    check_overlaps(result, &mut warnings);
    check_count(result, &mut warnings);
    check_stray(result, &mut warnings);
    warnings
}

fn describe(cell: Cell) -> String {
    format!("({}, {})", cell.row, cell.col)
}

fn check_unassigned(result: &PlacementResult, warnings: &mut Vec<LintWarning>) {
    let empty: Vec<String> = result
        .grid
        .iter()
        .filter(|(_, tag)| tag.is_empty())
        .map(|(cell, _)| describe(cell))
        .collect();
    if !empty.is_empty() {
        warnings.push(LintWarning {
            category: LintCategory::Unassigned,
            message: format!("{} cell(s) left empty: {}", empty.len(), empty.join(", ")),
        });
    }
}

fn check_overlaps(result: &PlacementResult, warnings: &mut Vec<LintWarning>) {
    let regions = &result.footprints;
    for i in 0..regions.len() {
        for j in (i + 1)..regions.len() {
            if regions[i].intersects(&regions[j]) {
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    message: format!(
                        "footprints #{} at {} and #{} at {} overlap",
                        i + 1,
                        describe(regions[i].top_left()),
                        j + 1,
                        describe(regions[j].top_left()),
                    ),
                });
            }
        }
    }
}

fn check_count(result: &PlacementResult, warnings: &mut Vec<LintWarning>) {
    if result.footprint_count != result.footprints.len() {
        warnings.push(LintWarning {
            category: LintCategory::Count,
            message: format!(
                "reported {} footprint(s) but {} region(s) were placed",
                result.footprint_count,
                result.footprints.len()
            ),
        });
    }

    for region in &result.footprints {
        let missing = region
            .cells()
            .filter(|cell| result.grid.get(*cell) != CellTag::Footprint)
            .count();
        if missing > 0 {
            warnings.push(LintWarning {
                category: LintCategory::Count,
                message: format!(
                    "footprint at {} has {} cell(s) not marked as footprint",
                    describe(region.top_left()),
                    missing
                ),
            });
        }
    }
}

fn check_stray(result: &PlacementResult, warnings: &mut Vec<LintWarning>) {
    let covered: HashSet<Cell> = result.footprints.iter().flat_map(|r| r.cells()).collect();
    for (cell, tag) in result.grid.iter() {
        if tag == CellTag::Footprint && !covered.contains(&cell) {
            warnings.push(LintWarning {
                category: LintCategory::Stray,
                message: format!("footprint cell at {} belongs to no placed footprint", describe(cell)),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{solve, FootprintSize, ItemSpec, Region, Symbol};

    fn categories(warnings: &[LintWarning]) -> Vec<LintCategory> {
        warnings.iter().map(|w| w.category).collect()
    }

    #[test]
    fn test_solved_layout_is_clean() {
        let spec = ItemSpec::new(FootprintSize::Two).with_companion("A", 12, FootprintSize::One);
        assert!(check(&solve(&spec)).is_empty());
    }

    #[test]
    fn test_detects_unassigned_cells() {
        let mut result = solve(&ItemSpec::new(FootprintSize::One));
        result.grid.set(Cell::new(0, 0), CellTag::Empty);

        let warnings = check(&result);
        assert_eq!(categories(&warnings), vec![LintCategory::Unassigned]);
        assert!(warnings[0].message.contains("(0, 0)"));
    }

    #[test]
    fn test_detects_overlap_and_count() {
        let mut result = solve(&ItemSpec::new(FootprintSize::Three).with_destructive(true));
        let duplicate = Region::at(5, 5, 3).unwrap();
        result.footprints.push(duplicate);

        let warnings = check(&result);
        assert!(categories(&warnings).contains(&LintCategory::Overlap));
        assert!(categories(&warnings).contains(&LintCategory::Count));
    }

    #[test]
    fn test_detects_stray_footprint_cell() {
        let mut result = solve(&ItemSpec::new(FootprintSize::One).with_destructive(true));
        result.grid.set(Cell::new(0, 9), CellTag::Footprint);

        let warnings = check(&result);
        assert_eq!(categories(&warnings), vec![LintCategory::Stray]);
        assert_eq!(
            warnings[0].to_string(),
            "[stray] footprint cell at (0, 9) belongs to no placed footprint"
        );
    }

    #[test]
    fn test_companion_overwrite_is_count_defect() {
        let mut result = solve(&ItemSpec::new(FootprintSize::One).with_destructive(true));
        result.grid.set(Cell::new(5, 5), CellTag::Companion(Symbol::nth(0)));

        assert_eq!(categories(&check(&result)), vec![LintCategory::Count]);
    }
}
