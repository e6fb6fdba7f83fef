//! Legend mapping display symbols back to ingredients

use std::fmt;

use super::symbols::SymbolTable;
use super::types::Symbol;

/// One line of the legend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendEntry {
    /// The reserved footprint symbol
    Footprint { symbol: Symbol },
    Companion {
        symbol: Symbol,
        ingredient: String,
        quantity: u32,
    },
}

impl LegendEntry {
    pub fn symbol(&self) -> Symbol {
        match self {
            LegendEntry::Footprint { symbol } | LegendEntry::Companion { symbol, .. } => *symbol,
        }
    }
}

impl fmt::Display for LegendEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegendEntry::Footprint { symbol } => write!(f, "{} : Crop", symbol),
            LegendEntry::Companion {
                symbol,
                ingredient,
                quantity,
            } => write!(f, "{} : {} ({})", symbol, ingredient, quantity),
        }
    }
}

/// Ordered legend: footprint first, then companions in symbol order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn from_symbols(table: &SymbolTable) -> Self {
        let entries = std::iter::once(LegendEntry::Footprint {
            symbol: Symbol::FOOTPRINT,
        })
        .chain(table.entries().iter().map(|e| LegendEntry::Companion {
            symbol: e.symbol,
            ingredient: e.ingredient.clone(),
            quantity: e.quantity,
        }))
        .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LegendEntry> {
        self.entries.iter()
    }
}

impl fmt::Display for Legend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{FootprintSize, ItemSpec};

    #[test]
    fn test_footprint_entry_first() {
        let spec = ItemSpec::new(FootprintSize::One);
        let legend = Legend::from_symbols(&SymbolTable::assign(&spec.companions));
        assert_eq!(legend.entries.len(), 1);
        assert_eq!(legend.to_string(), ". : Crop");
    }

    #[test]
    fn test_companions_follow_symbol_order() {
        let spec = ItemSpec::new(FootprintSize::Two)
            .with_companion("ZOMBUD", 1, FootprintSize::One)
            .with_companion("ASHWREATH", 4, FootprintSize::One);
        let legend = Legend::from_symbols(&SymbolTable::assign(&spec.companions));

        let symbols: Vec<char> = legend.iter().map(|e| e.symbol().as_char()).collect();
        assert_eq!(symbols, vec!['.', '0', '1']);
        assert_eq!(
            legend.to_string(),
            ". : Crop, 0 : ASHWREATH (4), 1 : ZOMBUD (1)"
        );
    }
}
