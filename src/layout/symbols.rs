//! Symbol assignment for companion ingredients

use std::collections::BTreeMap;

use super::types::{Companion, FootprintSize, Symbol};

/// One ingredient with its assigned symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub ingredient: String,
    pub symbol: Symbol,
    pub quantity: u32,
    pub size: FootprintSize,
}

/// Ingredient ids in ascending order, each with a display symbol.
///
/// Ids past the end of [`Symbol::ALPHABET`] all share [`Symbol::UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    /// Assign symbols to the companions of an item
    pub fn assign(companions: &BTreeMap<String, Companion>) -> Self {
        let entries = companions
            .iter()
            .enumerate()
            .map(|(index, (ingredient, companion))| SymbolEntry {
                ingredient: ingredient.clone(),
                symbol: Symbol::nth(index),
                quantity: companion.quantity,
                size: companion.size,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbol assigned to an ingredient
    pub fn symbol_of(&self, ingredient: &str) -> Option<Symbol> {
        self.entries
            .iter()
            .find(|e| e.ingredient == ingredient)
            .map(|e| e.symbol)
    }

    /// Entries whose ingredient has the given footprint size
    pub fn of_size(&self, size: FootprintSize) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter().filter(move |e| e.size == size)
    }

    /// (symbol, quantity) pairs in assignment order
    pub fn supply(&self) -> Vec<(Symbol, u32)> {
        self.entries.iter().map(|e| (e.symbol, e.quantity)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn companion(quantity: u32) -> Companion {
        Companion {
            quantity,
            size: FootprintSize::One,
        }
    }

    #[test]
    fn test_assign_sorted_by_ingredient() {
        let mut companions = BTreeMap::new();
        companions.insert("WHEAT".to_string(), companion(2));
        companions.insert("ASHWREATH".to_string(), companion(4));
        let table = SymbolTable::assign(&companions);

        assert_eq!(table.symbol_of("ASHWREATH"), Some(Symbol::nth(0)));
        assert_eq!(table.symbol_of("WHEAT"), Some(Symbol::nth(1)));
        assert_eq!(table.symbol_of("MISSING"), None);
    }

    #[test]
    fn test_assign_is_independent_of_insertion_order() {
        let ids = ["delta", "alpha", "charlie", "bravo"];
        let mut forward = BTreeMap::new();
        let mut backward = BTreeMap::new();
        for (i, id) in ids.iter().enumerate() {
            forward.insert(id.to_string(), companion(i as u32));
        }
        for (i, id) in ids.iter().enumerate().rev() {
            backward.insert(id.to_string(), companion(i as u32));
        }

        let first = SymbolTable::assign(&forward);
        assert_eq!(first, SymbolTable::assign(&backward));
        assert_eq!(first, SymbolTable::assign(&forward));
    }

    #[test]
    fn test_overflow_maps_to_unknown() {
        let companions: BTreeMap<String, Companion> = (0..40)
            .map(|i| (format!("ING_{:02}", i), companion(1)))
            .collect();
        let table = SymbolTable::assign(&companions);

        assert_eq!(table.len(), 40);
        assert_eq!(table.symbol_of("ING_35"), Some(Symbol::nth(35)));
        assert_eq!(table.symbol_of("ING_36"), Some(Symbol::UNKNOWN));
        assert_eq!(table.symbol_of("ING_39"), Some(Symbol::UNKNOWN));
    }
}
