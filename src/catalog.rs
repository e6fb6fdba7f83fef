//! Item catalog loading
//!
//! A catalog maps item names to their records: footprint size, the
//! ingredients they are made of, and the harvest flags. Catalogs are read
//! from TOML tables or from the JSON object form, and turned into
//! [`ItemSpec`]s for the solver.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;
use crate::layout::{FootprintSize, ItemSpec};

/// Maximum edit distance for unknown-item suggestions
const SUGGESTION_DISTANCE: usize = 2;
const MAX_SUGGESTIONS: usize = 3;

/// One catalog entry as it appears on disk
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemRecord {
    pub size: u8,
    pub made_of: BTreeMap<String, u32>,
    pub destructive: bool,
    pub explodes_on_harvest: bool,
    /// Growth stages
    pub stages: u32,
}

impl Default for ItemRecord {
    fn default() -> Self {
        Self {
            size: 1,
            made_of: BTreeMap::new(),
            destructive: false,
            explodes_on_harvest: false,
            stages: 0,
        }
    }
}

impl ItemRecord {
    /// The footprint size of the record, if it is one the solver supports
    pub fn footprint(&self) -> Option<FootprintSize> {
        FootprintSize::try_from(self.size).ok()
    }
}

/// Deserialized records keyed by item name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: BTreeMap<String, ItemRecord>,
}

impl Catalog {
    /// Load a catalog, choosing JSON for `.json` files and TOML otherwise
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), is_json, "loading catalog");
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse a catalog of `[ITEM]` tables
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a catalog from a JSON object keyed by item name
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn get(&self, name: &str) -> Option<&ItemRecord> {
        self.items.get(name)
    }

    /// Item names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Build the solver input for an item.
    ///
    /// Companion sizes come from the ingredient's own catalog entry. An
    /// ingredient that is not a catalog item is treated as 1×1.
    pub fn item_spec(&self, name: &str) -> Result<ItemSpec, CatalogError> {
        let record = self.items.get(name).ok_or_else(|| CatalogError::UnknownItem {
            name: name.to_string(),
            suggestions: self.find_similar(name),
        })?;
        let footprint = self.footprint_of(name, record)?;

        let mut spec = ItemSpec::new(footprint)
            .with_destructive(record.destructive)
            .with_explodes(record.explodes_on_harvest);
        for (ingredient, &quantity) in &record.made_of {
            let size = match self.items.get(ingredient) {
                Some(companion) => self.footprint_of(ingredient, companion)?,
                None => FootprintSize::One,
            };
            spec = spec.with_companion(ingredient.clone(), quantity, size);
        }
        Ok(spec)
    }

    fn footprint_of(&self, name: &str, record: &ItemRecord) -> Result<FootprintSize, CatalogError> {
        record.footprint().ok_or_else(|| CatalogError::InvalidSize {
            item: name.to_string(),
            size: record.size,
        })
    }

    /// Item names within a small edit distance of `target`, closest first
    pub fn find_similar(&self, target: &str) -> Vec<String> {
        let mut candidates: Vec<(&String, usize)> = self
            .items
            .keys()
            .filter_map(|name| {
                let dist = levenshtein_distance(name, target);
                (dist > 0 && dist <= SUGGESTION_DISTANCE).then_some((name, dist))
            })
            .collect();

        candidates.sort_by_key(|(_, d)| *d);
        candidates
            .into_iter()
            .map(|(name, _)| name.clone())
            .take(MAX_SUGGESTIONS)
            .collect()
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];
    for (i, ca) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b_chars.len()]
}
