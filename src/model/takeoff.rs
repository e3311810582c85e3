//! Takeoff output document.

use super::GroupedItem;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Abbreviation dictionary: code → description.
pub type AbbreviationMap = BTreeMap<String, String>;

/// Distinct codes seen in callouts during one run.
pub type CodeSet = BTreeSet<String>;

/// Result of one takeoff run over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Takeoff {
    /// Final abbreviation dictionary, one entry per code seen in callouts
    pub abbreviations: AbbreviationMap,

    /// Counted callouts in first-seen order
    pub items: Vec<GroupedItem>,
}

impl Takeoff {
    /// Create a takeoff from its parts.
    pub fn new(abbreviations: AbbreviationMap, items: Vec<GroupedItem>) -> Self {
        Self {
            abbreviations,
            items,
        }
    }

    /// Sum of quantities across all items.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Items found on a given page (1-indexed).
    pub fn items_on_page(&self, page: u32) -> impl Iterator<Item = &GroupedItem> {
        self.items.iter().filter(move |item| item.page == page)
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.abbreviations.is_empty()
    }
}

/// Summary numbers for a run, as printed by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TakeoffStats {
    /// Pages read from the source
    pub page_count: u32,

    /// Raw callout occurrences before grouping
    pub record_count: u32,

    /// Grouped items emitted
    pub item_count: u32,

    /// Entries in the final abbreviation dictionary
    pub abbreviation_count: u32,

    /// Whether the normalizer output replaced the refined dictionary
    pub normalized: bool,

    /// Wall-clock time of the run in milliseconds
    pub elapsed_ms: u128,
}
