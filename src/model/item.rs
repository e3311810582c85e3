//! Callout occurrence types.

use serde::{Deserialize, Serialize};

/// One observed occurrence of a callout on a page.
///
/// Created by the scanner with `quantity == 1`; the aggregator fills in
/// `description` and folds occurrences into [`GroupedItem`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Page number (1-indexed)
    pub page: u32,

    /// Raw matched callout text, e.g. `HUH-13` or `2"ø HUH`
    pub callout: String,

    /// Abbreviation code carried by the callout
    pub code: Option<String>,

    /// Resolved abbreviation text for `code`
    pub description: Option<String>,

    /// The callout itself when it is in spec-referenced (`CODE-N`) form
    pub spec_ref: Option<String>,

    /// First feet/inches dimension on the same line
    pub dimension: Option<String>,

    /// Mounting information (no extraction rule yet)
    pub mounting: Option<String>,

    /// Occurrence count
    pub quantity: u32,
}

impl ItemRecord {
    /// Create a record for a callout seen on `page`.
    pub fn new(page: u32, callout: impl Into<String>) -> Self {
        let callout = callout.into();
        let spec_ref = callout.contains('-').then(|| callout.clone());
        Self {
            page,
            callout,
            code: None,
            description: None,
            spec_ref,
            dimension: None,
            mounting: None,
            quantity: 1,
        }
    }

    /// Attach an abbreviation code.
    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    /// Attach a dimension.
    pub fn with_dimension(mut self, dimension: Option<String>) -> Self {
        self.dimension = dimension;
        self
    }

    /// Grouping identity: position plus literal callout text.
    pub fn key(&self) -> (u32, &str) {
        (self.page, &self.callout)
    }
}

/// A deduplicated, counted callout.
///
/// Carries the field values of the first record seen for its
/// `(page, callout)` key; `quantity` is the number of records folded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedItem {
    pub page: u32,
    pub callout: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub spec_ref: Option<String>,
    pub dimension: Option<String>,
    pub mounting: Option<String>,
    pub quantity: u32,
}

impl GroupedItem {
    /// Start a group from its first record, with a zero count.
    pub(crate) fn start(record: ItemRecord) -> Self {
        Self {
            page: record.page,
            callout: record.callout,
            code: record.code,
            description: record.description,
            spec_ref: record.spec_ref,
            dimension: record.dimension,
            mounting: record.mounting,
            quantity: 0,
        }
    }
}
