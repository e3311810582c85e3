//! Data model for takeoff extraction.
//!
//! Raw callout occurrences ([`ItemRecord`]) are produced by the scanner and
//! folded by the aggregator into [`GroupedItem`]s, which together with the
//! abbreviation dictionary form the [`Takeoff`] output document.

mod item;
mod takeoff;

pub use item::{GroupedItem, ItemRecord};
pub use takeoff::{AbbreviationMap, CodeSet, Takeoff, TakeoffStats};
