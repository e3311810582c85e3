//! Abbreviation dictionary discovery.
//!
//! [`locate_block`] finds the "ABBREVIATIONS" table in the page text and
//! gives every known code the whole block as a coarse description;
//! [`refine`] then cuts each code's own definition out of the block.

mod locate;
mod refine;

pub use locate::{locate_block, AbbreviationBlock, LocatorOptions};
pub use refine::refine;
