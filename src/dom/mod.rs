//! DOM snapshots
//!
//! Extraction works directly on the parsed document. [`ElementNode`] is a detached,
//! serializable copy of an element subtree, used when the structure of a page has to be
//! reported rather than read.

pub mod element;

pub use element::ElementNode;
