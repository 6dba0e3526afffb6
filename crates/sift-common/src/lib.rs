//! Common utilities for the sift markup parser.
//!
//! This crate provides shared infrastructure used by the scanner, the tree
//! builder and the developer tools:
//! - **Position Index** - maps byte offsets to 1-based line/column pairs
//! - **Warning System** - deduplicated warnings routed through `tracing`

pub mod position;
pub mod warning;

pub use position::{LineIndex, Position};
