//! Route declarations and path resolution.
//!
//! This module provides:
//! - `PathPattern`: literal and `:param` segments, with specificity scoring
//! - `RouteTable`: the immutable, ordered route list and its lookup
//! - `catalog`: the point-of-sale screens and who may open them

pub mod catalog;
mod pattern;
mod table;

pub use pattern::{Params, PathPattern, Segment};
pub use table::{Chrome, Resolved, ResolutionPolicy, RouteEntry, RouteTable, RouteTableBuilder};
