//! Binary search tree collections for Rust, built on a sentinel-anchored node engine.
//!
//! This crate provides [`BSTreeMap`] and [`BSTreeSet`], ordered collections whose API
//! mirrors the standard library's `BTreeMap` and `BTreeSet`, extended with [`Position`]
//! cursors:
//!
//! - [`begin`](BSTreeMap::begin), [`end`](BSTreeMap::end), [`next_position`](BSTreeMap::next_position)
//!   and [`prev_position`](BSTreeMap::prev_position) walk the collection without borrowing it
//! - [`lower_bound`](BSTreeMap::lower_bound), [`upper_bound`](BSTreeMap::upper_bound) and
//!   [`equal_range`](BSTreeMap::equal_range) locate positions by key
//! - [`insert_hint`](BSTreeMap::insert_hint) inserts next to a known position, skipping the
//!   descent from the root when the hint is good
//! - [`erase`](BSTreeMap::erase) and [`erase_range`](BSTreeMap::erase_range) remove by position
//!
//! # Example
//!
//! ```
//! use bs_tree::BSTreeSet;
//!
//! let mut set = BSTreeSet::new();
//! for key in [40, 50, 30, 35, 10, 75, 23, 87, 68] {
//!     set.insert(key);
//! }
//!
//! // Positions survive unrelated mutation.
//! let forty = set.find(&40);
//! set.remove(&35);
//! set.insert(45);
//! assert_eq!(set.get_at(set.next_position(forty).unwrap()), Ok(&45));
//!
//! // Erasing returns the position that followed the erased element.
//! let mut position = set.lower_bound(&30);
//! while set.get_at(position).is_ok_and(|&key| key < 50) {
//!     position = set.erase(position).unwrap();
//! }
//! assert!(set.iter().copied().eq([10, 23, 50, 68, 75, 87]));
//! assert_eq!(set.check_invariants(), Ok(()));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Nodes live in an arena and link to each other by index
//! - **Checked positions** - A position whose element was erased reports
//!   [`TreeError::InvalidPosition`] instead of reaching a recycled node
//! - **`tracing`** - Optional structural-mutation events at `TRACE` level
//!
//! # Implementation
//!
//! The tree is deliberately unbalanced: depth, and so the cost of a keyed lookup, is O(n) in
//! the worst case (for example ascending inserts). A single sentinel stands for the absent
//! child, the root's parent and the end position, and caches the root, minimum and maximum,
//! so `begin`, `rbegin` and `end` are O(1). Erasing a node with two children splices its
//! in-order predecessor into its place.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod position;
mod raw;

pub mod bstree_map;
pub mod bstree_set;

pub use bstree_map::BSTreeMap;
pub use bstree_set::BSTreeSet;
pub use error::{InvariantError, TreeError};
pub use position::Position;
