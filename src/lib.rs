//! An in-memory B+tree index from dataset keys to the positions they occur at.
//!
//! [`PositionIndex`] maps every distinct key of a dataset to its *bundle*: the list of
//! offsets in the dataset where that key appears. It supports point lookups, inclusive range
//! scans over the chained leaves, insertion with node splitting, and removal.
//!
//! # Example
//!
//! ```
//! use bplus_index::PositionIndex;
//!
//! let dataset = [1188, 42, 7, 1188, 99];
//! let mut index = PositionIndex::from_values(4, dataset)?;
//!
//! assert_eq!(index.get_index_position(&1188), Some(vec![0, 3]));
//! assert_eq!(index.get_range(&7, &99), vec![2, 1, 4]);
//!
//! // Removal drops every position of the key at once.
//! assert_eq!(index.remove_index(&1188)?, Some(vec![0, 3]));
//! assert!(!index.contains_key(&1188));
//! # Ok::<(), bplus_index::IndexError>(())
//! ```
//!
//! # Implementation
//!
//! Nodes live in an arena owned by the tree. Internal nodes own their children through arena
//! ids, while parent links and the leaf chain are plain ids used only for navigation. Splits
//! never retire a node, and removal edits a single leaf in place without merging or
//! rebalancing.
//!
//! Tree events (splits, root promotion) are reported through [`tracing`]; the crate installs
//! no subscriber.

#![no_std]
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
#[cfg(test)]
extern crate std;

mod error;
mod raw;

pub mod position_index;

pub use error::{IndexError, Result};
pub use position_index::{DEFAULT_ORDER, MIN_ORDER, PositionIndex};
