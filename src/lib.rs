//! A minimal, fixed-capacity bitset written in pure Rust.
//! No heap, no `unsafe`: up to 256 bits held inline in 32-bit words.
//!
//! [`Bitset`] is the main struct in this library. Its [features](#features)
//! are listed below.
//!
//! # Examples
//! ```
//! use light_bitset::Bitset;
//!
//! # fn main() -> Result<(), light_bitset::BitsetError> {
//! let mut bitset = Bitset::new(64)?;
//! assert_eq!(bitset.popcount(), 0);
//! assert!(!bitset.is_set(3)?);
//! bitset.set(3)?.set(40)?;
//! assert_eq!(bitset.get(3)?, 1 << 3);
//! assert_eq!(bitset.words(), &[0b1000, 1 << 8]);
//! # Ok(())
//! # }
//! ```
//!
//! # Use Cases
//!
//! - Flag sets and protocol bit fields
//! - Small bloom-filter-like structures
//! - Anywhere a compact, stack-only bitmask with word-level layout is needed
//!
//! # Features
//!
//! - Sizes are powers of two from 1 to 256 bits, validated at construction
//! - Backing store of `ceil(size / 32)` `u32` words, no heap allocation
//! - Checked indexing: every out-of-range index is a [`BitsetError`]
//! - Chainable mutators: `set`, `unset`, `swap`
//! - Iteration over all bits (`iter()`) or set bits (`iter_ones()`)
//! - Inspection: `popcount`, `first_set_bit`, `is_empty`
//! - A diagnostic grid rendering via `Display` and [`Bitset::dump`]
//! - `tracing` events for construction, clears and rejected input

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod bitset;
mod error;

pub use bitset::{Bitset, Iter, IterOnes, MAX_SIZE, MAX_WORDS, WORD_WIDTH, word_count};
pub use error::{BitsetError, Result, SizeViolation};
