use core::fmt::{self, Display, Formatter};

use thiserror::Error;

/// The rule a rejected bitset size broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeViolation {
    /// The size is not a power of two (this includes zero).
    NotPowerOfTwo,
    /// The size is a power of two larger than [`MAX_SIZE`](crate::MAX_SIZE).
    ExceedsCapacity,
}

impl Display for SizeViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SizeViolation::NotPowerOfTwo => write!(f, "not a power of two"),
            SizeViolation::ExceedsCapacity => {
                write!(f, "exceeds the maximum of {} bits", crate::MAX_SIZE)
            }
        }
    }
}

/// Errors returned by [`Bitset`](crate::Bitset) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum BitsetError {
    /// Construction was attempted with a size the bitset can't hold.
    #[error("invalid bitset size {size}: {violation}")]
    InvalidSize {
        /// The requested size.
        size: usize,
        /// Which rule the size broke.
        violation: SizeViolation,
    },

    /// A bit index at or past the declared size was used.
    #[error("bit index {index} out of range for a bitset of size {size}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The bitset's declared size.
        size: usize,
    },
}

/// Shorthand for results carrying a [`BitsetError`].
pub type Result<T> = core::result::Result<T, BitsetError>;
