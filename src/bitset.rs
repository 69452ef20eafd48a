use core::fmt::{self, Debug, Display, Formatter, Write};
use core::iter::FusedIterator;

use crate::error::{BitsetError, Result, SizeViolation};

/// Number of bits held by each backing word.
pub const WORD_WIDTH: usize = u32::BITS as usize;

/// Largest size a [`Bitset`] accepts, in bits.
pub const MAX_SIZE: usize = 256;

/// Number of words needed to back a bitset of [`MAX_SIZE`] bits.
pub const MAX_WORDS: usize = MAX_SIZE / WORD_WIDTH;

/// Computes the number of live backing words for a bitset of `size` bits.
///
/// # Examples
/// ```
/// use light_bitset::word_count;
///
/// assert_eq!(word_count(8), 1);
/// assert_eq!(word_count(32), 1);
/// assert_eq!(word_count(64), 2);
/// assert_eq!(word_count(256), 8);
/// ```
pub const fn word_count(size: usize) -> usize {
    size.div_ceil(WORD_WIDTH)
}

pub(crate) const fn validate_size(size: usize) -> Result<()> {
    if !size.is_power_of_two() {
        return Err(BitsetError::InvalidSize {
            size,
            violation: SizeViolation::NotPowerOfTwo,
        });
    }
    if size > MAX_SIZE {
        return Err(BitsetError::InvalidSize {
            size,
            violation: SizeViolation::ExceedsCapacity,
        });
    }
    Ok(())
}

/// A fixed-capacity bitset of `size` bits.
///
/// `size` is chosen at construction. It must be a power of two no larger than
/// [`MAX_SIZE`]. Bits live in `u32` words, bit `n` being bit `n % 32` of word
/// `n / 32`. Only the first [`word_count`]`(size)` words are in use and bits
/// at or past `size` are never set.
///
/// Every indexed operation checks its index against `size` and returns
/// [`BitsetError::IndexOutOfRange`] instead of touching the store.
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub struct Bitset {
    words: [u32; MAX_WORDS],
    size: usize,
}

impl Bitset {
    /// Creates a new bitset of `size` bits with all bits unset.
    ///
    /// # Errors
    /// Returns [`BitsetError::InvalidSize`] with
    /// [`SizeViolation::NotPowerOfTwo`] if `size` is not a power of two, or
    /// [`SizeViolation::ExceedsCapacity`] if it is larger than [`MAX_SIZE`].
    ///
    /// # Examples
    /// ```
    /// use light_bitset::{Bitset, BitsetError, SizeViolation};
    ///
    /// assert!(Bitset::new(128).is_ok());
    /// assert!(matches!(
    ///     Bitset::new(100),
    ///     Err(BitsetError::InvalidSize { violation: SizeViolation::NotPowerOfTwo, .. })
    /// ));
    /// assert!(matches!(
    ///     Bitset::new(512),
    ///     Err(BitsetError::InvalidSize { violation: SizeViolation::ExceedsCapacity, .. })
    /// ));
    /// ```
    pub fn new(size: usize) -> Result<Self> {
        if let Err(err) = validate_size(size) {
            tracing::debug!(size, %err, "rejected bitset size");
            return Err(err);
        }
        tracing::debug!(size, words = word_count(size), "bitset allocated");
        Ok(Self {
            words: [0u32; MAX_WORDS],
            size,
        })
    }

    /// Creates a new `const` bitset of `size` bits with all bits unset.
    ///
    /// Equivalent to [`new`], but callable in compile-time contexts such as
    /// `const` and `static` initialization.
    ///
    /// # Compiler Errors
    /// Prevents compilation when evaluated in a const context with a size that
    /// [`new`] would reject.
    ///
    /// ```compile_fail
    /// use light_bitset::Bitset;
    ///
    /// const NOT_POWER_OF_TWO: Bitset = Bitset::const_new(100);
    /// assert!(NOT_POWER_OF_TWO.is_empty());
    /// ```
    ///
    /// ```compile_fail
    /// use light_bitset::Bitset;
    ///
    /// const TOO_LARGE: Bitset = Bitset::const_new(512);
    /// assert!(TOO_LARGE.is_empty());
    /// ```
    ///
    /// # Panics
    /// Panics when called at runtime with such a size.
    ///
    /// # Examples
    /// ```
    /// use light_bitset::Bitset;
    ///
    /// const FLAGS: Bitset = Bitset::const_new(16);
    /// assert_eq!(FLAGS.size(), 16);
    /// assert!(FLAGS.is_empty());
    /// ```
    ///
    /// [`new`]: Bitset::new
    pub const fn const_new(size: usize) -> Self {
        match validate_size(size) {
            Ok(()) => Self {
                words: [0u32; MAX_WORDS],
                size,
            },
            Err(BitsetError::InvalidSize {
                violation: SizeViolation::ExceedsCapacity,
                ..
            }) => panic!("Bitset size must not exceed 256 bits."),
            Err(_) => panic!("Bitset size must be a power of two."),
        }
    }

    /// Returns the declared size in bits.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of live backing words.
    #[inline]
    pub const fn word_count(&self) -> usize {
        word_count(self.size)
    }

    /// Returns the live backing words, lowest bits first.
    ///
    /// # Examples
    /// ```
    /// use light_bitset::Bitset;
    ///
    /// # fn main() -> Result<(), light_bitset::BitsetError> {
    /// let mut bitset = Bitset::new(8)?;
    /// bitset.set(0)?.set(4)?;
    /// assert_eq!(bitset.words(), &[0b10001]);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words[..self.word_count()]
    }

    /// Returns the bit at `idx` isolated within its word.
    ///
    /// The result is `1 << (idx % 32)` if the bit is set and `0` otherwise.
    /// Use [`is_set`] for a `bool`.
    ///
    /// # Errors
    /// Returns [`BitsetError::IndexOutOfRange`] if `idx >= size`.
    ///
    /// # Examples
    /// ```
    /// use light_bitset::Bitset;
    ///
    /// # fn main() -> Result<(), light_bitset::BitsetError> {
    /// let mut bitset = Bitset::new(8)?;
    /// bitset.set(4)?;
    /// assert_eq!(bitset.get(4)?, 16);
    /// assert_eq!(bitset.get(0)?, 0);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// [`is_set`]: Bitset::is_set
    #[inline]
    pub fn get(&self, idx: usize) -> Result<u32> {
        let (word_idx, mask) = self.checked_idxs(idx)?;
        Ok(self.words[word_idx] & mask)
    }

    /// Returns `true` if the bit at `idx` is set.
    ///
    /// # Errors
    /// Returns [`BitsetError::IndexOutOfRange`] if `idx >= size`.
    #[inline]
    pub fn is_set(&self, idx: usize) -> Result<bool> {
        Ok(self.get(idx)? != 0)
    }

    /// Sets the bit at `idx` and returns the bitset for chaining.
    ///
    /// Setting an already set bit changes nothing.
    ///
    /// # Errors
    /// Returns [`BitsetError::IndexOutOfRange`] if `idx >= size`. The bitset
    /// is left untouched.
    ///
    /// # Examples
    /// ```
    /// use light_bitset::Bitset;
    ///
    /// # fn main() -> Result<(), light_bitset::BitsetError> {
    /// let mut bitset = Bitset::new(32)?;
    /// bitset.set(1)?.set(2)?;
    /// assert!(bitset.is_set(1)? && bitset.is_set(2)?);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn set(&mut self, idx: usize) -> Result<&mut Self> {
        let (word_idx, mask) = self.checked_idxs(idx)?;
        self.words[word_idx] |= mask;
        tracing::trace!(index = idx, "bit set");
        Ok(self)
    }

    /// Unsets the bit at `idx` and returns the bitset for chaining.
    ///
    /// # Errors
    /// Returns [`BitsetError::IndexOutOfRange`] if `idx >= size`.
    ///
    /// # Examples
    /// ```
    /// use light_bitset::Bitset;
    ///
    /// # fn main() -> Result<(), light_bitset::BitsetError> {
    /// let mut bitset = Bitset::new(8)?;
    /// bitset.set(3)?.unset(3)?;
    /// assert!(!bitset.is_set(3)?);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn unset(&mut self, idx: usize) -> Result<&mut Self> {
        let (word_idx, mask) = self.checked_idxs(idx)?;
        self.words[word_idx] &= !mask;
        tracing::trace!(index = idx, "bit unset");
        Ok(self)
    }

    /// Toggles the bit at `idx` and returns the bitset for chaining.
    ///
    /// # Errors
    /// Returns [`BitsetError::IndexOutOfRange`] if `idx >= size`.
    ///
    /// # Examples
    /// ```
    /// use light_bitset::Bitset;
    ///
    /// # fn main() -> Result<(), light_bitset::BitsetError> {
    /// let mut bitset = Bitset::new(8)?;
    /// bitset.swap(4)?;
    /// assert!(bitset.is_set(4)?);
    /// bitset.swap(4)?;
    /// assert!(!bitset.is_set(4)?);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn swap(&mut self, idx: usize) -> Result<&mut Self> {
        let (word_idx, mask) = self.checked_idxs(idx)?;
        self.words[word_idx] ^= mask;
        tracing::trace!(index = idx, "bit toggled");
        Ok(self)
    }

    /// Unsets every bit. The size and word count stay the same.
    pub fn clear(&mut self) {
        self.words = [0u32; MAX_WORDS];
        tracing::debug!(size = self.size, "bitset cleared");
    }

    /// Returns the number of set bits.
    #[inline]
    pub fn popcount(&self) -> usize {
        self.words().iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words().iter().all(|w| *w == 0)
    }

    /// Returns the index of the first set bit or `None` if all bits are unset.
    ///
    /// # Examples
    /// ```
    /// use light_bitset::Bitset;
    ///
    /// # fn main() -> Result<(), light_bitset::BitsetError> {
    /// let mut bitset = Bitset::new(64)?;
    /// assert_eq!(bitset.first_set_bit(), None);
    /// bitset.set(45)?.set(50)?;
    /// assert_eq!(bitset.first_set_bit(), Some(45));
    /// # Ok(())
    /// # }
    /// ```
    pub fn first_set_bit(&self) -> Option<usize> {
        for (i, word) in self.words().iter().enumerate() {
            if *word != 0 {
                let bit = word.trailing_zeros() as usize;
                return Some(i * WORD_WIDTH + bit);
            }
        }
        None
    }

    /// Returns an iterator over all `size` bits as `bool`, from least to most
    /// significant.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bitset: self,
            idx: 0,
        }
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order.
    ///
    /// # Examples
    /// ```
    /// use light_bitset::Bitset;
    ///
    /// # fn main() -> Result<(), light_bitset::BitsetError> {
    /// let mut bitset = Bitset::new(64)?;
    /// bitset.set(0)?.set(31)?.set(32)?.set(63)?;
    /// assert_eq!(bitset.iter_ones().collect::<Vec<_>>(), [0, 31, 32, 63]);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        let words = self.words();
        IterOnes {
            words,
            word_idx: 0,
            current: words.first().copied().unwrap_or(0),
            base_bit_idx: 0,
        }
    }

    /// Writes the diagnostic grid to `out`.
    ///
    /// Rows are `2 * log2(size)` bits wide, clamped to at least one bit.
    /// Each row starts with its first bit index left-aligned in four
    /// columns, followed by its bits as space separated `0`/`1` tokens. Cells
    /// past `size` on the last row render as `0`.
    ///
    /// # Examples
    /// ```
    /// use light_bitset::Bitset;
    ///
    /// # fn main() -> Result<(), light_bitset::BitsetError> {
    /// let mut bitset = Bitset::new(8)?;
    /// bitset.set(0)?.set(4)?;
    /// let mut grid = String::new();
    /// bitset.render(&mut grid).unwrap();
    /// assert_eq!(grid, "0    1 0 0 0 1 0\n6    0 0 0 0 0 0\n");
    /// # Ok(())
    /// # }
    /// ```
    pub fn render<W: Write>(&self, out: &mut W) -> fmt::Result {
        let base = self.size.trailing_zeros() as usize;
        let slide = (base * 2).max(1);

        for row in (0..self.size).step_by(slide) {
            write!(out, "{row:<4}")?;
            for col in 0..slide {
                let dot = if self.bit(row + col) { '1' } else { '0' };
                write!(out, " {dot}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Prints the diagnostic grid (see [`render`]) to standard output.
    ///
    /// The format is meant for humans and may change.
    ///
    /// [`render`]: Bitset::render
    pub fn dump(&self) {
        print!("{self}");
    }

    // Unchecked read used by rendering; indices past `size` read as unset.
    #[inline]
    fn bit(&self, idx: usize) -> bool {
        if idx >= self.size {
            return false;
        }
        let (word_idx, mask) = Self::idxs(idx);
        self.words[word_idx] & mask != 0
    }

    #[inline]
    fn checked_idxs(&self, idx: usize) -> Result<(usize, u32)> {
        if idx >= self.size {
            tracing::debug!(index = idx, size = self.size, "rejected bit index");
            return Err(BitsetError::IndexOutOfRange {
                index: idx,
                size: self.size,
            });
        }
        Ok(Self::idxs(idx))
    }

    #[inline]
    const fn idxs(idx: usize) -> (usize, u32) {
        (idx / WORD_WIDTH, 1 << (idx % WORD_WIDTH))
    }
}

impl TryFrom<usize> for Bitset {
    type Error = BitsetError;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl<'bitset> IntoIterator for &'bitset Bitset {
    type Item = bool;
    type IntoIter = Iter<'bitset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Bitset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl Debug for Bitset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LSB -> ")?;
        for (i, bit) in self.iter().enumerate() {
            if i % WORD_WIDTH == 0 {
                write!(f, "{i}: ")?;
            }
            write!(f, "{}", if bit { '1' } else { '0' })?;
            if i % WORD_WIDTH == WORD_WIDTH - 1 && i < self.size - 1 {
                write!(f, " ")?;
            }
        }
        write!(f, " <- MSB")?;
        Ok(())
    }
}

/// Iterator over all bits in the bitset as `bool` values.
///
/// Yields `true` for set bits and `false` for unset bits, starting from index 0.
///
/// Returned by [`Bitset::iter()`].
#[derive(Clone, Copy)]
pub struct Iter<'bitset> {
    bitset: &'bitset Bitset,
    idx: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.bitset.size {
            return None;
        }
        let bit = self.bitset.bit(self.idx);
        self.idx += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bitset.size.saturating_sub(self.idx);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Iterator over the indices of set bits in the bitset.
///
/// Yields the positions of all bits that are set, in ascending order.
///
/// Returned by [`Bitset::iter_ones()`].
#[derive(Clone, Copy)]
pub struct IterOnes<'bitset> {
    words: &'bitset [u32],
    word_idx: usize,
    current: u32,
    base_bit_idx: usize,
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.words.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1; // unset LSB
                return Some(self.base_bit_idx + tz);
            }

            self.word_idx += 1;
            self.base_bit_idx += WORD_WIDTH;
            self.current = self.words.get(self.word_idx).copied().unwrap_or(0);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}
