//! A type-safe representation of a bell.

use std::fmt::{Debug, Display, Formatter};

use crate::Stage;

/// A lookup string of the bell names.  `E` and `T` stand for 11 and 12, and the letters continue
/// from `A` up to the 16th.
const BELL_NAMES: &str = "1234567890ETABCD";

/// A type-safe representation of a 'bell', which adds conversions to and from the symbols used
/// when writing rows.  Each `Bell` takes a single byte in memory.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Bell {
    /// A zero-indexed number representing the `Bell`.  I.e the treble is always
    /// `Bell { index: 0 }`, and the 11th is `Bell { index: 10 }` but would be
    /// [`Display`]ed as `E`.
    index: u8,
}

impl Bell {
    /// Creates a `Bell` from a [`char`] containing a bell name (e.g. `'4'` or `'E'`).  Lower case
    /// names are accepted and treated like their upper case versions.  If the name is not valid,
    /// then this returns [`None`].
    ///
    /// # Example
    /// ```
    /// # fn test() -> Option<()> {
    /// use pricker_rows::Bell;
    ///
    /// assert_eq!(Bell::from_name('1')?.number(), 1);
    /// assert_eq!(Bell::from_name('0')?.number(), 10);
    /// assert_eq!(Bell::from_name('E')?.number(), 11);
    /// assert_eq!(Bell::from_name('e')?.number(), 11);
    /// // Anything that isn't a bell name gives `None`
    /// assert_eq!(Bell::from_name('X'), None);
    /// assert_eq!(Bell::from_name(' '), None);
    /// # Some(())
    /// # }
    /// # fn main() { test().unwrap() }
    /// ```
    pub fn from_name(c: char) -> Option<Bell> {
        let c = c.to_ascii_uppercase();
        BELL_NAMES
            .chars()
            .position(|x| x == c)
            .map(|v| Bell::from_index(v as u8))
    }

    /// Creates a `Bell` from a 0-indexed integer.
    ///
    /// # Panics
    ///
    /// Panics if `index` is too large to have a bell name.
    #[inline]
    #[track_caller]
    pub fn from_index(index: u8) -> Bell {
        assert!(
            (index as usize) < BELL_NAMES.len(),
            "`Bell` #{} has no name",
            index as usize + 1
        );
        Bell { index }
    }

    /// Creates a `Bell` from a 1-indexed integer, returning [`None`] for `0` or for numbers that
    /// are too large to be named.
    ///
    /// # Example
    /// ```
    /// # fn test() -> Option<()> {
    /// use pricker_rows::Bell;
    ///
    /// assert_eq!(Bell::from_number(11)?.name(), 'E');
    /// assert_eq!(Bell::from_number(0), None);
    /// assert_eq!(Bell::from_number(17), None);
    /// # Some(())
    /// # }
    /// # fn main() { test().unwrap() }
    /// ```
    pub fn from_number(number: u8) -> Option<Bell> {
        let index = number.checked_sub(1)?;
        ((index as usize) < BELL_NAMES.len()).then_some(Bell { index })
    }

    /// Creates the `Bell` representing the tenor (heaviest bell) on a given [`Stage`].
    pub fn tenor(stage: Stage) -> Bell {
        Bell {
            index: stage.num_bells_u8() - 1,
        }
    }

    /// Returns the 0-indexed representation of this `Bell`.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the 1-indexed representation of this `Bell`.
    #[inline]
    pub fn number(self) -> u8 {
        self.index + 1
    }

    /// The symbol used to write this `Bell` in a row.
    pub fn name(self) -> char {
        // Can't fail, since every constructor checks that the index has a name
        BELL_NAMES.as_bytes()[self.index()] as char
    }
}

impl Debug for Bell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bell({})", self)
    }
}

impl Display for Bell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
