//! The elementary changes used to generate the rows of a six.

use std::fmt::{Display, Formatter};

use crate::Row;

/// One of the three changes which make up every plain six on an odd stage.  Each change swaps
/// disjoint pairs of adjacent bells, so applying a `Change` twice always gets back to where we
/// started.
///
/// # Example
/// ```
/// use pricker_rows::{Change, Row, Stage};
///
/// let mut row = Row::rounds(Stage::TRIPLES);
/// Change::Three.permute(&mut row);
/// assert_eq!(row.to_string(), "2135476");
/// Change::One.permute(&mut row);
/// assert_eq!(row.to_string(), "2314567");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    /// Notation `1`: the treble's place is made and every following pair swaps.
    One,
    /// Notation `3`: the front pair swaps, third place is made and every following pair swaps.
    Three,
    /// Notation `n`: every pair swaps, leaving the tenor in place.
    N,
}

impl Change {
    /// Parses a `Change` from its place notation symbol.
    pub fn from_notation(c: char) -> Option<Self> {
        Some(match c {
            '1' => Self::One,
            '3' => Self::Three,
            'n' | 'N' => Self::N,
            _ => return None,
        })
    }

    /// The place notation symbol of this `Change`.
    pub fn notation(self) -> char {
        match self {
            Self::One => '1',
            Self::Three => '3',
            Self::N => 'n',
        }
    }

    /// Uses this `Change` to permute a [`Row`] in-place.
    pub fn permute(self, row: &mut Row) {
        let n = row.stage().num_bells();
        match self {
            Self::One => row.swap_pairs((1..n - 1).step_by(2)),
            Self::Three => {
                row.swap(0, 1);
                row.swap_pairs((3..n - 1).step_by(2));
            }
            Self::N => row.swap_pairs((0..n - 1).step_by(2)),
        }
    }

    /// Returns the result of applying this `Change` to a [`Row`], leaving the original untouched.
    pub fn permute_new(self, row: &Row) -> Row {
        let mut new_row = row.clone();
        self.permute(&mut new_row);
        new_row
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::Change;
    use crate::{Row, Stage};

    #[test]
    fn permute() {
        #[track_caller]
        fn check(change: Change, start: &str, exp: &str) {
            let row = Row::parse(start, Stage::CINQUES).unwrap();
            assert_eq!(change.permute_new(&row).to_string(), exp);
        }

        check(Change::One, "", "132547698E0");
        check(Change::Three, "", "213547698E0");
        check(Change::N, "", "2143658709E");
        check(Change::One, "231", "213547698E0");
        check(Change::Three, "213547698E0", "1234567890E");
    }

    #[test]
    fn notation() {
        for &c in &[Change::One, Change::Three, Change::N] {
            assert_eq!(Change::from_notation(c.notation()), Some(c));
        }
        assert_eq!(Change::from_notation('x'), None);
    }

    #[quickcheck]
    fn self_inverse(row: Row) -> bool {
        [Change::One, Change::Three, Change::N]
            .iter()
            .all(|c| c.permute_new(&c.permute_new(&row)) == row)
    }
}
