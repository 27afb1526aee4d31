//! An owned row of bells, together with the ways that parsing one can fail.

use std::{
    error::Error,
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use crate::{Bell, Stage, UnsupportedStage};

/// A permutation of the [`Bell`]s of some [`Stage`].  Every `Row` is valid: each [`Bell`] of the
/// [`Stage`] appears exactly once.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Row {
    stage: Stage,
    /// The [`Bell`]s in the order that they would be rung.  Always `stage.num_bells()` long.
    bells: Vec<Bell>,
}

impl Row {
    /* CONSTRUCTORS */

    /// Creates rounds on a given [`Stage`].
    ///
    /// # Example
    /// ```
    /// use pricker_rows::{Row, Stage};
    ///
    /// assert_eq!(Row::rounds(Stage::TRIPLES).to_string(), "1234567");
    /// assert_eq!(Row::rounds(Stage::CINQUES).to_string(), "1234567890E");
    /// ```
    pub fn rounds(stage: Stage) -> Self {
        Self {
            stage,
            bells: stage.bells().collect(),
        }
    }

    /// Parses a (possibly partial) row on a given [`Stage`].  Bell names are case-insensitive and
    /// any [`Bell`]s not mentioned are added to the end in increasing order, so `"231"` on Cinques
    /// is `2314567890E`.  Surrounding whitespace is ignored.
    ///
    /// # Example
    /// ```
    /// use pricker_rows::{Bell, InvalidRowError, Row, Stage};
    ///
    /// assert_eq!(Row::parse("231", Stage::CINQUES)?.to_string(), "2314567890E");
    /// assert_eq!(Row::parse("e0", Stage::CINQUES)?.to_string(), "E0123456789");
    /// assert_eq!(Row::parse("", Stage::TRIPLES)?.to_string(), "1234567");
    /// assert_eq!(
    ///     Row::parse("1231", Stage::TRIPLES),
    ///     Err(InvalidRowError::DuplicateBell(Bell::from_number(1).unwrap()))
    /// );
    /// assert_eq!(
    ///     Row::parse("X", Stage::TRIPLES),
    ///     Err(InvalidRowError::UnknownBell('X'))
    /// );
    /// # Ok::<(), InvalidRowError>(())
    /// ```
    pub fn parse(s: &str, stage: Stage) -> Result<Self, InvalidRowError> {
        let s = s.trim();
        let len = s.chars().count();
        if len > stage.num_bells() {
            return Err(InvalidRowError::TooLong { len, stage });
        }

        let mut seen = vec![false; stage.num_bells()];
        let mut bells = Vec::with_capacity(stage.num_bells());
        for c in s.chars() {
            let bell = Bell::from_name(c).ok_or(InvalidRowError::UnknownBell(c))?;
            match seen.get_mut(bell.index()) {
                None => return Err(InvalidRowError::BellOutOfStage(bell, stage)),
                Some(true) => return Err(InvalidRowError::DuplicateBell(bell)),
                Some(seen_bell) => *seen_bell = true,
            }
            bells.push(bell);
        }
        // Fill in the missing bells in ascending order
        bells.extend(stage.bells().filter(|b| !seen[b.index()]));

        Ok(Self { stage, bells })
    }

    /* GETTERS */

    /// The [`Stage`] of this `Row`.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The [`Bell`]s in this `Row`, in the order they are rung.
    #[inline]
    pub fn bells(&self) -> &[Bell] {
        &self.bells
    }

    /// Returns `true` if this `Row` is rounds.
    pub fn is_rounds(&self) -> bool {
        self.bells.iter().enumerate().all(|(i, b)| b.index() == i)
    }

    /* TRANSFORMATIONS */

    /// Swaps the [`Bell`]s in two places of this `Row`.
    ///
    /// # Panics
    ///
    /// Panics if either place is outside the [`Stage`].
    #[inline]
    #[track_caller]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.bells.swap(a, b);
    }

    /// Swaps every adjacent pair of places `(i, i + 1)` for `i` in `places`, where `places` steps
    /// over the start of each pair.
    pub(crate) fn swap_pairs(&mut self, places: impl Iterator<Item = usize>) {
        for i in places {
            self.bells.swap(i, i + 1);
        }
    }
}

/// Parses a complete `Row`, taking the [`Stage`] from the number of bells given.
impl FromStr for Row {
    type Err = InvalidRowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stage = Stage::from_num_bells(s.trim().chars().count())?;
        Self::parse(s, stage)
    }
}

impl Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row({})", self)
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for b in &self.bells {
            write!(f, "{}", b)?;
        }
        Ok(())
    }
}

////////////
// ERRORS //
////////////

/// All the possible ways that parsing a [`Row`] could fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvalidRowError {
    /// More [`Bell`]s were given than the [`Stage`] has
    TooLong { len: usize, stage: Stage },
    /// A [`char`] which isn't the name of any [`Bell`]
    UnknownBell(char),
    /// A [`Bell`] is not within the range of the [`Stage`] (for example `9` on Triples)
    BellOutOfStage(Bell, Stage),
    /// A [`Bell`] would appear twice in the new [`Row`] (for example in `113456`)
    DuplicateBell(Bell),
    /// The number of bells given isn't a supported [`Stage`]
    UnsupportedStage(UnsupportedStage),
}

impl From<UnsupportedStage> for InvalidRowError {
    fn from(e: UnsupportedStage) -> Self {
        InvalidRowError::UnsupportedStage(e)
    }
}

impl Display for InvalidRowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidRowError::TooLong { len, stage } => {
                write!(f, "Row too long: {} bells given for {}", len, stage)
            }
            InvalidRowError::UnknownBell(c) => write!(f, "Unknown bell {:?}", c),
            InvalidRowError::BellOutOfStage(bell, stage) => {
                write!(f, "Bell '{}' is not within stage {}", bell, stage)
            }
            InvalidRowError::DuplicateBell(bell) => write!(f, "Bell '{}' appears twice", bell),
            InvalidRowError::UnsupportedStage(e) => write!(f, "{}", e),
        }
    }
}

impl Error for InvalidRowError {}

//////////////////
// TESTING CODE //
//////////////////

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for Row {
    fn arbitrary(gen: &mut Gen) -> Self {
        let mut row = Row::rounds(Stage::arbitrary(gen));
        // Fisher-Yates shuffle
        for i in (1..row.bells.len()).rev() {
            let j = usize::arbitrary(gen) % (i + 1);
            row.bells.swap(i, j);
        }
        row
    }
}
