//! A representation of the stages a touch can be pricked on, with human-friendly `const`s and
//! display names.

use std::{
    convert::TryFrom,
    error::Error,
    fmt::{Debug, Display, Formatter},
};

use crate::Bell;

/// A newtype over [`u8`] that represents a stage.  Only the odd stages which touches of Stedman
/// and Erin are rung on can be created, so every `Stage` is one of the named constants:
/// ```
/// use std::convert::TryFrom;
/// use pricker_rows::Stage;
///
/// assert_eq!(Stage::try_from(11), Ok(Stage::CINQUES));
/// assert!(Stage::try_from(8).is_err());
/// assert_eq!(Stage::CATERS.to_string(), "Caters");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Stage(u8);

impl Stage {
    pub const TRIPLES: Stage = Stage(7);
    pub const CATERS: Stage = Stage(9);
    pub const CINQUES: Stage = Stage(11);
    pub const SEXTUPLES: Stage = Stage(13);
    pub const SEPTUPLES: Stage = Stage(15);

    /// Every supported `Stage`, in increasing order.
    pub const ALL: [Stage; 5] = [
        Stage::TRIPLES,
        Stage::CATERS,
        Stage::CINQUES,
        Stage::SEXTUPLES,
        Stage::SEPTUPLES,
    ];

    /// Returns the `Stage` with a given number of [`Bell`]s, if that number of bells is
    /// supported.
    pub fn from_num_bells(num_bells: usize) -> Result<Stage, UnsupportedStage> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.num_bells() == num_bells)
            .ok_or(UnsupportedStage(num_bells))
    }

    /// The number of [`Bell`]s in this [`Stage`].
    #[inline(always)]
    pub fn num_bells(self) -> usize {
        self.0 as usize
    }

    /// The number of [`Bell`]s in this [`Stage`] as a [`u8`].
    #[inline(always)]
    pub fn num_bells_u8(self) -> u8 {
        self.0
    }

    /// Returns the heaviest [`Bell`] in this `Stage`
    pub fn tenor(self) -> Bell {
        Bell::tenor(self)
    }

    /// Gets an [`Iterator`] over the [`Bell`]s contained within this `Stage`, in increasing order.
    pub fn bells(self) -> impl DoubleEndedIterator<Item = Bell> {
        (0..self.0).map(Bell::from_index)
    }

    /// Returns `true` if a given [`Bell`] is contained in this `Stage`.
    pub fn contains(self, bell: Bell) -> bool {
        bell.number() <= self.0
    }

    /// Gets the human-friendly name of this [`Stage`].
    pub fn name(self) -> &'static str {
        match self.0 {
            7 => "Triples",
            9 => "Caters",
            11 => "Cinques",
            13 => "Sextuples",
            15 => "Septuples",
            // Every constructor goes through `Stage::ALL`
            _ => unreachable!("unsupported stage {}", self.0),
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = UnsupportedStage;

    fn try_from(num_bells: u8) -> Result<Self, Self::Error> {
        Self::from_num_bells(num_bells as usize)
    }
}

impl Debug for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage({})", self)
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An error created when a bell count isn't one of the supported [`Stage`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnsupportedStage(pub usize);

impl Display for UnsupportedStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bells is not a supported stage", self.0)
    }
}

impl Error for UnsupportedStage {}

//////////////////
// TESTING CODE //
//////////////////

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for Stage {
    fn arbitrary(gen: &mut Gen) -> Self {
        *gen.choose(&Stage::ALL).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::{Stage, UnsupportedStage};

    #[test]
    fn try_from() {
        #[track_caller]
        fn check(num_bells: u8, exp: Result<Stage, UnsupportedStage>) {
            assert_eq!(Stage::try_from(num_bells), exp);
        }

        check(7, Ok(Stage::TRIPLES));
        check(9, Ok(Stage::CATERS));
        check(11, Ok(Stage::CINQUES));
        check(13, Ok(Stage::SEXTUPLES));
        check(15, Ok(Stage::SEPTUPLES));
        check(0, Err(UnsupportedStage(0)));
        check(8, Err(UnsupportedStage(8)));
        check(12, Err(UnsupportedStage(12)));
        check(17, Err(UnsupportedStage(17)));
    }

    #[test]
    fn names() {
        assert_eq!(Stage::TRIPLES.to_string(), "Triples");
        assert_eq!(Stage::SEXTUPLES.name(), "Sextuples");
        assert_eq!(format!("{:?}", Stage::CINQUES), "Stage(Cinques)");
    }

    #[test]
    fn bells() {
        let names: String = Stage::CINQUES.bells().map(|b| b.name()).collect();
        assert_eq!(names, "1234567890E");
        assert_eq!(Stage::SEPTUPLES.tenor().number(), 15);
    }
}
