//! Error types for the different ways that pricking a touch can fail.

use std::{
    fmt::{Display, Formatter},
    ops::RangeInclusive,
};

use pricker_rows::{InvalidRowError, UnsupportedStage};

use crate::{BlockRef, SixType};

/// Alias for `Result<T, pricker::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The different ways that pricking a touch can fail.  No operation which returns an `Error`
/// leaves a block or container partially modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /* ROW ERRORS */
    /// Some row couldn't be parsed
    InvalidRow(InvalidRowError),

    /* CONTAINER ERRORS */
    /// A container would end up with a length outside its limits
    LengthRange {
        length: usize,
        limits: RangeInclusive<usize>,
    },
    /// A (1-indexed) block index doesn't refer to a block in the container
    BlockIndex { index: usize, length: usize },
    /// A six type isn't used by the method of a course or touch
    InvalidSixType {
        six_type: SixType,
        method: &'static str,
    },
    /// A start must begin at one of the six rows of its six
    InvalidStartRowIndex(usize),

    /* IMPORT ERRORS */
    /// A line of text doesn't describe a course
    CourseImport { line: String },
    /// The first line of a touch doesn't have the length of any supported stage
    StageRecognition(usize),
    /// No method has the given name.  `suggestion` is the closest name, if any is close enough.
    UnknownMethod {
        name: String,
        suggestion: Option<&'static str>,
    },

    /* DIRECTORY ERRORS */
    /// The block has no (course, six) coordinates
    UnsupportedBlock(BlockRef),
}

impl From<InvalidRowError> for Error {
    fn from(e: InvalidRowError) -> Self {
        Error::InvalidRow(e)
    }
}

impl From<UnsupportedStage> for Error {
    fn from(e: UnsupportedStage) -> Self {
        Error::StageRecognition(e.0)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRow(e) => write!(f, "Invalid row: {}", e),

            /* CONTAINER ERRORS */
            Error::LengthRange { length, limits } => write!(
                f,
                "Length {} is outside the range {}..={}",
                length,
                limits.start(),
                limits.end()
            ),
            Error::BlockIndex { index, length } => write!(
                f,
                "Block index {} is out of range (there are {} blocks)",
                index, length
            ),
            Error::InvalidSixType { six_type, method } => {
                write!(f, "{} doesn't have {} sixes", method, six_type)
            }
            Error::InvalidStartRowIndex(idx) => {
                write!(f, "Start row index must be between 1 and 6, not {}", idx)
            }

            /* IMPORT ERRORS */
            Error::CourseImport { line } => write!(f, "Cannot import course {:?}", line),
            Error::StageRecognition(num_bells) => {
                write!(f, "Can't recognise a stage with {} bells", num_bells)
            }
            Error::UnknownMethod { name, suggestion } => {
                write!(f, "No method called {:?}", name)?;
                if let Some(s) = suggestion {
                    write!(f, ".  Do you mean {:?}?", s)?;
                }
                Ok(())
            }

            /* DIRECTORY ERRORS */
            Error::UnsupportedBlock(block) => {
                write!(f, "{:?} has no place in a block directory", block)
            }
        }
    }
}

impl std::error::Error for Error {}
