//! The methods which a touch can be pricked in.

use std::fmt::{Display, Formatter};

use pricker_rows::{Row, Stage};

use crate::{Error, Result, Six, SixType};

/// A named ringing method, described entirely by the policies that courses and touches need:
/// which six types it uses (and in which order), how long a plain course is, and where rounds
/// falls within the first six of a touch.  `Method`s are stateless, so are freely copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Method {
    name: &'static str,
    /// The cycle of six types, starting from the type of the first six of a standard course.
    /// Each type is followed by the next one in the cycle.
    six_types: &'static [SixType],
    /// The length of a plain course is this multiple of the number of bells
    sixes_per_bell: usize,
    start_six_type: SixType,
    start_row_index: usize,
}

impl Method {
    /// Stedman: alternating slow and quick sixes.
    pub const STEDMAN: Method = Method {
        name: "Stedman",
        six_types: &[SixType::Slow, SixType::Quick],
        sixes_per_bell: 2,
        start_six_type: SixType::Quick,
        start_row_index: 4,
    };

    /// Erin: slow sixes only.
    pub const ERIN: Method = Method {
        name: "Erin",
        six_types: &[SixType::Slow],
        sixes_per_bell: 1,
        start_six_type: SixType::Slow,
        start_row_index: 6,
    };

    /// Every `Method` which can be pricked.
    pub const ALL: [Method; 2] = [Method::STEDMAN, Method::ERIN];

    /// Finds a [`Method`] by its name, ignoring case.  If none match, the error suggests the
    /// closest name.
    ///
    /// # Example
    /// ```
    /// use pricker::{Error, Method};
    ///
    /// assert_eq!(Method::from_name("erin"), Ok(Method::ERIN));
    /// assert_eq!(
    ///     Method::from_name("Stedmen"),
    ///     Err(Error::UnknownMethod {
    ///         name: "Stedmen".to_owned(),
    ///         suggestion: Some("Stedman")
    ///     })
    /// );
    /// ```
    pub fn from_name(name: &str) -> Result<Method> {
        let lower_name = name.to_lowercase();
        if let Some(method) = Self::ALL
            .iter()
            .find(|m| m.name.to_lowercase() == lower_name)
        {
            return Ok(*method);
        }

        // Only suggest names which are reasonably close
        let suggestion = Self::ALL
            .iter()
            .map(|m| (m.name, edit_distance::edit_distance(&m.name.to_lowercase(), &lower_name)))
            .filter(|&(_, dist)| dist <= 3)
            .min_by_key(|&(_, dist)| dist)
            .map(|(name, _)| name);
        Err(Error::UnknownMethod {
            name: name.to_owned(),
            suggestion,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Every type of six used by this method, in course order.
    pub fn six_types(&self) -> &'static [SixType] {
        self.six_types
    }

    /// The type of the first six of a standard course.
    pub fn default_first_six_type(&self) -> SixType {
        self.six_types[0]
    }

    /// The number of sixes in a plain course on a given [`Stage`].
    pub fn course_length(&self, stage: Stage) -> usize {
        self.sixes_per_bell * stage.num_bells()
    }

    /// The type of the six which follows a six of a given type, or `None` if this method never
    /// uses `six_type`.
    pub fn successor(&self, six_type: SixType) -> Option<SixType> {
        let position = self.six_types.iter().position(|&t| t == six_type)?;
        Some(self.six_types[(position + 1) % self.six_types.len()])
    }

    /// Checks that this method uses sixes of a given type.
    pub fn check_six_type(&self, six_type: SixType) -> Result<()> {
        match self.successor(six_type) {
            Some(_) => Ok(()),
            None => Err(Error::InvalidSixType {
                six_type,
                method: self.name,
            }),
        }
    }

    /// The type of the six at a given (1-indexed) position in a course, given the type of the
    /// course's first six.  Position `0` is the six before the course, i.e. the last six of the
    /// preceding course.
    pub fn six_type_at(&self, first_six_type: SixType, index: usize) -> SixType {
        let num_types = self.six_types.len();
        let offset = self
            .six_types
            .iter()
            .position(|&t| t == first_six_type)
            .unwrap_or(0);
        self.six_types[(offset + index % num_types + num_types - 1) % num_types]
    }

    /// Creates the six at a given (1-indexed) position in a course.
    pub fn create_six(&self, initial_row: Row, first_six_type: SixType, index: usize) -> Six {
        Six::new(self.six_type_at(first_six_type, index), initial_row)
    }

    /// The type of the six in which rounds falls at the start of a touch.
    pub fn default_start_six_type(&self) -> SixType {
        self.start_six_type
    }

    /// The (1-indexed) row of the start six which is rounds.
    pub fn default_start_row_index(&self) -> usize {
        self.start_row_index
    }
}

impl Default for Method {
    fn default() -> Self {
        Method::STEDMAN
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use pricker_rows::{Row, Stage};

    use super::Method;
    use crate::{Error, SixType};

    #[test]
    fn course_length() {
        #[track_caller]
        fn check(method: Method, stage: Stage, exp_length: usize) {
            assert_eq!(method.course_length(stage), exp_length);
        }

        check(Method::STEDMAN, Stage::TRIPLES, 14);
        check(Method::STEDMAN, Stage::CINQUES, 22);
        check(Method::STEDMAN, Stage::SEPTUPLES, 30);
        check(Method::ERIN, Stage::CATERS, 9);
        check(Method::ERIN, Stage::CINQUES, 11);
    }

    #[test]
    fn six_types() {
        use SixType::*;

        let m = Method::STEDMAN;
        assert_eq!(m.default_first_six_type(), Slow);
        assert_eq!(m.successor(Slow), Some(Quick));
        assert_eq!(m.successor(Quick), Some(Slow));
        assert_eq!(m.six_type_at(Slow, 1), Slow);
        assert_eq!(m.six_type_at(Slow, 2), Quick);
        assert_eq!(m.six_type_at(Quick, 1), Quick);
        assert_eq!(m.six_type_at(Quick, 22), Slow);
        assert_eq!(m.six_type_at(Slow, 0), Quick);
        assert_eq!(m.create_six(Row::rounds(Stage::CINQUES), Slow, 0).six_type(), Quick);

        let m = Method::ERIN;
        assert_eq!(m.successor(Slow), Some(Slow));
        assert_eq!(m.successor(Quick), None);
        assert_eq!(m.six_type_at(Slow, 7), Slow);
        assert_eq!(m.six_type_at(Slow, 0), Slow);
        assert_eq!(m.six_types(), &[Slow]);
    }

    #[test]
    fn check_six_type() {
        assert_eq!(Method::STEDMAN.check_six_type(SixType::Quick), Ok(()));
        assert_eq!(
            Method::ERIN.check_six_type(SixType::Quick),
            Err(Error::InvalidSixType {
                six_type: SixType::Quick,
                method: "Erin"
            })
        );
    }

    #[test]
    fn from_name() {
        assert_eq!(Method::from_name("STEDMAN"), Ok(Method::STEDMAN));
        assert_eq!(
            Method::from_name("Grandsire"),
            Err(Error::UnknownMethod {
                name: "Grandsire".to_owned(),
                suggestion: None
            })
        );
        assert_eq!(
            Method::from_name("eryn"),
            Err(Error::UnknownMethod {
                name: "eryn".to_owned(),
                suggestion: Some("Erin")
            })
        );
    }

    #[test]
    fn start_positions() {
        assert_eq!(Method::STEDMAN.default_start_six_type(), SixType::Quick);
        assert_eq!(Method::STEDMAN.default_start_row_index(), 4);
        assert_eq!(Method::ERIN.default_start_row_index(), 6);
    }
}
