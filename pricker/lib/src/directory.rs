use std::collections::{BTreeMap, BTreeSet};

use crate::{BlockRef, Error, Result};

/// A sparse set of courses and sixes, identified by their (1-indexed) positions in a touch.
/// Adding a six also adds the course that contains it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDirectory {
    /// Maps course indices to the indices of the sixes added within that course
    courses: BTreeMap<usize, BTreeSet<usize>>,
}

impl BlockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a block, failing if the block has no coordinates within a touch.
    pub fn add(&mut self, block: &BlockRef) -> Result<()> {
        let (course, six) = Self::coordinates(block)?;
        self.add_indices(course, six);
        Ok(())
    }

    /// Adds a course, or a six within a course.
    pub fn add_indices(&mut self, course: usize, six: Option<usize>) {
        let sixes = self.courses.entry(course).or_default();
        if let Some(six) = six {
            sixes.insert(six);
        }
    }

    pub fn contains(&self, block: &BlockRef) -> Result<bool> {
        let (course, six) = Self::coordinates(block)?;
        Ok(self.contains_indices(course, six))
    }

    /// Checks for a course (if `six` is `None`), or for a six within a course.
    pub fn contains_indices(&self, course: usize, six: Option<usize>) -> bool {
        match (self.courses.get(&course), six) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(sixes), Some(six)) => sixes.contains(&six),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// The coordinates of a block: `[course, six]` for a six or `[course]` for a course.
    pub fn get_indices(&self, block: &BlockRef) -> Result<Vec<usize>> {
        Ok(match Self::coordinates(block)? {
            (course, Some(six)) => vec![course, six],
            (course, None) => vec![course],
        })
    }

    /// Iterates over the courses in this directory, along with the sixes added within each.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> + '_ {
        self.courses.iter().map(|(&course, sixes)| (course, sixes))
    }

    fn coordinates(block: &BlockRef) -> Result<(usize, Option<usize>)> {
        match *block {
            BlockRef::Six {
                course: Some(course),
                six,
            } => Ok((course, Some(six))),
            BlockRef::Course {
                course: Some(course),
            } => Ok((course, None)),
            _ => Err(Error::UnsupportedBlock(*block)),
        }
    }
}
