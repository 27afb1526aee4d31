use std::ops::{Deref, DerefMut};

use pricker_rows::Row;

use crate::{
    visitor::Visitor, Block, BlockRef, Course, Method, Result, SerialContainer, SixType, Start,
};

/// A touch: a [`Start`] followed by a sequence of [`Course`]s.  The first course begins at the
/// last row of the start, and every other course begins where the previous one ended.
#[derive(Debug, Clone)]
pub struct Touch {
    start: Start,
    courses: SerialContainer<Course>,
    method: Method,
}

impl Touch {
    /// The most courses that a touch can contain
    pub const MAX_LENGTH: usize = 100;

    /// Creates a `Touch` with the standard [`Start`] for `method` and no courses.
    pub fn new(initial_row: Row, method: Method) -> Self {
        let start = Start::new(initial_row, method);
        let courses = SerialContainer::new(start.last_row().clone(), 0..=Self::MAX_LENGTH);
        Self {
            start,
            courses,
            method,
        }
    }

    /// Parses a touch from text.  See [`parse::touch`](crate::parse::touch) for the format.
    pub fn parse(text: &str, method: Method) -> Result<Self> {
        crate::parse::touch(text, method)
    }

    /////////////
    // GETTERS //
    /////////////

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn start(&self) -> &Start {
        &self.start
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn courses(&self) -> &[Course] {
        self.courses.blocks()
    }

    pub fn course(&self, index: usize) -> Result<&Course> {
        self.courses.get(index)
    }

    /// Gets mutable access to the course at a 1-indexed position.  Any changes made to the
    /// course (including replacing it outright) are propagated through the rest of the touch when
    /// the returned guard is dropped.
    pub fn course_mut(&mut self, index: usize) -> Result<CourseMut<'_>> {
        self.courses.get(index)?;
        Ok(CourseMut { touch: self, index })
    }

    /////////////
    // COURSES //
    /////////////

    /// Inserts a course so that it ends up at a 1-indexed position.  Any notifications the
    /// course had made before joining the touch are discarded.
    pub fn insert_course(&mut self, index: usize, mut course: Course) -> Result<()> {
        course.take_notifications();
        self.courses.insert(index, course)
    }

    /// Adds a course to the end of the touch.
    pub fn push_course(&mut self, course: Course) -> Result<()> {
        self.insert_course(self.len() + 1, course)
    }

    /// Removes the course at a 1-indexed position, returning it without an owner.
    pub fn delete_course(&mut self, index: usize) -> Result<Course> {
        self.courses.delete(index)
    }

    ////////////
    // LENGTH //
    ////////////

    /// Sets the number of courses.  New courses are plain courses of the touch's [`Method`].
    pub fn set_length(&mut self, length: usize) -> Result<()> {
        let method = self.method;
        self.courses
            .set_length(length, |row, _| Course::new(row, method))
    }

    pub fn safe_set_length(&mut self, length: usize) {
        let method = self.method;
        self.courses
            .safe_set_length(length, |row, _| Course::new(row, method))
    }

    /// Removes every course.
    pub fn reset_length(&mut self) {
        self.safe_set_length(0);
    }

    ///////////
    // START //
    ///////////

    pub fn set_start_row_index(&mut self, row_index: usize) -> Result<()> {
        self.start.set_row_index(row_index)?;
        self.start_changed();
        Ok(())
    }

    pub fn set_start_six_type(&mut self, six_type: SixType) -> Result<()> {
        self.start.set_six_type(six_type)?;
        self.start_changed();
        Ok(())
    }

    /// Sets the start's six type and row index together, notifying once.
    pub fn set_start_position(&mut self, six_type: SixType, row_index: usize) -> Result<()> {
        self.start.set_position(six_type, row_index)?;
        self.start_changed();
        Ok(())
    }

    fn start_changed(&mut self) {
        log::debug!("Start now ends at {}", self.start.last_row());
        self.courses.set_initial_row(self.start.last_row().clone());
        self.courses.notify(0);
    }

    ///////////////
    // TRAVERSAL //
    ///////////////

    /// Passes every row of this touch to a [`Visitor`]: first the rows of the start, then those
    /// of each course in turn.
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        self.start.accept_at(visitor, None);
        for course in self.courses() {
            if !visitor.is_visiting() {
                return;
            }
            course.accept_at(visitor, None);
        }
    }

    pub fn block_ref(&self) -> BlockRef {
        BlockRef::Touch
    }

    /// The total number of rows in the start and every course.
    pub fn estimate_rows(&self) -> usize {
        self.start.estimate_rows() + self.courses.estimate_rows()
    }

    pub fn initial_row(&self) -> &Row {
        self.start.initial_row()
    }

    pub fn last_row(&self) -> &Row {
        self.courses.last_row()
    }

    /// Removes and returns the notifications this touch has made since the last call.  Each
    /// notification is the 1-indexed position of the first course affected by a change, or `0`
    /// for a change to the start.
    pub fn take_notifications(&mut self) -> Vec<usize> {
        self.courses.take_notifications()
    }
}

/// Mutable access to one [`Course`] of a [`Touch`].  When this is dropped, the course is
/// re-chained into the touch along with every course after it, and the touch notifies once if
/// anything changed.
#[derive(Debug)]
pub struct CourseMut<'t> {
    touch: &'t mut Touch,
    index: usize,
}

impl Deref for CourseMut<'_> {
    type Target = Course;

    fn deref(&self) -> &Course {
        &self.touch.courses.blocks()[self.index - 1]
    }
}

impl DerefMut for CourseMut<'_> {
    fn deref_mut(&mut self) -> &mut Course {
        self.touch.courses.get_mut_unchecked(self.index)
    }
}

impl Drop for CourseMut<'_> {
    fn drop(&mut self) {
        let notifications = self
            .touch
            .courses
            .get_mut_unchecked(self.index)
            .take_notifications();
        log::trace!(
            "Course {} released ({} notifications)",
            self.index,
            notifications.len()
        );
        self.touch
            .courses
            .refresh(self.index, !notifications.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use pricker_rows::{Row, Stage};

    use super::Touch;
    use crate::{visitor::Counter, Block, Call, Course, Error, Method, SixType};

    fn rounds() -> Row {
        Row::rounds(Stage::CINQUES)
    }

    fn touch(length: usize) -> Touch {
        let mut touch = Touch::new(rounds(), Method::STEDMAN);
        touch.set_length(length).unwrap();
        touch.take_notifications();
        touch
    }

    #[track_caller]
    fn assert_chained(touch: &Touch) {
        let mut expected_row = touch.start().last_row();
        for (i, course) in touch.courses().iter().enumerate() {
            assert_eq!(course.initial_row(), expected_row);
            assert_eq!(course.ownership().map(|o| o.index), Some(i + 1));
            expected_row = course.last_row();
        }
        assert_eq!(touch.last_row(), expected_row);
    }

    #[test]
    fn new_touch() {
        let touch = Touch::new(rounds(), Method::STEDMAN);
        assert!(touch.is_empty());
        assert_eq!(touch.initial_row(), &rounds());
        assert_eq!(touch.start().last_row().to_string(), "2314567890E");
        assert_eq!(touch.last_row().to_string(), "2314567890E");
        assert_eq!(touch.estimate_rows(), 2);
    }

    #[test]
    fn insert_and_delete() {
        let mut touch = touch(3);
        assert_chained(&touch);

        let mut course = Course::new(rounds(), Method::STEDMAN);
        course.set_call(1, Call::Bob).unwrap();
        touch.insert_course(2, course).unwrap();
        assert_eq!(touch.len(), 4);
        assert_eq!(touch.course(2).unwrap().call(1), Ok(Call::Bob));
        assert_chained(&touch);
        assert_eq!(touch.take_notifications(), vec![2]);

        let removed = touch.delete_course(1).unwrap();
        assert_eq!(removed.ownership(), None);
        assert_eq!(touch.course(1).unwrap().call(1), Ok(Call::Bob));
        assert_chained(&touch);
        assert_eq!(touch.take_notifications(), vec![1]);

        assert!(matches!(
            touch.delete_course(4),
            Err(Error::BlockIndex { index: 4, .. })
        ));
    }

    #[test]
    fn course_mut_propagates_changes() {
        let mut touch = touch(3);
        {
            let mut course = touch.course_mut(2).unwrap();
            course.set_call(5, Call::Single).unwrap();
            course.set_call(6, Call::Bob).unwrap();
        }
        assert_chained(&touch);
        assert_eq!(touch.take_notifications(), vec![2]);

        // Borrowing without changing anything doesn't notify
        {
            let course = touch.course_mut(1).unwrap();
            assert!(course.is_plain());
        }
        assert!(touch.take_notifications().is_empty());

        touch.course_mut(3).unwrap().set_length(4).unwrap();
        assert_eq!(touch.course(3).unwrap().len(), 4);
        assert_eq!(touch.take_notifications(), vec![3]);

        assert!(touch.course_mut(4).is_err());
    }

    #[test]
    fn replacing_a_course_rechains_it() {
        let mut touch = touch(3);
        let old_last_row = touch.last_row().clone();

        let other_row = Row::parse("E0", Stage::CINQUES).unwrap();
        let mut replacement = Course::new(other_row, Method::STEDMAN);
        replacement.set_call(1, Call::Bob).unwrap();
        *touch.course_mut(1).unwrap() = replacement;

        let course = touch.course(1).unwrap();
        assert_eq!(course.initial_row(), touch.start().last_row());
        assert_eq!(course.ownership().map(|o| o.index), Some(1));
        assert_eq!(course.call(1), Ok(Call::Bob));
        assert_chained(&touch);
        assert_ne!(touch.last_row(), &old_last_row);
        assert_eq!(touch.take_notifications(), vec![1]);

        // Replacing a course with an identical one still adopts it
        let copy = touch.course(2).unwrap().clone();
        *touch.course_mut(2).unwrap() = copy;
        assert_chained(&touch);
        assert_eq!(touch.take_notifications(), vec![2]);
    }

    #[test]
    fn start_changes() {
        let mut touch = touch(2);
        touch.set_start_row_index(5).unwrap();
        assert_eq!(touch.start().last_row().to_string(), "132547698E0");
        assert_chained(&touch);
        assert_eq!(touch.take_notifications(), vec![0]);

        touch.set_start_six_type(SixType::Slow).unwrap();
        assert_chained(&touch);
        assert_eq!(touch.take_notifications(), vec![0]);

        assert_eq!(
            touch.set_start_row_index(9),
            Err(Error::InvalidStartRowIndex(9))
        );
        assert!(touch.take_notifications().is_empty());

        touch.set_start_position(SixType::Quick, 6).unwrap();
        assert_eq!(touch.start().last_row(), &rounds());
        assert_chained(&touch);
        assert_eq!(touch.take_notifications(), vec![0]);
    }

    #[test]
    fn lengths() {
        let mut touch = touch(0);
        assert!(matches!(
            touch.set_length(101),
            Err(Error::LengthRange { .. })
        ));
        touch.safe_set_length(101);
        assert_eq!(touch.len(), 100);
        touch.reset_length();
        assert!(touch.is_empty());
        assert_eq!(touch.take_notifications(), vec![100, 0]);
    }

    #[test]
    fn row_count() {
        let mut touch = touch(1);
        {
            let mut course = touch.course_mut(1).unwrap();
            course.set_call(1, Call::Bob).unwrap();
            course.set_call(10, Call::Single).unwrap();
            course.set_call(13, Call::Single).unwrap();
            course.set_call(22, Call::Bob).unwrap();
        }
        assert_eq!(touch.last_row().to_string(), "2314567890E");
        let mut counter = Counter::new();
        touch.accept(&mut counter);
        assert_eq!(counter.count(), 132);
        assert_eq!(touch.estimate_rows(), 134);
    }

    #[test]
    fn clone_is_independent() {
        let touch = touch(2);
        let mut cloned = touch.clone();
        cloned.course_mut(1).unwrap().set_call(1, Call::Bob).unwrap();
        assert!(touch.course(1).unwrap().is_plain());
        assert!(!cloned.course(1).unwrap().is_plain());
        assert_chained(&cloned);
    }
}
