use pricker_rows::Row;

use crate::{
    block::Chain, visitor::Visitor, Block, BlockRef, Call, Method, Ownership, Result, SerialContainer, Six,
    SixType,
};

/// A course: a sequence of [`Six`]es, whose types follow the course's [`Method`].
///
/// Every change to a course is recorded as a notification for its owner (see
/// [`SerialContainer::take_notifications`]).  Courses owned by a [`Touch`](crate::Touch) have
/// these notifications forwarded automatically.
#[derive(Debug)]
pub struct Course {
    sixes: SerialContainer<Six>,
    method: Method,
    first_six_type: SixType,
    ownership: Option<Ownership>,
}

impl Course {
    /// The most sixes that a course can contain
    pub const MAX_LENGTH: usize = 60;

    /// Creates a plain course of the [`Method`]'s default length.
    pub fn new(initial_row: Row, method: Method) -> Self {
        let stage = initial_row.stage();
        Self::with_calls(initial_row, method, method.course_length(stage), &[])
    }

    /// Creates a course with a given length and set of calls, without leaving any notifications.
    /// `length` must be at most [`Course::MAX_LENGTH`], and every call must fit in the course.
    /// If a six is called more than once, the last call wins.
    pub(crate) fn with_calls(
        initial_row: Row,
        method: Method,
        length: usize,
        calls: &[(usize, Call)],
    ) -> Self {
        let first_six_type = method.default_first_six_type();
        let mut sixes = SerialContainer::new(initial_row, 0..=Self::MAX_LENGTH);
        sixes.resize(length, |row, index| {
            method.create_six(row, first_six_type, index)
        });
        sixes.update_all(|six, index| {
            if let Some(&(_, call)) = calls.iter().rfind(|(i, _)| *i == index) {
                six.set_call(call);
            }
        });
        Self {
            sixes,
            method,
            first_six_type,
            ownership: None,
        }
    }

    /// Parses a course from one line of text.  See [`parse::course`](crate::parse::course) for
    /// the format.
    pub fn parse(line: &str, initial_row: Row, method: Method) -> Result<Self> {
        crate::parse::course(line, initial_row, method)
    }

    /////////////
    // GETTERS //
    /////////////

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn first_six_type(&self) -> SixType {
        self.first_six_type
    }

    pub fn len(&self) -> usize {
        self.sixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sixes.is_empty()
    }

    pub fn six(&self, index: usize) -> Result<&Six> {
        self.sixes.get(index)
    }

    pub fn sixes(&self) -> &[Six] {
        self.sixes.blocks()
    }

    pub fn call(&self, index: usize) -> Result<Call> {
        self.six(index).map(Six::call)
    }

    /// The (1-indexed) position of every six which is called, along with its [`Call`].
    pub fn calls(&self) -> Vec<(usize, Call)> {
        self.sixes()
            .iter()
            .enumerate()
            .filter(|(_, six)| six.call() != Call::Plain)
            .map(|(i, six)| (i + 1, six.call()))
            .collect()
    }

    /// Whether this course contains no calls.
    pub fn is_plain(&self) -> bool {
        self.sixes().iter().all(|six| six.call() == Call::Plain)
    }

    /// The length of a course of this course's [`Method`] and stage.
    pub fn default_length(&self) -> usize {
        self.method.course_length(self.initial_row().stage())
    }

    /// The length that this course's calls imply: the default length, extended to include the
    /// last called six.
    pub fn natural_length(&self) -> usize {
        let last_call = self.calls().last().map_or(0, |&(index, _)| index);
        self.default_length().max(last_call)
    }

    ///////////
    // CALLS //
    ///////////

    pub fn set_call(&mut self, index: usize, call: Call) -> Result<()> {
        self.sixes.update(index, |six| six.set_call(call))
    }

    /// Makes every six plain.
    pub fn reset_calls(&mut self) {
        self.sixes.update_all(|six, _| six.set_call(Call::Plain));
        self.sixes.notify(1);
    }

    /// Changes the type of the first six, which changes the type of every other six to match.
    /// Calls stay at the same positions.  An empty course records the new type without
    /// notifying.
    pub fn set_first_six_type(&mut self, six_type: SixType) -> Result<()> {
        self.method.check_six_type(six_type)?;
        if six_type == self.first_six_type {
            return Ok(());
        }
        log::debug!("Changing first six of course to {}", six_type);
        self.first_six_type = six_type;
        let method = self.method;
        self.sixes
            .update_all(|six, index| six.set_six_type(method.six_type_at(six_type, index)));
        if !self.is_empty() {
            self.sixes.notify(1);
        }
        Ok(())
    }

    ////////////
    // LENGTH //
    ////////////

    pub fn set_length(&mut self, length: usize) -> Result<()> {
        let (method, first) = (self.method, self.first_six_type);
        self.sixes
            .set_length(length, |row, index| method.create_six(row, first, index))
    }

    pub fn safe_set_length(&mut self, length: usize) {
        let (method, first) = (self.method, self.first_six_type);
        self.sixes
            .safe_set_length(length, |row, index| method.create_six(row, first, index))
    }

    /// Sets the length back to the [`default_length`](Self::default_length).
    pub fn reset_length(&mut self) {
        self.safe_set_length(self.default_length());
    }

    ///////////////
    // TRAVERSAL //
    ///////////////

    /// Passes the rows of this course to a [`Visitor`].
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        self.accept_at(visitor, None);
    }

    pub fn block_ref(&self) -> BlockRef {
        BlockRef::Course {
            course: self.ownership.map(|o| o.index),
        }
    }

    /// The [`BlockRef`] of the six at a 1-indexed position in this course.
    pub fn six_ref(&self, index: usize) -> BlockRef {
        BlockRef::Six {
            course: self.ownership.map(|o| o.index),
            six: index,
        }
    }

    /// Removes and returns the notifications this course has made since the last call.
    pub fn take_notifications(&mut self) -> Vec<usize> {
        self.sixes.take_notifications()
    }
}

/// A cloned course is identical but has no owner, so can be inserted into another touch.
impl Clone for Course {
    fn clone(&self) -> Self {
        Self {
            sixes: self.sixes.clone(),
            method: self.method,
            first_six_type: self.first_six_type,
            ownership: None,
        }
    }
}

impl Block for Course {
    fn initial_row(&self) -> &Row {
        self.sixes.initial_row()
    }

    fn last_row(&self) -> &Row {
        self.sixes.last_row()
    }

    fn ownership(&self) -> Option<Ownership> {
        self.ownership
    }

    fn estimate_rows(&self) -> usize {
        self.sixes.estimate_rows()
    }

    fn accept_at(&self, visitor: &mut dyn Visitor, _container_index: Option<usize>) {
        let course_index = self.ownership.map(|o| o.index);
        for six in self.sixes() {
            if !visitor.is_visiting() {
                return;
            }
            six.accept_at(visitor, course_index);
        }
    }
}

impl Chain for Course {
    fn set_initial_row(&mut self, initial_row: Row) {
        self.sixes.set_initial_row(initial_row);
    }

    fn set_ownership(&mut self, ownership: Option<Ownership>) {
        self.ownership = ownership;
    }
}

#[cfg(test)]
mod tests {
    use pricker_rows::{Row, Stage};

    use super::Course;
    use crate::{block::Chain, visitor::Counter, Block, Call, Error, Method, SixType};

    fn row(s: &str) -> Row {
        Row::parse(s, Stage::CINQUES).unwrap()
    }

    fn plain_course() -> Course {
        Course::new(row("231"), Method::STEDMAN)
    }

    #[track_caller]
    fn assert_six_ends(course: &Course, exp_ends: &[&str]) {
        let ends = course
            .sixes()
            .iter()
            .map(|six| six.last_row().to_string())
            .collect::<Vec<_>>();
        assert_eq!(ends, exp_ends);
    }

    #[test]
    fn new_course() {
        let mut course = plain_course();
        assert_eq!(course.len(), 22);
        assert!(course.is_plain());
        assert_eq!(course.first_six_type(), SixType::Slow);
        assert_eq!(course.six(1).unwrap().six_type(), SixType::Slow);
        assert_eq!(course.six(2).unwrap().six_type(), SixType::Quick);
        assert!(course.take_notifications().is_empty());
        assert_eq!(course.ownership(), None);
    }

    #[test]
    fn six_ends() {
        let mut course = plain_course();
        course.set_call(1, Call::Bob).unwrap();
        course.set_call(10, Call::Single).unwrap();
        course.set_call(13, Call::Single).unwrap();
        course.set_call(22, Call::Bob).unwrap();
        assert_six_ends(
            &course,
            &[
                "3426185970E",
                "346829105E7",
                "4839602E175",
                "48903E67251",
                "804E9735612",
                "80E74591326",
                "0785E142963",
                "075182E6439",
                "71025683E94",
                "7126035E849",
                "16732E04598",
                "163E7429085",
                "6E143970258",
                "6E491035782",
                "E9604518327",
                "E9056842173",
                "95E80267431",
                "9582E703614",
                "529783E1046",
                "52739184E60",
                "2351749680E",
                "2314567890E",
            ],
        );
        assert_eq!(course.take_notifications(), vec![1, 10, 13, 22]);
        assert_eq!(
            course.calls(),
            vec![(1, Call::Bob), (10, Call::Single), (13, Call::Single), (22, Call::Bob)]
        );
    }

    #[test]
    fn erin_course() {
        let mut course = Course::new(Row::rounds(Stage::CINQUES), Method::ERIN);
        assert_eq!(course.len(), 11);
        course.set_call(6, Call::Bob).unwrap();
        assert_six_ends(
            &course,
            &[
                "241638507E9",
                "4628103E597",
                "68402E19375",
                "806E4927153",
                "0E896745231",
                "E9078562431",
                "97E50283614",
                "7592E301846",
                "527391E4068",
                "23517496E80",
                "3124567890E",
            ],
        );
    }

    #[test]
    fn set_first_six_type() {
        let mut course = plain_course();
        course.set_length(4).unwrap();
        course.set_call(2, Call::Single).unwrap();
        course.set_call(3, Call::Bob).unwrap();
        course.take_notifications();

        course.set_first_six_type(SixType::Quick).unwrap();
        assert_eq!(course.first_six_type(), SixType::Quick);
        assert_six_ends(
            &course,
            &["234618507E9", "3628401759E", "3680274519E", "603785294E1"],
        );
        assert_eq!(course.take_notifications(), vec![1]);

        // Setting the same type again does nothing
        course.set_first_six_type(SixType::Quick).unwrap();
        assert!(course.take_notifications().is_empty());

        // Empty courses have nothing to notify about, but remember the type for new sixes
        let mut empty = plain_course();
        empty.set_length(0).unwrap();
        empty.take_notifications();
        empty.set_first_six_type(SixType::Quick).unwrap();
        assert!(empty.take_notifications().is_empty());
        empty.set_length(1).unwrap();
        assert_eq!(empty.six(1).unwrap().six_type(), SixType::Quick);

        let mut erin = Course::new(row("231"), Method::ERIN);
        assert!(matches!(
            erin.set_first_six_type(SixType::Quick),
            Err(Error::InvalidSixType { .. })
        ));
    }

    #[test]
    fn quick_first_course_extends() {
        let mut course = plain_course();
        course.set_first_six_type(SixType::Quick).unwrap();
        course.set_length(2).unwrap();
        assert_six_ends(&course, &["234618507E9", "3628401E597"]);
        course.set_length(4).unwrap();
        assert_eq!(course.six(3).unwrap().last_row().to_string(), "36802E49175");
        assert_eq!(course.six(4).unwrap().last_row().to_string(), "603E8927451");
    }

    #[test]
    fn repeated_calls_keep_the_last() {
        let course = Course::with_calls(
            row("231"),
            Method::STEDMAN,
            22,
            &[(1, Call::Bob), (3, Call::Bob), (1, Call::Single)],
        );
        assert_eq!(course.calls(), vec![(1, Call::Single), (3, Call::Bob)]);
    }

    #[test]
    fn reset_calls() {
        let mut course = plain_course();
        course.set_call(4, Call::Bob).unwrap();
        course.set_call(5, Call::Single).unwrap();
        assert!(!course.is_plain());
        course.take_notifications();

        course.reset_calls();
        assert!(course.is_plain());
        assert_eq!(course.last_row(), plain_course().last_row());
        assert_eq!(course.take_notifications(), vec![1]);
    }

    #[test]
    fn lengths() {
        let mut course = plain_course();
        assert_eq!(
            course.set_length(61),
            Err(Error::LengthRange {
                length: 61,
                limits: 0..=60
            })
        );
        course.safe_set_length(100);
        assert_eq!(course.len(), 60);
        course.set_call(40, Call::Bob).unwrap();
        assert_eq!(course.natural_length(), 40);
        course.reset_length();
        assert_eq!(course.len(), 22);
        assert_eq!(course.natural_length(), 22);
        assert_eq!(course.take_notifications(), vec![60, 40, 22]);
        assert_eq!(course.call(23), Err(Error::BlockIndex { index: 23, length: 22 }));
    }

    #[test]
    fn estimate_rows() {
        #[track_caller]
        fn check(stage: Stage, exp_sixes: usize, exp_rows: usize) {
            let course = Course::new(Row::rounds(stage), Method::STEDMAN);
            assert_eq!(course.len(), exp_sixes);
            assert_eq!(course.estimate_rows(), exp_rows);
        }

        check(Stage::TRIPLES, 14, 84);
        check(Stage::CATERS, 18, 108);
        check(Stage::CINQUES, 22, 132);
        check(Stage::SEXTUPLES, 26, 156);
        check(Stage::SEPTUPLES, 30, 180);
    }

    #[test]
    fn clone_is_ownerless() {
        let mut course = plain_course();
        course.set_call(3, Call::Bob).unwrap();
        let cloned = course.clone();
        assert_eq!(cloned.ownership(), None);
        assert_eq!(cloned.calls(), course.calls());
        assert_eq!(cloned.last_row(), course.last_row());
        assert!(cloned.sixes().iter().all(|six| six.ownership().is_some()));
    }

    #[test]
    fn set_initial_row() {
        let mut course = plain_course();
        course.set_initial_row(Row::rounds(Stage::CINQUES));
        assert_eq!(course.six(1).unwrap().initial_row(), &Row::rounds(Stage::CINQUES));
        assert_eq!(course.last_row(), &Row::rounds(Stage::CINQUES));
        assert!(course.take_notifications().is_empty());
    }

    #[test]
    fn visiting_stops_at_rounds() {
        let mut counter = Counter::new();
        plain_course().accept(&mut counter);
        assert_eq!(counter.count(), 130);

        let mut counter = Counter::new();
        Course::new(Row::rounds(Stage::CINQUES), Method::STEDMAN).accept(&mut counter);
        assert_eq!(counter.count(), 132);
    }

    #[test]
    fn block_refs() {
        let course = plain_course();
        assert_eq!(course.block_ref(), crate::BlockRef::Course { course: None });
        assert_eq!(
            course.six_ref(3),
            crate::BlockRef::Six {
                course: None,
                six: 3
            }
        );
    }
}
