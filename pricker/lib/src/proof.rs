//! Proving touches, i.e. checking that no row is rung twice before rounds.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

use pricker_rows::Row;

use crate::{
    visitor::{StopAtRounds, Visitor},
    BlockDirectory, BlockRef,
};

/// A [`Visitor`] which checks whether any row is repeated, and records which blocks generated
/// the repeated rows.
#[derive(Debug, Clone)]
pub struct Proof {
    stop: StopAtRounds,
    rows: HashMap<String, RowRecord>,
    num_rows: usize,
    is_true: bool,
    directory: BlockDirectory,
}

#[derive(Debug, Clone, Default)]
struct RowRecord {
    count: usize,
    /// Every block which has generated this row
    blocks: Vec<BlockRef>,
}

/// The three outcomes of a [`Proof`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProofResult {
    True,
    TrueNotRound,
    False,
}

impl Proof {
    pub fn new() -> Self {
        Self {
            stop: StopAtRounds::new(),
            rows: HashMap::new(),
            num_rows: 0,
            is_true: true,
            directory: BlockDirectory::new(),
        }
    }

    /// `true` if no row has been seen more than once.
    pub fn is_true(&self) -> bool {
        self.is_true
    }

    /// `true` if rounds has been reached.
    pub fn comes_round(&self) -> bool {
        !self.stop.is_visiting()
    }

    pub fn result(&self) -> ProofResult {
        match (self.is_true, self.comes_round()) {
            (false, _) => ProofResult::False,
            (true, true) => ProofResult::True,
            (true, false) => ProofResult::TrueNotRound,
        }
    }

    /// The number of times each row has been seen.
    pub fn row_counts(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.rows
            .iter()
            .map(|(row, record)| (row.as_str(), record.count))
    }

    /// The number of times a given [`Row`] has been seen.
    pub fn count_of(&self, row: &Row) -> usize {
        self.rows.get(&row.to_string()).map_or(0, |r| r.count)
    }

    /// The total number of rows seen, up to and including rounds.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// The courses and sixes which contain repeated rows.
    pub fn directory(&self) -> &BlockDirectory {
        &self.directory
    }
}

impl Default for Proof {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for Proof {
    fn visit(&mut self, row: &Row, block: Option<BlockRef>) {
        if !self.stop.admit(row) {
            return;
        }
        self.num_rows += 1;

        let row_string = row.to_string();
        let record = self.rows.entry(row_string).or_default();
        record.count += 1;
        if let Some(block) = block {
            record.blocks.push(block);
        }

        if record.count > 1 {
            if self.is_true {
                log::debug!("First repeated row: {}", row);
            }
            self.is_true = false;
            for block in &record.blocks {
                if let Err(e) = self.directory.add(block) {
                    log::trace!("Not recording falseness: {}", e);
                }
            }
        }
    }

    fn is_visiting(&self) -> bool {
        self.stop.is_visiting()
    }
}

impl Display for ProofResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ProofResult::True => "Composition is true",
            ProofResult::TrueNotRound => "True, but doesn't come round",
            ProofResult::False => "Composition is FALSE",
        })
    }
}

#[cfg(test)]
mod tests {
    use pricker_rows::{Row, Stage};

    use super::{Proof, ProofResult};
    use crate::{BlockRef, Call, Course, Method, Touch, Visitor};

    fn prove_touch(text: &str) -> Proof {
        let touch = Touch::parse(text, Method::STEDMAN).unwrap();
        let mut proof = Proof::new();
        touch.accept(&mut proof);
        proof
    }

    #[test]
    fn true_touch() {
        let proof = prove_touch("2314567890E\n2314567890E  1 s10 s13 22");
        assert!(proof.is_true());
        assert!(proof.comes_round());
        assert_eq!(proof.result(), ProofResult::True);
        assert_eq!(proof.num_rows(), 132);
        assert!(proof.directory().is_empty());
        assert!(proof.row_counts().all(|(_, count)| count == 1));
    }

    #[test]
    fn false_touch() {
        let proof = prove_touch("2314567890E\ns1  (2)\np");
        assert!(!proof.is_true());
        assert!(!proof.comes_round());
        assert_eq!(proof.result(), ProofResult::False);
        assert_eq!(proof.num_rows(), 146);

        let false_blocks = proof
            .directory()
            .iter()
            .map(|(course, sixes)| (course, sixes.iter().copied().collect::<Vec<_>>()))
            .collect::<Vec<_>>();
        assert_eq!(false_blocks, vec![(1, vec![1, 2]), (2, vec![21, 22])]);
        assert_eq!(proof.count_of(&"3241658790E".parse::<Row>().unwrap()), 2);
    }

    #[test]
    fn course_in_isolation() {
        let mut course = Course::new(Row::rounds(Stage::CINQUES), Method::STEDMAN);
        let mut proof = Proof::new();
        course.accept(&mut proof);
        assert_eq!(proof.result(), ProofResult::True);
        assert_eq!(proof.num_rows(), 132);

        course.set_call(1, Call::Bob).unwrap();
        let mut proof = Proof::new();
        course.accept(&mut proof);
        assert_eq!(proof.result(), ProofResult::TrueNotRound);
    }

    #[test]
    fn stops_at_rounds() {
        let mut proof = Proof::new();
        let rounds = Row::rounds(Stage::TRIPLES);
        let other = "2134567".parse::<Row>().unwrap();
        proof.visit(&other, None);
        proof.visit(&rounds, None);
        assert!(!proof.is_visiting());
        // Rows after rounds are ignored, so can't make the proof false
        proof.visit(&other, None);
        assert!(proof.is_true());
        assert_eq!(proof.num_rows(), 2);
    }

    #[test]
    fn unowned_repeats_are_false_without_coordinates() {
        let mut proof = Proof::new();
        let row = "2134567".parse::<Row>().unwrap();
        proof.visit(&row, Some(BlockRef::Start));
        proof.visit(&row, Some(BlockRef::Six { course: None, six: 3 }));
        assert!(!proof.is_true());
        assert!(proof.directory().is_empty());
    }

    #[test]
    fn messages() {
        assert_eq!(ProofResult::True.to_string(), "Composition is true");
        assert_eq!(
            ProofResult::TrueNotRound.to_string(),
            "True, but doesn't come round"
        );
        assert_eq!(ProofResult::False.to_string(), "Composition is FALSE");
    }
}
