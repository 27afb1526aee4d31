//! Sixes, the atomic blocks of a course.

use std::fmt::{Display, Formatter};

use pricker_rows::{Change, Row};

use crate::{block::Chain, Block, BlockRef, Call, Ownership, Visitor};

/// The kinds of six.  Each kind has a fixed notation, which is the same on every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SixType {
    Slow,
    Quick,
}

impl SixType {
    pub const ALL: [SixType; 2] = [SixType::Slow, SixType::Quick];

    /// The changes made after the first row of a six of this type.
    pub fn notation(self) -> &'static [Change] {
        use Change::{One, Three};
        match self {
            SixType::Slow => &[Three, One, Three, One, Three],
            SixType::Quick => &[One, Three, One, Three, One],
        }
    }

    /// The number of rows in a six of this type, including the row made by the call.
    pub fn num_rows(self) -> usize {
        self.notation().len() + 1
    }

    /// The single [`Change`] with the same effect as the whole [`notation`](Self::notation).
    /// Applying a six's call and then this gives the six's last row directly.
    pub fn front_transposition(self) -> Change {
        match self {
            SixType::Slow => Change::One,
            SixType::Quick => Change::Three,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SixType::Slow => "slow",
            SixType::Quick => "quick",
        }
    }
}

impl Display for SixType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A six: a call change followed by the changes of the six's notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Six {
    six_type: SixType,
    call: Call,
    initial_row: Row,
    /// Cached result of applying this six to `initial_row`
    last_row: Row,
    ownership: Option<Ownership>,
}

impl Six {
    /// Creates a new plain `Six` with no owner.
    pub fn new(six_type: SixType, initial_row: Row) -> Self {
        let mut six = Self {
            six_type,
            call: Call::Plain,
            last_row: initial_row.clone(),
            initial_row,
            ownership: None,
        };
        six.calculate();
        six
    }

    pub fn six_type(&self) -> SixType {
        self.six_type
    }

    pub fn call(&self) -> Call {
        self.call
    }

    /// Sets the call at the start of this six.  Owning courses notify their own owner when
    /// calls are changed through [`Course::set_call`](crate::Course::set_call).
    pub fn set_call(&mut self, call: Call) {
        self.call = call;
        self.calculate();
    }

    pub(crate) fn set_six_type(&mut self, six_type: SixType) {
        self.six_type = six_type;
        self.calculate();
    }

    /// The rows generated by this six, in order.
    pub fn rows(&self) -> Vec<Row> {
        let mut row = self.initial_row.clone();
        self.call.permute(&mut row);
        let mut rows = vec![row.clone()];
        for change in self.six_type.notation() {
            change.permute(&mut row);
            rows.push(row.clone());
        }
        rows
    }

    fn calculate(&mut self) {
        let mut row = self.initial_row.clone();
        self.call.permute(&mut row);
        self.six_type.front_transposition().permute(&mut row);
        self.last_row = row;
    }
}

impl Block for Six {
    fn initial_row(&self) -> &Row {
        &self.initial_row
    }

    fn last_row(&self) -> &Row {
        &self.last_row
    }

    fn ownership(&self) -> Option<Ownership> {
        self.ownership
    }

    fn estimate_rows(&self) -> usize {
        self.six_type.num_rows()
    }

    fn accept_at(&self, visitor: &mut dyn Visitor, container_index: Option<usize>) {
        let block = self.ownership.map(|o| BlockRef::Six {
            course: container_index,
            six: o.index,
        });
        for row in self.rows() {
            if !visitor.is_visiting() {
                return;
            }
            visitor.visit(&row, block);
        }
    }
}

impl Chain for Six {
    fn set_initial_row(&mut self, initial_row: Row) {
        self.initial_row = initial_row;
        self.calculate();
    }

    fn set_ownership(&mut self, ownership: Option<Ownership>) {
        self.ownership = ownership;
    }
}
