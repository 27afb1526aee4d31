use pricker_rows::{Change, Row};

use crate::{block::Chain, Block, BlockRef, Error, Method, Ownership, Result, SixType, Visitor};

/// The start of a touch: the rows of a six which follow rounds.  Rounds is the start's initial
/// row, and falls at row `row_index` of a six of type `six_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Start {
    initial_row: Row,
    last_row: Row,
    /// 1-indexed row of the six which is the initial row
    row_index: usize,
    six_type: SixType,
    method: Method,
}

impl Start {
    /// Creates the standard `Start` for a [`Method`].
    pub fn new(initial_row: Row, method: Method) -> Self {
        let mut start = Self {
            last_row: initial_row.clone(),
            initial_row,
            row_index: method.default_start_row_index(),
            six_type: method.default_start_six_type(),
            method,
        };
        start.calculate();
        start
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn six_type(&self) -> SixType {
        self.six_type
    }

    /// Moves rounds to a different row of the six.  Fails unless `row_index` is a row of the
    /// start's six.
    pub fn set_row_index(&mut self, row_index: usize) -> Result<()> {
        self.set_position(self.six_type, row_index)
    }

    /// Changes the type of six that rounds falls in.  Fails if the [`Method`] doesn't use sixes of
    /// this type, or if the current row index doesn't fit in the new six.
    pub fn set_six_type(&mut self, six_type: SixType) -> Result<()> {
        self.set_position(six_type, self.row_index)
    }

    /// Sets both the six type and row index, checking them together.  Nothing changes if either
    /// is invalid.
    pub fn set_position(&mut self, six_type: SixType, row_index: usize) -> Result<()> {
        self.method.check_six_type(six_type)?;
        if !(1..=six_type.num_rows()).contains(&row_index) {
            return Err(Error::InvalidStartRowIndex(row_index));
        }
        self.six_type = six_type;
        self.row_index = row_index;
        self.calculate();
        Ok(())
    }

    /// The changes made by this `Start`, i.e. the end of its six's notation.
    pub fn changes(&self) -> &'static [Change] {
        &self.six_type.notation()[self.row_index - 1..]
    }

    /// The rows generated by this `Start`, not including its initial row.
    pub fn rows(&self) -> Vec<Row> {
        let mut row = self.initial_row.clone();
        self.changes()
            .iter()
            .map(|change| {
                change.permute(&mut row);
                row.clone()
            })
            .collect()
    }

    pub fn block_ref(&self) -> BlockRef {
        BlockRef::Start
    }

    fn calculate(&mut self) {
        let mut row = self.initial_row.clone();
        for change in self.changes() {
            change.permute(&mut row);
        }
        self.last_row = row;
    }
}

impl Block for Start {
    fn initial_row(&self) -> &Row {
        &self.initial_row
    }

    fn last_row(&self) -> &Row {
        &self.last_row
    }

    /// Starts belong directly to their touch, not to a container
    fn ownership(&self) -> Option<Ownership> {
        None
    }

    fn estimate_rows(&self) -> usize {
        self.six_type.num_rows() - self.row_index
    }

    fn accept_at(&self, visitor: &mut dyn Visitor, _container_index: Option<usize>) {
        for row in self.rows() {
            if !visitor.is_visiting() {
                return;
            }
            visitor.visit(&row, Some(BlockRef::Start));
        }
    }
}

impl Chain for Start {
    fn set_initial_row(&mut self, initial_row: Row) {
        self.initial_row = initial_row;
        self.calculate();
    }

    fn set_ownership(&mut self, _ownership: Option<Ownership>) {}
}
