//! Consumers of the rows generated by a block tree.
//!
//! Blocks pass every row they generate to a [`Visitor`], along with a [`BlockRef`] saying which
//! block generated it.  Traversals stop as soon as the visitor's [`Visitor::is_visiting`]
//! returns `false`.  The visitors in this module all stop once they have seen rounds, which is
//! what makes pricking a touch terminate.

use pricker_rows::Row;

use crate::BlockRef;

/// Something which consumes the rows of a block tree.
pub trait Visitor {
    /// Consume one row.  `block` is `None` if the row came from a block without an owner.
    fn visit(&mut self, row: &Row, block: Option<BlockRef>);

    /// Whether this `Visitor` still wants rows.
    fn is_visiting(&self) -> bool;
}

/// Shared behaviour for visitors which stop at the first occurrence of rounds.
#[derive(Debug, Clone, Default)]
pub struct StopAtRounds {
    seen_rounds: bool,
}

impl StopAtRounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether a visitor should process a row, updating the rounds state.  Rounds
    /// itself is admitted; nothing after it is.
    pub fn admit(&mut self, row: &Row) -> bool {
        if self.seen_rounds {
            return false;
        }
        if row.is_rounds() {
            self.seen_rounds = true;
        }
        true
    }

    pub fn is_visiting(&self) -> bool {
        !self.seen_rounds
    }
}

/// Counts the rows up to and including rounds.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    stop: StopAtRounds,
    count: usize,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Visitor for Counter {
    fn visit(&mut self, row: &Row, _block: Option<BlockRef>) {
        if self.stop.admit(row) {
            self.count += 1;
        }
    }

    fn is_visiting(&self) -> bool {
        self.stop.is_visiting()
    }
}

/// Collects the rows up to and including rounds, as strings.
#[derive(Debug, Clone, Default)]
pub struct StringArray {
    stop: StopAtRounds,
    strings: Vec<String>,
}

impl StringArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    pub fn into_strings(self) -> Vec<String> {
        self.strings
    }
}

impl Visitor for StringArray {
    fn visit(&mut self, row: &Row, _block: Option<BlockRef>) {
        if self.stop.admit(row) {
            self.strings.push(row.to_string());
        }
    }

    fn is_visiting(&self) -> bool {
        self.stop.is_visiting()
    }
}
