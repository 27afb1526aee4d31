//! The [`Block`] trait shared by everything that generates rows, along with the types blocks use
//! to refer to their position in a block tree.

use std::sync::atomic::{AtomicUsize, Ordering};

use pricker_rows::Row;

use crate::Visitor;

/// Anything which transforms an initial [`Row`] into a sequence of rows, ending at a last
/// [`Row`].  The last row is always a pure function of the initial row and the block's own
/// settings, and is cached so that containers can chain blocks together cheaply.
///
/// The initial row and ownership of a block are set only by the container which owns it.
pub trait Block: Chain {
    /// The [`Row`] this block starts from.  This row is not generated by the block itself.
    fn initial_row(&self) -> &Row;

    /// The last [`Row`] generated by this block.
    fn last_row(&self) -> &Row;

    /// Where this block lives, or `None` if the block has no owner.
    fn ownership(&self) -> Option<Ownership>;

    /// The number of rows this block generates.
    fn estimate_rows(&self) -> usize;

    /// Passes every row generated by this block to `visitor`, stopping early if the `visitor`
    /// stops visiting.  `container_index` is the index of the container owning this block
    /// within its own owner, if it has one (i.e. the course index of a six in a touch).
    fn accept_at(&self, visitor: &mut dyn Visitor, container_index: Option<usize>);
}

pub(crate) mod sealed {
    use pricker_rows::Row;

    use crate::Ownership;

    /// The half of [`Block`](crate::Block) which only containers in this crate can use.
    pub trait Chain {
        /// Replaces the initial [`Row`] and re-calculates the block.  Containers call this
        /// whenever a preceding block changes; it never notifies anyone.
        fn set_initial_row(&mut self, initial_row: Row);

        fn set_ownership(&mut self, ownership: Option<Ownership>);
    }
}

pub(crate) use sealed::Chain;

/// A unique identifier for a [`SerialContainer`](crate::SerialContainer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(usize);

static NEXT_CONTAINER_ID: AtomicUsize = AtomicUsize::new(0);

impl ContainerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A non-owning back-reference from a block to the container which owns it.  Containers
/// reassign this whenever their structure changes, so it is always up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ownership {
    pub container: ContainerId,
    /// The 1-indexed position of the block within the container
    pub index: usize,
}

/// A reference to the position of a block within a touch, passed to [`Visitor`]s with every
/// row.  Indices are 1-indexed; a course index is `None` if that course isn't owned by a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockRef {
    Touch,
    Start,
    Course { course: Option<usize> },
    Six { course: Option<usize>, six: usize },
}
