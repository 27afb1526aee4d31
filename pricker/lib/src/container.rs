//! The generic container shared by courses and touches.

use std::ops::RangeInclusive;

use pricker_rows::Row;

use crate::{block::Chain, Block, ContainerId, Error, Ownership, Result};

/// An ordered sequence of [`Block`]s, where every block starts from the last [`Row`] of the
/// block before it (and the first block starts from the container's initial row).  Blocks are
/// 1-indexed.
///
/// Every public mutating operation keeps the chain consistent before it returns, and notifies the
/// container's owner exactly once.  Notifications are queued with the index of the first affected
/// block, and are collected with [`SerialContainer::take_notifications`].
#[derive(Debug)]
pub struct SerialContainer<B> {
    id: ContainerId,
    initial_row: Row,
    blocks: Vec<B>,
    limits: RangeInclusive<usize>,
    notifications: Vec<usize>,
}

impl<B: Block> SerialContainer<B> {
    /// Creates an empty container.
    pub fn new(initial_row: Row, limits: RangeInclusive<usize>) -> Self {
        Self {
            id: ContainerId::next(),
            initial_row,
            blocks: Vec::new(),
            limits,
            notifications: Vec::new(),
        }
    }

    /////////////
    // GETTERS //
    /////////////

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The lengths this container is allowed to take
    pub fn limits(&self) -> RangeInclusive<usize> {
        self.limits.clone()
    }

    pub fn initial_row(&self) -> &Row {
        &self.initial_row
    }

    /// The last [`Row`] of the last block, or the initial [`Row`] if there are no blocks.
    pub fn last_row(&self) -> &Row {
        self.blocks
            .last()
            .map_or(&self.initial_row, |b| b.last_row())
    }

    pub fn blocks(&self) -> &[B] {
        &self.blocks
    }

    /// Gets the block at a 1-indexed position.
    pub fn get(&self, index: usize) -> Result<&B> {
        self.check_index(index)?;
        Ok(&self.blocks[index - 1])
    }

    /// The total number of rows generated by the blocks in this container.
    pub fn estimate_rows(&self) -> usize {
        self.blocks.iter().map(B::estimate_rows).sum()
    }

    ////////////
    // LENGTH //
    ////////////

    /// Sets the number of blocks, creating new blocks with `factory(initial_row, index)` or
    /// dropping blocks from the end.  Fails without changing anything if `length` is outside the
    /// container's limits.
    pub fn set_length(
        &mut self,
        length: usize,
        factory: impl FnMut(Row, usize) -> B,
    ) -> Result<()> {
        self.check_length(length)?;
        self.resize(length, factory);
        self.notify(length);
        Ok(())
    }

    /// Sets the number of blocks like [`SerialContainer::set_length`], but clamps `length` into
    /// the container's limits instead of failing.
    pub fn safe_set_length(&mut self, length: usize, factory: impl FnMut(Row, usize) -> B) {
        let length = length.clamp(*self.limits.start(), *self.limits.end());
        self.resize(length, factory);
        self.notify(length);
    }

    /// Changes the length without notifying.  `length` must already be within the limits.
    pub(crate) fn resize(&mut self, length: usize, mut factory: impl FnMut(Row, usize) -> B) {
        let old_length = self.len();
        if length < old_length {
            log::trace!("Truncating container from {} to {}", old_length, length);
            self.blocks.truncate(length);
            return;
        }
        for index in old_length + 1..=length {
            let mut block = factory(self.last_row().clone(), index);
            block.set_ownership(Some(self.ownership_for(index)));
            self.blocks.push(block);
        }
    }

    ///////////////////
    // INSERT/DELETE //
    ///////////////////

    /// Inserts a block so that it ends up at the given 1-indexed position.  Any later blocks
    /// are moved along and re-calculated.
    pub fn insert(&mut self, index: usize, block: B) -> Result<()> {
        if index == 0 || index > self.len() + 1 {
            return Err(Error::BlockIndex {
                index,
                length: self.len(),
            });
        }
        self.check_length(self.len() + 1)?;

        self.blocks.insert(index - 1, block);
        self.recalculate(index);
        self.notify(index);
        Ok(())
    }

    /// Removes and returns the block at the given 1-indexed position.  The returned block has
    /// no owner.
    pub fn delete(&mut self, index: usize) -> Result<B> {
        self.check_index(index)?;
        self.check_length(self.len() - 1)?;

        let mut block = self.blocks.remove(index - 1);
        block.set_ownership(None);
        self.recalculate(index);
        self.notify(index);
        Ok(block)
    }

    ///////////////
    // MUTATIONS //
    ///////////////

    /// Changes the initial row, re-calculating every block.  This is driven by the owner, so
    /// doesn't notify.
    pub fn set_initial_row(&mut self, initial_row: Row) {
        self.initial_row = initial_row;
        self.recalculate(1);
    }

    /// Modifies the block at a 1-indexed position, then re-calculates the blocks after it and
    /// notifies once.
    pub(crate) fn update<R>(&mut self, index: usize, f: impl FnOnce(&mut B) -> R) -> Result<R> {
        self.check_index(index)?;
        let result = f(&mut self.blocks[index - 1]);
        self.recalculate(index + 1);
        self.notify(index);
        Ok(result)
    }

    /// Modifies every block (passing each block's index), then re-calculates the whole
    /// container.  This doesn't notify: bulk operations notify once they have finished.
    pub(crate) fn update_all(&mut self, mut f: impl FnMut(&mut B, usize)) {
        for (i, block) in self.blocks.iter_mut().enumerate() {
            f(block, i + 1);
        }
        self.recalculate(1);
    }

    /// Gets mutable access to a block without re-calculating anything.  Whoever uses this is
    /// responsible for calling [`SerialContainer::refresh`].
    pub(crate) fn get_mut_unchecked(&mut self, index: usize) -> &mut B {
        &mut self.blocks[index - 1]
    }

    /// Re-chains the block at `index` and every block after it, after the block has been
    /// accessed through [`SerialContainer::get_mut_unchecked`].  Notifies once if `modified` is
    /// set or if the block had been replaced or detached from the chain.
    pub(crate) fn refresh(&mut self, index: usize, modified: bool) {
        let detached = !self.is_chained(index);
        self.recalculate(index);
        if modified || detached {
            self.notify(index);
        }
    }

    ///////////////////
    // NOTIFICATIONS //
    ///////////////////

    /// Queues a notification for the owner of this container.
    pub(crate) fn notify(&mut self, index: usize) {
        log::trace!("Container {:?} notifying with index {}", self.id, index);
        self.notifications.push(index);
    }

    /// Removes and returns every notification queued since the last call.
    pub fn take_notifications(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.notifications)
    }

    /////////////
    // HELPERS //
    /////////////

    /// Re-chain every block from `from` onwards, and reassign their ownership.
    fn recalculate(&mut self, from: usize) {
        for index in from.max(1)..=self.len() {
            let initial_row = match index {
                1 => self.initial_row.clone(),
                _ => self.blocks[index - 2].last_row().clone(),
            };
            let ownership = self.ownership_for(index);
            let block = &mut self.blocks[index - 1];
            if block.initial_row() != &initial_row {
                block.set_initial_row(initial_row);
            }
            block.set_ownership(Some(ownership));
        }
    }

    /// Whether the block at `index` starts from the right row and knows its own position.
    fn is_chained(&self, index: usize) -> bool {
        let expected_row = match index {
            1 => &self.initial_row,
            _ => self.blocks[index - 2].last_row(),
        };
        let block = &self.blocks[index - 1];
        block.initial_row() == expected_row && block.ownership() == Some(self.ownership_for(index))
    }

    fn ownership_for(&self, index: usize) -> Ownership {
        Ownership {
            container: self.id,
            index,
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.len() {
            return Err(Error::BlockIndex {
                index,
                length: self.len(),
            });
        }
        Ok(())
    }

    fn check_length(&self, length: usize) -> Result<()> {
        if !self.limits.contains(&length) {
            return Err(Error::LengthRange {
                length,
                limits: self.limits(),
            });
        }
        Ok(())
    }
}

/// Cloning a container creates a new container (with a new [`ContainerId`]) which owns copies
/// of every block.  Pending notifications aren't cloned.
impl<B: Block + Clone> Clone for SerialContainer<B> {
    fn clone(&self) -> Self {
        let mut new = Self {
            id: ContainerId::next(),
            initial_row: self.initial_row.clone(),
            blocks: self.blocks.clone(),
            limits: self.limits.clone(),
            notifications: Vec::new(),
        };
        new.recalculate(1);
        new
    }
}
