//! Stack of snapshots composing nested rollback scopes over one state.

use crate::eth::primitives::Address;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;
use crate::eth::storage::InMemoryState;
use crate::eth::storage::Journal;
use crate::eth::storage::Snapshot;
use crate::eth::storage::StorageError;

/// Ordered collection of [`Snapshot`], one per open scope, bound to one backing state.
///
/// Intended use is as follows:
/// - Create a new snapshot and push on top of the stack.
/// - Apply transactions to state and update the head snapshot with changes from the journal.
/// - If any changes applied to state are committed to durable storage, invalidate the head snapshot.
/// - If applied changes are not desired, revert the changes from the head snapshot and pop it from the stack.
/// - If applied changes are desired, commit the changes from the head snapshot by merging it with the
///   previous entry and pop it from the stack.
#[derive(Debug, Default)]
pub struct SnapshotStack {
    snapshots: Vec<Snapshot>,
    state: InMemoryState,
}

impl SnapshotStack {
    /// Creates a new stack bound to the given state.
    pub fn new(state: InMemoryState) -> Self {
        Self {
            snapshots: Vec::new(),
            state,
        }
    }

    /// Returns the backing state.
    pub fn state(&self) -> &InMemoryState {
        &self.state
    }

    /// Returns the backing state for mutation by the execution engine.
    pub fn state_mut(&mut self) -> &mut InMemoryState {
        &mut self.state
    }

    // -------------------------------------------------------------------------
    // Protocol
    // -------------------------------------------------------------------------

    /// Opens a new scope by pushing a fresh snapshot on top of the stack.
    pub fn new_snapshot(&mut self) -> Result<&mut Snapshot, StorageError> {
        if self.snapshots.last().is_some_and(Snapshot::is_invalid) {
            return Err(StorageError::InvalidSnapshot);
        }

        self.snapshots.push(Snapshot::new());
        tracing::debug!(depth = self.snapshots.len(), "opened snapshot scope");

        let head_index = self.snapshots.len() - 1;
        Ok(&mut self.snapshots[head_index])
    }

    /// Returns the snapshot at the top of the stack.
    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Removes the snapshot at the top of the stack and returns it, with no effect on the state.
    pub fn pop(&mut self) -> Result<Snapshot, StorageError> {
        self.snapshots.pop().ok_or(StorageError::EmptySnapshotStack)
    }

    /// Rewinds the changes from the head snapshot into the state and removes it from the stack.
    pub fn revert(&mut self) -> Result<Snapshot, StorageError> {
        let Some(head) = self.snapshots.last() else {
            return Err(StorageError::EmptySnapshotStack);
        };
        if head.is_invalid() {
            return Err(StorageError::InvalidSnapshot);
        }

        head.revert_state(&mut self.state);

        let head = self.pop()?;
        tracing::debug!(depth = self.snapshots.len(), "reverted snapshot scope");
        Ok(head)
    }

    /// Merges the changes from the head snapshot into the previous snapshot and removes it from the stack.
    ///
    /// With a single open scope there is nothing to merge into and this behaves
    /// like [`Self::pop`]; the caller owns any further flush.
    pub fn commit(&mut self) -> Result<Snapshot, StorageError> {
        if self.snapshots.is_empty() {
            return Err(StorageError::EmptySnapshotStack);
        }
        if self.snapshots.len() == 1 {
            return self.pop();
        }

        let head = self.pop()?;
        let current_index = self.snapshots.len() - 1;
        self.snapshots[current_index].merge(&head)?;

        tracing::debug!(depth = self.snapshots.len(), "committed snapshot scope");
        Ok(head)
    }

    /// Invalidates the head snapshot and collapses the stack to contain only it.
    ///
    /// Called when state changes are committed to durable storage: none of the
    /// enclosing scopes can be meaningfully rolled back past that point, so
    /// everything beneath the head is discarded.
    pub fn invalidate(&mut self) {
        // TODO: invalidating the head means every snapshot beneath it can no
        //   longer roll back either; collapsing discards them instead of
        //   marking each one invalid while preserving the stack
        let Some(mut head) = self.snapshots.pop() else {
            return;
        };
        head.invalid = true;
        self.snapshots.clear();
        self.snapshots.push(head);
        tracing::debug!("invalidated snapshot stack");
    }

    /// Returns the number of snapshots in the stack.
    pub fn size(&self) -> usize {
        self.snapshots.len()
    }

    // -------------------------------------------------------------------------
    // Mutation notifications, forwarded to the head snapshot
    // -------------------------------------------------------------------------

    /// Updates the head snapshot with the changes from the journal.
    pub fn update_from_journal(&mut self, journal: &Journal) {
        if let Some(head) = self.snapshots.last_mut() {
            head.update_from_journal(journal);
        }
    }

    /// Updates the head snapshot with the prior value of a storage slot.
    pub fn update_pending_storage(&mut self, address: Address, index: SlotIndex, prev: Option<SlotValue>) {
        if let Some(head) = self.snapshots.last_mut() {
            head.update_pending_storage(address, index, prev);
        }
    }

    /// Updates the head snapshot with the previous pending/dirty status of an account.
    pub fn update_pending_status(&mut self, address: Address, pending: bool, dirty: bool) {
        if let Some(head) = self.snapshots.last_mut() {
            head.update_pending_status(address, pending, dirty);
        }
    }

    /// Updates the head snapshot with the prior liveness flag of an account.
    pub fn update_object_deleted(&mut self, address: Address, deleted: bool) {
        if let Some(head) = self.snapshots.last_mut() {
            head.update_object_deleted(address, deleted);
        }
    }
}
