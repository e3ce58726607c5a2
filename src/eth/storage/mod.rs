//! Snapshot-based rollback over in-memory account state.

mod inmemory;
mod journal;
mod snapshot;
mod snapshot_stack;
mod storage_error;

pub use inmemory::InMemoryAccount;
pub use inmemory::InMemoryState;
pub use journal::Journal;
pub use journal::JournalEntry;
pub use snapshot::Snapshot;
pub use snapshot_stack::SnapshotStack;
pub use storage_error::StorageError;
