use crate::eth::primitives::Address;

#[derive(Debug, thiserror::Error, strum::EnumIs)]
pub enum StorageError {
    /// Operation involved a snapshot whose changes were already flushed to durable storage.
    #[error("Invalid snapshot: changes were already committed past the point of rollback.")]
    InvalidSnapshot,

    /// Merge found a pre-destruction state recorded for the same account on both sides.
    #[error("Duplicate destruction recorded for account {address} while merging snapshots.")]
    DuplicateDestruction { address: Address },

    /// Stack operation that requires an open scope was called with none open.
    #[error("Snapshot stack is empty.")]
    EmptySnapshotStack,
}
