//! In-memory multi-scope snapshot and rollback for EVM-style account state.
//!
//! A [`SnapshotStack`](eth::storage::SnapshotStack) opens one
//! [`Snapshot`](eth::storage::Snapshot) per execution scope (typically one per
//! transaction, nested inside one per block or batch). While a scope is open,
//! the execution engine mutates the backing
//! [`InMemoryState`](eth::storage::InMemoryState) and journals every mutation
//! with its prior value. Closing the scope either reverts (the snapshot is
//! applied to the state as an inverse patch) or commits (its recorded priors
//! are folded into the enclosing scope without touching the state). Once
//! changes are flushed to durable storage the stack is invalidated and rollback
//! is permanently disabled.

pub mod eth;
pub mod ext;
