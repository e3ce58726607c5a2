//! Journal of state mutations applied during execution.
//!
//! The execution engine records one entry per mutation, in order, carrying the
//! value that held immediately before the mutation. Snapshots consume these
//! entries to build their undo record; the journal itself never touches state.

use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::CodeHash;
use crate::eth::primitives::Hash;
use crate::eth::primitives::Nonce;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;
use crate::eth::primitives::Wei;
use crate::eth::storage::InMemoryAccount;

/// Single state mutation with the value that held immediately before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    /// Account balance was overwritten.
    BalanceChange { address: Address, prev: Wei },

    /// Account nonce was overwritten.
    NonceChange { address: Address, prev: Nonce },

    /// Account bytecode was overwritten. Every code change carries its hash;
    /// a missing hash is a defect in the event producer.
    CodeChange {
        address: Address,
        prev_code: Bytes,
        prev_hash: Option<CodeHash>,
    },

    /// Storage slot was overwritten. `prev` is `None` when the slot held no pending value.
    StorageChange {
        address: Address,
        index: SlotIndex,
        prev: Option<SlotValue>,
    },

    /// Log was appended to the buffer of the given transaction.
    LogAppended { tx_hash: Hash },

    /// Account object was created; there was no live object before.
    ObjectCreated { address: Address },

    /// Account object was wholly replaced; `prev` is the full object it replaced.
    ObjectReplaced { address: Address, prev: InMemoryAccount },

    /// Account was destroyed. Carries the prior destroyed flag and the balance
    /// held immediately before destruction zeroed it.
    AccountDestroyed {
        address: Address,
        prev: bool,
        prev_balance: Wei,
    },
}

/// Ordered batch of [`JournalEntry`] produced by one stretch of execution.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    pub entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the journal.
    pub fn record(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Discards all entries, usually after they were absorbed by a snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
