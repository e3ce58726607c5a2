//! In-memory account state that snapshots patch on revert.

use std::collections::HashMap;
use std::collections::HashSet;

use display_json::DebugAsJson;

use crate::eth::primitives::Account;
use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::CodeHash;
use crate::eth::primitives::Hash;
use crate::eth::primitives::Log;
use crate::eth::primitives::Nonce;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;
use crate::eth::primitives::Wei;

/// Live per-account object held by [`InMemoryState`].
#[derive(DebugAsJson, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InMemoryAccount {
    /// Scalar account fields.
    pub info: Account,

    /// Storage slots written while the account is live but not yet flushed to durable storage.
    pub pending_storage: HashMap<SlotIndex, SlotValue>,

    /// Whether the account was destroyed (SELFDESTRUCT) in the current processing window.
    pub destroyed: bool,

    /// Whether the account was removed from the live set.
    pub deleted: bool,
}

impl InMemoryAccount {
    /// Creates a new empty account.
    pub fn new(address: Address) -> Self {
        Self {
            info: Account::new_empty(address),
            pending_storage: HashMap::new(),
            destroyed: false,
            deleted: false,
        }
    }

    /// Creates a new account with initial balance.
    pub fn new_with_balance(address: Address, balance: Wei) -> Self {
        Self {
            info: Account::new_with_balance(address, balance),
            pending_storage: HashMap::new(),
            destroyed: false,
            deleted: false,
        }
    }

    pub fn set_balance(&mut self, balance: Wei) {
        self.info.balance = balance;
    }

    pub fn set_nonce(&mut self, nonce: Nonce) {
        self.info.nonce = nonce;
    }

    pub fn set_code(&mut self, code_hash: CodeHash, code: Bytes) {
        self.info.code_hash = code_hash;
        self.info.bytecode = Some(code);
    }
}

// -----------------------------------------------------------------------------
// State
// -----------------------------------------------------------------------------

/// Mutable account-state store for one processing window.
///
/// The execution engine mutates it directly while journaling prior values;
/// [`Snapshot::revert_state`](super::Snapshot) writes recorded priors back into
/// it when a scope is abandoned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryState {
    /// Live account objects.
    pub accounts: HashMap<Address, InMemoryAccount>,

    /// Accounts whose changes are pending inclusion in the next flush.
    pub accounts_pending: HashSet<Address>,

    /// Accounts modified in the current processing window.
    pub accounts_dirty: HashSet<Address>,

    /// Logs appended during execution, keyed by the transaction that emitted them.
    pub logs: HashMap<Hash, Vec<Log>>,

    /// Total number of logs across all transactions.
    pub log_size: usize,
}

impl InMemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live account object, if any.
    pub fn read_account(&self, address: Address) -> Option<&InMemoryAccount> {
        match self.accounts.get(&address) {
            Some(account) => {
                tracing::trace!(%address, "account found");
                Some(account)
            }
            None => {
                tracing::trace!(%address, "account not found");
                None
            }
        }
    }

    /// Returns the live account object for mutation, if any.
    pub fn read_account_mut(&mut self, address: Address) -> Option<&mut InMemoryAccount> {
        self.accounts.get_mut(&address)
    }

    /// Returns the live account object, creating an empty one if absent.
    pub fn ensure_account(&mut self, address: Address) -> &mut InMemoryAccount {
        self.accounts.entry(address).or_insert_with(|| InMemoryAccount::new(address))
    }

    /// Returns the pending value of a storage slot, if present.
    pub fn read_slot(&self, address: Address, index: SlotIndex) -> Option<SlotValue> {
        self.accounts.get(&address).and_then(|account| account.pending_storage.get(&index)).copied()
    }

    /// Writes a storage slot of a live account, creating the account if absent.
    pub fn set_storage(&mut self, address: Address, index: SlotIndex, value: SlotValue) {
        self.ensure_account(address).pending_storage.insert(index, value);
    }

    /// Appends a log to the buffer of the given transaction.
    pub fn add_log(&mut self, tx_hash: Hash, log: Log) {
        self.logs.entry(tx_hash).or_default().push(log);
        self.log_size += 1;
    }

    pub fn is_pending(&self, address: Address) -> bool {
        self.accounts_pending.contains(&address)
    }

    pub fn is_dirty(&self, address: Address) -> bool {
        self.accounts_dirty.contains(&address)
    }

    pub fn mark_pending(&mut self, address: Address) {
        self.accounts_pending.insert(address);
    }

    pub fn mark_dirty(&mut self, address: Address) {
        self.accounts_dirty.insert(address);
    }
}
