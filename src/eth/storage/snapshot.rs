//! Undo record for one open execution scope.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::CodeHash;
use crate::eth::primitives::Hash;
use crate::eth::primitives::Nonce;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;
use crate::eth::primitives::Wei;
use crate::eth::storage::InMemoryAccount;
use crate::eth::storage::InMemoryState;
use crate::eth::storage::Journal;
use crate::eth::storage::JournalEntry;
use crate::eth::storage::StorageError;
use crate::ext::not;

/// Retains the prior values of every entity mutated while one scope was open.
///
/// For every (account, field) pair at most one prior value is ever recorded:
/// the first one seen, which is the value that held when the scope opened.
/// A whole-object entry for an account supersedes all of its field-level
/// entries, because restoring the whole object already restores every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Once set, the snapshot can no longer be merged or reverted. Never unset.
    pub(super) invalid: bool,

    /// Number of logs appended per transaction while this scope was open.
    logs_added: HashMap<Hash, usize>,

    /// Prior whole account objects. `None` means the account did not exist before.
    prev_objects: HashMap<Address, Option<InMemoryAccount>>,

    /// Prior storage slot values. Inner `None` means the slot held no pending value.
    account_storage: HashMap<Address, HashMap<SlotIndex, Option<SlotValue>>>,

    account_balance: HashMap<Address, Wei>,
    account_nonce: HashMap<Address, Nonce>,
    account_code: HashMap<Address, (Bytes, CodeHash)>,

    account_destroyed: HashMap<Address, bool>,
    account_deleted: HashMap<Address, bool>,

    /// Accounts that were NOT in the pending set before this scope touched them.
    accounts_not_pending: HashSet<Address>,

    /// Accounts that were NOT in the dirty set before this scope touched them.
    accounts_not_dirty: HashSet<Address>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the snapshot was invalidated by a durable flush.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    // -------------------------------------------------------------------------
    // Recording
    // -------------------------------------------------------------------------

    /// Absorbs a batch of journaled mutations into the undo record.
    pub fn update_from_journal(&mut self, journal: &Journal) {
        for entry in &journal.entries {
            match entry {
                JournalEntry::BalanceChange { address, prev } => self.update_balance_change(*address, prev.clone()),
                JournalEntry::NonceChange { address, prev } => self.update_nonce_change(*address, prev.clone()),
                JournalEntry::CodeChange {
                    address,
                    prev_code,
                    prev_hash,
                } => self.update_code_change(*address, prev_code.clone(), prev_hash.clone()),
                JournalEntry::StorageChange { address, index, prev } => self.update_pending_storage(*address, *index, *prev),
                JournalEntry::LogAppended { tx_hash } => {
                    *self.logs_added.entry(*tx_hash).or_default() += 1;
                }
                JournalEntry::ObjectCreated { address } => self.update_create_object_change(*address),
                JournalEntry::ObjectReplaced { address, prev } => self.update_reset_object_change(*address, prev.clone()),
                JournalEntry::AccountDestroyed {
                    address,
                    prev,
                    prev_balance,
                } => self.update_destroyed_change(*address, *prev, prev_balance.clone()),
            }
        }
    }

    /// Checks if the whole account object was already recorded, superseding all
    /// field-level recording for that account.
    fn object_changed(&self, address: Address) -> bool {
        self.prev_objects.contains_key(&address)
    }

    fn update_balance_change(&mut self, address: Address, prev: Wei) {
        if self.object_changed(address) {
            return;
        }
        self.account_balance.entry(address).or_insert(prev);
    }

    fn update_nonce_change(&mut self, address: Address, prev: Nonce) {
        if self.object_changed(address) {
            return;
        }
        self.account_nonce.entry(address).or_insert(prev);
    }

    fn update_code_change(&mut self, address: Address, prev_code: Bytes, prev_hash: Option<CodeHash>) {
        if self.object_changed(address) {
            return;
        }
        let Some(prev_hash) = prev_hash else {
            // broken contract in the event producer, continuing would corrupt account state
            panic!("code change journaled without code hash for account {address}");
        };
        self.account_code.entry(address).or_insert((prev_code, prev_hash));
    }

    fn update_reset_object_change(&mut self, address: Address, prev: InMemoryAccount) {
        self.prev_objects.entry(address).or_insert(Some(prev));
    }

    fn update_create_object_change(&mut self, address: Address) {
        self.prev_objects.entry(address).or_insert(None);
    }

    fn update_destroyed_change(&mut self, address: Address, prev: bool, prev_balance: Wei) {
        if self.object_changed(address) {
            return;
        }
        self.account_destroyed.entry(address).or_insert(prev);
        self.account_balance.entry(address).or_insert(prev_balance);
    }

    /// Records the prior value of a storage slot on first touch.
    pub fn update_pending_storage(&mut self, address: Address, index: SlotIndex, prev: Option<SlotValue>) {
        if self.object_changed(address) {
            return;
        }
        self.account_storage.entry(address).or_default().entry(index).or_insert(prev);
    }

    /// Records that an account was not yet in the pending/dirty membership sets.
    ///
    /// Membership is orthogonal bookkeeping, not account field state, so it is
    /// not gated by whole-object replacement.
    pub fn update_pending_status(&mut self, address: Address, pending: bool, dirty: bool) {
        if not(pending) {
            self.accounts_not_pending.insert(address);
        }
        if not(dirty) {
            self.accounts_not_dirty.insert(address);
        }
    }

    /// Records the prior liveness flag of an account on first touch.
    pub fn update_object_deleted(&mut self, address: Address, deleted: bool) {
        if self.object_changed(address) {
            return;
        }
        self.account_deleted.entry(address).or_insert(deleted);
    }

    // -------------------------------------------------------------------------
    // Merge
    // -------------------------------------------------------------------------

    /// Merges the changes from another snapshot into the current snapshot.
    ///
    /// The operation assumes that the other snapshot is later (newer) than the
    /// current snapshot: for every recorded field the value further back in
    /// time wins, so own entries are kept and the other's are adopted only
    /// where none exist. Log counts represent distinct appended ranges and are
    /// added instead.
    pub fn merge(&mut self, other: &Snapshot) -> Result<(), StorageError> {
        if self.invalid || other.invalid {
            return Err(StorageError::InvalidSnapshot);
        }

        for (tx_hash, count) in &other.logs_added {
            *self.logs_added.entry(*tx_hash).or_default() += count;
        }

        // whole-object entries must merge before storage so that an adopted
        // object supersedes the other side's slot deltas for the same account
        for (address, object) in &other.prev_objects {
            self.prev_objects.entry(*address).or_insert_with(|| object.clone());
        }

        // routed through the live recorder so the supersede rule applies uniformly
        for (address, storage) in &other.account_storage {
            for (index, prev) in storage {
                self.update_pending_storage(*address, *index, *prev);
            }
        }

        for (address, balance) in &other.account_balance {
            self.account_balance.entry(*address).or_insert_with(|| balance.clone());
        }
        for (address, nonce) in &other.account_nonce {
            self.account_nonce.entry(*address).or_insert_with(|| nonce.clone());
        }
        for (address, (code, code_hash)) in &other.account_code {
            self.account_code.entry(*address).or_insert_with(|| (code.clone(), *code_hash));
        }

        for (address, destroyed) in &other.account_destroyed {
            // two still-unmerged scopes cannot both hold the pre-destruction state
            if self.account_destroyed.contains_key(address) {
                return Err(StorageError::DuplicateDestruction { address: *address });
            }
            self.account_destroyed.insert(*address, *destroyed);
        }

        for (address, deleted) in &other.account_deleted {
            self.account_deleted.entry(*address).or_insert(*deleted);
        }

        self.accounts_not_pending.extend(other.accounts_not_pending.iter().copied());
        self.accounts_not_dirty.extend(other.accounts_not_dirty.iter().copied());

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Revert
    // -------------------------------------------------------------------------

    /// Applies the undo record to the state, restoring every recorded entity to
    /// its pre-scope value.
    ///
    /// Strictly replays recorded priors, never re-deriving any value. A field
    /// delta for an account whose live object is missing is an invariant
    /// violation upstream and aborts.
    pub(super) fn revert_state(&self, state: &mut InMemoryState) {
        // remove all the logs added
        for (tx_hash, count) in &self.logs_added {
            let logs = state.logs.get_mut(tx_hash).expect("log buffer missing for journaled transaction");
            if logs.len() == *count {
                state.logs.remove(tx_hash);
            } else {
                let remaining = logs.len() - count;
                logs.truncate(remaining);
            }
            state.log_size -= count;
        }

        // restore the whole objects
        for (address, object) in &self.prev_objects {
            match object {
                None => {
                    state.accounts.remove(address);
                }
                Some(object) => {
                    state.accounts.insert(*address, object.clone());
                }
            }
        }

        // restore storage (only recorded for accounts without a whole-object entry)
        for (address, storage) in &self.account_storage {
            let account = state.accounts.get_mut(address).expect("live object missing for recorded storage delta");
            for (index, prev) in storage {
                match prev {
                    None => {
                        account.pending_storage.remove(index);
                    }
                    Some(value) => {
                        account.pending_storage.insert(*index, *value);
                    }
                }
            }
        }

        // restore balance
        for (address, balance) in &self.account_balance {
            state
                .accounts
                .get_mut(address)
                .expect("live object missing for recorded balance delta")
                .set_balance(balance.clone());
        }
        // restore nonce
        for (address, nonce) in &self.account_nonce {
            state
                .accounts
                .get_mut(address)
                .expect("live object missing for recorded nonce delta")
                .set_nonce(nonce.clone());
        }
        // restore code
        for (address, (code, code_hash)) in &self.account_code {
            state
                .accounts
                .get_mut(address)
                .expect("live object missing for recorded code delta")
                .set_code(*code_hash, code.clone());
        }

        // restore destroyed flag
        for (address, destroyed) in &self.account_destroyed {
            state
                .accounts
                .get_mut(address)
                .expect("live object missing for recorded destroyed delta")
                .destroyed = *destroyed;
        }
        // restore deleted flag
        for (address, deleted) in &self.account_deleted {
            state
                .accounts
                .get_mut(address)
                .expect("live object missing for recorded deleted delta")
                .deleted = *deleted;
        }

        // restore membership sets
        for address in &self.accounts_not_pending {
            state.accounts_pending.remove(address);
        }
        for address in &self.accounts_not_dirty {
            state.accounts_dirty.remove(address);
        }

        tracing::debug!(
            objects = self.prev_objects.len(),
            balances = self.account_balance.len(),
            logs = self.logs_added.len(),
            "reverted snapshot into state"
        );
    }
}
