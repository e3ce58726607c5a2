use cirrus::eth::primitives::Address;
use cirrus::eth::primitives::Bytes;
use cirrus::eth::primitives::CodeHash;
use cirrus::eth::primitives::Hash;
use cirrus::eth::primitives::Log;
use cirrus::eth::primitives::Nonce;
use cirrus::eth::primitives::SlotIndex;
use cirrus::eth::primitives::SlotValue;
use cirrus::eth::primitives::Wei;
use cirrus::eth::storage::InMemoryAccount;
use cirrus::eth::storage::InMemoryState;
use cirrus::eth::storage::Journal;
use cirrus::eth::storage::JournalEntry;
use cirrus::eth::storage::SnapshotStack;
use hex_literal::hex;

const ALICE: Address = Address::new(hex!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
const BOB: Address = Address::new(hex!("70997970c51812dc3a010c7d01b50e0d17dc79c8"));
const CHARLIE: Address = Address::new(hex!("3c44cdddb6a900fa2b585dd299e03d12fa4293bc"));

const TX_1: Hash = Hash::new([0x11; 32]);
const TX_2: Hash = Hash::new([0x22; 32]);

// -----------------------------------------------------------------------------
// Execution engine simulation: every mutation journals the value it overwrites.
// -----------------------------------------------------------------------------

fn set_balance(stack: &mut SnapshotStack, journal: &mut Journal, address: Address, balance: Wei) {
    let account = stack.state_mut().ensure_account(address);
    journal.record(JournalEntry::BalanceChange {
        address,
        prev: account.info.balance.clone(),
    });
    account.set_balance(balance);
}

fn set_nonce(stack: &mut SnapshotStack, journal: &mut Journal, address: Address, nonce: Nonce) {
    let account = stack.state_mut().ensure_account(address);
    journal.record(JournalEntry::NonceChange {
        address,
        prev: account.info.nonce.clone(),
    });
    account.set_nonce(nonce);
}

fn set_code(stack: &mut SnapshotStack, journal: &mut Journal, address: Address, code_hash: CodeHash, code: Bytes) {
    let account = stack.state_mut().read_account_mut(address).unwrap();
    journal.record(JournalEntry::CodeChange {
        address,
        prev_code: account.info.bytecode.clone().unwrap_or_default(),
        prev_hash: Some(account.info.code_hash),
    });
    account.set_code(code_hash, code);
}

fn create_account(stack: &mut SnapshotStack, journal: &mut Journal, address: Address, balance: Wei) {
    journal.record(JournalEntry::ObjectCreated { address });
    stack.state_mut().accounts.insert(address, InMemoryAccount::new_with_balance(address, balance));
}

fn replace_account(stack: &mut SnapshotStack, journal: &mut Journal, account: InMemoryAccount) {
    let address = account.info.address;
    let prev = stack.state().read_account(address).unwrap().clone();
    journal.record(JournalEntry::ObjectReplaced { address, prev });
    stack.state_mut().accounts.insert(address, account);
}

fn destroy_account(stack: &mut SnapshotStack, journal: &mut Journal, address: Address) {
    let account = stack.state_mut().read_account_mut(address).unwrap();
    journal.record(JournalEntry::AccountDestroyed {
        address,
        prev: account.destroyed,
        prev_balance: account.info.balance.clone(),
    });
    account.destroyed = true;
    account.set_balance(Wei::ZERO);
}

fn set_slot(stack: &mut SnapshotStack, address: Address, index: SlotIndex, value: SlotValue) {
    let prev = stack.state().read_slot(address, index);
    stack.update_pending_storage(address, index, prev);
    stack.state_mut().set_storage(address, index, value);
}

fn mark_pending_and_dirty(stack: &mut SnapshotStack, address: Address) {
    let pending = stack.state().is_pending(address);
    let dirty = stack.state().is_dirty(address);
    stack.update_pending_status(address, pending, dirty);
    stack.state_mut().mark_pending(address);
    stack.state_mut().mark_dirty(address);
}

fn mark_deleted(stack: &mut SnapshotStack, address: Address) {
    let prev = stack.state().read_account(address).map(|account| account.deleted).unwrap_or_default();
    stack.update_object_deleted(address, prev);
    stack.state_mut().read_account_mut(address).unwrap().deleted = true;
}

fn emit_log(stack: &mut SnapshotStack, journal: &mut Journal, tx_hash: Hash, address: Address) {
    stack.state_mut().add_log(tx_hash, Log::new(address, vec![], Bytes::default()));
    journal.record(JournalEntry::LogAppended { tx_hash });
}

fn absorb(stack: &mut SnapshotStack, journal: &mut Journal) {
    stack.update_from_journal(journal);
    journal.clear();
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[test]
fn nested_scopes_restore_balance_and_destruction() {
    let mut state = InMemoryState::new();
    state.accounts.insert(ALICE, InMemoryAccount::new_with_balance(ALICE, 100u64.into()));
    let mut stack = SnapshotStack::new(state);
    let mut journal = Journal::new();

    // scope 1: balance 100 -> 150
    stack.new_snapshot().unwrap();
    set_balance(&mut stack, &mut journal, ALICE, 150u64.into());
    absorb(&mut stack, &mut journal);

    // scope 2 (nested): balance 150 -> 200, then destroy
    stack.new_snapshot().unwrap();
    set_balance(&mut stack, &mut journal, ALICE, 200u64.into());
    destroy_account(&mut stack, &mut journal, ALICE);
    absorb(&mut stack, &mut journal);

    let alice = stack.state().read_account(ALICE).unwrap();
    assert!(alice.destroyed);
    assert_eq!(alice.info.balance, Wei::ZERO);

    // revert scope 2: destruction undone, balance back to 150
    stack.revert().unwrap();
    let alice = stack.state().read_account(ALICE).unwrap();
    assert!(!alice.destroyed);
    assert_eq!(alice.info.balance, Wei::from(150u64));

    // revert scope 1: balance back to 100
    stack.revert().unwrap();
    let alice = stack.state().read_account(ALICE).unwrap();
    assert_eq!(alice.info.balance, Wei::from(100u64));
    assert_eq!(stack.size(), 0);
}

#[test]
fn revert_removes_exactly_the_appended_logs() {
    let mut state = InMemoryState::new();
    state.accounts.insert(ALICE, InMemoryAccount::new_with_balance(ALICE, 100u64.into()));
    state.add_log(TX_1, Log::new(ALICE, vec![], Bytes::default()));
    let mut stack = SnapshotStack::new(state);
    let mut journal = Journal::new();

    stack.new_snapshot().unwrap();
    emit_log(&mut stack, &mut journal, TX_1, ALICE);
    emit_log(&mut stack, &mut journal, TX_1, ALICE);
    emit_log(&mut stack, &mut journal, TX_2, ALICE);
    absorb(&mut stack, &mut journal);

    assert_eq!(stack.state().logs[&TX_1].len(), 3);
    assert_eq!(stack.state().log_size, 4);

    stack.revert().unwrap();

    // the two trailing entries for TX_1 are gone, the earlier one is intact,
    // and the buffer for TX_2 was dropped entirely
    assert_eq!(stack.state().logs[&TX_1].len(), 1);
    assert!(!stack.state().logs.contains_key(&TX_2));
    assert_eq!(stack.state().log_size, 1);
}

#[test]
fn revert_is_true_inverse_of_execution() {
    let mut state = InMemoryState::new();
    state.accounts.insert(ALICE, {
        let mut alice = InMemoryAccount::new_with_balance(ALICE, 100u64.into());
        alice.set_nonce(1u64.into());
        alice.set_code(CodeHash::new([0xaa; 32]), Bytes::from(vec![0x60, 0x60]));
        alice.pending_storage.insert(SlotIndex::ZERO, 7u64.into());
        alice
    });
    state.accounts.insert(CHARLIE, InMemoryAccount::new_with_balance(CHARLIE, 50u64.into()));
    state.mark_pending(CHARLIE);
    state.add_log(TX_1, Log::new(ALICE, vec![], Bytes::default()));

    let original = state.clone();
    let mut stack = SnapshotStack::new(state);
    let mut journal = Journal::new();

    stack.new_snapshot().unwrap();

    // scalar fields
    set_balance(&mut stack, &mut journal, ALICE, 999u64.into());
    set_nonce(&mut stack, &mut journal, ALICE, 2u64.into());
    set_code(&mut stack, &mut journal, ALICE, CodeHash::new([0xbb; 32]), Bytes::from(vec![0x61, 0x61]));

    // storage: overwrite an existing slot and write a brand new one
    set_slot(&mut stack, ALICE, SlotIndex::ZERO, 8u64.into());
    set_slot(&mut stack, ALICE, SlotIndex::ONE, 9u64.into());

    // whole-object mutations, absorbed before touching the new account's storage
    // so the supersede rule sees the creation first
    create_account(&mut stack, &mut journal, BOB, 77u64.into());
    replace_account(&mut stack, &mut journal, InMemoryAccount::new_with_balance(CHARLIE, 1u64.into()));
    absorb(&mut stack, &mut journal);
    set_slot(&mut stack, BOB, SlotIndex::ZERO, 1u64.into());

    // flags and membership sets
    destroy_account(&mut stack, &mut journal, ALICE);
    mark_deleted(&mut stack, ALICE);
    mark_pending_and_dirty(&mut stack, ALICE);
    mark_pending_and_dirty(&mut stack, CHARLIE);

    // logs
    emit_log(&mut stack, &mut journal, TX_1, ALICE);
    emit_log(&mut stack, &mut journal, TX_2, BOB);

    absorb(&mut stack, &mut journal);
    assert_ne!(stack.state(), &original);

    stack.revert().unwrap();
    assert_eq!(stack.state(), &original);
}

#[test]
fn commit_preserves_rollback_to_pre_outer_state() {
    let build = || {
        let mut state = InMemoryState::new();
        state.accounts.insert(ALICE, InMemoryAccount::new_with_balance(ALICE, 100u64.into()));
        state
    };
    let original = build();

    let run = |commit_inner: bool| {
        let mut stack = SnapshotStack::new(build());
        let mut journal = Journal::new();

        // outer scope
        stack.new_snapshot().unwrap();
        set_balance(&mut stack, &mut journal, ALICE, 150u64.into());
        absorb(&mut stack, &mut journal);

        // inner scope
        stack.new_snapshot().unwrap();
        set_balance(&mut stack, &mut journal, ALICE, 200u64.into());
        create_account(&mut stack, &mut journal, BOB, 5u64.into());
        set_slot(&mut stack, ALICE, SlotIndex::ZERO, 3u64.into());
        emit_log(&mut stack, &mut journal, TX_1, ALICE);
        absorb(&mut stack, &mut journal);

        if commit_inner {
            stack.commit().unwrap();
        } else {
            stack.revert().unwrap();
        }
        stack.revert().unwrap();
        stack
    };

    let committed = run(true);
    let reverted = run(false);

    assert_eq!(committed.state(), &original);
    assert_eq!(reverted.state(), &original);
}

#[test]
fn invalidate_permanently_blocks_rollback() {
    let mut state = InMemoryState::new();
    state.accounts.insert(ALICE, InMemoryAccount::new_with_balance(ALICE, 100u64.into()));
    let mut stack = SnapshotStack::new(state);
    let mut journal = Journal::new();

    stack.new_snapshot().unwrap();
    set_balance(&mut stack, &mut journal, ALICE, 150u64.into());
    absorb(&mut stack, &mut journal);

    // changes reached durable storage, rollback is no longer meaningful
    stack.invalidate();

    assert!(stack.revert().unwrap_err().is_invalid_snapshot());
    assert!(stack.new_snapshot().unwrap_err().is_invalid_snapshot());

    // the mutated value stays in the state
    assert_eq!(stack.state().read_account(ALICE).unwrap().info.balance, Wei::from(150u64));
}
