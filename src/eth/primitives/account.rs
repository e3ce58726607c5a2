use display_json::DebugAsJson;

use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::CodeHash;
use crate::eth::primitives::Nonce;
use crate::eth::primitives::Wei;

/// Ethereum account (wallet or contract).
#[derive(DebugAsJson, Clone, Default, PartialEq, Eq, fake::Dummy, serde::Serialize, serde::Deserialize)]
pub struct Account {
    /// Immutable address of the account.
    pub address: Address,

    /// Current nonce of the account. Changes every time a transaction is sent.
    pub nonce: Nonce,

    /// Current balance of the account. Changes when a transfer is made or the account pays a fee for executing a transaction.
    pub balance: Wei,

    /// Contract bytecode. Present only if the account is a contract.
    #[dummy(default)]
    pub bytecode: Option<Bytes>,

    /// Keccak256 hash of the bytecode. [`CodeHash::EMPTY`] when the account is not a contract.
    #[dummy(default)]
    pub code_hash: CodeHash,
}

impl Account {
    /// Creates a new empty account.
    pub fn new_empty(address: Address) -> Self {
        Self::new_with_balance(address, Wei::ZERO)
    }

    /// Creates a new account with initial balance.
    pub fn new_with_balance(address: Address, balance: Wei) -> Self {
        Self {
            address,
            nonce: Nonce::ZERO,
            balance,
            bytecode: None,
            code_hash: CodeHash::EMPTY,
        }
    }

    /// Checks if the account is a contract.
    pub fn is_contract(&self) -> bool {
        self.bytecode.is_some()
    }
}
