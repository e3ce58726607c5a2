use display_json::DebugAsJson;

use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::LogTopic;

/// Log emitted by the EVM during contract execution.
///
/// Logs live in the backing store's per-transaction log buffer; a snapshot only
/// tracks how many of them each scope appended so revert can truncate the
/// buffer back to its pre-scope length.
#[derive(DebugAsJson, Clone, PartialEq, Eq, fake::Dummy, serde::Serialize, serde::Deserialize)]
pub struct Log {
    /// Address that emitted the log.
    pub address: Address,

    /// Indexed topics of the log.
    pub topics: Vec<LogTopic>,

    /// Non-indexed payload of the log.
    pub data: Bytes,
}

impl Log {
    pub fn new(address: Address, topics: Vec<LogTopic>, data: Bytes) -> Self {
        Self { address, topics, data }
    }
}
