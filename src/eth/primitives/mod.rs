mod account;
mod address;
mod bytes;
mod code_hash;
mod hash;
mod log;
mod log_topic;
mod nonce;
mod slot;
mod slot_index;
mod wei;

pub use account::Account;
pub use address::Address;
pub use bytes::Bytes;
pub use code_hash::CodeHash;
pub use hash::Hash;
pub use log::Log;
pub use log_topic::LogTopic;
pub use nonce::Nonce;
pub use slot::Slot;
pub use slot::SlotValue;
pub use slot_index::SlotIndex;
pub use wei::Wei;
