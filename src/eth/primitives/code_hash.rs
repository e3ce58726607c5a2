use std::fmt::Display;

use ethereum_types::H256;
use fake::Dummy;
use fake::Faker;
use hex_literal::hex;

use crate::gen_newtype_from;

/// Digest of the bytecode of a contract.
///
/// In the case of an externally-owned account (EOA), bytecode is null and the
/// code hash is fixed as the keccak256 hash of an empty string.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CodeHash(pub H256);

impl CodeHash {
    /// Keccak256 digest of empty bytecode.
    pub const EMPTY: CodeHash = CodeHash(H256(hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")));

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(H256(bytes))
    }
}

impl Default for CodeHash {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Display for CodeHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", const_hex::encode_prefixed(self.0))
    }
}

impl Dummy<Faker> for CodeHash {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(H256(bytes))
    }
}

// -----------------------------------------------------------------------------
// Conversions: Other -> Self
// -----------------------------------------------------------------------------
gen_newtype_from!(self = CodeHash, other = H256, [u8; 32]);
