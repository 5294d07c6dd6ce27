// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - pluggable EC back-end
//
// Architecture:
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │                    ▼                            │
// │      ExtendedKeyProvider::create_root_key       │
// │                    │                            │
// │                    ▼                            │
// │   ExtendedKeyProvider::derive_child_key (xN)    │
// │                    │                            │
// │     ┌──────────────┴──────────────┐             │
// │     ▼                             ▼             │
// │  public key / hash160    xprv / xpub (SLIP-132) │
// └─────────────────────────────────────────────────┘

pub mod secp256k1;
pub mod serialize;

#[cfg(test)]
pub(crate) mod mock;

// Re-exports
pub use secp256k1::{Secp256k1Key, Secp256k1Provider};
pub use serialize::{DecodedExtendedKey, KeyMaterial, KeyVersion};

use crate::chains::AddressFormat;
use crate::crypto::hash::hash160;
use crate::error::WalletResult;
use zeroize::Zeroizing;

/// Compressed SEC1 public key length
pub const PUBLIC_KEY_LEN: usize = 33;

// =============================================================================
// EXTENDED KEY
// =============================================================================
/// A BIP-32 node: key material plus the metadata needed to derive children
///
/// Implementors only expose raw fields; hashing, address encoding and Base58Check
/// serialization are provided on top of them.
pub trait ExtendedKey: Clone {
    /// Compressed SEC1 public key
    fn public_key(&self) -> [u8; PUBLIC_KEY_LEN];

    /// Raw private scalar, zeroized on drop
    fn private_key(&self) -> Zeroizing<[u8; 32]>;

    fn chain_code(&self) -> [u8; 32];

    /// 0 for the root key
    fn depth(&self) -> u8;

    /// First 4 bytes of the parent's HASH160, zero for the root key
    fn parent_fingerprint(&self) -> [u8; 4];

    /// Child number including the hardened bit, 0 for the root key
    fn child_number(&self) -> u32;

    /// HASH160 of the compressed public key
    fn public_key_hash(&self) -> [u8; 20] {
        hash160(&self.public_key())
    }

    /// First 4 bytes of [`public_key_hash`](Self::public_key_hash)
    fn fingerprint(&self) -> [u8; 4] {
        let hash = self.public_key_hash();
        [hash[0], hash[1], hash[2], hash[3]]
    }

    fn to_address_string(&self, format: &AddressFormat) -> WalletResult<String> {
        format.encode(&self.public_key())
    }

    /// Base58Check `xprv`-style serialization
    fn to_extended_private_string(&self, version: KeyVersion) -> Zeroizing<String> {
        serialize::encode_private(self, version)
    }

    /// Base58Check `xpub`-style serialization
    fn to_extended_public_string(&self, version: KeyVersion) -> String {
        serialize::encode_public(self, version)
    }
}

// =============================================================================
// PROVIDER
// =============================================================================
/// EC back-end performing BIP-32 root creation and child derivation
///
/// Implementations must be pure: the same inputs always give the same key.
pub trait ExtendedKeyProvider {
    type Key: ExtendedKey;

    /// Master key from a seed (HMAC-SHA512 keyed with "Bitcoin seed" for BIP-32)
    fn create_root_key(&self, seed: &[u8]) -> WalletResult<Self::Key>;

    /// CKD: child `index` of `parent`; `hardened` adds 2^31 to the index
    fn derive_child_key(
        &self,
        parent: &Self::Key,
        index: u32,
        hardened: bool,
    ) -> WalletResult<Self::Key>;
}
