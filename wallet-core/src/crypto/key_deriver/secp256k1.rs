// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation (BIP-32)
//
// Used by: Bitcoin, Litecoin, Dogecoin, Dash, Ethereum/EVM, ...
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use super::{ExtendedKey, ExtendedKeyProvider, PUBLIC_KEY_LEN};
use crate::error::{CryptoError, WalletError, WalletResult};
use bip32::{ChildNumber, XPrv};
use zeroize::Zeroizing;

/// BIP-32 secp256k1 provider backed by the `bip32` crate
///
/// Stateless; every call is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Secp256k1Provider;

/// secp256k1 extended private key
///
/// # Security
/// - The private scalar inside `XPrv` is zeroized on drop
/// - `Debug` prints only public metadata
#[derive(Clone)]
pub struct Secp256k1Key {
    xprv: XPrv,
    public_key: [u8; PUBLIC_KEY_LEN],
}

impl std::fmt::Debug for Secp256k1Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1Key")
            .field("depth", &self.depth())
            .field("child_number", &self.child_number())
            .field("public_key", &hex::encode(self.public_key))
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

impl Secp256k1Key {
    fn new(xprv: XPrv) -> Self {
        let public_key = xprv.public_key().to_bytes();
        Self { xprv, public_key }
    }

    /// Underlying `bip32` key, for handing off to a signer
    #[inline]
    pub fn xprv(&self) -> &XPrv {
        &self.xprv
    }

    /// ECDSA signing key
    #[inline]
    pub fn signing_key(&self) -> &k256::ecdsa::SigningKey {
        self.xprv.private_key()
    }
}

impl ExtendedKey for Secp256k1Key {
    #[inline]
    fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.public_key
    }

    fn private_key(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.xprv.private_key().to_bytes().into())
    }

    #[inline]
    fn chain_code(&self) -> [u8; 32] {
        self.xprv.attrs().chain_code
    }

    #[inline]
    fn depth(&self) -> u8 {
        self.xprv.attrs().depth
    }

    #[inline]
    fn parent_fingerprint(&self) -> [u8; 4] {
        self.xprv.attrs().parent_fingerprint
    }

    #[inline]
    fn child_number(&self) -> u32 {
        self.xprv.attrs().child_number.0
    }
}

impl ExtendedKeyProvider for Secp256k1Provider {
    type Key = Secp256k1Key;

    fn create_root_key(&self, seed: &[u8]) -> WalletResult<Secp256k1Key> {
        let root = XPrv::new(seed).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Failed to create master key: {}",
                e
            )))
        })?;
        Ok(Secp256k1Key::new(root))
    }

    fn derive_child_key(
        &self,
        parent: &Secp256k1Key,
        index: u32,
        hardened: bool,
    ) -> WalletResult<Secp256k1Key> {
        let child_number = ChildNumber::new(index, hardened).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid index {}: {}",
                index, e
            )))
        })?;

        let child = parent.xprv.derive_child(child_number).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Child derivation failed at {}{}: {}",
                index,
                if hardened { "'" } else { "" },
                e
            )))
        })?;

        Ok(Secp256k1Key::new(child))
    }
}

// =============================================================================
// TESTS
// =============================================================================
