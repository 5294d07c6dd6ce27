// wallet-core/src/crypto/key_deriver/mock.rs
//
// Deterministic fake EC back-end for unit tests.
//
// Uses HMAC-SHA512 chaining only; no curve arithmetic. "Public keys" are `0x02 || SHA256(secret)`.

use super::{ExtendedKey, ExtendedKeyProvider, PUBLIC_KEY_LEN};
use crate::crypto::hash::sha256;
use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::sync::Mutex;
use zeroize::Zeroizing;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MockKey {
    secret: [u8; 32],
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
}

impl ExtendedKey for MockKey {
    fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        let mut out = [0u8; PUBLIC_KEY_LEN];
        out[0] = 0x02;
        out[1..].copy_from_slice(&sha256(&self.secret));
        out
    }

    fn private_key(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.secret)
    }

    fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    fn depth(&self) -> u8 {
        self.depth
    }

    fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    fn child_number(&self) -> u32 {
        self.child_number
    }
}

/// Records every `derive_child_key` call and can be told to fail at one index
#[derive(Debug, Default)]
pub(crate) struct MockProvider {
    fail_at: Option<u32>,
    calls: Mutex<Vec<(u32, bool)>>,
}

impl MockProvider {
    pub(crate) fn failing_at(index: u32) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<(u32, bool)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn split(key: &[u8], data: &[u8]) -> ([u8; 32], [u8; 32]) {
        let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(data);
        let out = mac.finalize().into_bytes();
        let mut left = [0u8; 32];
        let mut right = [0u8; 32];
        left.copy_from_slice(&out[..32]);
        right.copy_from_slice(&out[32..]);
        (left, right)
    }
}

impl ExtendedKeyProvider for MockProvider {
    type Key = MockKey;

    fn create_root_key(&self, seed: &[u8]) -> WalletResult<MockKey> {
        let (secret, chain_code) = Self::split(b"mock seed", seed);
        Ok(MockKey {
            secret,
            chain_code,
            depth: 0,
            parent_fingerprint: [0; 4],
            child_number: 0,
        })
    }

    fn derive_child_key(&self, parent: &MockKey, index: u32, hardened: bool) -> WalletResult<MockKey> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((index, hardened));
        }
        if self.fail_at == Some(index) {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "invalid child at index {}",
                index
            ))));
        }

        let child_number = if hardened { index | 0x8000_0000 } else { index };
        let mut data = parent.secret.to_vec();
        data.extend_from_slice(&child_number.to_be_bytes());
        let (secret, chain_code) = Self::split(&parent.chain_code, &data);

        Ok(MockKey {
            secret,
            chain_code,
            depth: parent.depth.saturating_add(1),
            parent_fingerprint: parent.fingerprint(),
            child_number,
        })
    }
}
