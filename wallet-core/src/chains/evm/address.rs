// wallet-core/src/chains/evm/address.rs
//
// EVM address derivation
// EIP-55 (Checksum), Keccak-256, secp256k1

use crate::error::{CryptoError, WalletError, WalletResult};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroize;

/// Length of an EVM address in bytes
pub const ADDRESS_LEN: usize = 20;

/// EVM Address Generator
///
/// # Flow:  Public Key (33B compressed) → uncompressed (64B) → Keccak256 → Address (20B)
///
/// # Security
/// - Intermediate hashes are zeroized
pub struct EvmAddress;

impl EvmAddress {
    // =========================================================================
    // CORE: Public Key → Address Bytes (20 bytes)
    // =========================================================================

    /// Address bytes of a SEC1 public key (compressed or uncompressed).
    ///
    /// # Algorithm
    /// 1. decompress → `04 || X || Y` (65B)
    /// 2. drop the 0x04 prefix
    /// 3. Keccak-256(`X || Y`), keep the last 20 bytes
    pub fn bytes_from_public_key(public_key: &[u8]) -> WalletResult<[u8; ADDRESS_LEN]> {
        let public_key = PublicKey::from_sec1_bytes(public_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 public key: {}",
                e
            )))
        })?;
        Ok(Self::bytes_from_point(&public_key))
    }

    /// EIP-55 address string of a SEC1 public key
    pub fn from_public_key(public_key: &[u8]) -> WalletResult<String> {
        let bytes = Self::bytes_from_public_key(public_key)?;
        Ok(Self::checksum_encode(&bytes))
    }

    fn bytes_from_point(public_key: &PublicKey) -> [u8; ADDRESS_LEN] {
        let encoded = public_key.to_encoded_point(false);
        let mut hash = keccak256(&encoded.as_bytes()[1..]);

        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&hash[12..]);
        hash.zeroize();
        address
    }

    // =========================================================================
    // EIP-55
    // =========================================================================

    /// Mixed-case checksum encoding: a hex letter is uppercased when the matching nibble
    /// of `keccak256(lowercase_hex)` is >= 8.
    pub fn checksum_encode(address: &[u8; ADDRESS_LEN]) -> String {
        let lower = hex::encode(address);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

// =============================================================================
// TESTS
// =============================================================================
