// wallet-core/src/crypto/hash.rs
//
// Hash primitives shared by the mnemonic codec, key serialization and address encoders.

use crate::error::{CryptoError, WalletError, WalletResult};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of the Base58Check checksum suffix
pub const CHECKSUM_LEN: usize = 4;

/// SHA-256 of `data`.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Double SHA-256, used for Base58Check checksums.
#[inline]
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// HASH160 = RIPEMD160(SHA256(data)).
///
/// This is the "public key hash" carried by every derived address.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// BIP340 tagged hash: `SHA256(SHA256(tag) || SHA256(tag) || data)`.
pub fn tagged_hash(tag: &str, data: &[u8]) -> [u8; 32] {
    let tag_hash = sha256(tag.as_bytes());
    let mut hasher = Sha256::new();
    hasher.update(tag_hash);
    hasher.update(tag_hash);
    hasher.update(data);
    hasher.finalize().into()
}

/// Base58Check encode: `base58(payload || sha256d(payload)[..4])`.
///
/// The intermediate buffer is zeroized since payloads may carry private keys.
pub fn base58check_encode(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Zeroizing::new(Vec::with_capacity(payload.len() + CHECKSUM_LEN));
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(data.as_slice()).into_string()
}

/// Base58Check decode, verifying and stripping the 4-byte checksum.
pub fn base58check_decode(encoded: &str) -> WalletResult<Vec<u8>> {
    let mut data = bs58::decode(encoded).into_vec().map_err(|e| {
        WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
            "Invalid base58 string: {}",
            e
        )))
    })?;

    if data.len() < CHECKSUM_LEN {
        return Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(
            "Base58Check payload too short".to_string(),
        )));
    }

    let split = data.len() - CHECKSUM_LEN;
    let expected = sha256d(&data[..split]);
    if data[split..] != expected[..CHECKSUM_LEN] {
        return Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(
            "Base58Check checksum mismatch".to_string(),
        )));
    }

    data.truncate(split);
    Ok(data)
}
