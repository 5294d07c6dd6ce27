// wallet-core/src/crypto/key_deriver/serialize.rs
//
// BIP-32 extended key serialization (78 bytes, Base58Check) with SLIP-132 version bytes.
//
// Layout:
//   version(4) | depth(1) | parent fingerprint(4) | child number(4, BE) | chain code(32) | key(33)

use super::{ExtendedKey, PUBLIC_KEY_LEN};
use crate::config::Network;
use crate::crypto::hash::{base58check_decode, base58check_encode, hash160};
use crate::crypto::paths::Purpose;
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use zeroize::Zeroizing;

/// Serialized extended key length before Base58Check
pub const EXTENDED_KEY_LEN: usize = 78;

/// Version byte pair for private / public serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyVersion {
    pub private: [u8; 4],
    pub public: [u8; 4],
}

impl KeyVersion {
    /// xprv / xpub
    pub const X_MAINNET: Self = Self::new(0x0488_ADE4, 0x0488_B21E);
    /// tprv / tpub
    pub const X_TESTNET: Self = Self::new(0x0435_8394, 0x0435_87CF);
    /// yprv / ypub
    pub const Y_MAINNET: Self = Self::new(0x049D_7878, 0x049D_7CB2);
    /// uprv / upub
    pub const Y_TESTNET: Self = Self::new(0x044A_4E28, 0x044A_5262);
    /// zprv / zpub
    pub const Z_MAINNET: Self = Self::new(0x04B2_430C, 0x04B2_4746);
    /// vprv / vpub
    pub const Z_TESTNET: Self = Self::new(0x045F_18BC, 0x045F_1CF6);

    pub const ALL: [Self; 6] = [
        Self::X_MAINNET,
        Self::X_TESTNET,
        Self::Y_MAINNET,
        Self::Y_TESTNET,
        Self::Z_MAINNET,
        Self::Z_TESTNET,
    ];

    pub const fn new(private: u32, public: u32) -> Self {
        Self {
            private: private.to_be_bytes(),
            public: public.to_be_bytes(),
        }
    }

    /// SLIP-132 prefix for an account of the given purpose
    pub const fn for_purpose(purpose: Purpose, network: Network) -> Self {
        match (purpose, network) {
            (Purpose::Bip44 | Purpose::Bip86, Network::Mainnet) => Self::X_MAINNET,
            (Purpose::Bip44 | Purpose::Bip86, Network::Testnet) => Self::X_TESTNET,
            (Purpose::Bip49, Network::Mainnet) => Self::Y_MAINNET,
            (Purpose::Bip49, Network::Testnet) => Self::Y_TESTNET,
            (Purpose::Bip84, Network::Mainnet) => Self::Z_MAINNET,
            (Purpose::Bip84, Network::Testnet) => Self::Z_TESTNET,
        }
    }

    /// Match 4 serialized version bytes; the flag is `true` for a private prefix
    pub fn detect(bytes: [u8; 4]) -> Option<(Self, bool)> {
        Self::ALL.into_iter().find_map(|version| {
            if version.private == bytes {
                Some((version, true))
            } else if version.public == bytes {
                Some((version, false))
            } else {
                None
            }
        })
    }

    pub const fn network(self) -> Network {
        match self {
            Self::X_TESTNET | Self::Y_TESTNET | Self::Z_TESTNET => Network::Testnet,
            _ => Network::Mainnet,
        }
    }

    /// Script family implied by the prefix. BIP-86 shares x/t, so those report BIP-44.
    pub const fn purpose(self) -> Purpose {
        match self {
            Self::Y_MAINNET | Self::Y_TESTNET => Purpose::Bip49,
            Self::Z_MAINNET | Self::Z_TESTNET => Purpose::Bip84,
            _ => Purpose::Bip44,
        }
    }
}

// =============================================================================
// ENCODE
// =============================================================================

fn encode<K: ExtendedKey>(key: &K, version: [u8; 4], key_data: &[u8; 33]) -> Zeroizing<String> {
    let mut buf = Zeroizing::new(Vec::with_capacity(EXTENDED_KEY_LEN));
    buf.extend_from_slice(&version);
    buf.push(key.depth());
    buf.extend_from_slice(&key.parent_fingerprint());
    buf.extend_from_slice(&key.child_number().to_be_bytes());
    buf.extend_from_slice(&key.chain_code());
    buf.extend_from_slice(key_data);
    Zeroizing::new(base58check_encode(&buf))
}

pub(crate) fn encode_private<K: ExtendedKey>(key: &K, version: KeyVersion) -> Zeroizing<String> {
    let secret = key.private_key();
    let mut key_data = Zeroizing::new([0u8; 33]);
    key_data[1..].copy_from_slice(&*secret);
    encode(key, version.private, &key_data)
}

pub(crate) fn encode_public<K: ExtendedKey>(key: &K, version: KeyVersion) -> String {
    let encoded = encode(key, version.public, &key.public_key());
    encoded.as_str().to_owned()
}

// =============================================================================
// DECODE
// =============================================================================

/// Key field of a decoded extended key
#[derive(Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// Compressed SEC1 point
    Public([u8; PUBLIC_KEY_LEN]),
    /// Raw scalar, zeroized on drop
    Private(Zeroizing<[u8; 32]>),
}

/// Fields of a Base58Check extended key (xpub, ypub, zprv, tpub, ...)
///
/// Parsing checks the checksum, the length, the version prefix and the key itself.
/// The key cannot derive children; it only describes what was pasted or imported.
///
/// # Example
/// ```ignore
/// let key = DecodedExtendedKey::decode("zpub6rFR7y4Q2Aij...")?;
/// assert!(key.is_public());
/// assert_eq!(key.version.purpose(), Purpose::Bip84);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedExtendedKey {
    pub version: KeyVersion,
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_number: u32,
    pub chain_code: [u8; 32],
    pub key: KeyMaterial,
}

impl std::fmt::Debug for DecodedExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedExtendedKey")
            .field("version", &self.version)
            .field("private", &!self.is_public())
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .finish_non_exhaustive()
    }
}

impl DecodedExtendedKey {
    /// Parse a Base58Check extended key
    ///
    /// # Errors
    /// - `WrongVersion` when the prefix is none of the SLIP-132 x/y/z or t/u/v versions
    /// - `InvalidKeyFormat` for a bad checksum, a wrong length, an invalid point or scalar,
    ///   or root metadata that is not zero
    pub fn decode(encoded: &str) -> WalletResult<Self> {
        let raw = Zeroizing::new(base58check_decode(encoded)?);
        if raw.len() != EXTENDED_KEY_LEN {
            return Err(invalid(format!(
                "extended key is {} bytes, expected {}",
                raw.len(),
                EXTENDED_KEY_LEN
            )));
        }

        let prefix = read::<4>(&raw, 0);
        let (version, private) = KeyVersion::detect(prefix).ok_or_else(|| {
            WalletError::Crypto(CryptoError::WrongVersion(hex::encode(prefix)))
        })?;

        let depth = raw[4];
        let parent_fingerprint = read::<4>(&raw, 5);
        let child_number = u32::from_be_bytes(read::<4>(&raw, 9));
        if depth == 0 && (parent_fingerprint != [0; 4] || child_number != 0) {
            return Err(invalid("root key with a parent fingerprint or child number".to_string()));
        }

        let key = if private {
            if raw[45] != 0x00 {
                return Err(invalid("private key data must start with 0x00".to_string()));
            }
            let secret = Zeroizing::new(read::<32>(&raw, 46));
            SecretKey::from_slice(&*secret)
                .map_err(|e| invalid(format!("Invalid secp256k1 private key: {}", e)))?;
            KeyMaterial::Private(secret)
        } else {
            let point = read::<PUBLIC_KEY_LEN>(&raw, 45);
            PublicKey::from_sec1_bytes(&point)
                .map_err(|e| invalid(format!("Invalid secp256k1 public key: {}", e)))?;
            KeyMaterial::Public(point)
        };

        Ok(Self {
            version,
            depth,
            parent_fingerprint,
            child_number,
            chain_code: read::<32>(&raw, 13),
            key,
        })
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        matches!(self.key, KeyMaterial::Public(_))
    }

    /// Compressed public key, computed from the scalar for private keys
    pub fn public_key(&self) -> WalletResult<[u8; PUBLIC_KEY_LEN]> {
        match &self.key {
            KeyMaterial::Public(point) => Ok(*point),
            KeyMaterial::Private(secret) => {
                let secret = SecretKey::from_slice(&**secret)
                    .map_err(|e| invalid(format!("Invalid secp256k1 private key: {}", e)))?;
                let encoded = secret.public_key().to_encoded_point(true);
                let mut out = [0u8; PUBLIC_KEY_LEN];
                out.copy_from_slice(encoded.as_bytes());
                Ok(out)
            }
        }
    }

    /// First 4 bytes of HASH160 of the public key
    pub fn fingerprint(&self) -> WalletResult<[u8; 4]> {
        let hash = hash160(&self.public_key()?);
        Ok(read::<4>(&hash, 0))
    }
}

fn read<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

fn invalid(msg: String) -> WalletError {
    WalletError::Crypto(CryptoError::InvalidKeyFormat(msg))
}

// =============================================================================
// TESTS
// =============================================================================
