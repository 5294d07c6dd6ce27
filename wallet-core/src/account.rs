// wallet-core/src/account.rs
//
// BIP-44 account wallet
//
// m / purpose' / coin_type' / account' / chain / index
//                                         │
//                          0 = receive (external), 1 = change (internal)

use crate::chains::AddressFormat;
use crate::config::AccountConfig;
use crate::crypto::key_deriver::{ExtendedKey, ExtendedKeyProvider, KeyVersion};
use crate::crypto::paths::{DerivationPath, DerivationPaths, Segment};
use crate::error::WalletResult;
use crate::keychain::HdKeychain;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;
use zeroize::Zeroizing;

// =============================================================================
// TYPES
// =============================================================================

/// BIP-44 chain level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Receive addresses
    External = 0,
    /// Change addresses
    Internal = 1,
}

impl Chain {
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn is_external(self) -> bool {
        matches!(self, Chain::External)
    }
}

/// Derived address, immutable value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub index: u32,
    pub external: bool,
    #[serde(with = "hex::serde")]
    pub public_key: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub public_key_hash: Vec<u8>,
    pub display_string: String,
}

/// Derived public key, [`Address`] without the rendered string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKey {
    pub index: u32,
    pub external: bool,
    #[serde(with = "hex::serde")]
    pub public_key: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub public_key_hash: Vec<u8>,
}

impl From<Address> for PublicKey {
    fn from(address: Address) -> Self {
        Self {
            index: address.index,
            external: address.external,
            public_key: address.public_key,
            public_key_hash: address.public_key_hash,
        }
    }
}

// =============================================================================
// ACCOUNT WALLET
// =============================================================================

/// One BIP-44 account on top of a shared [`HdKeychain`]
///
/// Nothing is cached: every call derives from the keychain again.
pub struct HdAccountWallet<P: ExtendedKeyProvider> {
    keychain: Arc<HdKeychain<P>>,
    config: AccountConfig,
    account_path: DerivationPath,
    format: AddressFormat,
}

impl<P: ExtendedKeyProvider> std::fmt::Debug for HdAccountWallet<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HdAccountWallet")
            .field("config", &self.config)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl<P: ExtendedKeyProvider> Clone for HdAccountWallet<P> {
    fn clone(&self) -> Self {
        Self {
            keychain: Arc::clone(&self.keychain),
            config: self.config,
            account_path: self.account_path.clone(),
            format: self.format,
        }
    }
}

impl<P: ExtendedKeyProvider> HdAccountWallet<P> {
    /// BIP-44 account 0 for `coin_type`; coin type 1 selects testnet
    pub fn new(keychain: Arc<HdKeychain<P>>, coin_type: u32) -> WalletResult<Self> {
        Self::with_config(keychain, AccountConfig::bip44(coin_type))
    }

    /// Any purpose / account / network.
    ///
    /// # Errors
    /// - `PathError::Malformed` when `coin_type` or `account` is not below 2^31
    /// - `UnsupportedAddress` when the coin has no address format for the purpose or network
    pub fn with_config(keychain: Arc<HdKeychain<P>>, config: AccountConfig) -> WalletResult<Self> {
        let account_path =
            DerivationPaths::account(config.purpose, config.coin_type, config.account)?;
        let format = AddressFormat::resolve(config.coin_type, config.purpose, config.network)?;
        tracing::debug!(
            purpose = config.purpose.index(),
            coin_type = config.coin_type,
            account = config.account,
            network = ?config.network,
            "account wallet created"
        );
        Ok(Self {
            keychain,
            config,
            account_path,
            format,
        })
    }

    #[inline]
    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    #[inline]
    pub fn address_format(&self) -> AddressFormat {
        self.format
    }

    #[inline]
    pub fn keychain(&self) -> &Arc<HdKeychain<P>> {
        &self.keychain
    }

    /// `m/purpose'/coin'/account'`
    #[inline]
    pub fn account_path(&self) -> &DerivationPath {
        &self.account_path
    }

    /// `m/purpose'/coin'/account'/chain/index`, `index` must be below 2^31
    pub fn path(&self, index: u32, chain: Chain) -> WalletResult<DerivationPath> {
        Ok(self
            .chain_path(chain)
            .child(Segment::try_new(index, false)?))
    }

    fn chain_path(&self, chain: Chain) -> DerivationPath {
        self.account_path.child(Segment::normal(chain.index()))
    }

    // =========================================================================
    // SINGLE DERIVATION
    // =========================================================================

    #[inline]
    pub fn receive_address(&self, index: u32) -> WalletResult<Address> {
        self.address(index, Chain::External)
    }

    #[inline]
    pub fn change_address(&self, index: u32) -> WalletResult<Address> {
        self.address(index, Chain::Internal)
    }

    pub fn address(&self, index: u32, chain: Chain) -> WalletResult<Address> {
        let key = self.private_key(index, chain)?;
        self.to_address(&key, index, chain)
    }

    pub fn public_key(&self, index: u32, chain: Chain) -> WalletResult<PublicKey> {
        let key = self.private_key(index, chain)?;
        Ok(to_public_key(&key, index, chain))
    }

    /// Extended key at `index` on `chain`
    ///
    /// # Security
    /// The returned key carries the private scalar; drop it as soon as possible.
    pub fn private_key(&self, index: u32, chain: Chain) -> WalletResult<P::Key> {
        self.keychain.derive(&self.path(index, chain)?)
    }

    // =========================================================================
    // BATCH DERIVATION
    // =========================================================================

    pub fn receive_addresses(&self, indices: Range<u32>) -> WalletResult<Vec<Address>> {
        self.addresses(indices, Chain::External)
    }

    pub fn change_addresses(&self, indices: Range<u32>) -> WalletResult<Vec<Address>> {
        self.addresses(indices, Chain::Internal)
    }

    /// Resolves the chain node once, then derives one level per index
    ///
    /// The whole range is checked against 2^31 before anything is derived.
    pub fn addresses(&self, indices: Range<u32>, chain: Chain) -> WalletResult<Vec<Address>> {
        if !indices.is_empty() {
            Segment::try_new(indices.end - 1, false)?;
        }

        let chain_path = self.chain_path(chain);
        let chain_key = self.keychain.derive(&chain_path)?;
        tracing::trace!(%chain_path, start = indices.start, end = indices.end, "batch derivation");

        indices
            .map(|index| {
                let key = self.keychain.derive_from(&chain_key, &[Segment::normal(index)])?;
                self.to_address(&key, index, chain)
            })
            .collect()
    }

    // =========================================================================
    // ACCOUNT EXTENDED KEYS
    // =========================================================================

    /// Account-level xpub / ypub / zpub (tpub / upub / vpub on testnet)
    pub fn account_extended_public_key(&self) -> WalletResult<String> {
        let key = self.keychain.derive(&self.account_path)?;
        Ok(key.to_extended_public_string(self.key_version()))
    }

    /// Account-level xprv / yprv / zprv
    pub fn account_extended_private_key(&self) -> WalletResult<Zeroizing<String>> {
        let key = self.keychain.derive(&self.account_path)?;
        Ok(key.to_extended_private_string(self.key_version()))
    }

    fn key_version(&self) -> KeyVersion {
        KeyVersion::for_purpose(self.config.purpose, self.config.network)
    }

    fn to_address(&self, key: &P::Key, index: u32, chain: Chain) -> WalletResult<Address> {
        let display_string = key.to_address_string(&self.format)?;
        let public_key = to_public_key(key, index, chain);
        Ok(Address {
            index,
            external: public_key.external,
            public_key: public_key.public_key,
            public_key_hash: public_key.public_key_hash,
            display_string,
        })
    }
}

fn to_public_key<K: ExtendedKey>(key: &K, index: u32, chain: Chain) -> PublicKey {
    PublicKey {
        index,
        external: chain.is_external(),
        public_key: key.public_key().to_vec(),
        public_key_hash: key.public_key_hash().to_vec(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
