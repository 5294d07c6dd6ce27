// wallet-core/src/lib.rs

//! Hierarchical-deterministic wallet engine
//!
//! BIP-39 mnemonics and seeds, BIP-32 key derivation, BIP-44/49/84/86 accounts with
//! Bitcoin-family and EVM address rendering. Pure computation: no I/O, no networking,
//! no key storage.
//!
//! ```ignore
//! let codec = MnemonicCodec::english();
//! let mnemonic = codec.generate(Strength::Bits128)?;
//! let seed = codec.to_seed(mnemonic.words(), "")?;
//!
//! let keychain = Arc::new(HdKeychain::from_seed(seed.as_bytes())?);
//! let wallet = HdAccountWallet::new(keychain, coin_type::BITCOIN)?;
//! let address = wallet.receive_address(0)?;
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod account;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod keychain;

pub use account::{Address, Chain, HdAccountWallet, PublicKey};
pub use chains::AddressFormat;
pub use config::{AccountConfig, Network};
pub use crypto::{
    coin_type, DecodedExtendedKey, DerivationPath, DerivationPaths, ExtendedKey,
    ExtendedKeyProvider, KeyMaterial, KeyVersion, Language, Mnemonic, MnemonicCodec, Purpose,
    Secp256k1Key, Secp256k1Provider, Seed, Segment, Strength, WordList,
};
pub use error::{CryptoError, MnemonicError, PathError, WalletError, WalletResult};
pub use keychain::HdKeychain;
