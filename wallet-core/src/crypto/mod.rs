// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Mnemonic**: BIP-39 entropy ↔ words and PBKDF2 seed derivation via [`MnemonicCodec`].
//! - **Word lists**: the nine BIP-39 languages via [`WordList`].
//! - **Key Derivation**: BIP-32 behind the [`ExtendedKeyProvider`] trait, secp256k1 by default.
//! - **Derivation Paths**: parsing plus BIP-44/49/84/86 builders via [`DerivationPaths`].

pub mod hash;
pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod wordlist;

// Re-exports for cleaner API access
pub use key_deriver::{
    DecodedExtendedKey, ExtendedKey, ExtendedKeyProvider, KeyMaterial, KeyVersion, Secp256k1Key,
    Secp256k1Provider,
};
pub use mnemonic::{Mnemonic, MnemonicCodec, Seed, Strength};
pub use paths::{coin_type, DerivationPath, DerivationPaths, Purpose, Segment};
pub use wordlist::{Language, WordList};
