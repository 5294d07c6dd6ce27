// wallet-core/src/keychain.rs
//
// HD keychain: a root extended key plus path-based derivation on top of an EC provider.

use crate::crypto::key_deriver::{ExtendedKey, ExtendedKeyProvider, Secp256k1Provider};
use crate::crypto::paths::{DerivationPath, Segment};
use crate::error::WalletResult;

/// Root key holder
///
/// Immutable after construction. Share between accounts through `Arc`.
///
/// # Example
/// ```ignore
/// let keychain = HdKeychain::from_seed(seed.as_bytes())?;
/// let key = keychain.key_by_path("m/44'/0'/0'/0/0")?;
/// ```
pub struct HdKeychain<P: ExtendedKeyProvider> {
    provider: P,
    root: P::Key,
}

impl<P: ExtendedKeyProvider> std::fmt::Debug for HdKeychain<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HdKeychain")
            .field("root_fingerprint", &hex::encode(self.root.fingerprint()))
            .finish_non_exhaustive()
    }
}

impl HdKeychain<Secp256k1Provider> {
    /// BIP-32 secp256k1 keychain
    pub fn from_seed(seed: &[u8]) -> WalletResult<Self> {
        Self::new(Secp256k1Provider, seed)
    }
}

impl<P: ExtendedKeyProvider> HdKeychain<P> {
    /// Create the root key from `seed`.
    ///
    /// Seed length is left to the provider to judge.
    pub fn new(provider: P, seed: &[u8]) -> WalletResult<Self> {
        let root = provider.create_root_key(seed)?;
        tracing::debug!(seed_len = seed.len(), "HD keychain created");
        Ok(Self { provider, root })
    }

    #[inline]
    pub fn root_key(&self) -> &P::Key {
        &self.root
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Parse `path` and derive from the root.
    ///
    /// `""`, `"m"` and `"/"` return a copy of the root key.
    pub fn key_by_path(&self, path: &str) -> WalletResult<P::Key> {
        let path = DerivationPath::parse(path)?;
        self.derive(&path)
    }

    pub fn derive(&self, path: &DerivationPath) -> WalletResult<P::Key> {
        tracing::trace!(%path, "deriving key");
        self.derive_from(&self.root, path.segments())
    }

    /// Walk `segments` starting at `parent`.
    ///
    /// Stops at the first failing segment; no index is skipped or retried.
    pub fn derive_from(&self, parent: &P::Key, segments: &[Segment]) -> WalletResult<P::Key> {
        segments.iter().try_fold(parent.clone(), |key, segment| {
            self.provider
                .derive_child_key(&key, segment.index, segment.hardened)
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
