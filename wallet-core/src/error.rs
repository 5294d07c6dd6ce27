use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Path Error: {0}")]
    Path(#[from] PathError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Entropy must not be empty.")]
    EmptyEntropy,

    #[error("Invalid entropy length: {0} bytes. Expected 16, 20, 24, 28 or 32 bytes.")]
    InvalidEntropyLength(usize),

    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Malformed derivation path '{path}': {reason}")]
    Malformed { path: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Unknown extended key version: {0}")]
    WrongVersion(String),

    #[error("Unsupported address format: {0}")]
    UnsupportedAddress(String),

    #[error("Entropy source failed: {0}")]
    EntropySource(String),
}

impl PathError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        PathError::Malformed {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
