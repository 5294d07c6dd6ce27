// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Codec - BIP-39 entropy <-> words, words -> seed
// Standards: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 (Seed Derivation)

use crate::crypto::hash::sha256;
use crate::crypto::wordlist::{Language, WordList, BITS_PER_WORD};
use crate::error::{CryptoError, MnemonicError, WalletError, WalletResult};
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// PBKDF2 rounds mandated by BIP-39
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Seed length in bytes
pub const SEED_LEN: usize = 64;

const SALT_PREFIX: &str = "mnemonic";

/// Entropy strength used when generating a new mnemonic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strength {
    /// 128-bit entropy, 12 words
    #[default]
    Bits128 = 128,
    /// 160-bit entropy, 15 words
    Bits160 = 160,
    /// 192-bit entropy, 18 words
    Bits192 = 192,
    /// 224-bit entropy, 21 words
    Bits224 = 224,
    /// 256-bit entropy, 24 words
    Bits256 = 256,
}

impl Strength {
    pub const ALL: [Strength; 5] = [
        Strength::Bits128,
        Strength::Bits160,
        Strength::Bits192,
        Strength::Bits224,
        Strength::Bits256,
    ];

    #[inline]
    pub const fn bits(self) -> usize {
        self as usize
    }

    /// Entropy bytes needed for this strength
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        self.bits() / 8
    }

    /// Checksum bits appended to the entropy (`ENT / 32`)
    #[inline]
    pub const fn checksum_bits(self) -> usize {
        self.bits() / 32
    }

    #[inline]
    pub const fn word_count(self) -> usize {
        (self.bits() + self.checksum_bits()) / BITS_PER_WORD
    }

    pub fn from_word_count(count: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.word_count() == count)
    }

    pub fn from_entropy_len(len: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.entropy_bytes() == len)
    }
}

/// A BIP-39 word sequence
///
/// # Security
/// - Words are zeroized on drop
/// - `Debug` never prints the words
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    words: Vec<String>,
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.words.len())
            .field("words", &"[REDACTED]")
            .finish()
    }
}

impl Mnemonic {
    /// Split a user-typed phrase into words.
    ///
    /// Any run of whitespace separates words and every word is NFKD-normalized.
    /// No wordlist validation happens here; use [`MnemonicCodec::validate`].
    pub fn from_phrase(phrase: &str) -> Self {
        Self::from_words(phrase.split_whitespace())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().nfkd().collect::<String>())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    #[inline]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Words joined by single spaces
    ///
    /// # Warning
    /// Handle with care, this is the wallet secret.
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.words.join(" "))
    }
}

/// 64-byte BIP-39 seed, zeroized on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

impl Seed {
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// BIP-39 codec bound to one word list
///
/// Pure and stateless apart from the word-list choice, so one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MnemonicCodec {
    word_list: WordList,
}

impl MnemonicCodec {
    pub const fn new(language: Language) -> Self {
        Self {
            word_list: WordList::new(language),
        }
    }

    pub const fn english() -> Self {
        Self::new(Language::English)
    }

    #[inline]
    pub fn word_list(&self) -> &WordList {
        &self.word_list
    }

    // =========================================================================
    // GENERATION
    // =========================================================================

    /// Generate a fresh mnemonic from the OS CSPRNG
    pub fn generate(&self, strength: Strength) -> WalletResult<Mnemonic> {
        self.generate_with_rng(strength, &mut OsRng)
    }

    /// Generate a mnemonic from a caller-supplied CSPRNG
    ///
    /// RNG failure is returned as [`CryptoError::EntropySource`] and never retried.
    pub fn generate_with_rng<R>(&self, strength: Strength, rng: &mut R) -> WalletResult<Mnemonic>
    where
        R: RngCore + CryptoRng,
    {
        // Stack buffer, max 32 bytes
        let mut entropy = Zeroizing::new([0u8; 32]);
        let entropy = &mut entropy[..strength.entropy_bytes()];
        rng.try_fill_bytes(entropy)
            .map_err(|e| WalletError::Crypto(CryptoError::EntropySource(e.to_string())))?;

        let mnemonic = self.to_mnemonic(entropy)?;
        tracing::debug!(word_count = mnemonic.word_count(), "generated mnemonic");
        Ok(mnemonic)
    }

    /// Encode entropy as words
    ///
    /// # Algorithm
    /// 1. `hash = SHA256(entropy)`
    /// 2. bits = entropy bits (MSB first) + first `ENT / 32` bits of `hash`
    /// 3. every 11-bit group is an index into the word list
    pub fn to_mnemonic(&self, entropy: &[u8]) -> WalletResult<Mnemonic> {
        if entropy.is_empty() {
            return Err(MnemonicError::EmptyEntropy.into());
        }
        let strength = Strength::from_entropy_len(entropy.len())
            .ok_or(MnemonicError::InvalidEntropyLength(entropy.len()))?;

        let hash = sha256(entropy);
        let bits: Zeroizing<Vec<bool>> = Zeroizing::new(
            bits_msb_first(entropy)
                .chain(bits_msb_first(&hash).take(strength.checksum_bits()))
                .collect(),
        );

        let table = self.word_list.words();
        let words = bits
            .chunks(BITS_PER_WORD)
            .map(|group| table[usize::from(pack_bits(group))].to_string())
            .collect();

        Ok(Mnemonic { words })
    }

    // =========================================================================
    // DECODING / VALIDATION
    // =========================================================================

    /// Word count and wordlist membership checks
    ///
    /// This is the lenient check: the embedded checksum is not verified, so phrases
    /// produced by third-party tools with non-standard checksums are still accepted.
    /// Use [`validate_strict`](Self::validate_strict) for the full BIP-39 check.
    pub fn validate<S: AsRef<str>>(&self, words: &[S]) -> WalletResult<()> {
        self.word_indices(words).map(|_| ())
    }

    /// Full BIP-39 validation: count, membership and checksum
    pub fn validate_strict<S: AsRef<str>>(&self, words: &[S]) -> WalletResult<()> {
        self.to_entropy(words).map(|_| ())
    }

    /// Recover the entropy encoded by `words`, verifying the checksum
    pub fn to_entropy<S: AsRef<str>>(&self, words: &[S]) -> WalletResult<Zeroizing<Vec<u8>>> {
        let indices = Zeroizing::new(self.word_indices(words)?);

        let bits: Zeroizing<Vec<bool>> = Zeroizing::new(
            indices
                .iter()
                .flat_map(|&idx| (0..BITS_PER_WORD).rev().map(move |i| (idx >> i) & 1 == 1))
                .collect(),
        );

        let checksum_bits = bits.len() / 33;
        let entropy_bits = bits.len() - checksum_bits;
        let (entropy_part, checksum_part) = bits.split_at(entropy_bits);

        let entropy: Zeroizing<Vec<u8>> =
            Zeroizing::new(entropy_part.chunks(8).map(|b| pack_bits(b) as u8).collect());

        let hash = sha256(&entropy);
        let matches = bits_msb_first(&hash)
            .take(checksum_bits)
            .eq(checksum_part.iter().copied());
        if !matches {
            return Err(MnemonicError::ChecksumFailed.into());
        }

        Ok(entropy)
    }

    /// Whether `word` belongs to this codec's word list
    #[inline]
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    /// Whether some word of the list starts with `prefix`
    ///
    /// Meant for input that is still being typed: `"aban"` is partially valid, `"abanx"` is not.
    /// An empty prefix matches every word.
    pub fn is_word_partially_valid(&self, prefix: &str) -> bool {
        let normalized: String = prefix.nfkd().collect();
        self.word_list.words_with_prefix(prefix).next().is_some()
            || self.word_list.words_with_prefix(&normalized).next().is_some()
    }

    /// Completions for a partially typed word, in list order
    pub fn suggestions(&self, prefix: &str) -> Vec<&'static str> {
        let normalized: String = prefix.nfkd().collect();
        self.word_list.words_with_prefix(&normalized).collect()
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// Derive the 64-byte seed (PBKDF2-HMAC-SHA512, 2048 rounds)
    ///
    /// # Arguments
    /// * `words` - mnemonic words; count and membership are checked first
    /// * `passphrase` - optional BIP-39 passphrase, `""` for none
    ///
    /// # Security Note
    /// A different passphrase yields a completely different wallet. Losing it makes the
    /// funds unrecoverable even with the words.
    pub fn to_seed<S: AsRef<str>>(&self, words: &[S], passphrase: &str) -> WalletResult<Seed> {
        self.validate(words)?;

        let password = Zeroizing::new(
            words
                .iter()
                .map(|w| w.as_ref())
                .collect::<Vec<_>>()
                .join(" ")
                .nfkd()
                .collect::<String>(),
        );
        let salt = Zeroizing::new(format!("{}{}", SALT_PREFIX, passphrase).nfkd().collect::<String>());

        let mut seed = Seed([0u8; SEED_LEN]);
        pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed.0);
        Ok(seed)
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn word_indices<S: AsRef<str>>(&self, words: &[S]) -> WalletResult<Vec<u16>> {
        if Strength::from_word_count(words.len()).is_none() {
            return Err(MnemonicError::InvalidWordCount(words.len()).into());
        }

        words
            .iter()
            .map(|w| {
                let word = w.as_ref();
                self.lookup(word)
                    .ok_or_else(|| WalletError::Mnemonic(MnemonicError::UnknownWord(word.to_string())))
            })
            .collect()
    }

    /// Lookup tolerant of the NFC/NFKD form of accented words
    fn lookup(&self, word: &str) -> Option<u16> {
        self.word_list
            .index_of(word)
            .or_else(|| self.word_list.index_of(&word.nfc().collect::<String>()))
            .or_else(|| self.word_list.index_of(&word.nfkd().collect::<String>()))
    }
}

/// Bits of `bytes`, most significant bit of each byte first
fn bits_msb_first(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
}

/// Fold up to 16 MSB-first bits into an integer
fn pack_bits(bits: &[bool]) -> u16 {
    bits.iter().fold(0u16, |acc, &bit| (acc << 1) | u16::from(bit))
}

// =============================================================================
// UNIT TESTS
// =============================================================================
