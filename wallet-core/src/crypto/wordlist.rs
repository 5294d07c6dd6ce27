// wallet-core/src/crypto/wordlist.rs
//
// BIP-39 word lists. The tables are the `'static` arrays embedded in the `bip39` crate,
// so lookups are lock-free and safe to share across threads.

use serde::{Deserialize, Serialize};

/// Number of words in every BIP-39 list (2^11)
pub const WORDLIST_SIZE: usize = 2048;

/// Bits encoded by a single word
pub const BITS_PER_WORD: usize = 11;

/// Supported word-list languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Language {
    #[default]
    English,
    SimplifiedChinese,
    TraditionalChinese,
    Czech,
    French,
    Italian,
    Japanese,
    Korean,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::English,
        Language::SimplifiedChinese,
        Language::TraditionalChinese,
        Language::Czech,
        Language::French,
        Language::Italian,
        Language::Japanese,
        Language::Korean,
        Language::Spanish,
    ];

    fn table(self) -> bip39::Language {
        match self {
            Language::English => bip39::Language::English,
            Language::SimplifiedChinese => bip39::Language::SimplifiedChinese,
            Language::TraditionalChinese => bip39::Language::TraditionalChinese,
            Language::Czech => bip39::Language::Czech,
            Language::French => bip39::Language::French,
            Language::Italian => bip39::Language::Italian,
            Language::Japanese => bip39::Language::Japanese,
            Language::Korean => bip39::Language::Korean,
            Language::Spanish => bip39::Language::Spanish,
        }
    }
}

/// Index <-> word dictionary for one language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordList {
    language: Language,
}

impl WordList {
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    pub const fn english() -> Self {
        Self::new(Language::English)
    }

    #[inline]
    pub fn language(&self) -> Language {
        self.language
    }

    /// All 2048 words in index order
    #[inline]
    pub fn words(&self) -> &'static [&'static str; WORDLIST_SIZE] {
        self.language.table().word_list()
    }

    /// Word at `index`, `None` when `index >= 2048`
    #[inline]
    pub fn word(&self, index: u16) -> Option<&'static str> {
        self.words().get(usize::from(index)).copied()
    }

    /// Position of `word` in the list
    #[inline]
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.language.table().find_word(word)
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.index_of(word).is_some()
    }

    /// Words beginning with `prefix`, in index order
    pub fn words_with_prefix<'a>(
        &self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'static str> + 'a {
        self.words().iter().copied().filter(move |w| w.starts_with(prefix))
    }
}
