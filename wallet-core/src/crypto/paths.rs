// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - BIP-32 path parsing + BIP-44 path builders
// BIP-44 (Purpose), SLIP-44 (Coin Types), BIP-49/84/86 (Bitcoin SegWit / Taproot)

use crate::error::{PathError, WalletResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Offset added to a hardened segment's index when it reaches the EC provider
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
    /// Shared by every testnet
    pub const TESTNET: u32 = 1;
    pub const LITECOIN: u32 = 2;
    pub const DOGECOIN: u32 = 3;
    pub const DASH: u32 = 5;
    pub const ETHEREUM: u32 = 60; // EVM chains share coin_type 60
    pub const BITCOIN_CASH: u32 = 145;
}

// =============================================================================
// PURPOSE
// =============================================================================
/// First path level, selects the address scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    /// `m/44'`: legacy P2PKH
    #[default]
    Bip44 = 44,
    /// `m/49'`: P2SH-wrapped SegWit
    Bip49 = 49,
    /// `m/84'`: native SegWit
    Bip84 = 84,
    /// `m/86'`: Taproot key path
    Bip86 = 86,
}

impl Purpose {
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

// =============================================================================
// SEGMENT
// =============================================================================
/// One level of a derivation path
///
/// `index` always stays in `[0, 2^31)`; hardening is carried by the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub index: u32,
    pub hardened: bool,
}

impl Segment {
    #[inline]
    pub const fn normal(index: u32) -> Self {
        Self {
            index,
            hardened: false,
        }
    }

    #[inline]
    pub const fn hardened(index: u32) -> Self {
        Self {
            index,
            hardened: true,
        }
    }

    /// Checked constructor, rejects `index >= 2^31`
    pub fn try_new(index: u32, hardened: bool) -> Result<Self, PathError> {
        let segment = Self { index, hardened };
        if index >= HARDENED_OFFSET {
            return Err(PathError::malformed(
                &segment.to_string(),
                "index must be below 2^31",
            ));
        }
        Ok(segment)
    }

    /// Index as seen by the EC provider (`index + 2^31` when hardened)
    #[inline]
    pub const fn effective_index(self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

// =============================================================================
// DERIVATION PATH
// =============================================================================
/// Parsed BIP-32 path
///
/// # Grammar
/// Optional leading `m/` or `/`, then `/`-separated decimal indices, each optionally
/// suffixed with `'` for hardened. `""`, `"m"`, `"/"` and `"m/"` are the root path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    segments: Vec<Segment>,
}

impl DerivationPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parse a path string
    ///
    /// Pure string transform, no key material involved.
    pub fn parse(path: &str) -> WalletResult<Self> {
        let body = match path {
            "" | "m" | "/" | "m/" => return Ok(Self::root()),
            _ => path
                .strip_prefix("m/")
                .or_else(|| path.strip_prefix('/'))
                .unwrap_or(path),
        };

        let segments = body
            .split('/')
            .map(|raw| parse_segment(path, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// New path with `segment` appended
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// New path with all of `tail` appended
    pub fn extend(&self, tail: &[Segment]) -> Self {
        let mut segments = self.segments.clone();
        segments.extend_from_slice(tail);
        Self { segments }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

fn parse_segment(path: &str, raw: &str) -> Result<Segment, PathError> {
    if raw.is_empty() {
        return Err(PathError::malformed(path, "empty segment"));
    }

    let (digits, hardened) = match raw.strip_suffix('\'') {
        Some(digits) => (digits, true),
        None => (raw, false),
    };

    // u32::from_str would accept a leading '+'
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::malformed(
            path,
            format!("segment '{}' is not a decimal index", raw),
        ));
    }

    let index: u32 = digits
        .parse()
        .map_err(|_| PathError::malformed(path, format!("segment '{}' is out of range", raw)))?;
    if index >= HARDENED_OFFSET {
        return Err(PathError::malformed(
            path,
            format!("segment '{}' must be below 2^31", raw),
        ));
    }

    Ok(Segment { index, hardened })
}

impl FromStr for DerivationPath {
    type Err = crate::error::WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

// =============================================================================
// PATH BUILDERS
// =============================================================================
/// Pre-built derivation paths
///
/// # Conventions
/// - BIP-44: `m/44'/coin'/account'/change/index`
/// - BIP-49: `m/49'/coin'/account'/change/index`
/// - BIP-84: `m/84'/coin'/account'/change/index`
/// - BIP-86: `m/86'/coin'/account'/change/index`
pub struct DerivationPaths;

impl DerivationPaths {
    pub const EVM_0: &'static str = "m/44'/60'/0'/0/0";
    pub const BTC_LEGACY_0: &'static str = "m/44'/0'/0'/0/0";
    pub const BTC_NESTED_SEGWIT_0: &'static str = "m/49'/0'/0'/0/0";
    pub const BTC_NATIVE_SEGWIT_0: &'static str = "m/84'/0'/0'/0/0";
    pub const BTC_TAPROOT_0: &'static str = "m/86'/0'/0'/0/0";

    /// Account node: `m/purpose'/coin'/account'`
    ///
    /// `coin_type` and `account` must be below 2^31.
    pub fn account(purpose: Purpose, coin_type: u32, account: u32) -> WalletResult<DerivationPath> {
        Ok(DerivationPath::from_segments(vec![
            Segment::hardened(purpose.index()),
            Segment::try_new(coin_type, true)?,
            Segment::try_new(account, true)?,
        ]))
    }

    /// Chain node: `m/purpose'/coin'/account'/change`
    pub fn chain(
        purpose: Purpose,
        coin_type: u32,
        account: u32,
        change: u32,
    ) -> WalletResult<DerivationPath> {
        Ok(Self::account(purpose, coin_type, account)?.child(Segment::try_new(change, false)?))
    }

    /// Full address path
    ///
    /// # Arguments
    /// * `purpose` - 44, 49, 84 or 86
    /// * `coin_type` - SLIP-44 coin type (see `coin_type::*`)
    /// * `account` - Account index (usually 0)
    /// * `change` - 0 = external (receive), 1 = internal (change)
    /// * `index` - Address index
    ///
    /// Every index must be below 2^31, otherwise `PathError::Malformed`.
    pub fn bip44(
        purpose: Purpose,
        coin_type: u32,
        account: u32,
        change: u32,
        index: u32,
    ) -> WalletResult<DerivationPath> {
        Ok(Self::chain(purpose, coin_type, account, change)?.child(Segment::try_new(index, false)?))
    }

    /// EVM path with custom address index
    #[inline]
    pub fn evm(index: u32) -> WalletResult<DerivationPath> {
        Self::bip44(Purpose::Bip44, coin_type::ETHEREUM, 0, 0, index)
    }
}

// =============================================================================
// TESTS
// =============================================================================
