// wallet-core/src/chains/mod.rs
//
// Per-coin address parameters and the address format chosen for an account.

pub mod bitcoin;
pub mod evm;

pub use bitcoin::BitcoinAddress;
pub use evm::EvmAddress;

use crate::config::Network;
use crate::crypto::paths::{coin_type, Purpose};
use crate::error::{CryptoError, WalletError, WalletResult};

/// Address version bytes / HRP of a Bitcoin-family coin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtxoParams {
    pub p2pkh: u8,
    pub p2sh: u8,
    /// Bech32 HRP, `None` for coins without SegWit
    pub hrp: Option<&'static str>,
}

impl UtxoParams {
    pub const BITCOIN: Self = Self { p2pkh: 0x00, p2sh: 0x05, hrp: Some("bc") };
    pub const BITCOIN_TESTNET: Self = Self { p2pkh: 0x6f, p2sh: 0xc4, hrp: Some("tb") };
    pub const LITECOIN: Self = Self { p2pkh: 0x30, p2sh: 0x32, hrp: Some("ltc") };
    pub const LITECOIN_TESTNET: Self = Self { p2pkh: 0x6f, p2sh: 0x3a, hrp: Some("tltc") };
    pub const DOGECOIN: Self = Self { p2pkh: 0x1e, p2sh: 0x16, hrp: None };
    pub const DASH: Self = Self { p2pkh: 0x4c, p2sh: 0x10, hrp: None };
    /// Legacy format only, CashAddr is not produced
    pub const BITCOIN_CASH: Self = Self { p2pkh: 0x00, p2sh: 0x05, hrp: None };
}

/// Address family of a SLIP-44 coin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinFamily {
    Utxo(UtxoParams),
    Evm,
}

impl CoinFamily {
    pub fn lookup(coin_type: u32, network: Network) -> Option<Self> {
        let family = match (coin_type, network) {
            (coin_type::ETHEREUM, _) => CoinFamily::Evm,
            // coin type 1 is testnet only
            (coin_type::TESTNET | coin_type::BITCOIN, Network::Testnet) => {
                CoinFamily::Utxo(UtxoParams::BITCOIN_TESTNET)
            }
            (coin_type::BITCOIN, Network::Mainnet) => CoinFamily::Utxo(UtxoParams::BITCOIN),
            (coin_type::LITECOIN, Network::Mainnet) => CoinFamily::Utxo(UtxoParams::LITECOIN),
            (coin_type::LITECOIN, Network::Testnet) => {
                CoinFamily::Utxo(UtxoParams::LITECOIN_TESTNET)
            }
            (coin_type::DOGECOIN, Network::Mainnet) => CoinFamily::Utxo(UtxoParams::DOGECOIN),
            (coin_type::DASH, Network::Mainnet) => CoinFamily::Utxo(UtxoParams::DASH),
            (coin_type::BITCOIN_CASH, Network::Mainnet) => {
                CoinFamily::Utxo(UtxoParams::BITCOIN_CASH)
            }
            _ => return None,
        };
        Some(family)
    }
}

/// How a compressed public key is rendered as an address string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFormat {
    /// Base58Check(version || HASH160(pubkey))
    P2pkh { version: u8 },
    /// Base58Check(version || HASH160(0x0014 || HASH160(pubkey)))
    P2shP2wpkh { version: u8 },
    /// bech32, witness v0
    P2wpkh { hrp: &'static str },
    /// bech32m, witness v1, BIP-86 tweaked key
    P2tr { hrp: &'static str },
    /// EIP-55 checksummed hex
    Evm,
}

impl AddressFormat {
    /// Format for an account of `purpose` on `coin_type`
    pub fn resolve(coin_type: u32, purpose: Purpose, network: Network) -> WalletResult<Self> {
        let family = CoinFamily::lookup(coin_type, network).ok_or_else(|| {
            unsupported(format!("coin type {} on {:?}", coin_type, network))
        })?;

        match (family, purpose) {
            (CoinFamily::Evm, Purpose::Bip44) => Ok(AddressFormat::Evm),
            (CoinFamily::Evm, _) => Err(unsupported(format!(
                "purpose {} for EVM coin type {}",
                purpose.index(),
                coin_type
            ))),
            (CoinFamily::Utxo(params), Purpose::Bip44) => Ok(AddressFormat::P2pkh {
                version: params.p2pkh,
            }),
            (CoinFamily::Utxo(params), _) => {
                let hrp = params.hrp.ok_or_else(|| {
                    unsupported(format!(
                        "purpose {} needs SegWit, coin type {} has none",
                        purpose.index(),
                        coin_type
                    ))
                })?;
                Ok(match purpose {
                    Purpose::Bip49 => AddressFormat::P2shP2wpkh {
                        version: params.p2sh,
                    },
                    Purpose::Bip84 => AddressFormat::P2wpkh { hrp },
                    Purpose::Bip44 | Purpose::Bip86 => AddressFormat::P2tr { hrp },
                })
            }
        }
    }

    /// Render `public_key` (compressed SEC1)
    pub fn encode(&self, public_key: &[u8; 33]) -> WalletResult<String> {
        match *self {
            AddressFormat::P2pkh { version } => Ok(BitcoinAddress::p2pkh(public_key, version)),
            AddressFormat::P2shP2wpkh { version } => {
                Ok(BitcoinAddress::p2sh_p2wpkh(public_key, version))
            }
            AddressFormat::P2wpkh { hrp } => BitcoinAddress::p2wpkh(public_key, hrp),
            AddressFormat::P2tr { hrp } => BitcoinAddress::p2tr(public_key, hrp),
            AddressFormat::Evm => EvmAddress::from_public_key(public_key),
        }
    }
}

fn unsupported(msg: String) -> WalletError {
    WalletError::Crypto(CryptoError::UnsupportedAddress(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bitcoin() {
        let net = Network::Mainnet;
        assert_eq!(
            AddressFormat::resolve(coin_type::BITCOIN, Purpose::Bip44, net).unwrap(),
            AddressFormat::P2pkh { version: 0x00 }
        );
        assert_eq!(
            AddressFormat::resolve(coin_type::BITCOIN, Purpose::Bip49, net).unwrap(),
            AddressFormat::P2shP2wpkh { version: 0x05 }
        );
        assert_eq!(
            AddressFormat::resolve(coin_type::BITCOIN, Purpose::Bip84, net).unwrap(),
            AddressFormat::P2wpkh { hrp: "bc" }
        );
        assert_eq!(
            AddressFormat::resolve(coin_type::BITCOIN, Purpose::Bip86, net).unwrap(),
            AddressFormat::P2tr { hrp: "bc" }
        );
    }

    #[test]
    fn test_resolve_testnet() {
        assert_eq!(
            AddressFormat::resolve(coin_type::TESTNET, Purpose::Bip44, Network::Testnet).unwrap(),
            AddressFormat::P2pkh { version: 0x6f }
        );
        assert_eq!(
            AddressFormat::resolve(coin_type::LITECOIN, Purpose::Bip84, Network::Testnet).unwrap(),
            AddressFormat::P2wpkh { hrp: "tltc" }
        );
    }

    #[test]
    fn test_resolve_evm() {
        assert_eq!(
            AddressFormat::resolve(coin_type::ETHEREUM, Purpose::Bip44, Network::Mainnet).unwrap(),
            AddressFormat::Evm
        );
        assert!(matches!(
            AddressFormat::resolve(coin_type::ETHEREUM, Purpose::Bip84, Network::Mainnet),
            Err(WalletError::Crypto(CryptoError::UnsupportedAddress(_)))
        ));
    }

    #[test]
    fn test_resolve_unsupported() {
        // Dogecoin has no SegWit
        assert!(matches!(
            AddressFormat::resolve(coin_type::DOGECOIN, Purpose::Bip84, Network::Mainnet),
            Err(WalletError::Crypto(CryptoError::UnsupportedAddress(_)))
        ));
        // Unknown coin type
        assert!(matches!(
            AddressFormat::resolve(9999, Purpose::Bip44, Network::Mainnet),
            Err(WalletError::Crypto(CryptoError::UnsupportedAddress(_)))
        ));
    }

    #[test]
    fn test_testnet_coin_type_needs_testnet() {
        for purpose in [Purpose::Bip44, Purpose::Bip49, Purpose::Bip84, Purpose::Bip86] {
            assert!(matches!(
                AddressFormat::resolve(coin_type::TESTNET, purpose, Network::Mainnet),
                Err(WalletError::Crypto(CryptoError::UnsupportedAddress(_)))
            ));
        }
        assert!(CoinFamily::lookup(coin_type::TESTNET, Network::Mainnet).is_none());
        assert_eq!(
            CoinFamily::lookup(coin_type::TESTNET, Network::Testnet),
            Some(CoinFamily::Utxo(UtxoParams::BITCOIN_TESTNET))
        );
    }
}
