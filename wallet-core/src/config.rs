// wallet-core/src/config.rs
//
// Account configuration. The application decides where this comes from (settings file,
// FFI call, ...); this crate only defines the shape and the defaults.

use crate::crypto::paths::{coin_type, Purpose};
use serde::{Deserialize, Serialize};

/// Mainnet vs testnet, selects address and extended-key version bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Network implied by a SLIP-44 coin type (coin type 1 is shared by all testnets)
    pub fn for_coin_type(coin_type: u32) -> Self {
        if coin_type == coin_type::TESTNET {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }
}

/// Fixed `purpose / coin_type / account` triple of one HD account
///
/// Missing JSON fields fall back to BIP-44 / Bitcoin / account 0 / mainnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountConfig {
    pub purpose: Purpose,
    pub coin_type: u32,
    pub account: u32,
    pub network: Network,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self::bip44(coin_type::BITCOIN)
    }
}

impl AccountConfig {
    /// BIP-44, account 0, network inferred from the coin type
    pub fn bip44(coin_type: u32) -> Self {
        Self {
            purpose: Purpose::Bip44,
            coin_type,
            account: 0,
            network: Network::for_coin_type(coin_type),
        }
    }

    pub fn with_purpose(mut self, purpose: Purpose) -> Self {
        self.purpose = purpose;
        self
    }

    pub fn with_account(mut self, account: u32) -> Self {
        self.account = account;
        self
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }
}
