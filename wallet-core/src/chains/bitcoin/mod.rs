// wallet-core/src/chains/bitcoin/mod.rs

//! Bitcoin and Bitcoin-derived UTXO chains (Litecoin, Dogecoin, Dash, Bitcoin Cash legacy).
//!
//! Only address rendering lives here; key derivation is chain-agnostic.

pub mod address;

pub use address::BitcoinAddress;
