// wallet-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) Chain Support
//!
//! EIP-55 checksummed address derivation via [`EvmAddress`]. Every EVM chain (BSC, Polygon,
//! Base, ...) shares coin type 60 and the same address format.

pub mod address;

pub use address::EvmAddress;
