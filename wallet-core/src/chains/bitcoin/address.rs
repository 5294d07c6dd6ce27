// wallet-core/src/chains/bitcoin/address.rs
//
// Bitcoin-family address encoding from a compressed secp256k1 public key.
// Legacy (P2PKH), nested SegWit (P2SH-P2WPKH), native SegWit (P2WPKH), Taproot (P2TR, BIP-86).

use crate::crypto::hash::{base58check_encode, hash160, tagged_hash};
use crate::error::{CryptoError, WalletError, WalletResult};
use bech32::{u5, ToBase32, Variant};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, ProjectivePoint, PublicKey, Scalar};

/// Address encoder for UTXO chains
///
/// Stateless; version bytes and HRP come from [`crate::chains::UtxoParams`].
pub struct BitcoinAddress;

impl BitcoinAddress {
    // =========================================================================
    // BASE58CHECK
    // =========================================================================

    /// `Base58Check(version || HASH160(pubkey))`
    pub fn p2pkh(public_key: &[u8; 33], version: u8) -> String {
        Self::base58_hash(version, &hash160(public_key))
    }

    /// BIP-49: P2WPKH witness program wrapped in P2SH
    ///
    /// redeem script = `OP_0 PUSH20 HASH160(pubkey)`
    pub fn p2sh_p2wpkh(public_key: &[u8; 33], version: u8) -> String {
        let mut script = [0u8; 22];
        script[0] = 0x00;
        script[1] = 0x14;
        script[2..].copy_from_slice(&hash160(public_key));
        Self::base58_hash(version, &hash160(&script))
    }

    fn base58_hash(version: u8, hash: &[u8; 20]) -> String {
        let mut payload = [0u8; 21];
        payload[0] = version;
        payload[1..].copy_from_slice(hash);
        base58check_encode(&payload)
    }

    // =========================================================================
    // SEGWIT
    // =========================================================================

    /// BIP-84: witness v0, bech32
    pub fn p2wpkh(public_key: &[u8; 33], hrp: &str) -> WalletResult<String> {
        Self::segwit(hrp, 0, &hash160(public_key))
    }

    /// BIP-86: witness v1, bech32m, key-path-only output key
    pub fn p2tr(public_key: &[u8; 33], hrp: &str) -> WalletResult<String> {
        let output_key = Self::taproot_output_key(public_key)?;
        Self::segwit(hrp, 1, &output_key)
    }

    /// `Q = lift_x(P) + H_TapTweak(x(P)) * G`, returned x-only
    pub fn taproot_output_key(public_key: &[u8; 33]) -> WalletResult<[u8; 32]> {
        let point = PublicKey::from_sec1_bytes(public_key).map_err(|e| {
            invalid_key(format!("Invalid secp256k1 public key: {}", e))
        })?;

        // lift_x: the internal key always has even Y
        let mut internal = point.to_projective();
        if public_key[0] == 0x03 {
            internal = -internal;
        }

        let tweak = tagged_hash("TapTweak", &public_key[1..]);
        let tweak = Option::<Scalar>::from(Scalar::from_repr(tweak.into()))
            .ok_or_else(|| invalid_key("TapTweak exceeds curve order".to_string()))?;

        let output = AffinePoint::from(internal + ProjectivePoint::GENERATOR * tweak);
        let encoded = output.to_encoded_point(true);
        let x_only = encoded
            .as_bytes()
            .get(1..33)
            .ok_or_else(|| invalid_key("Taproot output key is the point at infinity".to_string()))?;

        let mut out = [0u8; 32];
        out.copy_from_slice(x_only);
        Ok(out)
    }

    fn segwit(hrp: &str, witness_version: u8, program: &[u8]) -> WalletResult<String> {
        let version = u5::try_from_u8(witness_version)
            .map_err(|e| invalid_key(format!("Invalid witness version: {}", e)))?;
        let variant = if witness_version == 0 {
            Variant::Bech32
        } else {
            Variant::Bech32m
        };

        let mut data = vec![version];
        data.extend(program.to_base32());
        bech32::encode(hrp, data, variant).map_err(|e| {
            WalletError::Crypto(CryptoError::UnsupportedAddress(format!(
                "bech32 encoding failed for hrp '{}': {}",
                hrp, e
            )))
        })
    }
}

fn invalid_key(msg: String) -> WalletError {
    WalletError::Crypto(CryptoError::InvalidKeyFormat(msg))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Compressed generator point, private key = 1
    const G: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn g() -> [u8; 33] {
        let mut out = [0u8; 33];
        out.copy_from_slice(&hex::decode(G).unwrap());
        out
    }

    #[test]
    fn test_p2pkh() {
        assert_eq!(
            BitcoinAddress::p2pkh(&g(), 0x00),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }

    #[test]
    fn test_p2wpkh() {
        // BIP-173 example
        assert_eq!(
            BitcoinAddress::p2wpkh(&g(), "bc").unwrap(),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
        assert_eq!(
            BitcoinAddress::p2wpkh(&g(), "tb").unwrap(),
            "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"
        );
    }

    #[test]
    fn test_p2sh_p2wpkh_prefix() {
        let mainnet = BitcoinAddress::p2sh_p2wpkh(&g(), 0x05);
        assert!(mainnet.starts_with('3'));
        let testnet = BitcoinAddress::p2sh_p2wpkh(&g(), 0xc4);
        assert!(testnet.starts_with('2'));
    }

    #[test]
    fn test_p2tr_bech32m() {
        let address = BitcoinAddress::p2tr(&g(), "bc").unwrap();
        assert!(address.starts_with("bc1p"));
        assert_eq!(address.len(), 62);

        let (hrp, _, variant) = bech32::decode(&address).unwrap();
        assert_eq!(hrp, "bc");
        assert_eq!(variant, Variant::Bech32m);
    }

    #[test]
    fn test_taproot_ignores_parity() {
        // P and -P share an x coordinate, so lift_x maps both to the same internal key
        let mut odd = g();
        odd[0] = 0x03;
        assert_eq!(
            BitcoinAddress::taproot_output_key(&g()).unwrap(),
            BitcoinAddress::taproot_output_key(&odd).unwrap()
        );
    }

    #[test]
    fn test_invalid_public_key() {
        let bad = [0x07u8; 33];
        assert!(matches!(
            BitcoinAddress::p2tr(&bad, "bc"),
            Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(_)))
        ));
    }
}
