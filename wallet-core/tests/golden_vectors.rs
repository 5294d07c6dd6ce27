// Published BIP-39 / BIP-32 / BIP-44 / BIP-49 / BIP-84 / BIP-86 vectors for
// "abandon abandon ... about" with an empty passphrase.

use hd_wallet_core::{
    coin_type, AccountConfig, Chain, CryptoError, DecodedExtendedKey, ExtendedKey,
    HdAccountWallet, HdKeychain, KeyVersion, Mnemonic, MnemonicCodec, Network, Purpose,
    Secp256k1Provider, WalletError,
};
use std::sync::Arc;

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

fn keychain() -> Arc<HdKeychain<Secp256k1Provider>> {
    let mnemonic = Mnemonic::from_phrase(PHRASE);
    let seed = MnemonicCodec::english().to_seed(mnemonic.words(), "").unwrap();
    assert_eq!(hex::encode(seed.as_bytes()), SEED);
    Arc::new(HdKeychain::from_seed(seed.as_bytes()).unwrap())
}

fn wallet(purpose: Purpose, coin: u32, network: Network) -> HdAccountWallet<Secp256k1Provider> {
    let config = AccountConfig::bip44(coin)
        .with_purpose(purpose)
        .with_network(network);
    HdAccountWallet::with_config(keychain(), config).unwrap()
}

#[test]
fn bip44_bitcoin() {
    let wallet = HdAccountWallet::new(keychain(), coin_type::BITCOIN).unwrap();
    assert_eq!(
        wallet.receive_address(0).unwrap().display_string,
        "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA"
    );
    assert_eq!(
        wallet.account_extended_public_key().unwrap(),
        "xpub6BosfCnifzxcFwrSzQiqu2DBVTshkCXacvNsWGYJVVhhawA7d4R5WSWGFNbi8Aw6ZRc1brxMyWMzG3DSSSSoekkudhUd9yLb6qx39T9nMdj"
    );
}

#[test]
fn bip49_nested_segwit() {
    let mainnet = wallet(Purpose::Bip49, coin_type::BITCOIN, Network::Mainnet);
    assert_eq!(
        mainnet.receive_address(0).unwrap().display_string,
        "37VucYSaXLCAsxYyAPfbSi9eh4iEcbShgf"
    );
    assert!(mainnet.account_extended_public_key().unwrap().starts_with("ypub"));

    let testnet = wallet(Purpose::Bip49, coin_type::TESTNET, Network::Testnet);
    assert_eq!(
        testnet.receive_address(0).unwrap().display_string,
        "2Mww8dCYPUpKHofjgcXcBCEGmniw9CoaiD2"
    );
    assert!(testnet.account_extended_public_key().unwrap().starts_with("upub"));
}

#[test]
fn bip84_native_segwit() {
    let wallet = wallet(Purpose::Bip84, coin_type::BITCOIN, Network::Mainnet);
    assert_eq!(
        wallet.receive_address(0).unwrap().display_string,
        "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu"
    );
    assert_eq!(
        wallet.change_address(0).unwrap().display_string,
        "bc1q8c6fshw2dlwun7ekn9qwf37cu2rn755upcp6el"
    );
    assert_eq!(
        wallet.account_extended_public_key().unwrap(),
        "zpub6rFR7y4Q2AijBEqTUquhVz398htDFrtymD9xYYfG1m4wAcvPhXNfE3EfH1r1ADqtfSdVCToUG868RvUUkgDKf31mGDtKsAYz2oz2AGutZYs"
    );
    assert_eq!(
        wallet.account_extended_private_key().unwrap().as_str(),
        "zprvAdG4iTXWBoARxkkzNpNh8r6Qag3irQB8PzEMkAFeTRXxHpbF9z4QgEvBRmfvqWvGp42t42nvgGpNgYSJA9iefm1yYNZKEm7z6qUWCroSQnE"
    );
}

#[test]
fn bip86_taproot() {
    let wallet = wallet(Purpose::Bip86, coin_type::BITCOIN, Network::Mainnet);
    assert_eq!(
        wallet.receive_address(0).unwrap().display_string,
        "bc1p5cyxnuxmeuwuvkwfem96lqzszd02n6xdcjrs20cac6yqjjwudpxqkedrcr"
    );
    assert_eq!(
        wallet.account_extended_public_key().unwrap(),
        "xpub6BgBgsespWvERF3LHQu6CnqdvfEvtMcQjYrcRzx53QJjSxarj2afYWcLteoGVky7D3UKDP9QyrLprQ3VCECoY49yfdDEHGCtMMj92pReUsQ"
    );
}

#[test]
fn ethereum_eip55() {
    let wallet = HdAccountWallet::new(keychain(), coin_type::ETHEREUM).unwrap();
    assert_eq!(
        wallet.receive_address(0).unwrap().display_string,
        "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
    );
}

#[test]
fn key_by_path_matches_account_wallet() {
    let keychain = keychain();
    let wallet = HdAccountWallet::new(Arc::clone(&keychain), coin_type::BITCOIN).unwrap();

    let by_path = keychain.key_by_path("m/44'/0'/0'/1/3").unwrap();
    let by_wallet = wallet.private_key(3, Chain::Internal).unwrap();
    assert_eq!(*by_path.private_key(), *by_wallet.private_key());
    assert_eq!(by_path.public_key(), by_wallet.public_key());
}

#[test]
fn root_key_serialization() {
    let keychain = keychain();
    let root = keychain.key_by_path("m").unwrap();
    assert_eq!(
        root.to_extended_private_string(KeyVersion::X_MAINNET).as_str(),
        "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu"
    );
}

#[test]
fn decode_account_zpub() {
    let keychain = keychain();
    let wallet = wallet(Purpose::Bip84, coin_type::BITCOIN, Network::Mainnet);
    let decoded = DecodedExtendedKey::decode(&wallet.account_extended_public_key().unwrap()).unwrap();

    assert!(decoded.is_public());
    assert_eq!(decoded.version, KeyVersion::Z_MAINNET);
    assert_eq!(decoded.version.purpose(), Purpose::Bip84);
    assert_eq!(decoded.version.network(), Network::Mainnet);
    assert_eq!(decoded.depth, 3);
    assert_eq!(decoded.child_number, 0x8000_0000);

    let parent = keychain.key_by_path("m/84'/0'").unwrap();
    let account = keychain.key_by_path("m/84'/0'/0'").unwrap();
    assert_eq!(decoded.parent_fingerprint, parent.fingerprint());
    assert_eq!(decoded.chain_code, account.chain_code());
    assert_eq!(decoded.public_key().unwrap(), account.public_key());

    let private = DecodedExtendedKey::decode(&wallet.account_extended_private_key().unwrap()).unwrap();
    assert!(!private.is_public());
    assert_eq!(private.public_key().unwrap(), account.public_key());
}

#[test]
fn decode_rejects_address_string() {
    // an address is valid Base58Check, just not 78 bytes
    assert!(matches!(
        DecodedExtendedKey::decode("1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA"),
        Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(_)))
    ));
}
