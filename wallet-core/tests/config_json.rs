use hd_wallet_core::{coin_type, AccountConfig, Address, Network, Purpose};

#[test]
fn account_config_from_json() {
    let json = r#"{ "purpose": "bip84", "coinType": 2, "account": 1, "network": "testnet" }"#;
    let config: AccountConfig = serde_json::from_str(json).unwrap();
    assert_eq!(
        config,
        AccountConfig::bip44(coin_type::LITECOIN)
            .with_purpose(Purpose::Bip84)
            .with_account(1)
            .with_network(Network::Testnet)
    );
}

#[test]
fn account_config_defaults_for_missing_fields() {
    let config: AccountConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, AccountConfig::default());

    let config: AccountConfig = serde_json::from_str(r#"{ "coinType": 60 }"#).unwrap();
    assert_eq!(config.coin_type, coin_type::ETHEREUM);
    assert_eq!(config.purpose, Purpose::Bip44);
}

#[test]
fn account_config_rejects_unknown_purpose() {
    let result = serde_json::from_str::<AccountConfig>(r#"{ "purpose": "bip45" }"#);
    assert!(result.is_err());
}

#[test]
fn account_config_roundtrip() {
    let config = AccountConfig::bip44(coin_type::BITCOIN).with_purpose(Purpose::Bip86);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""purpose":"bip86""#));
    assert!(json.contains(r#""coinType":0"#));
    assert_eq!(serde_json::from_str::<AccountConfig>(&json).unwrap(), config);
}

#[test]
fn address_from_json() {
    let json = r#"{
        "index": 7,
        "external": false,
        "publicKey": "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        "publicKeyHash": "751e76e8199196d454941c45d1b3a323f1433bd6",
        "displayString": "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
    }"#;
    let address: Address = serde_json::from_str(json).unwrap();
    assert_eq!(address.index, 7);
    assert!(!address.external);
    assert_eq!(address.public_key.len(), 33);
    assert_eq!(hex::encode(&address.public_key_hash), "751e76e8199196d454941c45d1b3a323f1433bd6");
}
