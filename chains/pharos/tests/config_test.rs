use core_logic::Bounds;
use pharos_bot::PharosConfig;
use std::io::Write;

fn write_toml(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_toml_file() {
    let file = write_toml(
        r#"
        sign_message = "pharos"

        [network]
        chain_id = 688688
        explorer_url = "https://example.org/tx/"

        [delays]
        between_requests = [1, 2]
        between_accounts = 5

        [tasks]
        swap = true

        [headers]
        user-agent = "custom-agent"
        "#,
    );

    let config = PharosConfig::load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.delays.between_requests, Bounds::new(1, 2));
    assert_eq!(config.delays.between_accounts, 5);
    assert!(config.tasks.swap);
    assert_eq!(config.explorer_link("0x1"), "https://example.org/tx/0x1");
    assert_eq!(config.headers.get("user-agent").unwrap(), "custom-agent");
    assert!(config.headers.contains_key("origin"));
    assert!(config.headers.contains_key("referer"));
    assert_eq!(config.amounts.transfer_count, Bounds::new(10, 15));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let config = PharosConfig::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.network.rpc_url, "https://testnet.dplabs-internal.com");
    assert_eq!(config.network.api_base_url, "https://api.pharosnetwork.xyz");
}

#[test]
fn test_invalid_file_is_rejected() {
    let file = write_toml(
        r#"
        [amounts]
        stake_percent = [20.0, 10.0]
        "#,
    );
    assert!(PharosConfig::load(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_environment_overrides_file() {
    let file = write_toml(
        r#"
        [network]
        confirmations = 1
        "#,
    );
    std::env::set_var("PHAROS__NETWORK__CONFIRMATIONS", "3");
    let config = PharosConfig::load(file.path().to_str().unwrap());
    std::env::remove_var("PHAROS__NETWORK__CONFIRMATIONS");

    assert_eq!(config.unwrap().network.confirmations, 3);
}
