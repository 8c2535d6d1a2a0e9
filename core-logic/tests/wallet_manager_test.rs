use core_logic::{ConfigError, CoreError, WalletError, WalletManager};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_parse_skips_comments_and_blank_lines() {
    let manager = WalletManager::parse("key1\n# comment\n\nkey2");
    let keys: Vec<&str> = manager.keys().iter().map(|k| k.expose()).collect();
    assert_eq!(keys, vec!["key1", "key2"]);
}

#[test]
fn test_parse_trims_whitespace_and_crlf() {
    let manager = WalletManager::parse("  key1  \r\n\t\r\n   # indented comment\r\nkey2\r\n");
    let keys: Vec<&str> = manager.keys().iter().map(|k| k.expose()).collect();
    assert_eq!(keys, vec!["key1", "key2"]);
}

#[test]
fn test_parse_comment_only_file_is_empty() {
    let manager = WalletManager::parse("# a\n#b\n\n   \n");
    assert!(manager.is_empty());
    assert_eq!(manager.count(), 0);
}

#[test]
fn test_from_file_reads_keys_in_order() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "0xaaa").unwrap();
    writeln!(file, "# disabled").unwrap();
    writeln!(file, "0xbbb").unwrap();
    writeln!(file, "0xccc").unwrap();

    let manager = WalletManager::from_file(file.path()).unwrap();
    assert_eq!(manager.count(), 3);
    assert_eq!(manager.keys()[0].expose(), "0xaaa");
    assert_eq!(manager.keys()[2].expose(), "0xccc");
    assert_eq!(
        manager.list_wallets(),
        vec!["Wallet 001", "Wallet 002", "Wallet 003"]
    );
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("privateKeys.txt");

    match WalletManager::from_file(&path) {
        Err(ConfigError::FileNotFound { path: p }) => assert!(p.ends_with("privateKeys.txt")),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_load_rejects_empty_key_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# only comments").unwrap();
    writeln!(file).unwrap();

    match WalletManager::load(file.path()) {
        Err(CoreError::Wallet(WalletError::Empty { .. })) => {}
        other => panic!("expected WalletError::Empty, got {:?}", other),
    }
}

#[test]
fn test_load_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = WalletManager::load(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Config(ConfigError::FileNotFound { .. })
    ));
}
