use crate::error::{ConfigError, CoreError, WalletError};
use std::fmt;
use std::fs;
use std::path::Path;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A raw private key as read from the credential file.
///
/// Zeroized on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***REDACTED***)")
    }
}

/// Line-delimited credential list.
#[derive(Debug, Default)]
pub struct WalletManager {
    keys: Vec<SecretKey>,
}

impl WalletManager {
    pub const DEFAULT_FILE: &'static str = "privateKeys.txt";

    /// Reads keys from `path`, one per line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;

        Ok(Self::parse(&content))
    }

    /// Like `from_file`, but an empty key list is an error too.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let manager = Self::from_file(path)?;
        if manager.is_empty() {
            return Err(WalletError::Empty {
                path: path.display().to_string(),
            }
            .into());
        }
        Ok(manager)
    }

    /// Trims every line and keeps the ones that are neither blank nor
    /// `#` comments, in file order.
    pub fn parse(content: &str) -> Self {
        let keys = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(SecretKey::new)
            .collect();

        Self { keys }
    }

    /// Returns the number of available wallets
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[SecretKey] {
        &self.keys
    }

    /// Display labels (`Wallet 001`, ...) without touching key material
    pub fn list_wallets(&self) -> Vec<String> {
        (0..self.keys.len())
            .map(|i| format!("Wallet {:03}", i + 1))
            .collect()
    }

    /// Shape check for an EVM hex private key, with or without `0x`.
    pub fn check_key_format(key: &SecretKey) -> Result<(), WalletError> {
        let raw = key.expose();
        let hex_part = raw.strip_prefix("0x").unwrap_or(raw);
        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletError::InvalidKeyFormat);
        }
        if hex_part.len() != 64 {
            return Err(WalletError::InvalidKeyLength {
                length: hex_part.len(),
            });
        }
        Ok(())
    }
}
