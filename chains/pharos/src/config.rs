use anyhow::Result;
use config::{Config, Environment, File, FileFormat};
use core_logic::{Bounds, ConfigError, GasLimits, LogConfig, ProxyConfig};
use ethers::types::Address;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

/// Immutable runtime configuration. Built once in `main` and passed by
/// reference to every client and to the sequencer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PharosConfig {
    pub network: NetworkSettings,
    pub contracts: ContractAddresses,
    pub delays: DelaySettings,
    pub amounts: AmountSettings,
    pub tasks: TaskToggles,
    pub gas: GasLimits,
    pub headers: BTreeMap<String, String>,
    pub proxy: Option<ProxyConfig>,
    pub logging: LogConfig,
    /// Message signed for the login signature
    pub sign_message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub api_base_url: String,
    pub rpc_url: String,
    pub chain_id: u64,
    pub explorer_url: String,
    pub request_timeout_secs: u64,
    pub tx_timeout_secs: u64,
    pub confirmations: usize,
    /// Send pre-EIP-1559 transactions
    pub legacy_transactions: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContractAddresses {
    pub wphrs: String,
    pub usdc: String,
    pub swap_router: String,
    pub staking: String,
    pub stake_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DelaySettings {
    /// Jitter between steps, seconds
    pub between_requests: Bounds<u64>,
    /// Fixed pause between accounts, seconds
    pub between_accounts: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AmountSettings {
    /// Native amount per transfer, ether
    pub send: Bounds<f64>,
    /// Swap input amount, ether
    pub swap: Bounds<f64>,
    pub stake_percent: Bounds<f64>,
    pub transfer_count: Bounds<u64>,
    /// Pool fee tier for `exactInputSingle`
    pub swap_fee: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TaskToggles {
    pub swap: bool,
}

/// Parsed contract addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contracts {
    pub wphrs: Address,
    pub usdc: Address,
    pub swap_router: Address,
    pub staking: Address,
    pub stake_token: Address,
}

impl Default for PharosConfig {
    fn default() -> Self {
        let headers = [
            ("accept", "*/*"),
            ("content-type", "application/json"),
            ("origin", "https://testnet.pharosnetwork.xyz"),
            ("referer", "https://testnet.pharosnetwork.xyz/"),
            (
                "user-agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            network: NetworkSettings::default(),
            contracts: ContractAddresses::default(),
            delays: DelaySettings::default(),
            amounts: AmountSettings::default(),
            tasks: TaskToggles::default(),
            gas: GasLimits::default(),
            headers,
            proxy: None,
            logging: LogConfig::default(),
            sign_message: "pharos".to_string(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.pharosnetwork.xyz".to_string(),
            rpc_url: "https://testnet.dplabs-internal.com".to_string(),
            chain_id: 688688,
            explorer_url: "https://testnet.pharosscan.xyz/tx/".to_string(),
            request_timeout_secs: 30,
            tx_timeout_secs: 180,
            confirmations: 1,
            legacy_transactions: false,
        }
    }
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self {
            wphrs: "0x76aaada469d23216be5f7c596fa25f282ff9b364".to_string(),
            usdc: "0x4d21582f50Fb5D211fd69ABF065AD07E8738870D".to_string(),
            swap_router: "0x1a4de519154ae51200b0ad7c90f7fac75547888a".to_string(),
            staking: "0x0000000000000000000000000000000000000000".to_string(),
            stake_token: "0x76aaada469d23216be5f7c596fa25f282ff9b364".to_string(),
        }
    }
}

impl Default for DelaySettings {
    fn default() -> Self {
        Self {
            between_requests: Bounds::new(3, 10),
            between_accounts: 10,
        }
    }
}

impl Default for AmountSettings {
    fn default() -> Self {
        Self {
            send: Bounds::new(0.001, 0.002),
            swap: Bounds::new(0.001, 0.002),
            stake_percent: Bounds::new(5.0, 10.0),
            transfer_count: Bounds::new(10, 15),
            swap_fee: 500,
        }
    }
}

impl Default for TaskToggles {
    fn default() -> Self {
        Self { swap: false }
    }
}

impl PharosConfig {
    pub const ENV_PREFIX: &'static str = "PHAROS";

    /// Defaults, then the TOML file at `path` (if it exists), then
    /// `PHAROS__SECTION__KEY` environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_settings(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;

        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self> {
        let mut config: Self = settings.try_deserialize().map_err(|e| ConfigError::Parse {
            msg: e.to_string(),
        })?;
        config.headers = Self::merged_headers(std::mem::take(&mut config.headers));
        config.validate()?;
        Ok(config)
    }

    /// Configured headers layered over the defaults, names lowercased.
    fn merged_headers(overrides: BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut headers = Self::default().headers;
        headers.extend(
            overrides
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value)),
        );
        headers
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("network.api_base_url", &self.network.api_base_url)?;
        check_url("network.rpc_url", &self.network.rpc_url)?;

        if self.network.chain_id == 0 {
            return Err(invalid("network.chain_id", "must be non-zero"));
        }
        if self.network.confirmations == 0 {
            return Err(invalid("network.confirmations", "must be at least 1"));
        }
        if self.network.tx_timeout_secs == 0 {
            return Err(invalid("network.tx_timeout_secs", "must be non-zero"));
        }

        self.delays.between_requests.validate("delays.between_requests")?;
        self.amounts.send.validate("amounts.send")?;
        self.amounts.swap.validate("amounts.swap")?;
        self.amounts.transfer_count.validate("amounts.transfer_count")?;
        self.amounts.stake_percent.validate("amounts.stake_percent")?;

        if self.amounts.send.min < 0.0 || self.amounts.swap.min < 0.0 {
            return Err(invalid("amounts", "amounts must not be negative"));
        }
        let pct = &self.amounts.stake_percent;
        if pct.min < 0.0 || pct.max > 100.0 {
            return Err(invalid(
                "amounts.stake_percent",
                "percent must lie within [0, 100]",
            ));
        }
        if !self.gas.is_valid() {
            return Err(invalid("gas", "gas limits must be non-zero"));
        }

        self.contracts()?;
        Ok(())
    }

    pub fn contracts(&self) -> Result<Contracts, ConfigError> {
        let c = &self.contracts;
        Ok(Contracts {
            wphrs: parse_address("contracts.wphrs", &c.wphrs)?,
            usdc: parse_address("contracts.usdc", &c.usdc)?,
            swap_router: parse_address("contracts.swap_router", &c.swap_router)?,
            staking: parse_address("contracts.staking", &c.staking)?,
            stake_token: parse_address("contracts.stake_token", &c.stake_token)?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.network.request_timeout_secs)
    }

    pub fn tx_timeout(&self) -> Duration {
        Duration::from_secs(self.network.tx_timeout_secs)
    }

    pub fn account_pause(&self) -> Duration {
        Duration::from_secs(self.delays.between_accounts)
    }

    pub fn explorer_link(&self, tx_hash: &str) -> String {
        format!("{}{}", self.network.explorer_url, tx_hash)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn check_url(field: &str, value: &str) -> Result<(), ConfigError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidUrl {
            field: field.to_string(),
            url: value.to_string(),
        })
}

fn parse_address(field: &str, value: &str) -> Result<Address, ConfigError> {
    Address::from_str(value.trim()).map_err(|_| ConfigError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    })
}
