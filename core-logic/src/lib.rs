//! # Core Logic - Shared Utilities for Testnet Bots
//!
//! This crate provides the chain-agnostic pieces every bot in the workspace
//! reuses: credential loading, configuration primitives, logging, random
//! delays and the sequential batch runner.
//!
//! ## Modules
//!
//! - [`config`] - Configuration structures shared by chain crates
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - Core trait definitions
//! - `utils` - Utility modules (wallets, logger, random, gas, runner)

pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

pub use config::{Bounds, LogConfig, ProxyConfig};
pub use error::{ConfigError, CoreError, WalletError};
pub use traits::AccountTask;

// Utils are pub(crate) - only export specific public utilities
pub use utils::{
    random, setup_logger, BatchRunner, BatchSummary, GasLimits, SecretKey, WalletManager,
};
