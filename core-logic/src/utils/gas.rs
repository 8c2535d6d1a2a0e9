//! # Core Logic - Gas Limits
//!
//! Per-operation gas limits shared by EVM bots. Fees are left to the node's
//! fee oracle; only the limits are pinned.

use serde::{Deserialize, Serialize};

/// Gas limits for the operations a bot submits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasLimits {
    pub transfer: u64,
    pub token_transfer: u64,
    pub approve: u64,
    pub swap: u64,
}

impl Default for GasLimits {
    fn default() -> Self {
        Self {
            transfer: 21_000,
            token_transfer: 100_000,
            approve: 100_000,
            swap: 500_000,
        }
    }
}

impl GasLimits {
    /// All limits must be non-zero
    pub fn is_valid(&self) -> bool {
        self.transfer > 0 && self.token_transfer > 0 && self.approve > 0 && self.swap > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_limits_defaults() {
        let limits = GasLimits::default();
        assert_eq!(limits.transfer, 21_000);
        assert_eq!(limits.swap, 500_000);
        assert!(limits.is_valid());
    }

    #[test]
    fn test_zero_limit_is_invalid() {
        let limits = GasLimits {
            transfer: 0,
            ..GasLimits::default()
        };
        assert!(!limits.is_valid());
    }
}
