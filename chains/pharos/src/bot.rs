use crate::api::RewardsClient;
use crate::config::PharosConfig;
use crate::ledger::{Account, EthersLedger};
use crate::report::RunReport;
use crate::sequence::AccountSequencer;
use anyhow::{Context, Result};
use async_trait::async_trait;
use core_logic::{AccountTask, SecretKey};
use tracing::{info, warn};

/// One full Pharos run for one account: binds fresh clients, then sequences.
pub struct PharosTask {
    config: PharosConfig,
}

impl PharosTask {
    pub fn new(config: PharosConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AccountTask for PharosTask {
    type Report = RunReport;

    fn name(&self) -> &str {
        "pharos"
    }

    async fn run(&self, index: usize, key: &SecretKey) -> Result<RunReport> {
        let account = Account::from_secret(index, key).context("Invalid private key")?;
        info!("Processing wallet {} ({:?})", account.label(), account.address);

        let contracts = self.config.contracts()?;
        // An unreachable RPC only fails the on-chain steps
        let ledger = match EthersLedger::connect(&account, &self.config).await {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!("{}; on-chain steps will likely fail", e);
                EthersLedger::bind(&account, &self.config).context("Failed to bind RPC client")?
            }
        };
        let mut api = RewardsClient::new(&self.config).context("Failed to build API client")?;

        let report = AccountSequencer::new(&self.config, contracts, &ledger, &mut api)
            .run()
            .await;

        info!("Wallet {} finished at stage {:?}", account.label(), report.stage);
        Ok(report)
    }
}
