use crate::api::RewardsApi;
use crate::config::{Contracts, PharosConfig};
use crate::ledger::LedgerClient;
use crate::report::{Step, StepRecord};
use async_trait::async_trait;
use ethers::types::Address;

pub mod t01_login;
pub mod t02_profile;
pub mod t03_check_in;
pub mod t04_claim_faucet;
pub mod t05_swap_token;
pub mod t06_send_native;
pub mod t07_stake;

pub use self::t01_login::LoginTask;
pub use self::t02_profile::ProfileTask;
pub use self::t03_check_in::CheckInTask;
pub use self::t04_claim_faucet::ClaimFaucetTask;
pub use self::t05_swap_token::SwapTokenTask;
pub use self::t06_send_native::SendNativeTask;
pub use self::t07_stake::StakeTask;

/// Everything a step may touch for one account
pub struct TaskContext<'a> {
    pub config: &'a PharosConfig,
    pub contracts: Contracts,
    pub ledger: &'a dyn LedgerClient,
    pub api: &'a mut dyn RewardsApi,
    /// Task points from the most recent profile fetch
    pub points: Option<u64>,
}

impl<'a> TaskContext<'a> {
    pub fn new(
        config: &'a PharosConfig,
        contracts: Contracts,
        ledger: &'a dyn LedgerClient,
        api: &'a mut dyn RewardsApi,
    ) -> Self {
        Self {
            config,
            contracts,
            ledger,
            api,
            points: None,
        }
    }

    pub fn address(&self) -> Address {
        self.ledger.address()
    }
}

/// A single step of the account sequence. Errors never escape: the outcome
/// is always a `StepRecord`.
#[async_trait]
pub trait AccountStep: Send + Sync {
    fn step(&self) -> Step;

    async fn run(&self, ctx: &mut TaskContext<'_>) -> StepRecord;
}
