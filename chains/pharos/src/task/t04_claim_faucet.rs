use crate::api::FaucetStatus;
use crate::report::{Step, StepRecord, StepStatus};
use crate::task::{AccountStep, TaskContext};
use async_trait::async_trait;
use tracing::{error, info, warn};

pub struct ClaimFaucetTask;

#[async_trait]
impl AccountStep for ClaimFaucetTask {
    fn step(&self) -> Step {
        Step::Faucet
    }

    async fn run(&self, ctx: &mut TaskContext<'_>) -> StepRecord {
        let address = ctx.address();
        match ctx.api.claim_faucet(address).await {
            FaucetStatus::Claimed => {
                info!("Faucet successfully claimed!");
                StepRecord::completed(Step::Faucet)
            }
            FaucetStatus::Rejected(msg) => {
                warn!("Faucet claim rejected: {}", msg);
                StepRecord::new(Step::Faucet, StepStatus::Skipped(format!("rejected: {}", msg)))
            }
            FaucetStatus::Failed(reason) => {
                error!("Faucet claim failed: {}", reason);
                StepRecord::failed(Step::Faucet, reason)
            }
        }
    }
}
