use crate::api::CheckInStatus;
use crate::report::{Step, StepRecord, StepStatus};
use crate::task::{AccountStep, TaskContext};
use async_trait::async_trait;
use tracing::{error, info};

pub struct CheckInTask;

#[async_trait]
impl AccountStep for CheckInTask {
    fn step(&self) -> Step {
        Step::CheckIn
    }

    async fn run(&self, ctx: &mut TaskContext<'_>) -> StepRecord {
        let address = ctx.address();
        match ctx.api.check_in(address).await {
            CheckInStatus::Claimed => {
                info!("Check-in successful!");
                StepRecord::completed(Step::CheckIn)
            }
            CheckInStatus::AlreadyDone(msg) => {
                info!("Already checked in today: {}", msg);
                StepRecord::new(Step::CheckIn, StepStatus::AlreadyDone(msg))
            }
            CheckInStatus::Failed(reason) => {
                error!("Check-in failed: {}", reason);
                StepRecord::failed(Step::CheckIn, reason)
            }
        }
    }
}
