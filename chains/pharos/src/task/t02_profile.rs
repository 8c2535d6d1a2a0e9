use crate::report::{Step, StepRecord};
use crate::task::{AccountStep, TaskContext};
use async_trait::async_trait;
use tracing::{info, warn};

/// Fetches the points snapshot. Used before and after the on-chain steps.
pub struct ProfileTask {
    pub final_snapshot: bool,
}

impl ProfileTask {
    pub fn initial() -> Self {
        Self {
            final_snapshot: false,
        }
    }

    pub fn last() -> Self {
        Self {
            final_snapshot: true,
        }
    }
}

#[async_trait]
impl AccountStep for ProfileTask {
    fn step(&self) -> Step {
        if self.final_snapshot {
            Step::FinalProfile
        } else {
            Step::Profile
        }
    }

    async fn run(&self, ctx: &mut TaskContext<'_>) -> StepRecord {
        let address = ctx.address();
        match ctx.api.profile(address).await {
            Some(profile) => {
                let label = if self.final_snapshot {
                    "Final points"
                } else {
                    "Current points"
                };
                info!(
                    "{}: {} (total: {})",
                    label, profile.task_points, profile.total_points
                );
                ctx.points = Some(profile.task_points);
                StepRecord::completed(self.step())
            }
            None => {
                warn!("Profile unavailable for {:?}", address);
                StepRecord::failed(self.step(), "profile unavailable")
            }
        }
    }
}
