//! Drives one account through the fixed list of steps.

use crate::api::RewardsApi;
use crate::config::{Contracts, PharosConfig};
use crate::ledger::LedgerClient;
use crate::report::{RunReport, Step};
use crate::task::{
    AccountStep, CheckInTask, ClaimFaucetTask, LoginTask, ProfileTask, SendNativeTask, StakeTask,
    SwapTokenTask, TaskContext,
};
use core_logic::random;
use tracing::{info, warn};

pub struct AccountSequencer<'a> {
    ctx: TaskContext<'a>,
}

impl<'a> AccountSequencer<'a> {
    pub fn new(
        config: &'a PharosConfig,
        contracts: Contracts,
        ledger: &'a dyn LedgerClient,
        api: &'a mut dyn RewardsApi,
    ) -> Self {
        Self {
            ctx: TaskContext::new(config, contracts, ledger, api),
        }
    }

    /// Steps after login, in order. Each is followed by a jittered wait
    /// except the profile fetches.
    fn plan(&self) -> Vec<(Box<dyn AccountStep>, bool)> {
        let mut plan: Vec<(Box<dyn AccountStep>, bool)> = vec![
            (Box::new(ProfileTask::initial()), false),
            (Box::new(CheckInTask), true),
            (Box::new(ClaimFaucetTask), true),
        ];
        if self.ctx.config.tasks.swap {
            plan.push((Box::new(SwapTokenTask), true));
        }
        plan.push((Box::new(SendNativeTask), true));
        plan.push((Box::new(StakeTask), true));
        plan.push((Box::new(ProfileTask::last()), false));
        plan
    }

    pub async fn run(mut self) -> RunReport {
        let mut report = RunReport::new(self.ctx.address());

        let login = LoginTask.run(&mut self.ctx).await;
        if login.status.is_failed() {
            warn!("Skipping account {:?}: not authenticated", report.address);
            report.abort(login);
            return report;
        }
        report.record(login);

        for (task, wait_after) in self.plan() {
            let step = task.step();
            let record = task.run(&mut self.ctx).await;

            if !record.status.is_failed() {
                match step {
                    Step::Profile => report.points_before = self.ctx.points,
                    Step::FinalProfile => report.points_after = self.ctx.points,
                    _ => {}
                }
            }
            report.record(record);

            if wait_after {
                let waited = random::random_wait(&self.ctx.config.delays.between_requests).await;
                if !waited.is_zero() {
                    info!("Waited {}s after {}", waited.as_secs(), step);
                }
            }
        }

        report
    }
}
