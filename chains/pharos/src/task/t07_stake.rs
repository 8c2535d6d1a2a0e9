use crate::report::{Step, StepRecord};
use crate::task::{AccountStep, TaskContext};
use crate::utils::amount::{display_ether, percent_of, to_basis_points};
use async_trait::async_trait;
use core_logic::random;
use tracing::{error, info, warn};

/// Moves a random share of the stake-token balance to the staking address
pub struct StakeTask;

#[async_trait]
impl AccountStep for StakeTask {
    fn step(&self) -> Step {
        Step::Stake
    }

    async fn run(&self, ctx: &mut TaskContext<'_>) -> StepRecord {
        let balance = match ctx.ledger.token_balance(ctx.contracts.stake_token).await {
            Ok(balance) => balance,
            Err(e) => {
                error!("Failed to read stake token balance: {}", e);
                return StepRecord::failed(Step::Stake, e);
            }
        };

        let percent = random::random_f64(&ctx.config.amounts.stake_percent);
        let amount = percent_of(balance, percent);

        if amount.is_zero() {
            warn!(
                "Nothing to stake: balance {} at {} bps",
                display_ether(balance),
                to_basis_points(percent)
            );
            return StepRecord::skipped(Step::Stake, "zero stake amount");
        }

        info!(
            "Staking {} WPHRS ({:.2}% of {})",
            display_ether(amount),
            percent,
            display_ether(balance)
        );

        match ctx.ledger.stake(amount).await {
            Ok(receipt) => {
                let hash = receipt.hash_hex();
                info!("Staking successful! TX: {}", ctx.config.explorer_link(&hash));
                StepRecord::completed(Step::Stake).with_txs(vec![hash])
            }
            Err(e) => {
                error!("Staking failed: {}", e);
                StepRecord::failed(Step::Stake, e)
            }
        }
    }
}
