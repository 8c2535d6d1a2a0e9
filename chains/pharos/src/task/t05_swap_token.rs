use crate::contracts::SwapParams;
use crate::report::{Step, StepRecord};
use crate::task::{AccountStep, TaskContext};
use crate::utils::amount::{display_ether, random_wei};
use async_trait::async_trait;
use ethers::types::U256;
use tracing::{error, info};

/// Seconds the swap stays valid after it is built
const DEADLINE_SECS: i64 = 300;

/// Swaps a random amount of WPHRS into USDC through the router
pub struct SwapTokenTask;

#[async_trait]
impl AccountStep for SwapTokenTask {
    fn step(&self) -> Step {
        Step::Swap
    }

    async fn run(&self, ctx: &mut TaskContext<'_>) -> StepRecord {
        let amount_in = match random_wei(&ctx.config.amounts.swap) {
            Ok(amount) => amount,
            Err(e) => return StepRecord::failed(Step::Swap, format!("{:#}", e)),
        };

        let deadline = chrono::Utc::now().timestamp() + DEADLINE_SECS;
        let params = SwapParams {
            token_in: ctx.contracts.wphrs,
            token_out: ctx.contracts.usdc,
            fee: ctx.config.amounts.swap_fee,
            recipient: ctx.address(),
            deadline: U256::from(deadline.max(0) as u64),
            amount_in,
            amount_out_minimum: U256::zero(),
            sqrt_price_limit_x96: U256::zero(),
        };

        info!("Swapping {} WPHRS -> USDC", display_ether(amount_in));

        match ctx.ledger.approve_and_swap(&params, amount_in).await {
            Ok(receipts) => {
                let hash = receipts.swap.hash_hex();
                info!(
                    "Swap successful! TX: {}",
                    ctx.config.explorer_link(&hash)
                );
                StepRecord::completed(Step::Swap)
                    .with_txs(vec![receipts.approve.hash_hex(), hash])
            }
            Err(e) => {
                error!("Swap failed: {}", e);
                StepRecord::failed(Step::Swap, e)
            }
        }
    }
}
