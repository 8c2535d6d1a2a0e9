use crate::ledger::fresh_address;
use crate::report::{Step, StepRecord};
use crate::task::{AccountStep, TaskContext};
use crate::utils::amount::{display_ether, random_wei};
use async_trait::async_trait;
use core_logic::random;
use tracing::{error, info, warn};

/// Sends several small native transfers to throwaway addresses
pub struct SendNativeTask;

#[async_trait]
impl AccountStep for SendNativeTask {
    fn step(&self) -> Step {
        Step::SendNative
    }

    async fn run(&self, ctx: &mut TaskContext<'_>) -> StepRecord {
        match ctx.ledger.native_balance().await {
            Ok(balance) => info!("Native balance: {} PHRS", display_ether(balance)),
            Err(e) => warn!("Failed to read native balance: {}", e),
        }

        let count = random::random_u64(&ctx.config.amounts.transfer_count);
        info!("Sending {} native transfers", count);

        let mut hashes = Vec::new();
        for i in 0..count {
            let amount = match random_wei(&ctx.config.amounts.send) {
                Ok(amount) => amount,
                Err(e) => {
                    return StepRecord::failed(Step::SendNative, format!("{:#}", e))
                        .with_txs(hashes)
                }
            };
            let to = fresh_address();

            match ctx.ledger.transfer_native(to, amount).await {
                Ok(receipt) => {
                    let hash = receipt.hash_hex();
                    info!(
                        "Transfer {}/{} successful! {} PHRS to {:?} TX: {}",
                        i + 1,
                        count,
                        display_ether(amount),
                        to,
                        ctx.config.explorer_link(&hash)
                    );
                    hashes.push(hash);
                }
                Err(e) => {
                    error!("Transfer {}/{} failed: {}", i + 1, count, e);
                    let sent = hashes.len();
                    return StepRecord::failed(
                        Step::SendNative,
                        format!("{} (sent {} of {})", e, sent, count),
                    )
                    .with_txs(hashes);
                }
            }

            random::random_wait(&ctx.config.delays.between_requests).await;
        }

        info!("Completed {} native transfers successfully!", hashes.len());
        StepRecord::completed(Step::SendNative).with_txs(hashes)
    }
}
