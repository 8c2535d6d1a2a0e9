use crate::report::{Step, StepRecord};
use crate::task::{AccountStep, TaskContext};
use async_trait::async_trait;
use tracing::{error, info};

/// Signs the login message and opens an API session
pub struct LoginTask;

#[async_trait]
impl AccountStep for LoginTask {
    fn step(&self) -> Step {
        Step::Login
    }

    async fn run(&self, ctx: &mut TaskContext<'_>) -> StepRecord {
        let address = ctx.address();

        let signature = match ctx.ledger.sign_message(&ctx.config.sign_message).await {
            Ok(sig) => sig,
            Err(e) => {
                error!("Failed to sign login message: {}", e);
                return StepRecord::failed(Step::Login, e);
            }
        };

        match ctx.api.login(address, &signature).await {
            Ok(_) if ctx.api.session().is_none() => {
                error!("Login returned no session");
                StepRecord::failed(Step::Login, "no session after login")
            }
            Ok(_) => {
                info!("Login successful for {:?}", address);
                StepRecord::completed(Step::Login)
            }
            Err(e) => {
                error!("Login failed: {}", e);
                StepRecord::failed(Step::Login, e)
            }
        }
    }
}
