use crate::utils::SecretKey;
use anyhow::Result;
use async_trait::async_trait;

/// One complete run of a bot for a single account.
///
/// Implementations build their own network clients from the key, so nothing
/// survives from one account to the next. An `Err` means the run could not
/// produce a report at all; step-level failures belong in the report.
#[async_trait]
pub trait AccountTask: Send + Sync {
    type Report: Send;

    /// Returns the name of the task
    fn name(&self) -> &str;

    /// Runs the task for the account at `index`
    async fn run(&self, index: usize, key: &SecretKey) -> Result<Self::Report>;
}
