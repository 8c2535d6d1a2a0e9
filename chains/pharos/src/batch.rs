use crate::report::RunReport;
use core_logic::{AccountTask, BatchRunner, BatchSummary, CoreError, WalletManager};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Process exit status of one bot invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Completed,
    NoCredentials,
    InvalidConfig,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Completed => 0,
            ExitStatus::NoCredentials => 1,
            ExitStatus::InvalidConfig => 2,
        }
    }
}

/// Loads the key file and runs `task` over every key in order.
///
/// A missing or empty key file is the only error; per-account failures are
/// recorded in the summary.
pub async fn run_batch<T: AccountTask>(
    task: &T,
    keys_path: impl AsRef<Path>,
    pause: Duration,
) -> Result<BatchSummary<T::Report>, CoreError> {
    let manager = WalletManager::load(keys_path)?;
    info!("Found {} wallets.", manager.count());

    for (label, key) in manager.list_wallets().iter().zip(manager.keys()) {
        if let Err(e) = WalletManager::check_key_format(key) {
            warn!("{}: {}", label, e);
        }
    }

    Ok(BatchRunner::new(pause).run(task, manager.keys()).await)
}

pub fn exit_status<R>(result: &Result<BatchSummary<R>, CoreError>) -> ExitStatus {
    match result {
        Ok(_) => ExitStatus::Completed,
        Err(_) => ExitStatus::NoCredentials,
    }
}

/// Per-account outcome counts. An account whose login failed ran but did
/// not complete, so it is counted apart from the finished ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub done: usize,
    pub aborted: usize,
    pub failed: usize,
}

impl Tally {
    pub fn of(summary: &BatchSummary<RunReport>) -> Self {
        let aborted = summary
            .completed
            .iter()
            .filter(|(_, report)| report.is_aborted())
            .count();
        Self {
            done: summary.completed.len() - aborted,
            aborted,
            failed: summary.failed.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.done + self.aborted + self.failed
    }
}
