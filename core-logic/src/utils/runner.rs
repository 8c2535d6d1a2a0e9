use crate::traits::AccountTask;
use crate::utils::SecretKey;
use std::time::{Duration, Instant};
use tracing::{error, info, Instrument};

/// Outcome of a whole batch. Indices are zero-based positions in the key list.
#[derive(Debug)]
pub struct BatchSummary<R> {
    pub completed: Vec<(usize, R)>,
    pub failed: Vec<(usize, String)>,
    pub elapsed: Duration,
}

impl<R> BatchSummary<R> {
    pub fn total(&self) -> usize {
        self.completed.len() + self.failed.len()
    }
}

/// Runs one account after another. A failing account is logged and
/// recorded, and the batch moves on to the next one.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    pause: Duration,
}

impl BatchRunner {
    pub fn new(pause: Duration) -> Self {
        Self { pause }
    }

    pub async fn run<T: AccountTask>(&self, task: &T, keys: &[SecretKey]) -> BatchSummary<T::Report> {
        let start_time = Instant::now();
        let mut completed = Vec::new();
        let mut failed = Vec::new();

        info!("Starting {} for {} accounts...", task.name(), keys.len());

        for (i, key) in keys.iter().enumerate() {
            let span = tracing::info_span!("account", id = %format!("{:03}", i + 1));

            match task.run(i, key).instrument(span).await {
                Ok(report) => completed.push((i, report)),
                Err(e) => {
                    error!("Error processing wallet #{}: {:#}", i + 1, e);
                    failed.push((i, format!("{:#}", e)));
                }
            }

            if i + 1 < keys.len() && !self.pause.is_zero() {
                info!(
                    "Waiting {} seconds before next wallet...",
                    self.pause.as_secs()
                );
                tokio::time::sleep(self.pause).await;
            }
        }

        let elapsed = start_time.elapsed();
        info!(
            "Batch complete in {:.1}s | Completed: {} | Failed: {}",
            elapsed.as_secs_f64(),
            completed.len(),
            failed.len()
        );

        BatchSummary {
            completed,
            failed,
            elapsed,
        }
    }
}
