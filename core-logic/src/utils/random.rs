//! Random values and jittered pauses between network actions.

use crate::config::Bounds;
use rand::Rng;
use std::time::Duration;

/// Uniform integer in `[min, max]`.
pub fn random_u64(bounds: &Bounds<u64>) -> u64 {
    if bounds.min >= bounds.max {
        return bounds.min;
    }
    rand::thread_rng().gen_range(bounds.min..=bounds.max)
}

/// Uniform float in `[min, max]`.
pub fn random_f64(bounds: &Bounds<f64>) -> f64 {
    if bounds.min >= bounds.max {
        return bounds.min;
    }
    rand::thread_rng().gen_range(bounds.min..=bounds.max)
}

/// Pick a delay of whole seconds from `bounds`.
pub fn random_delay(bounds_secs: &Bounds<u64>) -> Duration {
    Duration::from_secs(random_u64(bounds_secs))
}

/// Sleep for a random number of seconds within `bounds_secs` and return the
/// duration slept.
pub async fn random_wait(bounds_secs: &Bounds<u64>) -> Duration {
    let delay = random_delay(bounds_secs);
    if !delay.is_zero() {
        tracing::debug!("Waiting {}s...", delay.as_secs());
        tokio::time::sleep(delay).await;
    }
    delay
}
