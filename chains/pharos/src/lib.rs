pub mod api;
pub mod batch;
pub mod bot;
pub mod config;
pub mod contracts;
pub mod error;
pub mod ledger;
pub mod report;
pub mod sequence;
pub mod task;
pub mod utils;

pub use batch::{exit_status, run_batch, ExitStatus, Tally};
pub use bot::PharosTask;
pub use config::PharosConfig;
pub use error::BotError;
