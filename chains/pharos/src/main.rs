use clap::Parser;
use colored::Colorize;
use core_logic::{setup_logger, WalletManager};
use dotenv::dotenv;
use pharos_bot::{exit_status, run_batch, ExitStatus, PharosConfig, PharosTask, Tally};
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pharos testnet rewards bot", long_about = None)]
struct Args {
    /// Path to config.toml
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Line-delimited private keys
    #[arg(short, long, default_value = WalletManager::DEFAULT_FILE)]
    keys: String,
}

fn banner() {
    println!("{}", "=================================================".cyan());
    println!("{}", "            Pharos Testnet Rewards Bot".cyan().bold());
    println!("{}", "=================================================".cyan());
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    let config = match PharosConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {:#}", "Failed to load config:".red(), e);
            return ExitCode::from(ExitStatus::InvalidConfig.code());
        }
    };

    // Keep guard alive for file logging
    let _log_guard = setup_logger(&config.logging);
    banner();

    ExitCode::from(run(args, config).await.code())
}

async fn run(args: Args, config: PharosConfig) -> ExitStatus {
    info!("Loaded config from: {}", args.config);
    info!(
        "Chain ID: {} | RPC: {} | API: {}",
        config.network.chain_id, config.network.rpc_url, config.network.api_base_url
    );

    let pause = config.account_pause();
    let task = PharosTask::new(config);
    let result = run_batch(&task, &args.keys, pause).await;

    match &result {
        Ok(summary) => {
            for (index, report) in &summary.completed {
                info!("Wallet #{:03}: {}", index + 1, report.summary());
            }
            for (index, reason) in &summary.failed {
                warn!("Wallet #{:03} failed: {}", index + 1, reason);
            }

            let tally = Tally::of(summary);
            info!(
                "Done: {}/{} wallets completed, {} aborted at login, {} failed in {:.0?}",
                tally.done,
                tally.total(),
                tally.aborted,
                tally.failed,
                summary.elapsed
            );
        }
        Err(e) => error!("Failed to load private keys: {}", e),
    }

    exit_status(&result)
}
