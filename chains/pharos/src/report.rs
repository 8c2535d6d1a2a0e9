//! Per-account run outcome: the stage reached and a record per step.

use ethers::types::Address;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Login,
    Profile,
    CheckIn,
    Faucet,
    Swap,
    SendNative,
    Stake,
    FinalProfile,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Login => "login",
            Step::Profile => "profile",
            Step::CheckIn => "check-in",
            Step::Faucet => "faucet",
            Step::Swap => "swap",
            Step::SendNative => "send-native",
            Step::Stake => "stake",
            Step::FinalProfile => "final-profile",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one account through the sequence. Stages only move forward;
/// `Aborted` is reachable only from `Init` when authentication fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    Authenticated,
    CheckedIn,
    FaucetClaimed,
    Swapped,
    TransfersSent,
    Staked,
    Done,
    Aborted,
}

impl Stage {
    /// Stage reached once `step` has been attempted
    pub fn after(step: Step) -> Option<Stage> {
        match step {
            Step::Login => Some(Stage::Authenticated),
            Step::Profile => None,
            Step::CheckIn => Some(Stage::CheckedIn),
            Step::Faucet => Some(Stage::FaucetClaimed),
            Step::Swap => Some(Stage::Swapped),
            Step::SendNative => Some(Stage::TransfersSent),
            Step::Stake => Some(Stage::Staked),
            Step::FinalProfile => Some(Stage::Done),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done | Stage::Aborted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    /// The service reports the action was already taken today
    AlreadyDone(String),
    Skipped(String),
    Failed(String),
}

impl StepStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, StepStatus::Failed(_))
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::AlreadyDone(msg) => write!(f, "already done ({})", msg),
            StepStatus::Skipped(why) => write!(f, "skipped ({})", why),
            StepStatus::Failed(why) => write!(f, "failed ({})", why),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub status: StepStatus,
    pub tx_hashes: Vec<String>,
}

impl StepRecord {
    pub fn new(step: Step, status: StepStatus) -> Self {
        Self {
            step,
            status,
            tx_hashes: Vec::new(),
        }
    }

    pub fn completed(step: Step) -> Self {
        Self::new(step, StepStatus::Completed)
    }

    pub fn failed(step: Step, reason: impl ToString) -> Self {
        Self::new(step, StepStatus::Failed(reason.to_string()))
    }

    pub fn skipped(step: Step, reason: impl ToString) -> Self {
        Self::new(step, StepStatus::Skipped(reason.to_string()))
    }

    pub fn with_txs(mut self, hashes: Vec<String>) -> Self {
        self.tx_hashes = hashes;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub address: Address,
    pub stage: Stage,
    pub steps: Vec<StepRecord>,
    pub points_before: Option<u64>,
    pub points_after: Option<u64>,
}

impl RunReport {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            stage: Stage::Init,
            steps: Vec::new(),
            points_before: None,
            points_after: None,
        }
    }

    /// Appends a record and advances the stage
    pub fn record(&mut self, record: StepRecord) {
        if let Some(next) = Stage::after(record.step) {
            if !self.stage.is_terminal() && next > self.stage {
                self.stage = next;
            }
        }
        self.steps.push(record);
    }

    pub fn abort(&mut self, record: StepRecord) {
        self.steps.push(record);
        self.stage = Stage::Aborted;
    }

    pub fn is_aborted(&self) -> bool {
        self.stage == Stage::Aborted
    }

    pub fn step(&self, step: Step) -> Option<&StepRecord> {
        self.steps.iter().find(|r| r.step == step)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|r| r.status.is_failed())
    }

    pub fn tx_count(&self) -> usize {
        self.steps.iter().map(|r| r.tx_hashes.len()).sum()
    }

    /// One line for the batch summary
    pub fn summary(&self) -> String {
        let steps = self
            .steps
            .iter()
            .map(|r| format!("{}={}", r.step, r.status))
            .collect::<Vec<_>>()
            .join(", ");
        let points = match (self.points_before, self.points_after) {
            (Some(before), Some(after)) => format!(" points {} -> {}", before, after),
            (_, Some(after)) => format!(" points {}", after),
            _ => String::new(),
        };
        format!(
            "{:?} {:?} txs={}{} [{}]",
            self.address,
            self.stage,
            self.tx_count(),
            points,
            steps
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_advances_in_order() {
        let mut report = RunReport::new(Address::zero());
        report.record(StepRecord::completed(Step::Login));
        assert_eq!(report.stage, Stage::Authenticated);
        report.record(StepRecord::completed(Step::Profile));
        assert_eq!(report.stage, Stage::Authenticated);
        report.record(StepRecord::failed(Step::CheckIn, "http 500"));
        assert_eq!(report.stage, Stage::CheckedIn);
        report.record(StepRecord::completed(Step::Faucet));
        report.record(StepRecord::completed(Step::SendNative));
        assert_eq!(report.stage, Stage::TransfersSent);
        report.record(StepRecord::completed(Step::Stake));
        report.record(StepRecord::completed(Step::FinalProfile));
        assert_eq!(report.stage, Stage::Done);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_abort_is_terminal() {
        let mut report = RunReport::new(Address::zero());
        report.abort(StepRecord::failed(Step::Login, "401"));
        assert!(report.is_aborted());
        report.record(StepRecord::completed(Step::CheckIn));
        assert_eq!(report.stage, Stage::Aborted);
    }

    #[test]
    fn test_summary_lists_steps_and_txs() {
        let mut report = RunReport::new(Address::zero());
        report.points_before = Some(10);
        report.points_after = Some(30);
        report.record(StepRecord::completed(Step::Login));
        report.record(
            StepRecord::completed(Step::SendNative).with_txs(vec!["0x1".into(), "0x2".into()]),
        );
        report.record(StepRecord::skipped(Step::Stake, "zero balance"));

        let line = report.summary();
        assert!(line.contains("txs=2"));
        assert!(line.contains("points 10 -> 30"));
        assert!(line.contains("stake=skipped (zero balance)"));
        assert_eq!(report.tx_count(), 2);
    }
}
