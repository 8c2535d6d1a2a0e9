//! In-memory ledger and rewards API shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use core_logic::Bounds;
use ethers::types::{Address, H256, U256};
use ethers::utils::parse_ether;
use pharos_bot::api::{CheckInStatus, FaucetStatus, Profile, RewardsApi, Session};
use pharos_bot::contracts::SwapParams;
use pharos_bot::ledger::{LedgerClient, SwapReceipts, TxReceipt};
use pharos_bot::{BotError, PharosConfig};
use std::sync::{Arc, Mutex};

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn receipt(n: u64) -> TxReceipt {
    TxReceipt {
        hash: H256::from_low_u64_be(n),
    }
}

pub struct FakeLedger {
    pub log: CallLog,
    pub stake_balance: U256,
    /// Zero-based index of the transfer that reverts
    pub fail_transfer_at: Option<usize>,
    pub transfers: Mutex<Vec<(Address, U256)>>,
    pub staked: Mutex<Option<U256>>,
    pub swaps: Mutex<Vec<(SwapParams, U256)>>,
}

impl FakeLedger {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            stake_balance: parse_ether(10).unwrap(),
            fail_transfer_at: None,
            transfers: Mutex::new(Vec::new()),
            staked: Mutex::new(None),
            swaps: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, call: &str) {
        self.log.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    fn address(&self) -> Address {
        Address::repeat_byte(0xaa)
    }

    async fn sign_message(&self, message: &str) -> Result<String, BotError> {
        self.push("sign");
        Ok(format!("0xsigned-{}", message))
    }

    async fn native_balance(&self) -> Result<U256, BotError> {
        self.push("native_balance");
        Ok(parse_ether(1).unwrap())
    }

    async fn token_balance(&self, _token: Address) -> Result<U256, BotError> {
        self.push("token_balance");
        Ok(self.stake_balance)
    }

    async fn transfer_native(&self, to: Address, amount: U256) -> Result<TxReceipt, BotError> {
        self.push("transfer");
        let mut transfers = self.transfers.lock().unwrap();
        if self.fail_transfer_at == Some(transfers.len()) {
            return Err(BotError::transaction("native transfer", "reverted"));
        }
        transfers.push((to, amount));
        Ok(receipt(transfers.len() as u64))
    }

    async fn approve_and_swap(
        &self,
        params: &SwapParams,
        value: U256,
    ) -> Result<SwapReceipts, BotError> {
        self.push("swap");
        self.swaps.lock().unwrap().push((params.clone(), value));
        Ok(SwapReceipts {
            approve: receipt(100),
            swap: receipt(101),
        })
    }

    async fn stake(&self, amount: U256) -> Result<TxReceipt, BotError> {
        self.push("stake");
        *self.staked.lock().unwrap() = Some(amount);
        Ok(receipt(200))
    }
}

pub struct FakeApi {
    pub log: CallLog,
    pub accept_login: bool,
    pub check_in: CheckInStatus,
    pub session: Option<Session>,
    pub profile_calls: Mutex<u64>,
}

impl FakeApi {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            accept_login: true,
            check_in: CheckInStatus::Claimed,
            session: None,
            profile_calls: Mutex::new(0),
        }
    }

    fn push(&self, call: &str) {
        self.log.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl RewardsApi for FakeApi {
    async fn login(&mut self, _address: Address, signature: &str) -> Result<Session, BotError> {
        self.push("login");
        assert_eq!(signature, "0xsigned-pharos");
        if !self.accept_login {
            return Err(BotError::Auth {
                reason: "HTTP 401".to_string(),
                status: Some(401),
                body: Some("{}".to_string()),
            });
        }
        let session = Session::new("jwt-token");
        self.session = Some(session.clone());
        Ok(session)
    }

    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    async fn profile(&self, _address: Address) -> Option<Profile> {
        self.push("profile");
        let mut calls = self.profile_calls.lock().unwrap();
        *calls += 1;
        Some(Profile {
            task_points: 10 * *calls,
            total_points: 100 * *calls,
            ..Default::default()
        })
    }

    async fn check_in(&self, _address: Address) -> CheckInStatus {
        self.push("check_in");
        self.check_in.clone()
    }

    async fn claim_faucet(&self, _address: Address) -> FaucetStatus {
        self.push("faucet");
        FaucetStatus::Claimed
    }
}

pub fn test_config() -> PharosConfig {
    let mut config = PharosConfig::default();
    config.delays.between_requests = Bounds::fixed(0);
    config.delays.between_accounts = 0;
    config
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}
