//! Ledger access: signing, balances and confirmed transactions over the
//! chain's JSON-RPC endpoint.

use crate::config::{Contracts, PharosConfig};
use crate::contracts::{self, SwapParams};
use crate::error::BotError;
use async_trait::async_trait;
use core_logic::{GasLimits, SecretKey};
use ethers::abi::Abi;
use ethers::prelude::*;
use ethers::types::transaction::eip2718::TypedTransaction;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Confirmed transaction summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub hash: H256,
}

impl TxReceipt {
    pub fn hash_hex(&self) -> String {
        format!("{:?}", self.hash)
    }
}

/// Both halves of a swap. The approval is kept even when the swap fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReceipts {
    pub approve: TxReceipt,
    pub swap: TxReceipt,
}

/// An account: its key and the address derived from it. No network state.
#[derive(Debug, Clone)]
pub struct Account {
    pub index: usize,
    pub secret: SecretKey,
    pub address: Address,
}

impl Account {
    pub fn from_secret(index: usize, secret: &SecretKey) -> Result<Self, BotError> {
        let wallet = parse_wallet(secret)?;
        Ok(Self {
            index,
            secret: secret.clone(),
            address: wallet.address(),
        })
    }

    /// `001`-style label used in logs
    pub fn label(&self) -> String {
        format!("{:03}", self.index + 1)
    }
}

fn parse_wallet(secret: &SecretKey) -> Result<LocalWallet, BotError> {
    secret
        .expose()
        .parse::<LocalWallet>()
        .map_err(|e| BotError::Credential(e.to_string()))
}

/// Address of a freshly generated, immediately discarded key
pub fn fresh_address() -> Address {
    LocalWallet::new(&mut rand::thread_rng()).address()
}

#[async_trait]
pub trait LedgerClient: Send + Sync {
    fn address(&self) -> Address;

    /// EIP-191 personal signature, `0x`-prefixed hex
    async fn sign_message(&self, message: &str) -> Result<String, BotError>;

    async fn native_balance(&self) -> Result<U256, BotError>;

    async fn token_balance(&self, token: Address) -> Result<U256, BotError>;

    async fn transfer_native(&self, to: Address, amount: U256) -> Result<TxReceipt, BotError>;

    /// `approve(router, amount_in)` then `exactInputSingle(params)` sending
    /// `value` along with the swap.
    async fn approve_and_swap(
        &self,
        params: &SwapParams,
        value: U256,
    ) -> Result<SwapReceipts, BotError>;

    /// Transfers `amount` of the stake token to the staking address
    async fn stake(&self, amount: U256) -> Result<TxReceipt, BotError>;
}

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// `LedgerClient` backed by an ethers signer middleware.
pub struct EthersLedger {
    client: Arc<SignerClient>,
    address: Address,
    chain_id: u64,
    contracts: Contracts,
    gas: GasLimits,
    erc20: Abi,
    router: Abi,
    confirmations: usize,
    tx_timeout: Duration,
    legacy: bool,
}

impl EthersLedger {
    /// Binds the account's signer to the configured RPC endpoint and checks
    /// that the endpoint answers with the expected chain id.
    pub async fn connect(account: &Account, config: &PharosConfig) -> Result<Self, BotError> {
        let ledger = Self::bind(account, config)?;
        ledger.verify_chain(&config.network.rpc_url).await?;
        Ok(ledger)
    }

    /// Same as `connect` without touching the network. Calls fail later if
    /// the endpoint is down.
    pub fn bind(account: &Account, config: &PharosConfig) -> Result<Self, BotError> {
        let rpc_url = &config.network.rpc_url;
        let wallet = parse_wallet(&account.secret)?.with_chain_id(config.network.chain_id);

        let http = crate::api::http_client(config)
            .map_err(|e| BotError::connection(rpc_url, format!("{:#}", e)))?;
        let url = reqwest::Url::parse(rpc_url).map_err(|e| BotError::connection(rpc_url, e))?;
        let provider = Provider::new(Http::new_with_client(url, http));

        let addresses = config
            .contracts()
            .map_err(|e| BotError::connection(rpc_url, e))?;
        let erc20 = contracts::erc20_abi().map_err(|e| BotError::connection(rpc_url, e))?;
        let router = contracts::swap_router_abi().map_err(|e| BotError::connection(rpc_url, e))?;

        Ok(Self {
            address: wallet.address(),
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
            chain_id: config.network.chain_id,
            contracts: addresses,
            gas: config.gas,
            erc20,
            router,
            confirmations: config.network.confirmations,
            tx_timeout: config.tx_timeout(),
            legacy: config.network.legacy_transactions,
        })
    }

    async fn verify_chain(&self, rpc_url: &str) -> Result<(), BotError> {
        let remote_chain = self
            .client
            .get_chainid()
            .await
            .map_err(|e| BotError::connection(rpc_url, e))?;
        if remote_chain != U256::from(self.chain_id) {
            return Err(BotError::connection(
                rpc_url,
                format!(
                    "chain id mismatch: expected {}, endpoint reports {}",
                    self.chain_id, remote_chain
                ),
            ));
        }
        debug!("Connected {:?} to chain {}", self.address, remote_chain);
        Ok(())
    }

    fn build_tx(&self, to: Address, value: U256, data: Option<Bytes>, gas: u64) -> TypedTransaction {
        if self.legacy {
            let mut tx = TransactionRequest::new()
                .from(self.address)
                .to(to)
                .value(value)
                .gas(gas)
                .chain_id(self.chain_id);
            if let Some(data) = data {
                tx = tx.data(data);
            }
            tx.into()
        } else {
            let mut tx = Eip1559TransactionRequest::new()
                .from(self.address)
                .to(to)
                .value(value)
                .gas(gas)
                .chain_id(self.chain_id);
            if let Some(data) = data {
                tx = tx.data(data);
            }
            tx.into()
        }
    }

    /// Broadcast and block until confirmed, reverted, dropped or timed out.
    async fn submit(&self, action: &str, tx: TypedTransaction) -> Result<TxReceipt, BotError> {
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(|e| BotError::transaction(action, e))?;

        let hash = pending.tx_hash();
        debug!("{} broadcast: {:?}", action, hash);

        let receipt = tokio::time::timeout(
            self.tx_timeout,
            pending.confirmations(self.confirmations),
        )
        .await
        .map_err(|_| {
            BotError::transaction(
                action,
                format!("no confirmation for {:?} after {:?}", hash, self.tx_timeout),
            )
        })?
        .map_err(|e| BotError::transaction(action, e))?
        .ok_or_else(|| BotError::transaction(action, format!("{:?} dropped from mempool", hash)))?;

        if receipt.status != Some(U64::from(1)) {
            return Err(BotError::transaction(
                action,
                format!("{:?} reverted", receipt.transaction_hash),
            ));
        }

        debug!(
            "{} confirmed in block {:?}, gas used {:?}",
            action, receipt.block_number, receipt.gas_used
        );
        Ok(TxReceipt {
            hash: receipt.transaction_hash,
        })
    }
}

#[async_trait]
impl LedgerClient for EthersLedger {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_message(&self, message: &str) -> Result<String, BotError> {
        let signature = self
            .client
            .signer()
            .sign_message(message)
            .await
            .map_err(|e| BotError::Credential(e.to_string()))?;
        Ok(format!("0x{}", hex::encode(signature.to_vec())))
    }

    async fn native_balance(&self) -> Result<U256, BotError> {
        self.client
            .get_balance(self.address, None)
            .await
            .map_err(|e| BotError::query("native balance", e))
    }

    async fn token_balance(&self, token: Address) -> Result<U256, BotError> {
        let data = contracts::encode_balance_of(&self.erc20, self.address)
            .map_err(|e| BotError::query("balanceOf", e))?;
        let call: TypedTransaction = TransactionRequest::new().to(token).data(data).into();

        let output = self
            .client
            .provider()
            .call(&call, None)
            .await
            .map_err(|e| BotError::query("balanceOf", e))?;

        contracts::decode_uint(&self.erc20, "balanceOf", &output)
            .map_err(|e| BotError::query("balanceOf", e))
    }

    async fn transfer_native(&self, to: Address, amount: U256) -> Result<TxReceipt, BotError> {
        let tx = self.build_tx(to, amount, None, self.gas.transfer);
        self.submit("native transfer", tx).await
    }

    async fn approve_and_swap(
        &self,
        params: &SwapParams,
        value: U256,
    ) -> Result<SwapReceipts, BotError> {
        let router = self.contracts.swap_router;

        let approve_data = contracts::encode_approve(&self.erc20, router, params.amount_in)
            .map_err(|e| BotError::transaction("approve", e))?;
        let approve_tx = self.build_tx(params.token_in, U256::zero(), Some(approve_data), self.gas.approve);
        let approve = self.submit("approve", approve_tx).await?;
        info!("Token approval successful! {}", approve.hash_hex());

        let swap_data = contracts::encode_exact_input_single(&self.router, params)
            .map_err(|e| BotError::transaction("swap", e))?;
        let swap_tx = self.build_tx(router, value, Some(swap_data), self.gas.swap);
        let swap = self.submit("swap", swap_tx).await.map_err(|e| match e {
            BotError::Transaction { action, reason } => BotError::Transaction {
                action,
                reason: format!("{} (approval {} remains in effect)", reason, approve.hash_hex()),
            },
            other => other,
        })?;

        Ok(SwapReceipts { approve, swap })
    }

    async fn stake(&self, amount: U256) -> Result<TxReceipt, BotError> {
        let data = contracts::encode_transfer(&self.erc20, self.contracts.staking, amount)
            .map_err(|e| BotError::transaction("stake", e))?;
        let tx = self.build_tx(
            self.contracts.stake_token,
            U256::zero(),
            Some(data),
            self.gas.token_transfer,
        );
        self.submit("stake", tx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_account_derives_address_offline() {
        let account = Account::from_secret(0, &SecretKey::new(KEY)).unwrap();
        assert_eq!(
            account.address,
            "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"
                .parse::<Address>()
                .unwrap()
        );
        assert_eq!(account.label(), "001");
    }

    #[test]
    fn test_account_rejects_garbage_key() {
        let err = Account::from_secret(4, &SecretKey::new("not-a-key")).unwrap_err();
        assert!(matches!(err, BotError::Credential(_)));
    }

    #[test]
    fn test_bind_needs_no_network() {
        let mut config = PharosConfig::default();
        config.network.rpc_url = "http://127.0.0.1:1".to_string();
        let account = Account::from_secret(0, &SecretKey::new(KEY)).unwrap();

        let ledger = EthersLedger::bind(&account, &config).unwrap();
        assert_eq!(ledger.address(), account.address);
    }

    #[tokio::test]
    async fn test_connect_fails_on_unreachable_endpoint() {
        let mut config = PharosConfig::default();
        config.network.rpc_url = "http://127.0.0.1:1".to_string();
        let account = Account::from_secret(0, &SecretKey::new(KEY)).unwrap();

        match EthersLedger::connect(&account, &config).await {
            Err(BotError::Connection { endpoint, .. }) => {
                assert_eq!(endpoint, "http://127.0.0.1:1")
            }
            Err(other) => panic!("expected Connection error, got {}", other),
            Ok(_) => panic!("expected Connection error"),
        }
    }

    #[test]
    fn test_fresh_addresses_differ() {
        assert_ne!(fresh_address(), fresh_address());
    }
}
