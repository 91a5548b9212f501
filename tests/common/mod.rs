//! Shared mocks for session integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::U256;
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use serde_json::{json, Value};
use tokio::sync::{mpsc, Notify};

use epic_nft_mint::blockchain::{
    ContractDescriptor, ContractError, MintContract, MintedEvent, MintedEvents, PendingMint,
    ProviderError, RpcMethod, WalletProvider,
};
use epic_nft_mint::config::MintConfig;
use epic_nft_mint::session::{Environment, Notifier, SessionSettings, WalletSession};

pub const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

const ARTIFACT: &str = include_str!("../../abi/MyEpicNFT.json");

/// How the mock contract answers a mint call.
#[derive(Debug, Clone)]
pub enum MintBehavior {
    /// Return a handle with this hash that confirms.
    Confirm(String),
    /// Fail before any handle is returned.
    RejectSubmit,
    /// Return a handle with this hash whose confirmation fails.
    FailConfirm(String),
}

pub struct MockContract {
    behavior: Mutex<MintBehavior>,
    fail_subscription: bool,
    gate: Option<Arc<Notify>>,
    senders: Mutex<Vec<mpsc::UnboundedSender<MintedEvent>>>,
    pub mint_calls: AtomicUsize,
}

impl MockContract {
    pub fn new(behavior: MintBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            fail_subscription: false,
            gate: None,
            senders: Mutex::new(Vec::new()),
            mint_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_subscription(mut self) -> Self {
        self.fail_subscription = true;
        self
    }

    /// Hold every confirmation until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_behavior(&self, behavior: MintBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn mints(&self) -> usize {
        self.mint_calls.load(Ordering::SeqCst)
    }

    pub fn subscriptions(&self) -> usize {
        self.senders.lock().unwrap().len()
    }

    /// Deliver a minted event to every listener.
    pub fn emit(&self, token_id: u64) {
        let event = MintedEvent {
            sender: "0xABC".to_string(),
            token_id: U256::from(token_id),
        };
        for tx in self.senders.lock().unwrap().iter() {
            let _ = tx.send(event.clone());
        }
    }

    /// True once every listener has gone away.
    pub fn listeners_closed(&self) -> bool {
        self.senders.lock().unwrap().iter().all(|tx| tx.is_closed())
    }
}

struct MockPending {
    hash: String,
    confirms: bool,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl PendingMint for MockPending {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    async fn wait(self: Box<Self>) -> Result<(), ContractError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.confirms {
            Ok(())
        } else {
            Err(ContractError::Reverted(self.hash.clone()))
        }
    }
}

#[async_trait]
impl MintContract for MockContract {
    async fn mint(&self) -> Result<Box<dyn PendingMint>, ContractError> {
        self.mint_calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            MintBehavior::Confirm(hash) => Ok(Box::new(MockPending {
                hash,
                confirms: true,
                gate: self.gate.clone(),
            })),
            MintBehavior::FailConfirm(hash) => Ok(Box::new(MockPending {
                hash,
                confirms: false,
                gate: self.gate.clone(),
            })),
            MintBehavior::RejectSubmit => Err(ContractError::Submission(
                "user denied transaction signature".to_string(),
            )),
        }
    }

    async fn minted_events(&self) -> Result<MintedEvents, ContractError> {
        if self.fail_subscription {
            return Err(ContractError::Subscription("filter not supported".to_string()));
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.lock().unwrap().push(tx);
        Ok(stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|event| (event, rx)) }).boxed())
    }
}

pub struct MockProvider {
    authorized: Mutex<Vec<String>>,
    on_request: Mutex<Result<Vec<String>, ()>>,
    chain_id: String,
    calls: Mutex<Vec<RpcMethod>>,
    pub contract: Arc<MockContract>,
}

impl MockProvider {
    pub fn new(contract: MockContract) -> Self {
        Self {
            authorized: Mutex::new(Vec::new()),
            on_request: Mutex::new(Ok(Vec::new())),
            chain_id: "0x4".to_string(),
            calls: Mutex::new(Vec::new()),
            contract: Arc::new(contract),
        }
    }

    pub fn with_authorized(self, accounts: &[&str]) -> Self {
        *self.authorized.lock().unwrap() = accounts.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn approving(self, accounts: &[&str]) -> Self {
        self.set_approval(Ok(accounts.iter().map(|a| a.to_string()).collect()));
        self
    }

    pub fn rejecting(self) -> Self {
        self.set_approval(Err(()));
        self
    }

    pub fn on_chain(mut self, chain_id: &str) -> Self {
        self.chain_id = chain_id.to_string();
        self
    }

    pub fn set_approval(&self, result: Result<Vec<String>, ()>) {
        *self.on_request.lock().unwrap() = result;
    }

    pub fn calls(&self) -> Vec<RpcMethod> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request(&self, method: RpcMethod) -> Result<Value, ProviderError> {
        self.calls.lock().unwrap().push(method);
        match method {
            RpcMethod::Accounts => Ok(json!(*self.authorized.lock().unwrap())),
            RpcMethod::RequestAccounts => match &*self.on_request.lock().unwrap() {
                Ok(accounts) => Ok(json!(accounts)),
                Err(()) => Err(ProviderError::UserRejected),
            },
            RpcMethod::ChainId => Ok(json!(self.chain_id)),
        }
    }

    fn bind_contract(
        &self,
        _descriptor: &ContractDescriptor,
        _account: &str,
    ) -> Result<Arc<dyn MintContract>, ContractError> {
        Ok(self.contract.clone())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

pub fn test_config() -> MintConfig {
    let mut config = MintConfig::default();
    config.contract.address = CONTRACT_ADDRESS.to_string();
    config
}

pub fn descriptor() -> ContractDescriptor {
    ContractDescriptor::from_artifact(CONTRACT_ADDRESS, ARTIFACT, "makeAnEpicNFT", "NewEpicNFTMinted")
        .unwrap()
}

/// Build a session over `env`, returning the notifier for alert checks.
pub fn session(env: Environment) -> (WalletSession, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let session = WalletSession::new(
        env,
        descriptor(),
        SessionSettings::from_config(&test_config()),
        notifier.clone(),
    );
    (session, notifier)
}

/// Session backed by `provider`, returning the provider handle as well.
pub fn session_with(
    provider: MockProvider,
) -> (WalletSession, Arc<MockProvider>, Arc<RecordingNotifier>) {
    let provider = Arc::new(provider);
    let (session, notifier) = session(Environment::with_provider(provider.clone()));
    (session, provider, notifier)
}
