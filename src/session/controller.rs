//! Wallet session controller.
//!
//! # Responsibilities
//! - Detect the injected wallet and silently re-use an authorized account
//! - Connect on request and check the active network
//! - Submit the mint and publish its explorer link
//! - Listen for the minted event and publish the marketplace link
//!
//! # Failure Handling
//! - Missing wallet on connect: blocking alert
//! - Connect failure: recorded in `SessionState::error`, retryable
//! - Wrong network: advisory alert, nothing blocked
//! - Mint failure: logged only, the mining flag stays set
//! - Event subscription failure: logged only

use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::StreamExt;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::blockchain::{ContractDescriptor, ContractError, WalletProvider};
use crate::config::validation::parse_chain_id;
use crate::config::MintConfig;
use crate::session::environment::Environment;
use crate::session::links::LinkTemplates;
use crate::session::notify::Notifier;
use crate::session::state::SessionState;
use crate::session::store::StateStore;

/// Alert shown when connect is attempted without a wallet.
pub const MISSING_WALLET_ALERT: &str = "Get MetaMask!";

/// Reasons a session operation is refused outright.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No wallet provider in the environment.
    #[error("No wallet provider available")]
    NoWallet,

    /// Mint requested before an account was authorized.
    #[error("Connect a wallet before minting")]
    NotConnected,

    /// Mint requested while another one is still mining.
    #[error("A mint is already in progress")]
    MintInProgress,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Result of a mint submission that passed its preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// Mined; the explorer link has been published.
    Confirmed { transaction_url: String },
    /// Submission or confirmation failed. Only logged; the session stays in
    /// the mining phase.
    Stalled,
}

/// Network and link settings of a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub network_name: String,
    pub required_chain_id: String,
    pub links: LinkTemplates,
}

impl SessionSettings {
    pub fn from_config(config: &MintConfig) -> Self {
        Self {
            network_name: config.network.name.clone(),
            required_chain_id: config.network.required_chain_id.clone(),
            links: LinkTemplates::new(&config.links, &config.contract.address),
        }
    }
}

/// Controller for one wallet session.
///
/// Dropping the session aborts its event listeners.
pub struct WalletSession {
    env: Environment,
    descriptor: ContractDescriptor,
    settings: SessionSettings,
    notifier: Arc<dyn Notifier>,
    store: StateStore,
    listeners: Mutex<Vec<JoinHandle<()>>>,
}

impl WalletSession {
    pub fn new(
        env: Environment,
        descriptor: ContractDescriptor,
        settings: SessionSettings,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            env,
            descriptor,
            settings,
            notifier,
            store: StateStore::default(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Handle to the observable state.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    /// Number of minted-event listeners started so far.
    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }

    /// Page load: detect the wallet, then try silent authorization.
    pub async fn load(&self) {
        if self.detect_wallet() {
            self.silent_authorize().await;
        }
    }

    /// Record whether a wallet provider is injected.
    pub fn detect_wallet(&self) -> bool {
        let present = self.env.wallet_provider().is_some();
        if present {
            tracing::info!("Wallet provider detected");
        } else {
            tracing::info!("No wallet provider found, showing install prompt");
        }
        self.store.update(|s| s.wallet_present = present);
        present
    }

    /// Adopt an already authorized account without prompting.
    pub async fn silent_authorize(&self) -> Option<String> {
        let provider = self.env.wallet_provider()?;

        let accounts = match provider.accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list authorized accounts");
                return None;
            }
        };

        match accounts.into_iter().next() {
            Some(account) => {
                tracing::info!(account = %account, "Found an authorized account");
                self.adopt_account(&provider, &account).await;
                Some(account)
            }
            None => {
                tracing::info!("No authorized account found");
                None
            }
        }
    }

    /// Ask the wallet to authorize an account.
    pub async fn connect(&self) {
        let Some(provider) = self.env.wallet_provider() else {
            self.notifier.alert(MISSING_WALLET_ALERT);
            return;
        };

        self.store.update(|s| {
            s.connecting = true;
            s.error = None;
        });

        let failure = match provider.request_accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => {
                    tracing::info!(account = %account, "Connected");
                    self.adopt_account(&provider, &account).await;
                    self.verify_network().await;
                    return;
                }
                None => "Failed to connect wallet: no account was authorized".to_string(),
            },
            Err(e) => format!("Failed to connect wallet: {}", e),
        };

        tracing::warn!(error = %failure, "Connect failed");
        self.store.update(|s| {
            s.connecting = false;
            s.error = Some(failure);
        });
    }

    /// Compare the wallet's chain with the required one.
    ///
    /// Alerts on mismatch and returns whether the chain matched. Never
    /// changes state.
    pub async fn verify_network(&self) -> bool {
        let Some(provider) = self.env.wallet_provider() else {
            return false;
        };

        let chain_id = match provider.chain_id().await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to query chain id");
                return false;
            }
        };
        tracing::info!(chain_id = %chain_id, "Connected to chain");

        let required = parse_chain_id(&self.settings.required_chain_id);
        let matches = required.is_some() && parse_chain_id(&chain_id) == required;
        if !matches {
            self.notifier.alert(&format!(
                "You are not connected to the {} network!",
                self.settings.network_name
            ));
        }
        matches
    }

    /// Submit the mint transaction and wait for it to be mined.
    pub async fn submit_mint(&self) -> SessionResult<MintOutcome> {
        let provider = self.env.wallet_provider().ok_or(SessionError::NoWallet)?;

        let mut refusal = SessionError::NotConnected;
        let account = self.store.try_update(|s| {
            if s.mining {
                refusal = SessionError::MintInProgress;
                return None;
            }
            if !s.can_mint() {
                return None;
            }
            s.mining = true;
            s.current_account.clone()
        });
        let Some(account) = account else {
            return Err(refusal);
        };

        let mined = async {
            let contract = provider.bind_contract(&self.descriptor, &account)?;
            tracing::info!(account = %account, "Requesting wallet signature for mint");
            let pending = contract.mint().await?;
            let hash = pending.hash();
            tracing::info!(tx_hash = %hash, "Mining...");
            pending.wait().await?;
            Ok::<_, ContractError>(hash)
        }
        .await;

        match mined {
            Ok(hash) => {
                let transaction_url = self.settings.links.transaction_url(&hash);
                self.store.update(|s| {
                    s.mining = false;
                    s.transaction_url = Some(transaction_url.clone());
                });
                tracing::info!(url = %transaction_url, "Mined");
                Ok(MintOutcome::Confirmed { transaction_url })
            }
            Err(e) => {
                tracing::error!(error = %e, "Mint failed");
                Ok(MintOutcome::Stalled)
            }
        }
    }

    /// Start listening for the minted event for the current account.
    pub async fn subscribe_minted_event(&self) -> bool {
        let Some(provider) = self.env.wallet_provider() else {
            return false;
        };
        let Some(account) = self.store.snapshot().current_account else {
            return false;
        };
        self.listen_for_mints(&provider, &account).await
    }

    async fn adopt_account(&self, provider: &Arc<dyn WalletProvider>, account: &str) {
        self.store.update(|s| {
            s.current_account = Some(account.to_string());
            s.connecting = false;
            s.error = None;
        });
        self.listen_for_mints(provider, account).await;
    }

    async fn listen_for_mints(&self, provider: &Arc<dyn WalletProvider>, account: &str) -> bool {
        let subscribed = match provider.bind_contract(&self.descriptor, account) {
            Ok(contract) => contract.minted_events().await,
            Err(e) => Err(e),
        };
        let mut events = match subscribed {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(
                    event = %self.descriptor.minted_event(),
                    error = %e,
                    "Failed to subscribe to minted event"
                );
                return false;
            }
        };

        let store = self.store.clone();
        let links = self.settings.links.clone();
        let handle = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let asset_url = links.asset_url(event.token_id);
                tracing::info!(
                    sender = %event.sender,
                    token_id = %event.token_id,
                    url = %asset_url,
                    "Minted event received"
                );
                store.update(|s| s.asset_url = Some(asset_url));
            }
            tracing::debug!("Minted event stream ended");
        });

        self.listeners().push(handle);
        tracing::debug!(event = %self.descriptor.minted_event(), "Listening for minted events");
        true
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for WalletSession {
    fn drop(&mut self) {
        for handle in self.listeners().drain(..) {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("env", &self.env)
            .field("contract", &self.descriptor.address())
            .field("state", &self.store.snapshot())
            .finish()
    }
}
