//! Mint contract client.
//!
//! # Responsibilities
//! - Submit the mint transaction from the authorized account
//! - Hand back a pending handle exposing the hash and a confirmation wait
//! - Deliver decoded minted events as a stream

use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use alloy::providers::Provider;
use alloy::rpc::types::{Filter, TransactionRequest};
use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::time::{interval, sleep};

use crate::blockchain::abi::ContractDescriptor;
use crate::blockchain::types::{ContractError, ContractResult, MintedEvent};

/// Stream of minted events. It ends only when the contract side goes away.
pub type MintedEvents = BoxStream<'static, MintedEvent>;

/// A submitted mint transaction awaiting confirmation.
#[async_trait]
pub trait PendingMint: Send {
    /// Transaction hash as a 0x-prefixed string.
    fn hash(&self) -> String;

    /// Wait until the transaction is included.
    async fn wait(self: Box<Self>) -> ContractResult<()>;
}

/// Contract client bound to one address, interface and sender.
#[async_trait]
pub trait MintContract: Send + Sync {
    /// Invoke the mint method.
    async fn mint(&self) -> ContractResult<Box<dyn PendingMint>>;

    /// Start listening for the minted event.
    async fn minted_events(&self) -> ContractResult<MintedEvents>;
}

/// Alloy-backed contract client.
pub struct OnchainMintContract {
    provider: Arc<dyn Provider + Send + Sync>,
    descriptor: ContractDescriptor,
    from: Address,
    poll_interval: Duration,
}

impl OnchainMintContract {
    pub fn new(
        provider: Arc<dyn Provider + Send + Sync>,
        descriptor: ContractDescriptor,
        from: Address,
        poll_interval: Duration,
    ) -> Self {
        Self {
            provider,
            descriptor,
            from,
            poll_interval,
        }
    }

    /// The mint call: from the bound account to the contract, no value.
    fn mint_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.from)
            .with_to(self.descriptor.address())
            .with_input(self.descriptor.mint_calldata())
    }
}

/// Receipt poller for a submitted mint.
struct OnchainPendingMint {
    provider: Arc<dyn Provider + Send + Sync>,
    tx_hash: TxHash,
    poll_interval: Duration,
}

#[async_trait]
impl PendingMint for OnchainPendingMint {
    fn hash(&self) -> String {
        self.tx_hash.to_string()
    }

    async fn wait(self: Box<Self>) -> ContractResult<()> {
        let mut ticker = interval(self.poll_interval);

        loop {
            ticker.tick().await;

            let receipt = match self
                .provider
                .get_transaction_receipt(self.tx_hash)
                .await
                .map_err(|e| ContractError::Confirmation(e.to_string()))?
            {
                Some(r) => r,
                None => {
                    tracing::debug!(tx_hash = %self.tx_hash, "Transaction pending");
                    continue;
                }
            };

            if !receipt.status() {
                return Err(ContractError::Reverted(self.hash()));
            }

            tracing::debug!(
                tx_hash = %self.tx_hash,
                block_number = ?receipt.block_number,
                "Mint transaction included"
            );
            return Ok(());
        }
    }
}

/// Log polling cursor for the minted event stream.
struct EventCursor {
    provider: Arc<dyn Provider + Send + Sync>,
    descriptor: ContractDescriptor,
    /// First block not yet scanned.
    next_block: u64,
    poll_interval: Duration,
}

impl EventCursor {
    /// Poll until at least one new minted event shows up.
    async fn next_batch(&mut self) -> Vec<MintedEvent> {
        loop {
            sleep(self.poll_interval).await;

            match self.poll().await {
                Ok(events) if !events.is_empty() => return events,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        event = %self.descriptor.minted_event(),
                        error = %e,
                        "Error polling minted events"
                    );
                }
            }
        }
    }

    async fn poll(&mut self) -> Result<Vec<MintedEvent>, Box<dyn std::error::Error + Send + Sync>> {
        let latest = self.provider.get_block_number().await?;
        if latest < self.next_block {
            return Ok(Vec::new());
        }

        let filter = Filter::new()
            .address(self.descriptor.address())
            .event_signature(self.descriptor.minted_topic())
            .from_block(self.next_block)
            .to_block(latest);

        let logs = self.provider.get_logs(&filter).await?;
        self.next_block = latest + 1;

        Ok(logs
            .iter()
            .filter_map(|log| {
                self.descriptor
                    .decode_minted(log.inner.data.topics(), &log.inner.data.data)
            })
            .collect())
    }
}

#[async_trait]
impl MintContract for OnchainMintContract {
    async fn mint(&self) -> ContractResult<Box<dyn PendingMint>> {
        let pending = self
            .provider
            .send_transaction(self.mint_request())
            .await
            .map_err(|e| ContractError::Submission(e.to_string()))?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(
            tx_hash = %tx_hash,
            function = %self.descriptor.mint_function(),
            "Mint transaction submitted"
        );
        Ok(Box::new(OnchainPendingMint {
            provider: self.provider.clone(),
            tx_hash,
            poll_interval: self.poll_interval,
        }))
    }

    async fn minted_events(&self) -> ContractResult<MintedEvents> {
        let head = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| ContractError::Subscription(e.to_string()))?;

        // Blocks up to the current head predate the subscription.
        let cursor = EventCursor {
            provider: self.provider.clone(),
            descriptor: self.descriptor.clone(),
            next_block: head + 1,
            poll_interval: self.poll_interval,
        };

        let batches = stream::unfold(cursor, |mut cursor| async move {
            let batch = cursor.next_batch().await;
            Some((batch, cursor))
        });
        Ok(batches.flat_map(stream::iter).boxed())
    }
}
