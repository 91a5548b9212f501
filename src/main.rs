//! Epic NFT mint front-end.
//!
//! # Architecture Overview
//!
//! ```text
//!   mint.toml ──▶ config ──▶ ContractDescriptor (ABI artifact)
//!                     │
//!                     ▼
//!   RpcWalletProvider ──▶ Environment ──▶ WalletSession ──▶ StateStore ──▶ View (stdout)
//!         │                                    │
//!         └──── OnchainMintContract ◀──────────┘
//!               (mint tx, minted events)
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use epic_nft_mint::blockchain::{ContractDescriptor, LocalSigner, RpcWalletProvider};
use epic_nft_mint::config::load_config;
use epic_nft_mint::observability::{init_logging, BOOTSTRAP_LEVEL};
use epic_nft_mint::session::{
    ConsoleNotifier, Environment, MintOutcome, SessionSettings, View, WalletSession,
};

#[derive(Parser)]
#[command(name = "epic-nft-mint")]
#[command(about = "Connect a wallet and mint an Epic NFT", long_about = None)]
struct Cli {
    /// Path to the TOML configuration.
    #[arg(short, long, default_value = "mint.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the wallet and show the current panel
    Status,
    /// Authorize an account and check the network
    Connect,
    /// Mint a token and wait for its marketplace link
    Mint,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let logging = init_logging(BOOTSTRAP_LEVEL);
    let config = load_config(&cli.config)?;
    logging.set_level(&config.observability.log_level);

    tracing::info!(
        network = %config.network.name,
        rpc_url = %config.network.rpc_url,
        "Starting mint session"
    );

    let descriptor = ContractDescriptor::load(&config.contract).await?;
    let provider = RpcWalletProvider::new(
        &config.network.rpc_url,
        LocalSigner::from_env()?,
        Duration::from_millis(config.contract.event_poll_interval_ms),
    )?;

    let session = WalletSession::new(
        Environment::with_provider(Arc::new(provider)),
        descriptor,
        SessionSettings::from_config(&config),
        Arc::new(ConsoleNotifier),
    );
    session.load().await;

    match cli.command {
        Commands::Status => print_view(&session),
        Commands::Connect => {
            if session.state().current_account.is_none() {
                session.connect().await;
            } else {
                session.verify_network().await;
            }
            print_view(&session);
        }
        Commands::Mint => {
            if session.state().current_account.is_none() {
                session.connect().await;
            }

            match session.submit_mint().await? {
                MintOutcome::Confirmed { transaction_url } => {
                    tracing::debug!(url = %transaction_url, "Mint confirmed");
                }
                MintOutcome::Stalled => {
                    tracing::debug!("Mint stalled, staying on the mining panel");
                }
            }
            print_view(&session);

            let mut updates = session.store().subscribe();
            let minted = tokio::select! {
                res = updates.wait_for(|s| s.asset_url.is_some()) => res.is_ok(),
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    false
                }
            };
            if minted {
                print_view(&session);
            }
        }
    }

    Ok(())
}

fn print_view(session: &WalletSession) {
    println!("{}", View::from_state(&session.state()));
}
