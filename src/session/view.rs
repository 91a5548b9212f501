//! Rendering of session state into what the user sees.

use crate::session::state::SessionState;

/// The single visible panel of the mint page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// No wallet provider: ask the user to install one.
    InstallPrompt,
    /// Wallet present but not authorized, with the last connect error.
    ConnectButton { error: Option<String> },
    /// Authorized and idle.
    MintButton { account: String },
    /// Waiting for the mint transaction to be mined.
    Mining,
    /// Mint confirmed; the asset link may still be pending.
    Success {
        transaction_url: String,
        asset_url: Option<String>,
    },
}

impl View {
    pub fn from_state(state: &SessionState) -> Self {
        if !state.wallet_present {
            return View::InstallPrompt;
        }

        match (&state.current_account, state.mining, &state.transaction_url) {
            (None, _, _) => View::ConnectButton {
                error: state.error.clone(),
            },
            (Some(_), true, _) => View::Mining,
            (Some(_), false, Some(tx)) => View::Success {
                transaction_url: tx.clone(),
                asset_url: state.asset_url.clone(),
            },
            (Some(account), false, None) => View::MintButton {
                account: account.clone(),
            },
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::InstallPrompt => {
                writeln!(f, "You need to install Metamask to use this app.")?;
                write!(f, "[ Install metamask ]")
            }
            View::ConnectButton { error } => {
                if let Some(error) = error {
                    writeln!(f, "{}", error)?;
                }
                write!(f, "[ Connect to Wallet ]")
            }
            View::MintButton { account } => {
                writeln!(f, "Connected as {}", account)?;
                write!(f, "[ Mint NFT ]")
            }
            View::Mining => write!(f, "Mining... please wait."),
            View::Success {
                transaction_url,
                asset_url,
            } => {
                writeln!(f, "Your NFT has been minted!")?;
                writeln!(f, "Transaction: {}", transaction_url)?;
                match asset_url {
                    Some(url) => write!(f, "View on marketplace: {}", url),
                    None => write!(f, "Waiting for the token id..."),
                }
            }
        }
    }
}
