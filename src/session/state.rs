//! Session state and its derived phase.
//!
//! # States
//! ```text
//! Unconnected → Connecting → Connected → Minting → Minted
//!      ▲             │
//!      └── error ────┘
//! ```
//! `Minted` absorbs the late asset link without changing phase. `Minting`
//! has no way back: a failed submission leaves the mining flag set.

/// Observable state of one wallet session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// A wallet provider was found at load.
    pub wallet_present: bool,
    /// Account currently authorized for this session.
    pub current_account: Option<String>,
    /// An explicit connect request is in flight.
    pub connecting: bool,
    /// A mint transaction is between submission and confirmation.
    pub mining: bool,
    /// Explorer link of the confirmed mint transaction.
    pub transaction_url: Option<String>,
    /// Marketplace link of the minted asset.
    pub asset_url: Option<String>,
    /// Last user-facing error.
    pub error: Option<String>,
}

/// Coarse lifecycle phase derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unconnected,
    Connecting,
    Connected,
    Minting,
    Minted,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.mining {
            SessionPhase::Minting
        } else if self.transaction_url.is_some() {
            SessionPhase::Minted
        } else if self.current_account.is_some() {
            SessionPhase::Connected
        } else if self.connecting {
            SessionPhase::Connecting
        } else {
            SessionPhase::Unconnected
        }
    }

    /// Whether a mint may be submitted right now.
    pub fn can_mint(&self) -> bool {
        self.current_account.is_some() && !self.mining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_progression() {
        let mut state = SessionState::default();
        assert_eq!(state.phase(), SessionPhase::Unconnected);

        state.connecting = true;
        assert_eq!(state.phase(), SessionPhase::Connecting);

        state.connecting = false;
        state.current_account = Some("0xABC".to_string());
        assert_eq!(state.phase(), SessionPhase::Connected);

        state.mining = true;
        assert_eq!(state.phase(), SessionPhase::Minting);

        state.mining = false;
        state.transaction_url = Some("https://rinkeby.etherscan.io/tx/0x1".to_string());
        assert_eq!(state.phase(), SessionPhase::Minted);

        state.asset_url = Some("https://testnets.opensea.io/assets/0x5/1".to_string());
        assert_eq!(state.phase(), SessionPhase::Minted);
    }

    #[test]
    fn test_can_mint() {
        let mut state = SessionState::default();
        assert!(!state.can_mint());

        state.current_account = Some("0xABC".to_string());
        assert!(state.can_mint());

        state.mining = true;
        assert!(!state.can_mint());
    }
}
