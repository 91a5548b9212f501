//! Page environment injected into a session.

use std::sync::Arc;

use crate::blockchain::WalletProvider;

/// What the hosting environment exposes to the session.
#[derive(Clone, Default)]
pub struct Environment {
    provider: Option<Arc<dyn WalletProvider>>,
}

impl Environment {
    /// Environment with an injected wallet provider.
    pub fn with_provider(provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Environment without any wallet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn wallet_provider(&self) -> Option<Arc<dyn WalletProvider>> {
        self.provider.clone()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}
