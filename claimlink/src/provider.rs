// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! The capability the client needs from a wallet and a link SDK.
//!
//! Every chain interaction goes through [`LinkProvider`], so a wallet backed by a full node, a
//! browser extension or the in-process [`crate::local::LocalLedger`] can be swapped in without
//! touching the client.

use crate::{
    address::SuiAddress,
    amount::MistTokens,
    link::{ClaimableLink, LinkRequest},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Coin type of the native token.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Digest identifying a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxDigest(pub String);

impl fmt::Display for TxDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A link that will hold funds once the batch transaction is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLink {
    /// URL as produced by the link SDK, on the SDK's own host.
    pub url: Url,
    pub claimable: MistTokens,
}

/// A transaction built by the provider, not yet signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub sender: SuiAddress,
    /// Sum of every amount moved by the transaction.
    pub total: MistTokens,
    pub bytes: Vec<u8>,
}

/// Links plus the single transaction that funds all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBatch {
    pub links: Vec<PendingLink>,
    pub transaction: UnsignedTransaction,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("The wallet rejected the request: {0}")]
    Rejected(String),
    #[error("Insufficient balance: {required} SUI required, {available} SUI available")]
    InsufficientBalance {
        required: MistTokens,
        available: MistTokens,
    },
    #[error("Invalid claim link: {0}")]
    InvalidLink(String),
    #[error("Claim link not found: {0}")]
    LinkNotFound(String),
    #[error("Link has already been claimed")]
    AlreadyClaimed,
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Network error: {0}")]
    Rpc(String),
}

/// Wallet plus link SDK operations, as used by [`crate::Client`].
///
/// Calls are awaited one at a time by the client; implementations only need interior
/// mutability to be shared behind `&self`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkProvider: Send + Sync {
    /// The account currently connected in the wallet, if any.
    async fn connected_account(&self) -> Option<SuiAddress>;

    /// Native token balance of `address`.
    async fn query_balance(&self, address: SuiAddress) -> Result<MistTokens, ProviderError>;

    /// Creates the links and one unsigned transaction funding all of them.
    async fn build_link_batch(&self, requests: Vec<LinkRequest>)
        -> Result<LinkBatch, ProviderError>;

    /// Has the wallet sign the transaction, then executes it.
    async fn sign_and_submit(
        &self,
        transaction: UnsignedTransaction,
    ) -> Result<TxDigest, ProviderError>;

    /// Reconstructs a link from its URL and fetches what it holds.
    async fn resolve_link(&self, url: &Url) -> Result<ClaimableLink, ProviderError>;

    /// Moves everything held by `link` to `recipient`.
    async fn claim(
        &self,
        link: &ClaimableLink,
        recipient: SuiAddress,
    ) -> Result<TxDigest, ProviderError>;
}
