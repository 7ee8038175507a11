// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! An in-process ledger implementing [`LinkProvider`].
//!
//! It keeps accounts, links and the connected wallet in memory. The state is serde serialisable
//! so a front end can persist it between runs.

mod state;

pub use state::{LedgerState, LinkRecord};

use crate::{
    address::SuiAddress,
    amount::MistTokens,
    client::DEFAULT_SDK_HOST,
    link::{AssetBalance, ClaimableLink, LinkRequest},
    provider::{
        LinkBatch, LinkProvider, PendingLink, ProviderError, TxDigest, UnsignedTransaction,
        SUI_COIN_TYPE,
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use url::Url;

const CLAIM_PATH: &str = "/claim";
const SECRET_PREFIX: char = '$';
const SECRET_LEN: usize = 32;

/// What gets signed when a batch is submitted.
#[derive(Debug, Serialize, Deserialize)]
struct BatchPayload {
    links: Vec<(String, MistTokens)>,
}

pub struct LocalLedger {
    state: Mutex<LedgerState>,
}

impl Default for LocalLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalLedger {
    /// An empty ledger handing out links on the link SDK's default host.
    pub fn new() -> Self {
        Self::from_state(LedgerState::new(DEFAULT_SDK_HOST))
    }

    pub fn from_state(state: LedgerState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// A snapshot of the whole ledger.
    pub async fn state(&self) -> LedgerState {
        self.state.lock().await.clone()
    }

    /// Creates an account with a zero balance and returns its address.
    pub async fn generate_account(&self) -> SuiAddress {
        let address = SuiAddress::random();
        let mut state = self.state.lock().await;
        let _ = state.accounts.entry(address).or_default();
        info!("Generated local account {address}");
        address
    }

    /// Connects the wallet to `address`, creating the account if it is unknown.
    pub async fn connect(&self, address: SuiAddress) {
        let mut state = self.state.lock().await;
        let _ = state.accounts.entry(address).or_default();
        state.connected = Some(address);
        info!("Connected local wallet to {address}");
    }

    pub async fn disconnect(&self) {
        let mut state = self.state.lock().await;
        if let Some(address) = state.connected.take() {
            info!("Disconnected local wallet from {address}");
        }
    }

    /// Credits `amount` to `address` out of thin air and returns the new balance.
    pub async fn fund(
        &self,
        address: SuiAddress,
        amount: MistTokens,
    ) -> Result<MistTokens, ProviderError> {
        let mut state = self.state.lock().await;
        let balance = state.accounts.entry(address).or_default();
        let new_balance = balance.checked_add(amount).ok_or_else(|| {
            ProviderError::InvalidTransaction("balance would overflow".to_string())
        })?;
        *balance = new_balance;
        debug!("Funded {address} with {amount}, balance is now {new_balance}");
        Ok(new_balance)
    }
}

#[async_trait]
impl LinkProvider for LocalLedger {
    async fn connected_account(&self) -> Option<SuiAddress> {
        self.state.lock().await.connected
    }

    async fn query_balance(&self, address: SuiAddress) -> Result<MistTokens, ProviderError> {
        let state = self.state.lock().await;
        Ok(state.accounts.get(&address).copied().unwrap_or_default())
    }

    async fn build_link_batch(
        &self,
        requests: Vec<LinkRequest>,
    ) -> Result<LinkBatch, ProviderError> {
        let sender = match requests.first() {
            Some(request) => request.sender,
            None => {
                return Err(ProviderError::InvalidTransaction(
                    "a batch needs at least one link".to_string(),
                ))
            }
        };
        if requests.iter().any(|request| request.sender != sender) {
            return Err(ProviderError::InvalidTransaction(
                "every link of a batch must share one sender".to_string(),
            ));
        }

        let sdk_host = self.state.lock().await.sdk_host.clone();

        let mut total = MistTokens::zero();
        let mut links = Vec::with_capacity(requests.len());
        let mut payload = BatchPayload {
            links: Vec::with_capacity(requests.len()),
        };
        for request in &requests {
            total = total.checked_add(request.claimable).ok_or_else(|| {
                ProviderError::InvalidTransaction("batch total would overflow".to_string())
            })?;

            let secret = hex::encode(rand::random::<[u8; SECRET_LEN]>());
            links.push(PendingLink {
                url: link_url(&sdk_host, &secret)?,
                claimable: request.claimable,
            });
            payload.links.push((secret, request.claimable));
        }

        let bytes = serde_json::to_vec(&payload)
            .map_err(|err| ProviderError::InvalidTransaction(err.to_string()))?;
        debug!(
            "Built a batch of {} links from {sender}, moving {total} SUI",
            links.len()
        );

        Ok(LinkBatch {
            links,
            transaction: UnsignedTransaction {
                sender,
                total,
                bytes,
            },
        })
    }

    async fn sign_and_submit(
        &self,
        transaction: UnsignedTransaction,
    ) -> Result<TxDigest, ProviderError> {
        let payload: BatchPayload = serde_json::from_slice(&transaction.bytes)
            .map_err(|err| ProviderError::InvalidTransaction(err.to_string()))?;

        let mut state = self.state.lock().await;
        if state.connected != Some(transaction.sender) {
            return Err(ProviderError::Rejected(format!(
                "{} is not the connected account",
                transaction.sender
            )));
        }

        let mut total = MistTokens::zero();
        for (secret, amount) in &payload.links {
            if state.links.contains_key(secret) {
                return Err(ProviderError::InvalidTransaction(
                    "transaction has already been executed".to_string(),
                ));
            }
            total = total.checked_add(*amount).ok_or_else(|| {
                ProviderError::InvalidTransaction("batch total would overflow".to_string())
            })?;
        }
        if total != transaction.total {
            return Err(ProviderError::InvalidTransaction(format!(
                "declared total {} does not match the links total {total}",
                transaction.total
            )));
        }

        let available = state
            .accounts
            .get(&transaction.sender)
            .copied()
            .unwrap_or_default();
        let remaining = available
            .checked_sub(total)
            .ok_or(ProviderError::InsufficientBalance {
                required: total,
                available,
            })?;

        // Nothing has been touched before this point, so a failed check leaves the ledger as is.
        let _ = state.accounts.insert(transaction.sender, remaining);
        for (secret, amount) in payload.links {
            let _ = state.links.insert(
                secret,
                LinkRecord {
                    sender: transaction.sender,
                    amount,
                    claimed_by: None,
                },
            );
        }
        let digest = state.next_digest();
        info!(
            "Executed batch {digest}: {total} SUI moved from {}",
            transaction.sender
        );
        Ok(digest)
    }

    async fn resolve_link(&self, url: &Url) -> Result<ClaimableLink, ProviderError> {
        let secret = secret_from_url(url)?;
        let state = self.state.lock().await;
        let record = state
            .links
            .get(&secret)
            .ok_or_else(|| ProviderError::LinkNotFound(url.to_string()))?;

        let claimed = record.claimed_by.is_some();
        let assets = if claimed {
            vec![]
        } else {
            vec![AssetBalance {
                coin_type: SUI_COIN_TYPE.to_string(),
                amount: record.amount,
            }]
        };

        Ok(ClaimableLink {
            url: url.clone(),
            sender: Some(record.sender),
            assets,
            claimed,
        })
    }

    async fn claim(
        &self,
        link: &ClaimableLink,
        recipient: SuiAddress,
    ) -> Result<TxDigest, ProviderError> {
        let secret = secret_from_url(&link.url)?;
        let mut state = self.state.lock().await;

        let amount = match state.links.get(&secret) {
            None => return Err(ProviderError::LinkNotFound(link.url.to_string())),
            Some(record) if record.claimed_by.is_some() => {
                return Err(ProviderError::AlreadyClaimed)
            }
            Some(record) => record.amount,
        };

        let balance = state.accounts.entry(recipient).or_default();
        *balance = balance.checked_add(amount).ok_or_else(|| {
            ProviderError::InvalidTransaction("balance would overflow".to_string())
        })?;
        if let Some(record) = state.links.get_mut(&secret) {
            record.claimed_by = Some(recipient);
        }

        let digest = state.next_digest();
        debug!("Link claimed by {recipient} for {amount} SUI in {digest}");
        Ok(digest)
    }
}

fn link_url(host: &str, secret: &str) -> Result<Url, ProviderError> {
    Url::parse(&format!("https://{host}{CLAIM_PATH}#{SECRET_PREFIX}{secret}"))
        .map_err(|err| ProviderError::InvalidLink(format!("{host}: {err}")))
}

/// The host is ignored: links are valid whatever host they were rebranded to.
fn secret_from_url(url: &Url) -> Result<String, ProviderError> {
    let invalid = || ProviderError::InvalidLink(url.to_string());

    if url.path() != CLAIM_PATH {
        return Err(invalid());
    }
    let secret = url
        .fragment()
        .and_then(|fragment| fragment.strip_prefix(SECRET_PREFIX))
        .ok_or_else(invalid)?;

    let mut bytes = [0u8; SECRET_LEN];
    hex::decode_to_slice(secret, &mut bytes).map_err(|_| invalid())?;
    Ok(hex::encode(bytes))
}
