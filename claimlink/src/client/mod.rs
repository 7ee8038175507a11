// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

pub mod balance;
pub mod batch;
pub mod claim;

use crate::{
    address::SuiAddress,
    amount::MistTokens,
    error::{Error, Result},
    link::GeneratedLink,
    provider::{LinkProvider, SUI_COIN_TYPE},
};
use claim::{ClaimEvent, ClaimState};
use tokio::sync::mpsc;

/// Host used by the link SDK in the URLs it produces.
pub const DEFAULT_SDK_HOST: &str = "zksend.com";
/// Host the generated links are rebranded to.
pub const DEFAULT_PRODUCT_HOST: &str = "getstashed.com";
/// 0.1 SUI.
pub const DEFAULT_AMOUNT_PER_LINK: MistTokens = MistTokens::from_mist(100_000_000);
/// Fractional digits shown for the balance.
pub const DEFAULT_BALANCE_DECIMALS: usize = 5;

const CLAIM_EVENTS_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Links on this host are moved to `product_host`.
    pub sdk_host: String,
    pub product_host: String,
    /// Used when the amount entered by the user cannot be used.
    pub default_amount: MistTokens,
    /// Coin type whose balance is reported when a link is claimed.
    pub native_coin_type: String,
    pub balance_decimals: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sdk_host: DEFAULT_SDK_HOST.to_string(),
            product_host: DEFAULT_PRODUCT_HOST.to_string(),
            default_amount: DEFAULT_AMOUNT_PER_LINK,
            native_coin_type: SUI_COIN_TYPE.to_string(),
            balance_decimals: DEFAULT_BALANCE_DECIMALS,
        }
    }
}

/// Creates and redeems claim links on behalf of the connected wallet.
///
/// # Example
///
/// ```no_run
/// # use claimlink::{AmountPerLink, Client, ClientConfig, LinkCount, local::LocalLedger};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ledger = LocalLedger::new();
/// let mut client = Client::connect(ledger, ClientConfig::default()).await;
/// let amount = AmountPerLink::parse_or_default("0.1", client.config().default_amount);
/// let created = client.create_links(LinkCount::new(3), amount).await?;
/// for link in &created.links {
///     println!("{link}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client<P> {
    provider: P,
    config: ClientConfig,
    account: Option<SuiAddress>,
    balance: Option<MistTokens>,
    generated_links: Vec<GeneratedLink>,
    claim_state: ClaimState,
    claim_events: Option<mpsc::Sender<ClaimEvent>>,
}

impl<P: LinkProvider> Client<P> {
    /// Picks up the wallet's connected account, and its balance when there is one.
    ///
    /// A failing balance query is logged and leaves the balance unknown.
    pub async fn connect(provider: P, config: ClientConfig) -> Self {
        let mut client = Self {
            provider,
            config,
            account: None,
            balance: None,
            generated_links: vec![],
            claim_state: ClaimState::Idle,
            claim_events: None,
        };

        if let Some(account) = client.provider.connected_account().await {
            info!("Client connected with account {account}");
            client.account = Some(account);
            if let Err(err) = client.refresh_balance().await {
                warn!("Balance unavailable after connecting: {err}");
            }
        } else {
            info!("Client started without a connected wallet");
        }

        client
    }

    /// Receive a [`ClaimEvent`] for every step of [`Client::claim_links`].
    ///
    /// The channel is bounded, so the receiver must be drained while claiming.
    pub fn enable_claim_events(&mut self) -> mpsc::Receiver<ClaimEvent> {
        let (sender, receiver) = mpsc::channel(CLAIM_EVENTS_CAPACITY);
        self.claim_events = Some(sender);
        debug!("Claim events enabled");
        receiver
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The account seen during the last operation.
    pub fn account(&self) -> Option<SuiAddress> {
        self.account
    }

    /// Last known balance of the connected account.
    pub fn balance(&self) -> Option<MistTokens> {
        self.balance
    }

    /// Links created by the last successful batch.
    pub fn generated_links(&self) -> &[GeneratedLink] {
        &self.generated_links
    }

    pub fn claim_state(&self) -> &ClaimState {
        &self.claim_state
    }

    /// Asks the wallet which account is connected; a wallet that switched accounts or
    /// disconnected since the last call is picked up here.
    async fn require_account(&mut self) -> Result<SuiAddress> {
        let account = self.provider.connected_account().await;
        if account != self.account {
            debug!(
                "Connected account changed from {:?} to {account:?}",
                self.account
            );
            self.account = account;
            self.balance = None;
        }
        account.ok_or(Error::WalletNotConnected)
    }
}
