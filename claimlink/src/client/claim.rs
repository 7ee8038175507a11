// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use super::Client;
use crate::{
    address::SuiAddress,
    amount::MistTokens,
    error::Result,
    link::UploadedLinkList,
    provider::{LinkProvider, ProviderError, TxDigest},
};
use std::fmt;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimError {
    #[error("Invalid link URL: {0}")]
    InvalidUrl(String),
    #[error("Link has already been claimed")]
    AlreadyClaimed,
    #[error("link has no claimable assets")]
    NoAssets,
    #[error(transparent)]
    Provider(ProviderError),
}

impl From<ProviderError> for ClaimError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::AlreadyClaimed => Self::AlreadyClaimed,
            err => Self::Provider(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimResult {
    /// `amount` is the native balance the link held, zero for links holding other assets only.
    Claimed { amount: MistTokens, digest: TxDigest },
    Failed(ClaimError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOutcome {
    /// Position in the claimed list, zero based.
    pub index: usize,
    pub url: String,
    pub result: ClaimResult,
}

impl ClaimOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.result, ClaimResult::Claimed { .. })
    }
}

/// Every outcome of a bulk claim, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimReport {
    pub outcomes: Vec<ClaimOutcome>,
}

impl ClaimReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ClaimOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Native amount received over all claimed links.
    pub fn total_claimed(&self) -> MistTokens {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.result {
                ClaimResult::Claimed { amount, .. } => Some(*amount),
                ClaimResult::Failed(_) => None,
            })
            .fold(MistTokens::zero(), |total, amount| {
                total.checked_add(amount).unwrap_or(total)
            })
    }

    pub fn summary(&self) -> String {
        format!(
            "{} out of {} links claimed successfully",
            self.succeeded(),
            self.total()
        )
    }
}

impl fmt::Display for ClaimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClaimState {
    #[default]
    Idle,
    Running {
        processed: usize,
        total: usize,
    },
    Completed(ClaimReport),
}

/// Progress of [`Client::claim_links`]. `index` is zero based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimEvent {
    Attempting {
        index: usize,
        total: usize,
        url: String,
    },
    Claimed {
        index: usize,
        url: String,
        amount: MistTokens,
    },
    Failed {
        index: usize,
        url: String,
        error: ClaimError,
    },
    Completed {
        succeeded: usize,
        total: usize,
    },
}

impl<P: LinkProvider> Client<P> {
    /// Claims every link of `list` to the connected account, one after the other.
    ///
    /// A link that fails is recorded and the next one is attempted; only a missing wallet
    /// stops the run, before any link is touched.
    pub async fn claim_links(&mut self, list: &UploadedLinkList) -> Result<ClaimReport> {
        let recipient = self.require_account().await?;
        let total = list.len();
        info!("Claiming {total} links to {recipient}");

        self.claim_state = ClaimState::Running {
            processed: 0,
            total,
        };
        let mut report = ClaimReport::default();

        for (index, url) in list.iter().enumerate() {
            self.send_claim_event(ClaimEvent::Attempting {
                index,
                total,
                url: url.to_string(),
            })
            .await;

            let result = match self.claim_one(url, recipient).await {
                Ok((amount, digest)) => {
                    info!("Claimed link {} of {total} for {amount} SUI", index + 1);
                    self.send_claim_event(ClaimEvent::Claimed {
                        index,
                        url: url.to_string(),
                        amount,
                    })
                    .await;
                    ClaimResult::Claimed { amount, digest }
                }
                Err(error) => {
                    warn!("Failed to claim link {} of {total}: {error}", index + 1);
                    self.send_claim_event(ClaimEvent::Failed {
                        index,
                        url: url.to_string(),
                        error: error.clone(),
                    })
                    .await;
                    ClaimResult::Failed(error)
                }
            };
            report.outcomes.push(ClaimOutcome {
                index,
                url: url.to_string(),
                result,
            });
            self.claim_state = ClaimState::Running {
                processed: index + 1,
                total,
            };
        }

        info!("{}", report.summary());
        self.send_claim_event(ClaimEvent::Completed {
            succeeded: report.succeeded(),
            total,
        })
        .await;
        self.claim_state = ClaimState::Completed(report.clone());

        if let Err(err) = self.refresh_balance().await {
            warn!("Links claimed but the balance could not be refreshed: {err}");
        }
        Ok(report)
    }

    async fn claim_one(
        &self,
        url: &str,
        recipient: SuiAddress,
    ) -> std::result::Result<(MistTokens, TxDigest), ClaimError> {
        let url = Url::parse(url).map_err(|err| ClaimError::InvalidUrl(format!("{url}: {err}")))?;
        let link = self.provider.resolve_link(&url).await?;

        if link.claimed {
            return Err(ClaimError::AlreadyClaimed);
        }
        if link.assets.is_empty() {
            return Err(ClaimError::NoAssets);
        }
        let amount = link
            .balance_of(&self.config.native_coin_type)
            .unwrap_or_default();
        if amount.is_zero() {
            debug!("Link {url} holds no native balance, claiming its other assets");
        }

        let digest = self.provider.claim(&link, recipient).await?;
        Ok((amount, digest))
    }

    async fn send_claim_event(&self, event: ClaimEvent) {
        if let Some(channel) = self.claim_events.as_ref() {
            if let Err(err) = channel.send(event).await {
                error!("Failed to send claim event: {err:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::ClientConfig,
        error::Error,
        link::{AssetBalance, ClaimableLink},
        provider::{MockLinkProvider, SUI_COIN_TYPE},
    };
    use eyre::Result;
    use proptest::prelude::*;

    const RECIPIENT: SuiAddress = SuiAddress::from_bytes([0xc1; SuiAddress::LENGTH]);

    fn sui(amount: u64) -> Vec<AssetBalance> {
        vec![AssetBalance {
            coin_type: SUI_COIN_TYPE.to_string(),
            amount: MistTokens::from_mist(amount),
        }]
    }

    /// Resolves links by their fragment: `$ok<amount>`, `$gone`, `$empty`, `$token`, anything
    /// else is unknown.
    fn scripted_provider() -> MockLinkProvider {
        let mut provider = MockLinkProvider::new();
        let _ = provider
            .expect_connected_account()
            .returning(|| Some(RECIPIENT));
        let _ = provider
            .expect_query_balance()
            .returning(|_| Ok(MistTokens::zero()));
        let _ = provider.expect_resolve_link().returning(|url| {
            let fragment = url.fragment().unwrap_or_default();
            let (assets, claimed) = if let Some(amount) = fragment.strip_prefix("$ok") {
                let amount = amount
                    .parse::<u64>()
                    .map_err(|_| ProviderError::InvalidLink(url.to_string()))?;
                (sui(amount), false)
            } else if fragment == "$gone" {
                (vec![], true)
            } else if fragment == "$empty" {
                (vec![], false)
            } else if fragment == "$token" {
                (
                    vec![AssetBalance {
                        coin_type: "0xabc::usdc::USDC".to_string(),
                        amount: MistTokens::from_mist(5),
                    }],
                    false,
                )
            } else {
                return Err(ProviderError::LinkNotFound(url.to_string()));
            };
            Ok(ClaimableLink {
                url: url.clone(),
                sender: None,
                assets,
                claimed,
            })
        });
        let _ = provider
            .expect_claim()
            .withf(|_, recipient| *recipient == RECIPIENT)
            .returning(|link, _| Ok(TxDigest(format!("tx-{}", link.url))));
        provider
    }

    #[tokio::test]
    async fn outcomes_follow_input_order_and_failures_are_isolated() -> Result<()> {
        let list = UploadedLinkList::parse(
            "https://getstashed.com/claim#$ok100\n\
             not a url\n\
             https://getstashed.com/claim#$unknown\n\
             https://getstashed.com/claim#$gone\n\
             https://getstashed.com/claim#$empty\n\
             https://zksend.com/claim#$ok250\n",
        );
        let mut client = Client::connect(scripted_provider(), ClientConfig::default()).await;
        let report = client.claim_links(&list).await?;

        assert_eq!(report.total(), 6);
        let urls: Vec<&str> = report.outcomes.iter().map(|o| o.url.as_str()).collect();
        assert_eq!(urls, list.iter().collect::<Vec<_>>());

        let results: Vec<&ClaimResult> = report.outcomes.iter().map(|o| &o.result).collect();
        assert!(matches!(results[0], ClaimResult::Claimed { amount, .. } if amount.as_mist() == 100));
        assert!(matches!(
            results[1],
            ClaimResult::Failed(ClaimError::InvalidUrl(_))
        ));
        assert!(matches!(
            results[2],
            ClaimResult::Failed(ClaimError::Provider(ProviderError::LinkNotFound(_)))
        ));
        assert_eq!(results[3], &ClaimResult::Failed(ClaimError::AlreadyClaimed));
        assert_eq!(results[4], &ClaimResult::Failed(ClaimError::NoAssets));
        assert!(matches!(results[5], ClaimResult::Claimed { amount, .. } if amount.as_mist() == 250));

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failures().count(), 4);
        assert_eq!(report.total_claimed(), MistTokens::from_mist(350));
        assert_eq!(report.summary(), "2 out of 6 links claimed successfully");
        assert_eq!(client.claim_state(), &ClaimState::Completed(report));
        Ok(())
    }

    proptest! {
        #[test]
        fn one_bad_link_fails_alone_and_order_is_kept(
            amounts in prop::collection::vec(1u64..1_000_000, 1..20),
            bad in any::<prop::sample::Index>(),
        ) {
            let bad = bad.index(amounts.len());
            let urls: Vec<String> = amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| {
                    if i == bad {
                        "getstashed.com/claim#$ok1".to_string()
                    } else {
                        format!("https://getstashed.com/claim#$ok{amount}")
                    }
                })
                .collect();
            let list: UploadedLinkList = urls.iter().cloned().collect();

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let report = runtime.block_on(async {
                let mut client =
                    Client::connect(scripted_provider(), ClientConfig::default()).await;
                client.claim_links(&list).await
            })?;

            prop_assert_eq!(report.total(), urls.len());
            prop_assert_eq!(report.succeeded(), urls.len() - 1);
            for (i, outcome) in report.outcomes.iter().enumerate() {
                prop_assert_eq!(outcome.index, i);
                prop_assert_eq!(&outcome.url, &urls[i]);
                if i == bad {
                    prop_assert!(matches!(
                        outcome.result,
                        ClaimResult::Failed(ClaimError::InvalidUrl(_))
                    ));
                } else {
                    let claimed_expected = matches!(
                        outcome.result,
                        ClaimResult::Claimed { amount, .. } if amount.as_mist() == amounts[i]
                    );
                    prop_assert!(claimed_expected);
                }
            }
        }
    }

    #[tokio::test]
    async fn links_with_only_other_assets_are_claimed_for_zero() -> Result<()> {
        let list = UploadedLinkList::parse("https://getstashed.com/claim#$token");
        let mut client = Client::connect(scripted_provider(), ClientConfig::default()).await;
        let report = client.claim_links(&list).await?;

        assert_eq!(report.succeeded(), 1);
        assert!(matches!(
            &report.outcomes[0].result,
            ClaimResult::Claimed { amount, .. } if amount.is_zero()
        ));
        Ok(())
    }

    #[tokio::test]
    async fn events_are_sent_for_every_step() -> Result<()> {
        let list = UploadedLinkList::parse(
            "https://getstashed.com/claim#$ok1\nhttps://getstashed.com/claim#$gone",
        );
        let mut client = Client::connect(scripted_provider(), ClientConfig::default()).await;
        let mut events = client.enable_claim_events();
        let _report = client.claim_links(&list).await?;
        drop(client);

        let mut received = vec![];
        while let Some(event) = events.recv().await {
            received.push(event);
        }

        assert_eq!(received.len(), 5);
        assert!(matches!(
            &received[0],
            ClaimEvent::Attempting { index: 0, total: 2, .. }
        ));
        assert!(matches!(
            &received[1],
            ClaimEvent::Claimed { index: 0, amount, .. } if amount.as_mist() == 1
        ));
        assert!(matches!(
            &received[2],
            ClaimEvent::Attempting { index: 1, total: 2, .. }
        ));
        assert!(matches!(
            &received[3],
            ClaimEvent::Failed { index: 1, error: ClaimError::AlreadyClaimed, .. }
        ));
        assert_eq!(
            received[4],
            ClaimEvent::Completed {
                succeeded: 1,
                total: 2
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn claiming_needs_a_wallet() {
        let mut provider = MockLinkProvider::new();
        let _ = provider.expect_connected_account().returning(|| None);
        let _ = provider.expect_resolve_link().never();
        let _ = provider.expect_claim().never();

        let mut client = Client::connect(provider, ClientConfig::default()).await;
        let list = UploadedLinkList::parse("https://getstashed.com/claim#$ok1");
        assert!(matches!(
            client.claim_links(&list).await,
            Err(Error::WalletNotConnected)
        ));
        assert_eq!(client.claim_state(), &ClaimState::Idle);
    }
}
