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
    error::{Error, Result},
    input::{AmountPerLink, LinkCount},
    link::{GeneratedLink, LinkRequest},
    provider::{LinkProvider, PendingLink, ProviderError, TxDigest},
};

/// Result of a successful batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLinks {
    pub digest: TxDigest,
    pub links: Vec<GeneratedLink>,
    pub per_link: MistTokens,
}

/// One request per link, all paid by `sender`.
pub fn build_link_requests(
    sender: SuiAddress,
    count: LinkCount,
    amount: AmountPerLink,
) -> Vec<LinkRequest> {
    (0..count.get())
        .map(|_| LinkRequest {
            sender,
            claimable: amount.mist(),
        })
        .collect()
}

impl<P: LinkProvider> Client<P> {
    /// Funds `count` links of `amount` each in a single transaction.
    ///
    /// Links from an earlier batch stay in place when this fails. The balance is refreshed
    /// afterwards, a failure to do so being only logged.
    pub async fn create_links(
        &mut self,
        count: LinkCount,
        amount: AmountPerLink,
    ) -> Result<CreatedLinks> {
        let sender = self.require_account().await?;
        let requests = build_link_requests(sender, count, amount);
        info!(
            "Creating {count} links of {} SUI from {sender}",
            amount.mist()
        );

        let batch = self
            .provider
            .build_link_batch(requests)
            .await
            .map_err(|err| {
                error!("Failed to build the link batch: {err}");
                Error::LinkCreation(err)
            })?;

        // Rebranding happens before submission, so a bad host never costs any funds.
        let links = batch
            .links
            .iter()
            .map(|link| self.rebrand(link))
            .collect::<Result<Vec<_>>>()?;

        let digest = self
            .provider
            .sign_and_submit(batch.transaction)
            .await
            .map_err(|err| {
                error!("Failed to submit the link batch: {err}");
                Error::LinkCreation(err)
            })?;
        info!("Created {} links in transaction {digest}", links.len());

        self.generated_links = links.clone();
        if let Err(err) = self.refresh_balance().await {
            warn!("Links created but the balance could not be refreshed: {err}");
        }

        Ok(CreatedLinks {
            digest,
            links,
            per_link: amount.mist(),
        })
    }

    /// Moves a link from the SDK host, or one of its subdomains, onto the product host.
    fn rebrand(&self, link: &PendingLink) -> Result<GeneratedLink> {
        let Some(product_host) = link.url.host_str().and_then(|host| {
            rebranded_host(host, &self.config.sdk_host, &self.config.product_host)
        }) else {
            warn!(
                "Link host {:?} is not {}, keeping it as is",
                link.url.host_str(),
                self.config.sdk_host
            );
            return Ok(GeneratedLink {
                url: link.url.clone(),
            });
        };

        GeneratedLink::from_sdk_url(link.url.clone(), &product_host).map_err(|err| {
            error!("Cannot move links to host {product_host:?}: {err}");
            Error::LinkCreation(ProviderError::InvalidLink(format!(
                "{product_host}: {err}"
            )))
        })
    }
}

/// `zksend.com` becomes `getstashed.com` and `www.zksend.com` becomes `www.getstashed.com`.
/// Hosts outside the SDK domain give `None`.
fn rebranded_host(host: &str, sdk_host: &str, product_host: &str) -> Option<String> {
    if host == sdk_host {
        return Some(product_host.to_string());
    }
    host.strip_suffix(sdk_host)
        .filter(|prefix| prefix.ends_with('.'))
        .map(|prefix| format!("{prefix}{product_host}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::ClientConfig,
        provider::{LinkBatch, MockLinkProvider, UnsignedTransaction},
    };
    use eyre::Result;
    use proptest::prelude::*;
    use url::Url;

    const SENDER: SuiAddress = SuiAddress::from_bytes([0x5e; SuiAddress::LENGTH]);

    fn batch_for(requests: &[LinkRequest]) -> std::result::Result<LinkBatch, ProviderError> {
        let links = requests
            .iter()
            .enumerate()
            .map(|(i, request)| {
                Url::parse(&format!("https://zksend.com/claim#${i:064x}"))
                    .map(|url| PendingLink {
                        url,
                        claimable: request.claimable,
                    })
                    .map_err(|err| ProviderError::InvalidLink(err.to_string()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let total = requests
            .iter()
            .map(|request| request.claimable.as_mist())
            .sum::<u64>();
        Ok(LinkBatch {
            links,
            transaction: UnsignedTransaction {
                sender: SENDER,
                total: MistTokens::from_mist(total),
                bytes: vec![],
            },
        })
    }

    fn connected_provider() -> MockLinkProvider {
        let mut provider = MockLinkProvider::new();
        let _ = provider
            .expect_connected_account()
            .returning(|| Some(SENDER));
        let _ = provider
            .expect_query_balance()
            .returning(|_| Ok(MistTokens::from_mist(10_000_000_000)));
        provider
    }

    #[test]
    fn requests_are_clamped_and_share_the_amount() {
        let amount = AmountPerLink::new(MistTokens::from_mist(7));
        assert_eq!(
            build_link_requests(SENDER, LinkCount::new(250), amount).len(),
            100
        );
        let requests = build_link_requests(SENDER, LinkCount::parse_lenient("4"), amount);
        assert_eq!(requests.len(), 4);
        assert!(requests
            .iter()
            .all(|request| request.sender == SENDER && request.claimable.as_mist() == 7));
    }

    proptest! {
        #[test]
        fn one_request_per_link_up_to_the_maximum(
            requested in 1usize..10_000,
            mist in any::<u64>(),
        ) {
            let amount = AmountPerLink::new(MistTokens::from_mist(mist));
            let requests = build_link_requests(SENDER, LinkCount::new(requested), amount);
            prop_assert_eq!(requests.len(), requested.min(crate::input::MAX_LINKS));
            prop_assert!(requests.iter().all(|request| request.claimable.as_mist() == mist));
        }
    }

    #[tokio::test]
    async fn three_links_are_funded_by_one_transaction() -> Result<()> {
        let mut provider = connected_provider();
        let _ = provider
            .expect_build_link_batch()
            .times(1)
            .withf(|requests| {
                requests.len() == 3
                    && requests
                        .iter()
                        .all(|request| request.claimable.as_mist() == 100_000_000)
            })
            .returning(|requests| batch_for(&requests));
        let _ = provider
            .expect_sign_and_submit()
            .times(1)
            .withf(|tx| tx.total.as_mist() == 300_000_000)
            .returning(|_| Ok(TxDigest("0xd1".to_string())));

        let mut client = Client::connect(provider, ClientConfig::default()).await;
        let amount = AmountPerLink::parse_or_default("0.1", client.config().default_amount);
        let created = client.create_links(LinkCount::new(3), amount).await?;

        assert_eq!(created.digest, TxDigest("0xd1".to_string()));
        assert_eq!(created.per_link, MistTokens::from_mist(100_000_000));
        assert_eq!(created.links.len(), 3);
        for link in &created.links {
            assert_eq!(link.url.host_str(), Some("getstashed.com"));
            assert!(link.as_str().starts_with("https://getstashed.com/claim#$"));
        }
        assert_eq!(client.generated_links(), created.links.as_slice());
        Ok(())
    }

    #[tokio::test]
    async fn failed_submission_keeps_previous_links() -> Result<()> {
        let mut provider = connected_provider();
        let _ = provider
            .expect_build_link_batch()
            .times(2)
            .returning(|requests| batch_for(&requests));
        let mut seq = mockall::Sequence::new();
        let _ = provider
            .expect_sign_and_submit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(TxDigest("0x01".to_string())));
        let _ = provider
            .expect_sign_and_submit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(ProviderError::InsufficientBalance {
                    required: MistTokens::from_mist(2),
                    available: MistTokens::from_mist(1),
                })
            });

        let mut client = Client::connect(provider, ClientConfig::default()).await;
        let amount = AmountPerLink::new(MistTokens::from_mist(1));
        let first = client.create_links(LinkCount::new(2), amount).await?;

        let err = client
            .create_links(LinkCount::new(5), amount)
            .await
            .err()
            .ok_or_else(|| eyre::eyre!("second batch should fail"))?;
        assert!(matches!(
            err,
            Error::LinkCreation(ProviderError::InsufficientBalance { .. })
        ));
        assert_eq!(
            err.to_string(),
            "An error occurred while creating links. Please try again."
        );
        assert_eq!(client.generated_links(), first.links.as_slice());
        Ok(())
    }

    #[tokio::test]
    async fn no_wallet_means_no_provider_calls() {
        let mut provider = MockLinkProvider::new();
        let _ = provider.expect_connected_account().returning(|| None);
        let _ = provider.expect_build_link_batch().never();
        let _ = provider.expect_sign_and_submit().never();

        let mut client = Client::connect(provider, ClientConfig::default()).await;
        let result = client
            .create_links(
                LinkCount::new(1),
                AmountPerLink::new(MistTokens::from_mist(1)),
            )
            .await;
        assert!(matches!(result, Err(Error::WalletNotConnected)));
        assert!(client.generated_links().is_empty());
    }

    #[tokio::test]
    async fn sdk_subdomains_are_moved_to_the_product_host() -> Result<()> {
        let mut provider = connected_provider();
        let _ = provider.expect_build_link_batch().times(1).returning(|requests| {
            let mut batch = batch_for(&requests)?;
            let hosts = ["www.zksend.com", "notzksend.com", "zksend.com.example.org"];
            for (link, host) in batch.links.iter_mut().zip(hosts) {
                link.url
                    .set_host(Some(host))
                    .map_err(|err| ProviderError::InvalidLink(err.to_string()))?;
            }
            Ok(batch)
        });
        let _ = provider
            .expect_sign_and_submit()
            .times(1)
            .returning(|_| Ok(TxDigest("0xd2".to_string())));

        let mut client = Client::connect(provider, ClientConfig::default()).await;
        let created = client
            .create_links(
                LinkCount::new(3),
                AmountPerLink::new(MistTokens::from_mist(1)),
            )
            .await?;

        let hosts: Vec<Option<&str>> = created
            .links
            .iter()
            .map(|link| link.url.host_str())
            .collect();
        assert_eq!(
            hosts,
            vec![
                Some("www.getstashed.com"),
                Some("notzksend.com"),
                Some("zksend.com.example.org"),
            ]
        );
        assert!(created.links[0]
            .as_str()
            .starts_with("https://www.getstashed.com/claim#$"));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_product_host_fails_before_submission() {
        let mut provider = connected_provider();
        let _ = provider
            .expect_build_link_batch()
            .times(1)
            .returning(|requests| batch_for(&requests));
        let _ = provider.expect_sign_and_submit().never();

        let config = ClientConfig {
            product_host: "not a host".to_string(),
            ..ClientConfig::default()
        };
        let mut client = Client::connect(provider, config).await;
        let result = client
            .create_links(
                LinkCount::new(2),
                AmountPerLink::new(MistTokens::from_mist(1)),
            )
            .await;
        assert!(matches!(
            result,
            Err(Error::LinkCreation(ProviderError::InvalidLink(_)))
        ));
    }
}
