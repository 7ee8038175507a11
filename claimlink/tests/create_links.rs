// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use claimlink::{
    export::{read_link_list, write_links_file},
    local::LocalLedger,
    AmountPerLink, Client, ClientConfig, Error, LinkCount, LinkProvider, MistTokens,
    ProviderError, MIST_PER_SUI,
};
use claimlink_logging::LogBuilder;
use eyre::{eyre, Result};

async fn funded_client(sui: u64) -> Result<Client<LocalLedger>> {
    let ledger = LocalLedger::new();
    let account = ledger.generate_account().await;
    ledger.connect(account).await;
    let _ = ledger
        .fund(account, MistTokens::from_mist(sui * MIST_PER_SUI))
        .await?;
    Ok(Client::connect(ledger, ClientConfig::default()).await)
}

#[tokio::test]
async fn three_links_of_a_tenth() -> Result<()> {
    let _log_guards = LogBuilder::init_single_threaded_tokio_test("create_links");

    let mut client = funded_client(1).await?;
    assert_eq!(
        client.balance(),
        Some(MistTokens::from_mist(MIST_PER_SUI))
    );

    let count = LinkCount::parse_lenient("3");
    let amount = AmountPerLink::parse_or_default("0.1", client.config().default_amount);
    let created = client.create_links(count, amount).await?;

    assert_eq!(created.links.len(), 3);
    assert_eq!(created.per_link, MistTokens::from_mist(100_000_000));
    for link in &created.links {
        assert_eq!(link.url.host_str(), Some("getstashed.com"));
        assert!(link.url.fragment().is_some_and(|f| f.starts_with('$')));
    }

    // one transaction, and the balance was refreshed after it
    let state = client.provider().state().await;
    assert_eq!(state.tx_counter, 1);
    assert_eq!(state.links.len(), 3);
    assert_eq!(
        client.balance(),
        Some(MistTokens::from_mist(700_000_000))
    );
    assert_eq!(
        client.balance_view().to_string().lines().last(),
        Some("Balance: 0.70000 SUI")
    );
    Ok(())
}

#[tokio::test]
async fn oversized_and_invalid_inputs_are_coerced() -> Result<()> {
    let _log_guards = LogBuilder::init_single_threaded_tokio_test("create_links");

    let mut client = funded_client(100).await?;
    let count = LinkCount::parse_lenient("500");
    let amount = AmountPerLink::parse_or_default("-3", client.config().default_amount);
    let created = client.create_links(count, amount).await?;

    assert_eq!(created.links.len(), 100);
    assert_eq!(created.per_link, client.config().default_amount);
    assert_eq!(
        client.balance(),
        Some(MistTokens::from_mist(90 * MIST_PER_SUI))
    );
    Ok(())
}

#[tokio::test]
async fn insufficient_funds_create_nothing() -> Result<()> {
    let _log_guards = LogBuilder::init_single_threaded_tokio_test("create_links");

    let mut client = funded_client(1).await?;
    let first = client
        .create_links(
            LinkCount::new(2),
            AmountPerLink::parse_or_default("0.25", MistTokens::zero()),
        )
        .await?;

    let result = client
        .create_links(
            LinkCount::new(5),
            AmountPerLink::parse_or_default("1", MistTokens::zero()),
        )
        .await;
    match result {
        Err(Error::LinkCreation(ProviderError::InsufficientBalance {
            required,
            available,
        })) => {
            assert_eq!(required, MistTokens::from_mist(5 * MIST_PER_SUI));
            assert_eq!(available, MistTokens::from_mist(MIST_PER_SUI / 2));
        }
        other => return Err(eyre!("unexpected result: {other:?}")),
    }

    assert_eq!(client.generated_links(), first.links.as_slice());
    assert_eq!(client.provider().state().await.links.len(), 2);
    assert_eq!(
        client.balance(),
        Some(MistTokens::from_mist(MIST_PER_SUI / 2))
    );
    Ok(())
}

#[tokio::test]
async fn disconnected_wallet_cannot_create_links() -> Result<()> {
    let _log_guards = LogBuilder::init_single_threaded_tokio_test("create_links");

    let mut client = funded_client(1).await?;
    client.provider().disconnect().await;

    let result = client
        .create_links(
            LinkCount::new(1),
            AmountPerLink::new(MistTokens::from_mist(1)),
        )
        .await;
    assert!(matches!(result, Err(Error::WalletNotConnected)));
    assert_eq!(client.account(), None);
    assert!(client.provider().state().await.links.is_empty());
    Ok(())
}

#[tokio::test]
async fn exported_links_can_be_imported_again() -> Result<()> {
    let _log_guards = LogBuilder::init_single_threaded_tokio_test("create_links");

    let mut client = funded_client(1).await?;
    let created = client
        .create_links(
            LinkCount::new(4),
            AmountPerLink::new(MistTokens::from_mist(10)),
        )
        .await?;

    let dir = tempfile::tempdir()?;
    let path = write_links_file(&dir.path().join("links.txt"), client.generated_links())?;
    let imported = read_link_list(&path)?;

    let exported: Vec<&str> = created.links.iter().map(|link| link.as_str()).collect();
    assert_eq!(imported.iter().collect::<Vec<_>>(), exported);

    let account = client
        .account()
        .ok_or_else(|| eyre!("client should be connected"))?;
    assert_eq!(
        client.provider().query_balance(account).await?,
        MistTokens::from_mist(MIST_PER_SUI - 40)
    );
    Ok(())
}
