// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use super::connect_client;
use crate::access::ledger::save_ledger;
use crate::utils::{copy_to_clipboard, track_claim_progress};
use claimlink::{
    export::{join_links, read_link_list, write_links_file},
    AmountPerLink, ClaimResult, LinkCount,
};
use color_eyre::eyre::Context;
use color_eyre::eyre::Result;
use color_eyre::Section;
use std::path::{Path, PathBuf};

pub async fn create(
    count: &str,
    amount: Option<&str>,
    output: Option<PathBuf>,
    copy: bool,
    ledger: &Path,
) -> Result<()> {
    let mut client = connect_client(ledger).await?;

    let count = LinkCount::parse_lenient(count);
    let default_amount = client.config().default_amount;
    let amount = match amount {
        Some(amount) => AmountPerLink::parse_or_default(amount, default_amount),
        None => AmountPerLink::new(default_amount),
    };

    println!("Creating {count} links of {} SUI each...", amount.mist());
    let created = client
        .create_links(count, amount)
        .await
        .with_suggestion(|| "make sure your wallet is connected with `claimlink wallet connect`")
        .with_suggestion(|| "check your balance with `claimlink wallet balance`")?;
    save_ledger(client.provider(), ledger).await?;

    println!("Created {} links in transaction {}", created.links.len(), created.digest);
    println!("{}", client.balance_view());
    println!();
    for link in &created.links {
        println!("{link}");
    }
    println!();
    println!("Save these links before closing or refreshing the page. This data will be lost otherwise.");

    if let Some(output) = output {
        let path = write_links_file(&output, &created.links)
            .wrap_err("Failed to write links file")?;
        println!("Links written to {path:?}");
    }

    if copy {
        copy_to_clipboard(join_links(&created.links))?;
        println!("Links copied to clipboard!");
    }

    Ok(())
}

pub async fn claim(file: &Path, ledger: &Path) -> Result<()> {
    let list = read_link_list(file)
        .wrap_err("Failed to read the links file")
        .with_suggestion(|| "the file should hold one link per line")?;
    info!("Claiming {} links from {file:?}", list.len());

    let mut client = connect_client(ledger).await?;
    let event_receiver = client.enable_claim_events();
    let progress = track_claim_progress(event_receiver);

    println!("Claiming {} links...", list.len());
    let result = client.claim_links(&list).await;
    if result.is_ok() {
        save_ledger(client.provider(), ledger).await?;
    }
    let balance = client.balance_view();
    // the progress task ends on the completion event, or once the client is dropped
    drop(client);
    if let Err(err) = progress.await {
        error!("Claim progress task failed: {err:?}");
    }

    let report = result
        .with_suggestion(|| "make sure your wallet is connected with `claimlink wallet connect`")?;
    for outcome in &report.outcomes {
        if let ClaimResult::Claimed { amount, .. } = &outcome.result {
            println!("Claimed {amount} SUI from {}", outcome.url);
        }
    }
    println!("{}", report.summary());
    println!("{balance}");
    Ok(())
}
