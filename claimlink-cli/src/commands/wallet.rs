// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use super::connect_client;
use crate::access::ledger::{load_ledger, save_ledger};
use claimlink::{MistTokens, SuiAddress};
use color_eyre::eyre::{eyre, Context, Result};
use color_eyre::Section;
use std::path::Path;

pub async fn connect(address: Option<String>, ledger_path: &Path) -> Result<()> {
    let ledger = load_ledger(ledger_path)?;
    let address = match address {
        Some(address) => address
            .parse::<SuiAddress>()
            .wrap_err("Please provide a valid Sui address")
            .with_suggestion(|| "an address is 0x followed by up to 64 hex characters")?,
        None => {
            let address = ledger.generate_account().await;
            println!("Created new account {address}");
            address
        }
    };

    ledger.connect(address).await;
    save_ledger(&ledger, ledger_path).await?;
    println!("Wallet connected to {address}");
    Ok(())
}

pub async fn disconnect(ledger_path: &Path) -> Result<()> {
    let ledger = load_ledger(ledger_path)?;
    ledger.disconnect().await;
    save_ledger(&ledger, ledger_path).await?;
    println!("Wallet disconnected");
    Ok(())
}

pub async fn balance(ledger_path: &Path) -> Result<()> {
    let mut client = connect_client(ledger_path).await?;
    if client.account().is_none() {
        return Err(eyre!("Please connect your wallet first."))
            .with_suggestion(|| "connect it with `claimlink wallet connect`");
    }
    if let Err(err) = client.refresh_balance().await {
        eprintln!("{err}");
    }
    println!("{}", client.balance_view());
    Ok(())
}

pub async fn fund(amount: &str, ledger_path: &Path) -> Result<()> {
    let amount = MistTokens::from_display_str(amount)
        .wrap_err("Please provide a valid amount of SUI")
        .with_suggestion(|| "amounts look like 1 or 0.25")?;

    let mut client = connect_client(ledger_path).await?;
    let account = client
        .account()
        .ok_or_else(|| eyre!("Please connect your wallet first."))
        .with_suggestion(|| "connect it with `claimlink wallet connect`")?;

    let new_balance = client.provider().fund(account, amount).await?;
    save_ledger(client.provider(), ledger_path).await?;
    info!("Funded {account} with {amount}, new balance {new_balance}");

    if let Err(err) = client.refresh_balance().await {
        eprintln!("{err}");
    }
    println!("Added {amount} SUI");
    println!("{}", client.balance_view());
    Ok(())
}
