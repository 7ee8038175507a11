// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod links;
mod settings;
mod wallet;

use crate::access::{
    ledger::{ledger_path, load_ledger},
    settings::load_client_config,
};
use crate::opt::Opt;
use claimlink::{local::LocalLedger, Client};
use clap::Subcommand;
use color_eyre::Result;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum SubCmd {
    /// Create claim links, or claim a list of links.
    Links {
        #[command(subcommand)]
        command: LinksCmd,
    },

    /// Operations related to the connected wallet.
    Wallet {
        #[command(subcommand)]
        command: WalletCmd,
    },

    /// Show or change the stored settings.
    Settings {
        #[command(subcommand)]
        command: SettingsCmd,
    },
}

#[derive(Subcommand, Debug)]
pub enum LinksCmd {
    /// Fund a batch of claim links in a single transaction.
    Create {
        /// Number of links to create, between 1 and 100.
        ///
        /// Values above 100 are capped, anything else invalid creates a single link.
        #[arg(short, long, default_value = "1")]
        count: String,
        /// Amount of SUI each link holds, e.g. 0.1.
        ///
        /// Negative or invalid amounts are replaced by the default amount from the settings.
        #[arg(short, long)]
        amount: Option<String>,
        /// Write the links to this file, or to getstashed_links.txt inside this directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Copy the links to the clipboard.
        #[arg(long)]
        copy: bool,
    },

    /// Claim every link listed in a file, one URL per line, to the connected wallet.
    Claim {
        /// The file holding the links.
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum WalletCmd {
    /// Connect the wallet to an account. A new account is created if none is given.
    Connect {
        /// The account address, e.g. 0x2.
        address: Option<String>,
    },

    /// Disconnect the wallet.
    Disconnect,

    /// Show the connected account and its balance.
    Balance,

    /// Add funds to the connected account of the local ledger.
    Fund {
        /// Amount of SUI to add, e.g. 2.5
        amount: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCmd {
    /// Print the current settings.
    Show,

    /// Set the host that generated links point to.
    SetHost {
        host: String,
    },

    /// Set the amount used when the given amount per link is invalid.
    SetDefaultAmount {
        /// Amount of SUI, e.g. 0.1
        amount: String,
    },

    /// Set the number of decimals shown for balances.
    SetDecimals {
        decimals: usize,
    },
}

pub async fn handle_subcommand(opt: Opt) -> Result<()> {
    let ledger = ledger_path(opt.ledger.as_deref())?;

    match opt.command {
        SubCmd::Links { command } => match command {
            LinksCmd::Create {
                count,
                amount,
                output,
                copy,
            } => links::create(&count, amount.as_deref(), output, copy, &ledger).await,
            LinksCmd::Claim { file } => links::claim(&file, &ledger).await,
        },
        SubCmd::Wallet { command } => match command {
            WalletCmd::Connect { address } => wallet::connect(address, &ledger).await,
            WalletCmd::Disconnect => wallet::disconnect(&ledger).await,
            WalletCmd::Balance => wallet::balance(&ledger).await,
            WalletCmd::Fund { amount } => wallet::fund(&amount, &ledger).await,
        },
        SubCmd::Settings { command } => match command {
            SettingsCmd::Show => settings::show(),
            SettingsCmd::SetHost { host } => settings::set_host(&host),
            SettingsCmd::SetDefaultAmount { amount } => settings::set_default_amount(&amount),
            SettingsCmd::SetDecimals { decimals } => settings::set_decimals(decimals),
        },
    }
}

/// Client over the local ledger stored at `ledger`, configured from the stored settings.
async fn connect_client(ledger: &Path) -> Result<Client<LocalLedger>> {
    let (_settings, config) = load_client_config()?;
    let provider = load_ledger(ledger)?;
    Ok(Client::connect(provider, config).await)
}
