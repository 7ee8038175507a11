// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::access::settings::{load_client_config, Settings, CLAIMLINK_PRODUCT_HOST_ENV};
use claimlink::MistTokens;
use color_eyre::eyre::{eyre, Context, Result};
use color_eyre::Section;

pub fn show() -> Result<()> {
    let (settings, config) = load_client_config()?;
    println!("Product host: {}", settings.product_host);
    if config.product_host != settings.product_host {
        println!(
            "  overridden by {CLAIMLINK_PRODUCT_HOST_ENV}: {}",
            config.product_host
        );
    }
    println!(
        "Default amount per link: {} SUI",
        settings.default_amount
    );
    println!("Balance decimals: {}", settings.balance_decimals);
    Ok(())
}

pub fn set_host(host: &str) -> Result<()> {
    let host = host.trim();
    if host.is_empty() || host.contains(['/', ' ', '#', '?']) {
        return Err(eyre!("{host:?} is not a valid host name"))
            .with_suggestion(|| "give the host name only, e.g. getstashed.com");
    }
    update(|settings| settings.product_host = host.to_string())
}

pub fn set_default_amount(amount: &str) -> Result<()> {
    let amount = MistTokens::from_display_str(amount)
        .wrap_err("Please provide a valid amount of SUI")
        .with_suggestion(|| "amounts look like 0.1 or 2")?;
    update(|settings| settings.default_amount = amount)
}

pub fn set_decimals(decimals: usize) -> Result<()> {
    if decimals > 9 {
        return Err(eyre!("SUI has at most 9 decimals"));
    }
    update(|settings| settings.balance_decimals = decimals)
}

fn update(change: impl FnOnce(&mut Settings)) -> Result<()> {
    let mut settings = Settings::load(None)?;
    change(&mut settings);
    let path = settings.save(None)?;
    println!("Settings saved to {path:?}");
    Ok(())
}
