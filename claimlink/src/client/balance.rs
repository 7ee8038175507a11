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
    provider::LinkProvider,
};
use std::fmt;

/// Connected account and its balance, ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceView {
    pub account: Option<SuiAddress>,
    pub balance: Option<MistTokens>,
    pub decimals: usize,
}

impl fmt::Display for BalanceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(account) = self.account else {
            return write!(f, "Wallet not connected");
        };
        writeln!(f, "Connected: {}", account.short())?;
        match self.balance {
            Some(balance) => write!(f, "Balance: {} SUI", balance.format_display(self.decimals)),
            None => write!(f, "Balance: unknown"),
        }
    }
}

impl<P: LinkProvider> Client<P> {
    /// Fetches the balance of the connected account.
    ///
    /// On failure the last known balance is kept and the error is returned for display only.
    pub async fn refresh_balance(&mut self) -> Result<MistTokens> {
        let account = self.require_account().await?;
        match self.provider.query_balance(account).await {
            Ok(balance) => {
                debug!("Balance of {account} is {balance}");
                self.balance = Some(balance);
                Ok(balance)
            }
            Err(err) => {
                warn!("Failed to fetch the balance of {account}: {err}");
                Err(Error::BalanceFetch(err))
            }
        }
    }

    pub fn balance_view(&self) -> BalanceView {
        BalanceView {
            account: self.account,
            balance: self.balance,
            decimals: self.config.balance_decimals,
        }
    }
}
