// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{address::SuiAddress, amount::MistTokens, provider::TxDigest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A funded link, keyed by its hex encoded secret in [`LedgerState::links`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub sender: SuiAddress,
    pub amount: MistTokens,
    pub claimed_by: Option<SuiAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub accounts: BTreeMap<SuiAddress, MistTokens>,
    pub connected: Option<SuiAddress>,
    pub links: BTreeMap<String, LinkRecord>,
    pub tx_counter: u64,
    /// Host of the URLs handed out by the ledger.
    pub sdk_host: String,
}

impl LedgerState {
    pub fn new(sdk_host: &str) -> Self {
        Self {
            accounts: BTreeMap::new(),
            connected: None,
            links: BTreeMap::new(),
            tx_counter: 0,
            sdk_host: sdk_host.to_string(),
        }
    }

    pub(super) fn next_digest(&mut self) -> TxDigest {
        self.tx_counter = self.tx_counter.wrapping_add(1);
        TxDigest(format!("0x{:064x}", self.tx_counter))
    }
}
