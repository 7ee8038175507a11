// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{address::SuiAddress, amount::MistTokens};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// One link to be funded: who pays, and how much the holder of the link can claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRequest {
    pub sender: SuiAddress,
    pub claimable: MistTokens,
}

/// A funded link, ready to be shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLink {
    pub url: Url,
}

impl GeneratedLink {
    /// Moves a link produced by the link SDK onto the product's own host.
    /// Path and fragment, which carry the link secret, are kept as is.
    pub fn from_sdk_url(mut url: Url, product_host: &str) -> Result<Self, url::ParseError> {
        url.set_host(Some(product_host))?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for GeneratedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Ordered list of link URLs read from user input, one per line.
///
/// Entries stay as raw strings: a malformed URL is still an entry, and fails on its own when
/// claimed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedLinkList(Vec<String>);

impl UploadedLinkList {
    /// Splits on line breaks, trims each line and drops the blank ones.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl FromIterator<String> for UploadedLinkList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A balance held by a link, denominated in one coin type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub coin_type: String,
    pub amount: MistTokens,
}

/// A link as reconstructed by the provider from its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimableLink {
    pub url: Url,
    pub sender: Option<SuiAddress>,
    pub assets: Vec<AssetBalance>,
    pub claimed: bool,
}

impl ClaimableLink {
    /// The balance held in `coin_type`, if the link holds any.
    pub fn balance_of(&self, coin_type: &str) -> Option<MistTokens> {
        self.assets
            .iter()
            .filter(|asset| asset.coin_type == coin_type)
            .map(|asset| asset.amount)
            .reduce(|total, amount| total.checked_add(amount).unwrap_or(total))
    }
}
