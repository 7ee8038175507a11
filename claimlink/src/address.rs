// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid Sui address: {0}")]
pub struct AddressError(String);

/// A Sui account address: 32 bytes, written as `0x` followed by 64 hex characters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuiAddress([u8; SuiAddress::LENGTH]);

impl SuiAddress {
    pub const LENGTH: usize = 32;

    pub const fn from_bytes(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    /// Shortened form used when showing the connected account: `0x1234...abcd`.
    pub fn short(&self) -> String {
        let hex = hex::encode(self.0);
        format!("0x{}...{}", &hex[..4], &hex[hex.len() - 4..])
    }
}

impl FromStr for SuiAddress {
    type Err = AddressError;

    /// Accepts the `0x` prefix as optional, and short forms such as `0x2` which are left padded.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_part.is_empty() || hex_part.len() > Self::LENGTH * 2 {
            return Err(AddressError(value.to_string()));
        }

        let padded = format!("{hex_part:0>width$}", width = Self::LENGTH * 2);
        let mut bytes = [0u8; Self::LENGTH];
        hex::decode_to_slice(padded, &mut bytes).map_err(|_| AddressError(value.to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for SuiAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SuiAddress> for String {
    fn from(address: SuiAddress) -> Self {
        address.to_string()
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({self})")
    }
}
