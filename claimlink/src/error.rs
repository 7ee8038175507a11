// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::provider::ProviderError;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the [`crate::Client`].
///
/// External failures keep their cause as the error source, while the message stays the one shown
/// to the user.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Please connect your wallet first.")]
    WalletNotConnected,
    #[error("An error occurred while creating links. Please try again.")]
    LinkCreation(#[source] ProviderError),
    #[error("Failed to fetch balance. Please try again.")]
    BalanceFetch(#[source] ProviderError),
}
