// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Bulk creation and redemption of Sui claim links.
//!
//! A claim link is a URL holding the secret of a funded temporary account: whoever holds the
//! URL can move the funds to their own wallet. [`Client`] funds up to [`MAX_LINKS`] such links
//! in one transaction, rebrands them to the product's host, and claims lists of links back into
//! the connected wallet one at a time.
//!
//! Wallet and link SDK access goes through the [`LinkProvider`] trait. The `local` feature
//! (enabled by default) provides [`local::LocalLedger`], an in-process implementation.

#[macro_use]
extern crate tracing;

pub mod address;
pub mod amount;
pub mod client;
pub mod error;
pub mod export;
pub mod input;
pub mod link;
#[cfg(feature = "local")]
pub mod local;
pub mod provider;

pub use address::SuiAddress;
pub use amount::{AmountError, MistTokens, MIST_PER_SUI};
pub use client::{
    balance::BalanceView,
    batch::CreatedLinks,
    claim::{ClaimError, ClaimEvent, ClaimOutcome, ClaimReport, ClaimResult, ClaimState},
    Client, ClientConfig,
};
pub use error::Error;
pub use input::{AmountPerLink, LinkCount, MAX_LINKS};
pub use link::{GeneratedLink, UploadedLinkList};
pub use provider::{LinkProvider, ProviderError, TxDigest, SUI_COIN_TYPE};
