// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Validation of the two numeric inputs of the link generator.
//!
//! Both inputs are lenient: bad values are coerced instead of rejected, so building a batch
//! never fails on user input alone.

use crate::amount::MistTokens;
use std::fmt;

/// Most links that can be funded by one transaction.
pub const MAX_LINKS: usize = 100;

/// Number of links to create, always within `1..=MAX_LINKS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LinkCount(usize);

impl LinkCount {
    /// Clamps silently into `1..=MAX_LINKS`.
    pub fn new(requested: usize) -> Self {
        Self(requested.clamp(1, MAX_LINKS))
    }

    /// Parses user input from its leading integer, so `"2.5"` asks for 2 links and `"7abc"`
    /// for 7. Input without a leading integer falls back to one link.
    pub fn parse_lenient(input: &str) -> Self {
        match leading_integer(input) {
            Some(requested) if requested > MAX_LINKS as i128 => Self(MAX_LINKS),
            Some(requested) if requested >= 1 => Self(requested as usize),
            Some(_) => Self(1),
            None => {
                debug!("Link count {input:?} is not an integer, using 1");
                Self(1)
            }
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for LinkCount {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for LinkCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional sign then digits, after leading whitespace. Values too large for an `i128`
/// saturate.
fn leading_integer(input: &str) -> Option<i128> {
    let input = input.trim_start();
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i128>().unwrap_or(i128::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Claimable amount attached to every link of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountPerLink(MistTokens);

impl AmountPerLink {
    pub fn new(amount: MistTokens) -> Self {
        Self(amount)
    }

    /// Parses an amount of SUI. Negative, unparsable or overflowing input is replaced by
    /// `default` before conversion; zero is kept.
    pub fn parse_or_default(input: &str, default: MistTokens) -> Self {
        match MistTokens::from_display_str(input) {
            Ok(amount) => Self(amount),
            Err(err) => {
                warn!("Amount per link {input:?} rejected ({err}), using the default {default}");
                Self(default)
            }
        }
    }

    pub fn mist(&self) -> MistTokens {
        self.0
    }
}
