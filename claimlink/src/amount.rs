// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Number of fractional digits of one SUI.
const SUI_TO_MIST_POWER_OF_10: usize = 9;

/// The conversion from SUI to MIST.
pub const MIST_PER_SUI: u64 = 1_000_000_000;

/// Errors raised while turning user input into [`MistTokens`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount cannot be negative: {0}")]
    Negative(String),
    #[error("Failed to parse amount: {0}")]
    Unparsable(String),
    #[error("Amount is too large to be represented in MIST")]
    Excessive,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
/// An amount in MIST, the smallest denomination of SUI. 10^9 MIST = 1 SUI.
pub struct MistTokens(u64);

impl MistTokens {
    /// Type safe representation of zero MIST.
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// New value from a number of MIST.
    pub const fn from_mist(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_mist(self) -> u64 {
        self.0
    }

    /// Computes `self + rhs`, returning `None` if overflow occurred.
    pub fn checked_add(self, rhs: MistTokens) -> Option<MistTokens> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Computes `self - rhs`, returning `None` if overflow occurred.
    pub fn checked_sub(self, rhs: MistTokens) -> Option<MistTokens> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Computes `self * count`, returning `None` if overflow occurred.
    pub fn checked_mul(self, count: u64) -> Option<MistTokens> {
        self.0.checked_mul(count).map(Self)
    }

    /// Parses a decimal amount of SUI, e.g. `"0.1"`, into MIST.
    ///
    /// The conversion truncates: digits past the ninth fractional digit are dropped, so the
    /// result is `floor(amount * 10^9)`.
    pub fn from_display_str(value_str: &str) -> Result<Self, AmountError> {
        let value_str = value_str.trim();
        if value_str.starts_with('-') {
            return Err(AmountError::Negative(value_str.to_string()));
        }

        let mut itr = value_str.splitn(2, '.');
        let units_str = itr.next().unwrap_or_default();
        let fraction_str = itr.next();

        if units_str.is_empty() && fraction_str.map_or(true, str::is_empty) {
            return Err(AmountError::Unparsable(value_str.to_string()));
        }

        let units = if units_str.is_empty() {
            0
        } else {
            parse_digits(units_str)
                .ok_or_else(|| AmountError::Unparsable(value_str.to_string()))?
        };

        let fraction = match fraction_str {
            None => 0,
            Some(fraction_str) => {
                if !fraction_str.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(AmountError::Unparsable(value_str.to_string()));
                }
                let kept: String = fraction_str
                    .chars()
                    .take(SUI_TO_MIST_POWER_OF_10)
                    .collect();
                let padded = format!("{kept:0<width$}", width = SUI_TO_MIST_POWER_OF_10);
                parse_digits(&padded)
                    .ok_or_else(|| AmountError::Unparsable(value_str.to_string()))?
            }
        };

        units
            .checked_mul(MIST_PER_SUI)
            .and_then(|mist| mist.checked_add(fraction))
            .map(Self)
            .ok_or(AmountError::Excessive)
    }

    /// Fixed point rendering in SUI with `decimals` fractional digits, truncated, and the
    /// integer part grouped by thousands: `1,234.56789`.
    pub fn format_display(&self, decimals: usize) -> String {
        let unit = self.0 / MIST_PER_SUI;
        let remainder = self.0 % MIST_PER_SUI;

        let mut grouped = String::new();
        let digits = unit.to_string();
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let decimals = decimals.min(SUI_TO_MIST_POWER_OF_10);
        if decimals == 0 {
            return grouped;
        }
        let fraction = format!("{remainder:09}");
        format!("{grouped}.{}", &fraction[..decimals])
    }
}

/// Only plain ASCII digits, no sign.
fn parse_digits(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok()
}

impl From<u64> for MistTokens {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for MistTokens {
    type Err = AmountError;

    fn from_str(value_str: &str) -> Result<Self, Self::Err> {
        Self::from_display_str(value_str)
    }
}

impl Display for MistTokens {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let unit = self.0 / MIST_PER_SUI;
        let remainder = self.0 % MIST_PER_SUI;
        write!(formatter, "{unit}.{remainder:09}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_display_str() -> Result<(), AmountError> {
        assert_eq!(MistTokens(0), MistTokens::from_display_str("0")?);
        assert_eq!(MistTokens(0), MistTokens::from_display_str("0.")?);
        assert_eq!(MistTokens(0), MistTokens::from_display_str("0.0")?);
        assert_eq!(MistTokens(1), MistTokens::from_display_str("0.000000001")?);
        assert_eq!(MistTokens(100_000_000), MistTokens::from_display_str("0.1")?);
        assert_eq!(MistTokens(100_000_000), MistTokens::from_display_str(".1")?);
        assert_eq!(MistTokens(1_000_000_000), MistTokens::from_display_str("1")?);
        assert_eq!(
            MistTokens(1_100_000_001),
            MistTokens::from_display_str(" 1.100000001 ")?
        );
        assert_eq!(
            MistTokens(18_446_744_073_000_000_000),
            MistTokens::from_display_str("18446744073")?
        );
        Ok(())
    }

    #[test]
    fn extra_precision_is_truncated_not_rounded() -> Result<(), AmountError> {
        assert_eq!(MistTokens(0), MistTokens::from_display_str("0.0000000009")?);
        assert_eq!(
            MistTokens(123_456_789),
            MistTokens::from_display_str("0.1234567899999")?
        );
        Ok(())
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert_eq!(
            Err(AmountError::Negative("-0.5".to_string())),
            MistTokens::from_display_str("-0.5")
        );
        assert_eq!(
            Err(AmountError::Unparsable("a".to_string())),
            MistTokens::from_display_str("a")
        );
        assert_eq!(
            Err(AmountError::Unparsable("0.a".to_string())),
            MistTokens::from_display_str("0.a")
        );
        assert_eq!(
            Err(AmountError::Unparsable("0.0.0".to_string())),
            MistTokens::from_display_str("0.0.0")
        );
        assert_eq!(
            Err(AmountError::Unparsable("+1".to_string())),
            MistTokens::from_display_str("+1")
        );
        assert_eq!(
            Err(AmountError::Unparsable("".to_string())),
            MistTokens::from_display_str("")
        );
        assert_eq!(
            Err(AmountError::Excessive),
            MistTokens::from_display_str("18446744074")
        );
    }

    #[test]
    fn display() {
        assert_eq!("0.000000000", format!("{}", MistTokens(0)));
        assert_eq!("0.000000001", format!("{}", MistTokens(1)));
        assert_eq!("0.100000000", format!("{}", MistTokens(100_000_000)));
        assert_eq!("1.000000001", format!("{}", MistTokens(1_000_000_001)));
    }

    #[test]
    fn format_display_truncates_and_groups() {
        assert_eq!("0.00000", MistTokens(0).format_display(5));
        assert_eq!("0.12345", MistTokens(123_456_789).format_display(5));
        assert_eq!("1.9999", MistTokens(1_999_999_999).format_display(4));
        assert_eq!(
            "1,234,567.00000",
            MistTokens(1_234_567 * MIST_PER_SUI).format_display(5)
        );
        assert_eq!("123", MistTokens(123 * MIST_PER_SUI).format_display(0));
        assert_eq!("2.000000000", MistTokens(2 * MIST_PER_SUI).format_display(12));
    }

    #[test]
    fn checked_arithmetic() {
        assert_eq!(Some(MistTokens(3)), MistTokens(1).checked_add(MistTokens(2)));
        assert_eq!(None, MistTokens(u64::MAX).checked_add(MistTokens(1)));
        assert_eq!(None, MistTokens(10).checked_sub(MistTokens(11)));
        assert_eq!(Some(MistTokens(300)), MistTokens(100).checked_mul(3));
        assert_eq!(None, MistTokens(u64::MAX).checked_mul(2));
    }

    proptest! {
        #[test]
        fn parsed_amount_is_the_floor_of_its_mist_value(
            units in 0u64..18_446_744_073,
            fraction in "[0-9]{0,15}",
        ) {
            let input = format!("{units}.{fraction}");
            // floor(amount * 10^9) from the first nine fractional digits, zero padded
            let kept: String = fraction.chars().chain(std::iter::repeat('0')).take(9).collect();
            let expected = u128::from(units) * u128::from(MIST_PER_SUI) + kept.parse::<u128>()?;

            let parsed = MistTokens::from_display_str(&input)?;
            prop_assert_eq!(u128::from(parsed.as_mist()), expected);
        }

        #[test]
        fn display_reads_back_to_the_same_amount(mist in any::<u64>()) {
            let amount = MistTokens::from_mist(mist);
            prop_assert_eq!(MistTokens::from_display_str(&amount.to_string())?, amount);
        }
    }
}
