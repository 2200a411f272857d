//! Display currencies and amount formatting.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Currencies selectable in settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Sar,
    Usd,
    Inr,
    Eur,
    Cad,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Sar,
        Currency::Usd,
        Currency::Inr,
        Currency::Eur,
        Currency::Cad,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Sar => "SAR",
            Currency::Usd => "USD",
            Currency::Inr => "INR",
            Currency::Eur => "EUR",
            Currency::Cad => "CAD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency `{0}` (expected one of SAR, USD, INR, EUR, CAD)")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCurrency(wanted.to_string()))
    }
}

/// Formats `value` with two decimals and comma thousands grouping.
pub fn format_number(value: f64) -> String {
    let body = format!("{:.2}", value.abs());
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let grouped = group_digits(int_part, ',');
    // Negative values that round to zero print unsigned.
    if value < 0.0 && body.chars().any(|c| c != '0' && c != '.') {
        format!("-{grouped}.{frac_part}")
    } else {
        format!("{grouped}.{frac_part}")
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Renders an amount the way the dashboard shows it, e.g. `12,345.60 SAR`.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    format!("{} {}", format_number(amount), currency.code())
}
