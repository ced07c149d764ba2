use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO-4217 codes accepted for checkout. The provider accepts payments in these currencies on card checkout;
/// anything else is rejected before an order is created.
pub const SUPPORTED_CURRENCIES: [&str; 24] = [
    "AED", "AUD", "BDT", "CAD", "CHF", "CNY", "DKK", "EUR", "GBP", "HKD", "IDR", "INR", "JPY", "LKR", "MYR", "NPR",
    "NZD", "PHP", "QAR", "SAR", "SEK", "SGD", "THB", "USD",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("Currency code must be exactly three letters, got '{0}'")]
    InvalidFormat(String),
    #[error("Currency {0} is not supported")]
    Unsupported(String),
}

/// A validated, upper-case, three-letter currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError::InvalidFormat(s.to_string()));
        }
        let code = code.to_ascii_uppercase();
        if SUPPORTED_CURRENCIES.contains(&code.as_str()) {
            Ok(Self(code))
        } else {
            Err(CurrencyError::Unsupported(code))
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_and_normalises() {
        assert_eq!("INR".parse::<Currency>().unwrap().as_str(), "INR");
        assert_eq!(" usd ".parse::<Currency>().unwrap().as_str(), "USD");
    }

    #[test]
    fn rejects_bad_codes() {
        assert!(matches!("RUPEES".parse::<Currency>(), Err(CurrencyError::InvalidFormat(_))));
        assert!(matches!("I1R".parse::<Currency>(), Err(CurrencyError::InvalidFormat(_))));
        assert_eq!("XYZ".parse::<Currency>(), Err(CurrencyError::Unsupported("XYZ".into())));
    }

    #[test]
    fn serde_validates() {
        let c: Currency = serde_json::from_str("\"inr\"").unwrap();
        assert_eq!(c.to_string(), "INR");
        assert!(serde_json::from_str::<Currency>("\"ABCD\"").is_err());
    }
}
