mod currency;
mod helpers;
mod minor_units;
mod secret;

pub use currency::{Currency, CurrencyError, SUPPORTED_CURRENCIES};
pub use helpers::parse_boolean_flag;
pub use minor_units::{MinorUnits, MinorUnitsConversionError, MINOR_UNITS_PER_MAJOR};
pub use secret::Secret;
