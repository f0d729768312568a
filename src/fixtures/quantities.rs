//! Price and quantity strings

use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, USD};

use crate::{fixtures::FixtureError, units::Unit};

/// Parse a currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for anything but GBP, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a price string (e.g. "2.99 GBP") into an amount and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the
/// amount is not a decimal, or if the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let (amount, code) = split_pair(s).ok_or_else(|| {
        FixtureError::InvalidPrice(format!("Expected format 'AMOUNT CURRENCY', got: {s}"))
    })?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    Ok((amount, parse_currency(code)?))
}

/// Parse a quantity string (e.g. "0.5 kg") into an amount and unit.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidQuantity`] if the string is not in the format
/// "AMOUNT UNIT", the amount is not a non-negative decimal, or the unit is unknown.
pub fn parse_quantity(s: &str) -> Result<(Decimal, Unit), FixtureError> {
    let (amount, unit) = split_pair(s).ok_or_else(|| {
        FixtureError::InvalidQuantity(format!("Expected format 'AMOUNT UNIT', got: {s}"))
    })?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidQuantity(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidQuantity(s.to_string()));
    }

    let unit = unit
        .parse::<Unit>()
        .map_err(|_err| FixtureError::InvalidQuantity(s.to_string()))?;

    Ok((amount, unit))
}

fn split_pair(s: &str) -> Option<(&str, &str)> {
    let mut parts = s.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Some((first, second)),
        _ => None,
    }
}
