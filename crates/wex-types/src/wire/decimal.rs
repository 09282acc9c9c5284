//! Exact decimal decoding
//!
//! WEX sends monetary values as bare JSON numbers. Going through `f64` would
//! lose the scale the server sent (and sometimes the value), so decimals are
//! parsed straight from the raw JSON literal instead.
//!
//! A literal that does not fit a [`Decimal`] exactly (more than 28 fractional
//! digits, or more than 96 bits of mantissa) is a decode error, never rounded.

use rust_decimal::{Decimal, Error};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::HashMap;

/// Largest scale a [`Decimal`] can hold
const MAX_SCALE: u32 = 28;

/// A decimal decoded from its literal JSON text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WireDecimal(pub Decimal);

impl From<WireDecimal> for Decimal {
    fn from(value: WireDecimal) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for WireDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        parse_literal(raw.get())
            .map(WireDecimal)
            .map_err(|e| de::Error::custom(format!("decimal {}: {}", raw.get(), e)))
    }
}

/// Parse a JSON literal (number, quoted number or `null`) into a decimal.
///
/// `null` decodes to zero. Scientific notation is expanded exactly, keeping
/// the scale implied by the mantissa and exponent.
pub fn parse_literal(literal: &str) -> Result<Decimal, Error> {
    let literal = literal.trim();
    if literal == "null" {
        return Ok(Decimal::ZERO);
    }

    let text = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);

    match text.split_once(|c| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => parse_scientific(mantissa, exponent),
        None => Decimal::from_str_exact(text),
    }
}

fn parse_scientific(mantissa: &str, exponent: &str) -> Result<Decimal, Error> {
    let mantissa = Decimal::from_str_exact(mantissa)?;
    let exponent: i64 = exponent
        .parse()
        .map_err(|e| Error::ErrorString(format!("exponent {}: {}", exponent, e)))?;

    let scale = i64::from(mantissa.scale()) - exponent;
    if scale > i64::from(MAX_SCALE) {
        return Err(Error::ScaleExceedsMaximumPrecision(
            u32::try_from(scale).unwrap_or(u32::MAX),
        ));
    }

    if scale >= 0 {
        // scale is within 0..=28 here
        return Decimal::try_from_i128_with_scale(mantissa.mantissa(), scale as u32);
    }

    let factor = u32::try_from(-scale)
        .ok()
        .and_then(|k| 10i128.checked_pow(k))
        .ok_or(Error::ExceedsMaximumPossibleValue)?;
    let value = mantissa
        .mantissa()
        .checked_mul(factor)
        .ok_or(Error::ExceedsMaximumPossibleValue)?;
    Decimal::try_from_i128_with_scale(value, 0)
}

/// Field adapter: `#[serde(deserialize_with = "wire::decimal::deserialize")]`
pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    WireDecimal::deserialize(deserializer).map(Decimal::from)
}

/// Field adapter for `currency -> amount` maps.
pub fn deserialize_map<'de, D>(deserializer: D) -> Result<HashMap<String, Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, WireDecimal>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.0)).collect())
}
