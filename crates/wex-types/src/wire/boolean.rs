//! Tolerant boolean decoding
//!
//! WEX sends flags such as `success` or `hidden` as `0`/`1`, sometimes quoted,
//! sometimes as real JSON booleans.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Deserialize a flag transmitted as `0`, `1`, `"0"`, `"1"`, `true`, `false`,
/// `"true"` or `"false"`.
///
/// Any other token is rejected.
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Pair {
///     #[serde(deserialize_with = "wex_types::wire::boolean::deserialize")]
///     hidden: bool,
/// }
///
/// let pair: Pair = serde_json::from_str(r#"{"hidden": "1"}"#).unwrap();
/// assert!(pair.hidden);
/// ```
pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TolerantBoolVisitor)
}

/// Parse an unquoted textual token.
pub fn parse_token(token: &str) -> Option<bool> {
    match token {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

fn invalid_input<E: de::Error>(token: impl fmt::Display) -> E {
    E::custom(format!("boolean unmarshal error: invalid input {}", token))
}

struct TolerantBoolVisitor;

impl<'de> Visitor<'de> for TolerantBoolVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(r#"one of 0, 1, "0", "1", true, false, "true", "false""#)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(invalid_input(other)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(invalid_input(other)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
        Err(invalid_input(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        parse_token(v).ok_or_else(|| invalid_input(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
        Err(invalid_input("null"))
    }
}
