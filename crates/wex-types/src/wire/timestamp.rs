//! Unix epoch timestamps
//!
//! Server times are bare integers counting seconds since the Unix epoch.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Deserialize a bare integer of epoch seconds into a UTC instant.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_i64(EpochSecondsVisitor)
}

/// Convert epoch seconds into a UTC instant, `None` when out of range.
pub fn from_epoch_seconds(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

struct EpochSecondsVisitor;

impl EpochSecondsVisitor {
    fn instant<E: de::Error>(secs: i64) -> Result<DateTime<Utc>, E> {
        from_epoch_seconds(secs)
            .ok_or_else(|| E::custom(format!("timestamp {} out of range", secs)))
    }
}

impl<'de> Visitor<'de> for EpochSecondsVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer number of seconds since the Unix epoch")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Self::instant(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let secs = i64::try_from(v)
            .map_err(|_| E::custom(format!("timestamp {} out of range", v)))?;
        Self::instant(secs)
    }
}
