//! Collections keyed by numeric ID
//!
//! Order listings arrive as `{"343152": {...}, "343153": {...}}`: the record
//! ID only exists as the object key. The adapter flattens the object into a
//! `Vec` and writes the parsed ID back into each record.
//!
//! The resulting order follows the source document, but WEX does not promise
//! any ordering of object keys, so callers that need one must sort.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

/// A record whose ID is carried outside its own JSON body
pub trait WithId {
    /// Store the ID recovered from the collection key
    fn set_id(&mut self, id: u64);
}

/// Deserialize an ID-keyed object into a list of records.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + WithId,
{
    deserializer.deserialize_map(IdKeyedVisitor(PhantomData))
}

/// Parse a collection key. Only plain ASCII digits are accepted.
pub fn parse_id(key: &str) -> Result<u64, String> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("parse id {}: invalid digit found in string", key));
    }
    key.parse::<u64>()
        .map_err(|e| format!("parse id {}: {}", key, e))
}

struct IdKeyedVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for IdKeyedVisitor<T>
where
    T: Deserialize<'de> + WithId,
{
    type Value = Vec<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by numeric ids")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some(key) = map.next_key::<String>()? {
            let id = parse_id(&key).map_err(de::Error::custom)?;
            let mut record: T = map
                .next_value()
                .map_err(|e| de::Error::custom(format!("record {}: {}", key, e)))?;
            record.set_id(id);
            records.push(record);
        }

        Ok(records)
    }
}
