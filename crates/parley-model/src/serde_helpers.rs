// SPDX-License-Identifier: Apache-2.0

//! Deserialization helpers shared by inbound payload types.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Accepts a message timestamp as either an RFC 3339 string or an integer
/// epoch-milliseconds value, normalizing to `DateTime<Utc>`.
///
/// Usage: `#[serde(default, deserialize_with = "flexible_timestamp_opt")]`.
pub fn flexible_timestamp_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Millis(i64),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(Raw::Text(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {s:?}: {e}"))),
        Some(Raw::Millis(ms)) => match Utc.timestamp_millis_opt(ms) {
            chrono::LocalResult::Single(dt) => Ok(Some(dt)),
            _ => Err(serde::de::Error::custom(format!(
                "timestamp out of range: {ms}"
            ))),
        },
    }
}
