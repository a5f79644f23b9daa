//! Serde adapters for `google.protobuf.Timestamp`.
//!
//! `prost_types::Timestamp` has no `Serialize`/`Deserialize` impls. These
//! modules map it to its canonical protobuf JSON form, an RFC 3339 string
//! in UTC (`"2025-01-15T09:30:00Z"`), for use with `#[serde(with = "...")]`.

/// Serde adapter for `Option<prost_types::Timestamp>`.
///
/// `None` serializes as JSON `null`; both `null` and a missing field
/// deserialize back to `None`.
pub mod opt_timestamp {
    use prost_types::Timestamp;
    use serde::{self, Deserialize, Deserializer, Serializer};

    /// Serialize an optional `Timestamp` as an RFC 3339 string or `null`.
    ///
    /// # Errors
    ///
    /// Returns `S::Error` if the timestamp is out of range or has negative nanos.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => super::timestamp::serialize(ts, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional `Timestamp` from an RFC 3339 string or `null`.
    ///
    /// # Errors
    ///
    /// Returns `D::Error` if the string is not a valid RFC 3339 datetime.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::timestamp::parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Serde adapter for `prost_types::Timestamp`.
pub mod timestamp {
    use chrono::SecondsFormat;
    use prost_types::Timestamp;
    use serde::{self, Deserialize, Deserializer, Serializer};

    /// Render a `Timestamp` as RFC 3339 UTC with a `Z` suffix.
    ///
    /// Fractional seconds are emitted only when `nanos` is non-zero.
    ///
    /// # Errors
    ///
    /// Returns a message if `nanos` is negative or the instant is out of range.
    pub fn format(value: &Timestamp) -> Result<String, String> {
        let nanos = u32::try_from(value.nanos).map_err(|_| "negative nanos in Timestamp")?;
        let dt = chrono::DateTime::from_timestamp(value.seconds, nanos)
            .ok_or("timestamp out of range")?;
        Ok(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    /// Parse an RFC 3339 string into a `Timestamp`.
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error message on malformed input.
    pub fn parse(s: &str) -> Result<Timestamp, String> {
        let dt = chrono::DateTime::parse_from_rfc3339(s).map_err(|e| e.to_string())?;
        // subsec nanos are < 1_000_000_000 and always fit in i32
        #[allow(clippy::cast_possible_wrap)]
        Ok(Timestamp {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos() as i32,
        })
    }

    /// Serialize a `Timestamp` as an RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Returns `S::Error` if the timestamp is out of range or has negative nanos.
    pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = format(value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }

    /// Deserialize a `Timestamp` from an RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Returns `D::Error` if the string is not a valid RFC 3339 datetime.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }
}
