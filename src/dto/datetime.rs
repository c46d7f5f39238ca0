//! Timestamps in request bodies. RFC 3339 values keep their offset; naive
//! values such as `2024-11-25T16:20:15` are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error};

pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    value
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid datetime {raw:?}")))
}

pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid datetime {raw:?}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn naive_timestamps_are_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 11, 25, 16, 20, 15).unwrap();
        assert_eq!(parse("2024-11-25T16:20:15"), Some(expected));
        assert_eq!(parse("2024-11-25 16:20:15"), Some(expected));
    }

    #[test]
    fn offsets_are_respected() {
        let expected = Utc.with_ymd_and_hms(2024, 11, 25, 14, 20, 15).unwrap();
        assert_eq!(parse("2024-11-25T16:20:15+02:00"), Some(expected));
        assert_eq!(parse("2024-11-25T14:20:15Z"), Some(expected));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse("next tuesday"), None);
        assert_eq!(parse(""), None);
    }
}
