// src/domain/time.rs
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

pub fn to_rfc3339(ts: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// `serialize_with` helper: unix seconds out as RFC 3339.
pub fn rfc3339<S: Serializer>(ts: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    match to_rfc3339(*ts) {
        Some(s) => serializer.serialize_str(&s),
        None => serializer.serialize_i64(*ts),
    }
}

pub fn rfc3339_opt<S: Serializer>(ts: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => rfc3339(ts, serializer),
        None => serializer.serialize_none(),
    }
}
