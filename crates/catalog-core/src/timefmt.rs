//! Timestamp formatting for API responses.
//!
//! Every timestamp the catalog API emits is RFC 3339 UTC with exactly
//! three fractional digits, so clients can parse a single fixed shape.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Serde `serialize_with` helper producing e.g. `2024-05-01T09:30:00.000Z`.
pub fn rfc3339_millis<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
