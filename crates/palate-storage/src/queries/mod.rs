//! Query modules, one per table. Each function takes a borrowed connection
//! so the engine decides which connection (writer or reader) runs it.

pub mod interaction_ops;
pub mod model_ops;
pub mod search_ops;
pub mod user_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use palate_core::errors::PalateResult;

use crate::corrupt_row;

/// Fixed-width RFC 3339 so lexicographic order equals time order.
pub(crate) fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_ts(table: &str, raw: &str) -> PalateResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt_row(table, format!("bad timestamp {raw:?}: {e}")))
}
