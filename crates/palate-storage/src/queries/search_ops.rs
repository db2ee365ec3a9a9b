//! Insert and read searches. Ordering is `(timestamp, search_id)` everywhere
//! so ties within the same microsecond still resolve to insertion order.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use palate_core::errors::{PalateError, PalateResult};
use palate_core::models::{Diet, Emotion, PriceRange, SearchId, SearchQuery, SearchRecord, UserId};

use super::{decode_ts, encode_ts, user_ops};
use crate::{corrupt_row, to_storage_err};

const SEARCH_COLUMNS: &str =
    "search_id, user_id, cuisines, tastes, diet, price_range, location, emotion, timestamp";

struct SearchRow {
    search_id: SearchId,
    user_id: UserId,
    cuisines: String,
    tastes: String,
    diet: String,
    price_range: String,
    location: String,
    emotion: Option<String>,
    timestamp: String,
}

impl SearchRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            search_id: row.get(0)?,
            user_id: row.get(1)?,
            cuisines: row.get(2)?,
            tastes: row.get(3)?,
            diet: row.get(4)?,
            price_range: row.get(5)?,
            location: row.get(6)?,
            emotion: row.get(7)?,
            timestamp: row.get(8)?,
        })
    }

    fn into_record(self) -> PalateResult<SearchRecord> {
        let cuisines: Vec<String> = serde_json::from_str(&self.cuisines)
            .map_err(|e| corrupt_row("searches", format!("cuisines: {e}")))?;
        let tastes: Vec<String> = serde_json::from_str(&self.tastes)
            .map_err(|e| corrupt_row("searches", format!("tastes: {e}")))?;

        Ok(SearchRecord {
            search_id: self.search_id,
            user_id: self.user_id,
            cuisines,
            tastes,
            diet: Diet::parse_stored(&self.diet),
            price_range: PriceRange::from_stored(&self.price_range),
            location: self.location,
            emotion: self.emotion.as_deref().map(Emotion::parse_lenient),
            timestamp: decode_ts("searches", &self.timestamp)?,
        })
    }
}

/// Insert a search stamped with `timestamp`.
pub fn insert_search(
    conn: &Connection,
    user_id: UserId,
    query: &SearchQuery,
    timestamp: DateTime<Utc>,
) -> PalateResult<SearchId> {
    query.validate()?;
    if !user_ops::user_exists(conn, user_id)? {
        return Err(PalateError::missing_user(user_id));
    }

    let cuisines = serde_json::to_string(&query.cuisines)?;
    let tastes = serde_json::to_string(&query.tastes)?;
    let price_range = serde_json::to_string(&query.price_range)?;

    conn.execute(
        "INSERT INTO searches (user_id, cuisines, tastes, diet, price_range, location, emotion, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            cuisines,
            tastes,
            query.diet.as_str(),
            price_range,
            query.location,
            query.emotion.as_str(),
            encode_ts(timestamp),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

pub fn get_recent_search(conn: &Connection, user_id: UserId) -> PalateResult<Option<SearchRecord>> {
    conn.query_row(
        &format!(
            "SELECT {SEARCH_COLUMNS} FROM searches WHERE user_id = ?1
             ORDER BY timestamp DESC, search_id DESC LIMIT 1"
        ),
        params![user_id],
        SearchRow::from_row,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .map(SearchRow::into_record)
    .transpose()
}

pub fn list_for_user(conn: &Connection, user_id: UserId) -> PalateResult<Vec<SearchRecord>> {
    collect(
        conn,
        &format!(
            "SELECT {SEARCH_COLUMNS} FROM searches WHERE user_id = ?1
             ORDER BY timestamp ASC, search_id ASC"
        ),
        params![user_id],
    )
}

pub fn list_all(conn: &Connection) -> PalateResult<Vec<SearchRecord>> {
    collect(
        conn,
        &format!(
            "SELECT {SEARCH_COLUMNS} FROM searches
             ORDER BY user_id ASC, timestamp ASC, search_id ASC"
        ),
        [],
    )
}

fn collect<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> PalateResult<Vec<SearchRecord>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, SearchRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut records = Vec::new();
    for row in rows {
        let row = row.map_err(|e| to_storage_err(e.to_string()))?;
        records.push(row.into_record()?);
    }
    Ok(records)
}
