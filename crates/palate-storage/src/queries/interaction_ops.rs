//! Append-only like/dislike events.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use palate_core::errors::{PalateError, PalateResult};
use palate_core::models::{Feedback, Interaction, InteractionId, UserId};

use super::{decode_ts, encode_ts, user_ops};
use crate::to_storage_err;

pub fn insert_interaction(
    conn: &Connection,
    user_id: UserId,
    cuisine: &str,
    feedback: Feedback,
    timestamp: DateTime<Utc>,
) -> PalateResult<InteractionId> {
    if !user_ops::user_exists(conn, user_id)? {
        return Err(PalateError::missing_user(user_id));
    }

    conn.execute(
        "INSERT INTO interactions (user_id, cuisine, feedback, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, cuisine, feedback.label(), encode_ts(timestamp)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

/// Every interaction in insertion order.
pub fn list_all(conn: &Connection) -> PalateResult<Vec<Interaction>> {
    let mut stmt = conn
        .prepare(
            "SELECT interaction_id, user_id, cuisine, feedback, timestamp
             FROM interactions ORDER BY interaction_id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, InteractionId>(0)?,
                row.get::<_, UserId>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut interactions = Vec::new();
    for row in rows {
        let (interaction_id, user_id, cuisine, feedback, timestamp) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        interactions.push(Interaction {
            interaction_id,
            user_id,
            cuisine,
            feedback: Feedback::from_label(feedback)?,
            timestamp: decode_ts("interactions", &timestamp)?,
        });
    }
    Ok(interactions)
}

pub fn count(conn: &Connection) -> PalateResult<usize> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM interactions", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}
