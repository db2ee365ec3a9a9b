//! The single persisted classifier slot.

use rusqlite::{params, Connection, OptionalExtension};

use palate_core::errors::PalateResult;
use palate_core::models::StoredModel;

use super::{decode_ts, encode_ts};
use crate::to_storage_err;

/// Replace whatever model is stored.
pub fn save_model(conn: &Connection, model: &StoredModel) -> PalateResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO model_artifacts
            (slot, payload, schema_version, feature_width, trained_rows, trained_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5)",
        params![
            model.payload,
            model.schema_version,
            model.feature_width as i64,
            model.trained_rows as i64,
            encode_ts(model.trained_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn load_model(conn: &Connection) -> PalateResult<Option<StoredModel>> {
    let row = conn
        .query_row(
            "SELECT payload, schema_version, feature_width, trained_rows, trained_at
             FROM model_artifacts WHERE slot = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, Vec<u8>>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((payload, schema_version, feature_width, trained_rows, trained_at)) = row else {
        return Ok(None);
    };

    Ok(Some(StoredModel {
        payload,
        schema_version,
        feature_width: feature_width as usize,
        trained_rows: trained_rows as usize,
        trained_at: decode_ts("model_artifacts", &trained_at)?,
    }))
}
