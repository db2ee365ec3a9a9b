//! Get-or-create, bias reads, mood and survey updates.

use rusqlite::{params, Connection, OptionalExtension, Row};

use palate_core::constants::{DEFAULT_TEMPERATURE_BIAS, DEFAULT_TOURIST_BIAS};
use palate_core::errors::{PalateError, PalateResult};
use palate_core::models::{Emotion, SurveyAnswers, UserBiasState, UserId, UserInfo};

use crate::{corrupt_row, to_storage_err};

const USER_COLUMNS: &str =
    "user_id, username, temperature_bias, tourist_bias, emotion, other_preferences";

/// Raw column values; NULL biases stay `None` until a caller resolves them.
struct UserRow {
    user_id: UserId,
    username: String,
    temperature_bias: Option<f64>,
    tourist_bias: Option<f64>,
    emotion: Option<String>,
    other_preferences: String,
}

impl UserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            user_id: row.get(0)?,
            username: row.get(1)?,
            temperature_bias: row.get(2)?,
            tourist_bias: row.get(3)?,
            emotion: row.get(4)?,
            other_preferences: row.get(5)?,
        })
    }

    fn bias_state(&self) -> UserBiasState {
        UserBiasState {
            temperature_bias: self.temperature_bias,
            tourist_bias: self.tourist_bias,
            emotion: self.emotion.as_deref().map(Emotion::parse_lenient),
        }
    }

    fn into_user_info(self) -> PalateResult<UserInfo> {
        let other_preferences = serde_json::from_str(&self.other_preferences)
            .map_err(|e| corrupt_row("users", format!("other_preferences: {e}")))?;
        let bias = self.bias_state();
        Ok(UserInfo {
            user_id: self.user_id,
            username: self.username,
            temperature_bias: bias.temperature_bias(),
            tourist_bias: bias.tourist_bias(),
            emotion: bias.emotion(),
            other_preferences,
        })
    }
}

fn find_by_name(conn: &Connection, username: &str) -> PalateResult<Option<UserRow>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
        params![username],
        UserRow::from_row,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

fn find_by_id(conn: &Connection, user_id: UserId) -> PalateResult<Option<UserRow>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
        params![user_id],
        UserRow::from_row,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Return the named user, creating it with default biases when absent.
pub fn get_or_create_user(conn: &Connection, username: &str) -> PalateResult<(UserInfo, bool)> {
    let username = username.trim();
    if username.is_empty() {
        return Err(PalateError::invalid("username", "must not be empty"));
    }

    if let Some(existing) = find_by_name(conn, username)? {
        return Ok((existing.into_user_info()?, false));
    }

    conn.execute(
        "INSERT INTO users (username, temperature_bias, tourist_bias, emotion, other_preferences)
         VALUES (?1, ?2, ?3, ?4, '{}')",
        params![
            username,
            DEFAULT_TEMPERATURE_BIAS,
            DEFAULT_TOURIST_BIAS,
            Emotion::Neutral.as_str(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let user_id = conn.last_insert_rowid();
    tracing::info!(user_id, username, "created user");
    Ok((UserInfo::new_default(user_id, username), true))
}

pub fn get_user(conn: &Connection, user_id: UserId) -> PalateResult<Option<UserInfo>> {
    find_by_id(conn, user_id)?
        .map(UserRow::into_user_info)
        .transpose()
}

/// Bias state with absent columns left as `None`.
pub fn get_user_data(conn: &Connection, user_id: UserId) -> PalateResult<UserBiasState> {
    find_by_id(conn, user_id)?
        .map(|row| row.bias_state())
        .ok_or_else(|| PalateError::missing_user(user_id))
}

pub fn list_users(conn: &Connection) -> PalateResult<Vec<UserInfo>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY user_id"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], UserRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut users = Vec::new();
    for row in rows {
        let row = row.map_err(|e| to_storage_err(e.to_string()))?;
        users.push(row.into_user_info()?);
    }
    Ok(users)
}

pub fn update_emotion(conn: &Connection, user_id: UserId, emotion: Emotion) -> PalateResult<()> {
    let changed = conn
        .execute(
            "UPDATE users SET emotion = ?1 WHERE user_id = ?2",
            params![emotion.as_str(), user_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(PalateError::missing_user(user_id));
    }
    Ok(())
}

/// Persist survey answers and the biases derived from them.
pub fn update_preferences(
    conn: &Connection,
    user_id: UserId,
    answers: &SurveyAnswers,
) -> PalateResult<UserBiasState> {
    let temperature_bias = answers.temperature_bias();
    let tourist_bias = answers.tourist_bias();
    let preferences = serde_json::to_string(&answers.to_preferences())?;

    let changed = conn
        .execute(
            "UPDATE users SET other_preferences = ?1, temperature_bias = ?2, tourist_bias = ?3
             WHERE user_id = ?4",
            params![preferences, temperature_bias, tourist_bias, user_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(PalateError::missing_user(user_id));
    }

    get_user_data(conn, user_id)
}

pub fn user_exists(conn: &Connection, user_id: UserId) -> PalateResult<bool> {
    Ok(find_by_id(conn, user_id)?.is_some())
}
