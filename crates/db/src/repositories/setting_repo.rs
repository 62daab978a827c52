//! Repository for the `interview_settings` table.

use scout_core::types::DbId;
use sqlx::PgConnection;

use crate::models::setting::{InterviewSetting, ValidSetting};

const COLUMNS: &str = "id, interview_id, type, settings";

pub struct SettingRepo;

impl SettingRepo {
    /// List an interview's settings in a stable order.
    pub async fn list_by_interview(
        conn: &mut PgConnection,
        interview_id: DbId,
    ) -> Result<Vec<InterviewSetting>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM interview_settings WHERE interview_id = $1 ORDER BY id");
        sqlx::query_as::<_, InterviewSetting>(&query)
            .bind(interview_id)
            .fetch_all(conn)
            .await
    }

    /// Insert a validated setting. A proposed id is kept; otherwise one is assigned.
    pub async fn insert(
        conn: &mut PgConnection,
        interview_id: DbId,
        setting: &ValidSetting,
    ) -> Result<InterviewSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO interview_settings (id, interview_id, type, settings) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InterviewSetting>(&query)
            .bind(setting.id.unwrap_or_else(DbId::new_v4))
            .bind(interview_id)
            .bind(setting.setting_type.as_str())
            .bind(&setting.settings)
            .fetch_one(conn)
            .await
    }

    pub async fn save(
        conn: &mut PgConnection,
        setting: &InterviewSetting,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE interview_settings SET type = $2, settings = $3 WHERE id = $1")
            .bind(setting.id)
            .bind(&setting.setting_type)
            .bind(&setting.settings)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM interview_settings WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
