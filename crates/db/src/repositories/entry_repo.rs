//! Repository for the `interview_screen_entries` table.

use scout_core::types::DbId;
use sqlx::PgConnection;

use crate::models::entry::{EntryInput, ScreenEntry};

const COLUMNS: &str = r#"id, screen_id, "order", name, prompt, text, response_key, response_type, response_type_options"#;

pub struct EntryRepo;

impl EntryRepo {
    /// List a screen's entries, sorted by order.
    pub async fn list_by_screen(
        conn: &mut PgConnection,
        screen_id: DbId,
    ) -> Result<Vec<ScreenEntry>, sqlx::Error> {
        let query = format!(
            r#"SELECT {COLUMNS} FROM interview_screen_entries WHERE screen_id = $1 ORDER BY "order", id"#
        );
        sqlx::query_as::<_, ScreenEntry>(&query)
            .bind(screen_id)
            .fetch_all(conn)
            .await
    }

    /// Insert a proposed entry. A proposed id is kept; otherwise one is assigned.
    pub async fn insert(
        conn: &mut PgConnection,
        screen_id: DbId,
        input: &EntryInput,
    ) -> Result<ScreenEntry, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO interview_screen_entries
                (id, screen_id, "order", name, prompt, text, response_key, response_type, response_type_options)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, ScreenEntry>(&query)
            .bind(input.id.unwrap_or_else(DbId::new_v4))
            .bind(screen_id)
            .bind(input.order)
            .bind(&input.name)
            .bind(&input.prompt)
            .bind(&input.text)
            .bind(&input.response_key)
            .bind(&input.response_type)
            .bind(&input.response_type_options)
            .fetch_one(conn)
            .await
    }

    /// Write every mutable column of `entry`.
    pub async fn save(conn: &mut PgConnection, entry: &ScreenEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"UPDATE interview_screen_entries SET
                "order" = $2,
                name = $3,
                prompt = $4,
                text = $5,
                response_key = $6,
                response_type = $7,
                response_type_options = $8
             WHERE id = $1"#,
        )
        .bind(entry.id)
        .bind(entry.order)
        .bind(&entry.name)
        .bind(&entry.prompt)
        .bind(&entry.text)
        .bind(&entry.response_key)
        .bind(&entry.response_type)
        .bind(&entry.response_type_options)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM interview_screen_entries WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
