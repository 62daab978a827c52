//! Repository for the `conditional_actions` table.

use scout_core::types::DbId;
use sqlx::PgConnection;

use crate::models::action::{ActionInput, ConditionalAction};

const COLUMNS: &str = r#"id, screen_id, "order", action_type, action_payload, condition_response_key, condition_operator, condition_value"#;

pub struct ActionRepo;

impl ActionRepo {
    /// List a screen's actions, sorted by order.
    pub async fn list_by_screen(
        conn: &mut PgConnection,
        screen_id: DbId,
    ) -> Result<Vec<ConditionalAction>, sqlx::Error> {
        let query = format!(
            r#"SELECT {COLUMNS} FROM conditional_actions WHERE screen_id = $1 ORDER BY "order", id"#
        );
        sqlx::query_as::<_, ConditionalAction>(&query)
            .bind(screen_id)
            .fetch_all(conn)
            .await
    }

    /// Insert a proposed action. A proposed id is kept; otherwise one is assigned.
    pub async fn insert(
        conn: &mut PgConnection,
        screen_id: DbId,
        input: &ActionInput,
    ) -> Result<ConditionalAction, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO conditional_actions
                (id, screen_id, "order", action_type, action_payload,
                 condition_response_key, condition_operator, condition_value)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, ConditionalAction>(&query)
            .bind(input.id.unwrap_or_else(DbId::new_v4))
            .bind(screen_id)
            .bind(input.order)
            .bind(&input.action_type)
            .bind(&input.action_payload)
            .bind(&input.condition_response_key)
            .bind(&input.condition_operator)
            .bind(&input.condition_value)
            .fetch_one(conn)
            .await
    }

    /// Write every mutable column of `action`.
    pub async fn save(
        conn: &mut PgConnection,
        action: &ConditionalAction,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE conditional_actions SET \
                \"order\" = $2, \
                action_type = $3, \
                action_payload = $4, \
                condition_response_key = $5, \
                condition_operator = $6, \
                condition_value = $7 \
             WHERE id = $1",
        )
        .bind(action.id)
        .bind(action.order)
        .bind(&action.action_type)
        .bind(&action.action_payload)
        .bind(&action.condition_response_key)
        .bind(&action.condition_operator)
        .bind(&action.condition_value)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM conditional_actions WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
