//! Repository for the `interview_screens` table.

use scout_core::types::DbId;
use sqlx::PgConnection;

use crate::models::screen::{CreateScreen, Screen};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = r#"id, interview_id, "order", title, header_text, is_in_starting_state, starting_state_order"#;

/// Provides persistence for screens. Ordering rules live in
/// `scout_core::ordering`; this repository only reads and writes rows.
pub struct ScreenRepo;

impl ScreenRepo {
    /// Find a screen by its id.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interview_screens WHERE id = $1");
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a screen and lock its row until the transaction ends.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interview_screens WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List every screen of an interview, sorted by order.
    pub async fn list_by_interview(
        conn: &mut PgConnection,
        interview_id: DbId,
    ) -> Result<Vec<Screen>, sqlx::Error> {
        let query = format!(
            r#"SELECT {COLUMNS} FROM interview_screens WHERE interview_id = $1 ORDER BY "order", id"#
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(interview_id)
            .fetch_all(conn)
            .await
    }

    /// Insert a new screen at `order`, outside the starting state.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateScreen,
        order: i32,
    ) -> Result<Screen, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO interview_screens (id, interview_id, "order", title, header_text)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(DbId::new_v4())
            .bind(input.interview_id)
            .bind(order)
            .bind(&input.title)
            .bind(&input.header_text)
            .fetch_one(conn)
            .await
    }

    /// Write the editable fields of `screen`.
    ///
    /// Order and starting-state membership are left alone; they have their
    /// own narrow writers so concurrent edits never overwrite each other.
    pub async fn save(conn: &mut PgConnection, screen: &Screen) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE interview_screens SET title = $2, header_text = $3 WHERE id = $1")
            .bind(screen.id)
            .bind(&screen.title)
            .bind(&screen.header_text)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Write only the order of a screen.
    pub async fn set_order(
        conn: &mut PgConnection,
        id: DbId,
        order: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(r#"UPDATE interview_screens SET "order" = $2 WHERE id = $1"#)
            .bind(id)
            .bind(order)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Write only the starting-state columns of a screen.
    pub async fn set_starting_state(
        conn: &mut PgConnection,
        id: DbId,
        is_in_starting_state: bool,
        starting_state_order: Option<i32>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE interview_screens SET is_in_starting_state = $2, starting_state_order = $3
             WHERE id = $1",
        )
        .bind(id)
        .bind(is_in_starting_state)
        .bind(starting_state_order)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Delete a screen and, by cascade, its entries and actions.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM interview_screens WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
