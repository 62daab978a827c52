//! Repository for the `interviews` table.

use scout_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::interview::{CreateInterview, Interview};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, notes, vanity_url, published, created_at, updated_at";

/// Maximum number of interviews returned by [`InterviewRepo::list`].
pub const MAX_LIST_LIMIT: i64 = 100;

/// Provides CRUD operations for interviews.
pub struct InterviewRepo;

impl InterviewRepo {
    /// Insert a new interview with a server-assigned id, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateInterview,
    ) -> Result<Interview, sqlx::Error> {
        let query = format!(
            "INSERT INTO interviews (id, name, description, notes, vanity_url, published) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Interview>(&query)
            .bind(DbId::new_v4())
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.notes)
            .bind(&input.vanity_url)
            .bind(input.published)
            .fetch_one(conn)
            .await
    }

    /// Find an interview by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Interview>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interviews WHERE id = $1");
        sqlx::query_as::<_, Interview>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an interview and lock its row until the transaction ends.
    ///
    /// Every mutation of an interview's screens takes this lock first, so
    /// concurrent inserts into one interview are serialised.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Interview>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interviews WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Interview>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List interviews, oldest first, capped at [`MAX_LIST_LIMIT`].
    pub async fn list(pool: &PgPool) -> Result<Vec<Interview>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interviews ORDER BY created_at, id LIMIT $1");
        sqlx::query_as::<_, Interview>(&query)
            .bind(MAX_LIST_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Write every mutable column of `interview` and bump `updated_at`.
    pub async fn save(
        conn: &mut PgConnection,
        interview: &Interview,
    ) -> Result<Interview, sqlx::Error> {
        let query = format!(
            "UPDATE interviews SET \
                name = $2, \
                description = $3, \
                notes = $4, \
                vanity_url = $5, \
                published = $6, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Interview>(&query)
            .bind(interview.id)
            .bind(&interview.name)
            .bind(&interview.description)
            .bind(&interview.notes)
            .bind(&interview.vanity_url)
            .bind(interview.published)
            .fetch_one(conn)
            .await
    }

    /// Delete an interview and, by cascade, everything it owns.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
