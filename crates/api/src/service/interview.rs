//! Interview-level operations: CRUD, settings reconciliation and the
//! starting-state flow.

use scout_core::error::CoreError;
use scout_core::reconcile::{reconcile, MergeFrom, Upsert};
use scout_core::starting_state::{apply_starting_state, StartingStateMember};
use scout_core::types::DbId;
use scout_db::models::interview::{
    CreateInterview, Interview, InterviewWithScreens, InterviewWithSettings, UpdateInterview,
};
use scout_db::models::setting::{validate_settings, InterviewSetting, ValidSetting};
use scout_db::repositories::{InterviewRepo, ScreenRepo, SettingRepo};
use scout_db::DbPool;
use sqlx::PgConnection;

use crate::error::AppResult;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Interview",
        id,
    }
}

pub struct InterviewService;

impl InterviewService {
    /// Create an interview together with its settings.
    pub async fn create(
        pool: &DbPool,
        input: &CreateInterview,
    ) -> AppResult<InterviewWithSettings> {
        let settings = validate_settings(&input.interview_settings)?;

        let mut tx = pool.begin().await?;
        let interview = InterviewRepo::create(&mut tx, input).await?;
        let mut interview_settings = Vec::with_capacity(settings.len());
        for setting in &settings {
            interview_settings.push(SettingRepo::insert(&mut tx, interview.id, setting).await?);
        }
        tx.commit().await?;

        tracing::info!(interview_id = %interview.id, "Interview created");
        Ok(InterviewWithSettings {
            interview,
            interview_settings,
        })
    }

    /// List interviews (at most 100).
    pub async fn list(pool: &DbPool) -> AppResult<Vec<Interview>> {
        Ok(InterviewRepo::list(pool).await?)
    }

    /// Fetch an interview with its screens and settings.
    pub async fn get_with_screens(pool: &DbPool, id: DbId) -> AppResult<InterviewWithScreens> {
        let interview = InterviewRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut conn = pool.acquire().await?;
        Self::with_screens(&mut conn, interview).await
    }

    /// Diff-merge the interview's fields and, when supplied, reconcile its
    /// settings.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateInterview,
    ) -> AppResult<InterviewWithSettings> {
        let proposed_settings = input
            .interview_settings
            .as_deref()
            .map(validate_settings)
            .transpose()?;

        let mut tx = pool.begin().await?;
        let mut interview = InterviewRepo::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if interview.merge_from(input) {
            interview = InterviewRepo::save(&mut tx, &interview).await?;
        }

        if let Some(proposed) = proposed_settings {
            Self::reconcile_settings(&mut tx, id, proposed).await?;
        }

        let interview_settings = SettingRepo::list_by_interview(&mut tx, id).await?;
        tx.commit().await?;

        Ok(InterviewWithSettings {
            interview,
            interview_settings,
        })
    }

    /// Replace the starting flow of an interview.
    ///
    /// Screens listed in `starting_flow` join the starting state ranked by
    /// their position; every other screen of the interview leaves it. Only the
    /// starting-state columns of screens whose membership moved are written,
    /// all in one transaction.
    pub async fn set_starting_state(
        pool: &DbPool,
        id: DbId,
        starting_flow: &[DbId],
    ) -> AppResult<InterviewWithScreens> {
        let mut tx = pool.begin().await?;
        let interview = InterviewRepo::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut screens = ScreenRepo::list_by_interview(&mut tx, id).await?;
        let before: Vec<_> = screens.iter().map(|s| s.starting_state()).collect();
        let changed = apply_starting_state(&mut screens, starting_flow)?;

        for (screen, previous) in screens.iter().zip(before) {
            if screen.starting_state() != previous {
                ScreenRepo::set_starting_state(
                    &mut tx,
                    screen.id,
                    screen.is_in_starting_state,
                    screen.starting_state_order,
                )
                .await?;
            }
        }

        let result = Self::with_screens(&mut tx, interview).await?;
        tx.commit().await?;

        tracing::info!(interview_id = %id, changed, "Starting state updated");
        Ok(result)
    }

    /// Delete an interview and everything it owns.
    pub async fn delete(pool: &DbPool, id: DbId) -> AppResult<()> {
        if InterviewRepo::delete(pool, id).await? {
            tracing::info!(interview_id = %id, "Interview deleted");
            Ok(())
        } else {
            Err(not_found(id).into())
        }
    }

    // ---- private helpers ----

    async fn with_screens(
        conn: &mut PgConnection,
        interview: Interview,
    ) -> AppResult<InterviewWithScreens> {
        let screens = ScreenRepo::list_by_interview(conn, interview.id).await?;
        let interview_settings = SettingRepo::list_by_interview(conn, interview.id).await?;
        Ok(InterviewWithScreens {
            interview,
            screens,
            interview_settings,
        })
    }

    async fn reconcile_settings(
        conn: &mut PgConnection,
        interview_id: DbId,
        proposed: Vec<ValidSetting>,
    ) -> AppResult<()> {
        let existing: Vec<InterviewSetting> =
            SettingRepo::list_by_interview(conn, interview_id).await?;
        let plan = reconcile(existing, proposed)?;
        if plan.is_noop() {
            return Ok(());
        }
        let summary = plan.summary();

        for setting in &plan.to_delete {
            SettingRepo::delete(conn, setting.id).await?;
        }
        for upsert in &plan.to_set {
            match upsert {
                Upsert::Update { row, changed: true } => SettingRepo::save(conn, row).await?,
                Upsert::Update { changed: false, .. } => {}
                Upsert::Insert(setting) => {
                    SettingRepo::insert(conn, interview_id, setting).await?;
                }
            }
        }

        tracing::info!(
            %interview_id,
            added = summary.added,
            changed = summary.changed,
            removed = summary.removed,
            "Interview settings reconciled"
        );
        Ok(())
    }
}
