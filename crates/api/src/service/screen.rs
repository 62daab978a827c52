//! Screen-level operations: ordered insertion, full replacement of a screen's
//! entries and actions, and removal with renumbering.

use scout_core::error::CoreError;
use scout_core::ordering::{adjust_screen_order, close_gap, validate_sequential_order};
use scout_core::reconcile::{reconcile, MergeFrom, Reconciliation, Upsert};
use scout_core::types::DbId;
use scout_db::models::action::{ActionInput, ConditionalAction};
use scout_db::models::entry::{EntryInput, ScreenEntry};
use scout_db::models::screen::{CreateScreen, Screen, ScreenWithChildren, UpdateScreen};
use scout_db::repositories::{ActionRepo, EntryRepo, InterviewRepo, ScreenRepo};
use scout_db::DbPool;
use sqlx::PgConnection;

use crate::error::AppResult;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "InterviewScreen",
        id,
    }
}

pub struct ScreenService;

impl ScreenService {
    /// Insert a screen into its interview, renumbering displaced siblings.
    ///
    /// A missing interview is left to the foreign key, which fails the
    /// insert as a constraint violation.
    pub async fn create(pool: &DbPool, input: &CreateScreen) -> AppResult<Screen> {
        let mut tx = pool.begin().await?;
        InterviewRepo::find_for_update(&mut tx, input.interview_id).await?;

        let siblings = ScreenRepo::list_by_interview(&mut tx, input.interview_id).await?;
        let adjustment = adjust_screen_order(siblings, input.order)?;

        for sibling in adjustment.shifted() {
            ScreenRepo::set_order(&mut tx, sibling.id, sibling.order).await?;
        }
        let screen = ScreenRepo::insert(&mut tx, input, adjustment.order).await?;
        tx.commit().await?;

        tracing::info!(
            screen_id = %screen.id,
            interview_id = %screen.interview_id,
            order = screen.order,
            shifted = adjustment.shifted().len(),
            "Screen created"
        );
        Ok(screen)
    }

    /// Fetch a screen with its actions and entries.
    pub async fn get_with_children(pool: &DbPool, id: DbId) -> AppResult<ScreenWithChildren> {
        let mut conn = pool.acquire().await?;
        let screen = ScreenRepo::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Self::with_children(&mut conn, screen).await
    }

    /// Replace a screen's fields, actions and entries in one transaction.
    ///
    /// A missing screen is reported before the payload is looked at. Both
    /// child lists are then checked for contiguous ordering before anything
    /// is written. Each list is reconciled against the persisted rows:
    /// matched rows are diff-merged, unmatched proposals inserted and rows
    /// missing from the proposal deleted.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: UpdateScreen,
    ) -> AppResult<ScreenWithChildren> {
        let mut tx = pool.begin().await?;
        let mut screen = ScreenRepo::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        validate_sequential_order(&input.actions)?;
        validate_sequential_order(&input.entries)?;

        if screen.merge_from(&input) {
            ScreenRepo::save(&mut tx, &screen).await?;
        }

        let UpdateScreen {
            actions, entries, ..
        } = input;

        let existing_actions = ActionRepo::list_by_screen(&mut tx, id).await?;
        let action_plan = reconcile(existing_actions, actions)?;
        let existing_entries = EntryRepo::list_by_screen(&mut tx, id).await?;
        let entry_plan = reconcile(existing_entries, entries)?;

        let actions = action_plan.summary();
        let entries = entry_plan.summary();
        tracing::info!(
            screen_id = %id,
            actions_added = actions.added,
            actions_changed = actions.changed,
            actions_removed = actions.removed,
            entries_added = entries.added,
            entries_changed = entries.changed,
            entries_removed = entries.removed,
            "Making changes to screen"
        );

        Self::apply_actions(&mut tx, id, &action_plan).await?;
        Self::apply_entries(&mut tx, id, &entry_plan).await?;

        let result = Self::with_children(&mut tx, screen).await?;
        tx.commit().await?;
        Ok(result)
    }

    /// Delete a screen and close the gap it leaves in its interview.
    pub async fn delete(pool: &DbPool, id: DbId) -> AppResult<()> {
        let mut tx = pool.begin().await?;
        let screen = ScreenRepo::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        InterviewRepo::find_for_update(&mut tx, screen.interview_id).await?;

        let mut siblings = ScreenRepo::list_by_interview(&mut tx, screen.interview_id).await?;
        let Some(index) = siblings.iter().position(|s| s.id == id) else {
            return Err(not_found(id).into());
        };
        let removed = siblings.remove(index);

        ScreenRepo::delete(&mut tx, id).await?;
        for sibling in close_gap(&mut siblings, removed.order) {
            ScreenRepo::set_order(&mut tx, sibling.id, sibling.order).await?;
        }
        tx.commit().await?;

        tracing::info!(screen_id = %id, interview_id = %removed.interview_id, "Screen deleted");
        Ok(())
    }

    // ---- private helpers ----

    async fn with_children(
        conn: &mut PgConnection,
        screen: Screen,
    ) -> AppResult<ScreenWithChildren> {
        let actions = ActionRepo::list_by_screen(conn, screen.id).await?;
        let entries = EntryRepo::list_by_screen(conn, screen.id).await?;
        Ok(ScreenWithChildren {
            screen,
            actions,
            entries,
        })
    }

    async fn apply_actions(
        conn: &mut PgConnection,
        screen_id: DbId,
        plan: &Reconciliation<ConditionalAction, ActionInput>,
    ) -> AppResult<()> {
        for action in &plan.to_delete {
            ActionRepo::delete(conn, action.id).await?;
        }
        for upsert in &plan.to_set {
            match upsert {
                Upsert::Update { row, changed: true } => ActionRepo::save(conn, row).await?,
                Upsert::Update { changed: false, .. } => {}
                Upsert::Insert(input) => {
                    ActionRepo::insert(conn, screen_id, input).await?;
                }
            }
        }
        Ok(())
    }

    async fn apply_entries(
        conn: &mut PgConnection,
        screen_id: DbId,
        plan: &Reconciliation<ScreenEntry, EntryInput>,
    ) -> AppResult<()> {
        for entry in &plan.to_delete {
            EntryRepo::delete(conn, entry.id).await?;
        }
        for upsert in &plan.to_set {
            match upsert {
                Upsert::Update { row, changed: true } => EntryRepo::save(conn, row).await?,
                Upsert::Update { changed: false, .. } => {}
                Upsert::Insert(input) => {
                    EntryRepo::insert(conn, screen_id, input).await?;
                }
            }
        }
        Ok(())
    }
}
