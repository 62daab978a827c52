//! Interview screen model and DTOs.

use scout_core::diff::set_if_changed;
use scout_core::ordering::{Ordered, Reorderable};
use scout_core::reconcile::MergeFrom;
use scout_core::starting_state::{StartingState, StartingStateMember};
use scout_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::action::{ActionInput, ConditionalAction};
use crate::models::entry::{EntryInput, ScreenEntry};

/// A screen row from the `interview_screens` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Screen {
    pub id: DbId,
    pub interview_id: DbId,
    pub order: i32,
    pub title: String,
    pub header_text: Option<String>,
    pub is_in_starting_state: bool,
    pub starting_state_order: Option<i32>,
}

/// DTO for creating a screen.
///
/// Without an `order` the screen is appended after its last sibling. The
/// first screen of an interview always gets order 1.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScreen {
    pub interview_id: DbId,
    pub title: String,
    pub header_text: Option<String>,
    pub order: Option<i32>,
}

/// DTO for replacing a screen together with its actions and entries.
///
/// `order` and starting-state membership are not part of the payload: they
/// only change through screen creation and the starting-state endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScreen {
    pub title: String,
    pub header_text: Option<String>,
    pub actions: Vec<ActionInput>,
    pub entries: Vec<EntryInput>,
}

impl MergeFrom<UpdateScreen> for Screen {
    fn merge_from(&mut self, proposed: &UpdateScreen) -> bool {
        let mut changed = false;
        changed |= set_if_changed(&mut self.title, &proposed.title);
        changed |= set_if_changed(&mut self.header_text, &proposed.header_text);
        changed
    }
}

impl Ordered for Screen {
    fn order(&self) -> i32 {
        self.order
    }
}

impl Reorderable for Screen {
    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

impl StartingStateMember for Screen {
    type Id = DbId;

    fn id(&self) -> DbId {
        self.id
    }

    fn starting_state(&self) -> StartingState {
        match self.starting_state_order {
            Some(order) if self.is_in_starting_state => StartingState::Starting(order),
            _ => StartingState::NotStarting,
        }
    }

    fn set_starting_state(&mut self, state: StartingState) {
        self.is_in_starting_state = state.is_in_starting_state();
        self.starting_state_order = state.starting_state_order();
    }
}

/// A screen with its actions and entries, each sorted by order.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenWithChildren {
    #[serde(flatten)]
    pub screen: Screen,
    pub actions: Vec<ConditionalAction>,
    pub entries: Vec<ScreenEntry>,
}
