//! Conditional action model and DTO.

use scout_core::diff::set_if_changed;
use scout_core::ordering::Ordered;
use scout_core::reconcile::{MergeFrom, Persisted, Proposed};
use scout_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An action row from the `conditional_actions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ConditionalAction {
    pub id: DbId,
    pub screen_id: DbId,
    pub order: i32,
    pub action_type: String,
    pub action_payload: String,
    pub condition_response_key: Option<String>,
    pub condition_operator: Option<String>,
    pub condition_value: Option<String>,
}

/// An action as proposed in a screen update. Without an `id` it is new.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionInput {
    pub id: Option<DbId>,
    pub order: i32,
    pub action_type: String,
    #[serde(default)]
    pub action_payload: String,
    pub condition_response_key: Option<String>,
    pub condition_operator: Option<String>,
    pub condition_value: Option<String>,
}

impl Ordered for ActionInput {
    fn order(&self) -> i32 {
        self.order
    }
}

impl Ordered for ConditionalAction {
    fn order(&self) -> i32 {
        self.order
    }
}

impl Persisted for ConditionalAction {
    type Id = DbId;

    fn id(&self) -> DbId {
        self.id
    }
}

impl Proposed for ActionInput {
    type Id = DbId;

    fn proposed_id(&self) -> Option<DbId> {
        self.id
    }
}

impl MergeFrom<ActionInput> for ConditionalAction {
    fn merge_from(&mut self, proposed: &ActionInput) -> bool {
        let mut changed = false;
        changed |= set_if_changed(&mut self.order, &proposed.order);
        changed |= set_if_changed(&mut self.action_type, &proposed.action_type);
        changed |= set_if_changed(&mut self.action_payload, &proposed.action_payload);
        changed |= set_if_changed(
            &mut self.condition_response_key,
            &proposed.condition_response_key,
        );
        changed |= set_if_changed(&mut self.condition_operator, &proposed.condition_operator);
        changed |= set_if_changed(&mut self.condition_value, &proposed.condition_value);
        changed
    }
}
