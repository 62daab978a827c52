//! Screen entry model and DTO.

use scout_core::diff::set_if_changed;
use scout_core::ordering::Ordered;
use scout_core::reconcile::{MergeFrom, Persisted, Proposed};
use scout_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An entry row from the `interview_screen_entries` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ScreenEntry {
    pub id: DbId,
    pub screen_id: DbId,
    pub order: i32,
    pub name: String,
    pub prompt: String,
    pub text: String,
    pub response_key: String,
    pub response_type: String,
    pub response_type_options: serde_json::Value,
}

/// An entry as proposed in a screen update. Without an `id` it is new.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryInput {
    pub id: Option<DbId>,
    pub order: i32,
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub text: String,
    pub response_key: String,
    pub response_type: String,
    #[serde(default = "empty_object")]
    pub response_type_options: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Ordered for EntryInput {
    fn order(&self) -> i32 {
        self.order
    }
}

impl Ordered for ScreenEntry {
    fn order(&self) -> i32 {
        self.order
    }
}

impl Persisted for ScreenEntry {
    type Id = DbId;

    fn id(&self) -> DbId {
        self.id
    }
}

impl Proposed for EntryInput {
    type Id = DbId;

    fn proposed_id(&self) -> Option<DbId> {
        self.id
    }
}

impl MergeFrom<EntryInput> for ScreenEntry {
    fn merge_from(&mut self, proposed: &EntryInput) -> bool {
        let mut changed = false;
        changed |= set_if_changed(&mut self.order, &proposed.order);
        changed |= set_if_changed(&mut self.name, &proposed.name);
        changed |= set_if_changed(&mut self.prompt, &proposed.prompt);
        changed |= set_if_changed(&mut self.text, &proposed.text);
        changed |= set_if_changed(&mut self.response_key, &proposed.response_key);
        changed |= set_if_changed(&mut self.response_type, &proposed.response_type);
        changed |= set_if_changed(
            &mut self.response_type_options,
            &proposed.response_type_options,
        );
        changed
    }
}
