//! Interview entity model and DTOs.

use scout_core::diff::set_if_changed;
use scout_core::reconcile::MergeFrom;
use scout_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::screen::Screen;
use crate::models::setting::{InterviewSetting, SettingInput};

/// An interview row from the `interviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Interview {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub notes: String,
    pub vanity_url: Option<String>,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new interview, optionally with its settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInterview {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    pub vanity_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub interview_settings: Vec<SettingInput>,
}

/// DTO for replacing an interview's fields.
///
/// Scalar fields are diff-merged into the persisted row. When
/// `interview_settings` is present the persisted settings are reconciled
/// against it; when absent they are left untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInterview {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    pub vanity_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    pub interview_settings: Option<Vec<SettingInput>>,
}

impl MergeFrom<UpdateInterview> for Interview {
    fn merge_from(&mut self, proposed: &UpdateInterview) -> bool {
        let mut changed = false;
        changed |= set_if_changed(&mut self.name, &proposed.name);
        changed |= set_if_changed(&mut self.description, &proposed.description);
        changed |= set_if_changed(&mut self.notes, &proposed.notes);
        changed |= set_if_changed(&mut self.vanity_url, &proposed.vanity_url);
        changed |= set_if_changed(&mut self.published, &proposed.published);
        changed
    }
}

/// An interview with its screens (sorted by order) and settings.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewWithScreens {
    #[serde(flatten)]
    pub interview: Interview,
    pub screens: Vec<Screen>,
    pub interview_settings: Vec<InterviewSetting>,
}

/// An interview with its settings, returned from create and update.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewWithSettings {
    #[serde(flatten)]
    pub interview: Interview,
    pub interview_settings: Vec<InterviewSetting>,
}
