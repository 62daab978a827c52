//! Interview setting model and DTOs.

use scout_core::diff::set_if_changed;
use scout_core::error::CoreError;
use scout_core::reconcile::{MergeFrom, Persisted, Proposed};
use scout_core::settings::{validate_setting, AirtableSettings, InterviewSettingType};
use scout_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A setting row from the `interview_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InterviewSetting {
    pub id: DbId,
    pub interview_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub setting_type: String,
    pub settings: serde_json::Value,
}

/// Setting payload as submitted by clients.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingInput {
    pub id: Option<DbId>,
    #[serde(rename = "type")]
    pub setting_type: InterviewSettingType,
    #[serde(default)]
    pub settings: AirtableSettings,
}

/// A setting payload that passed validation, in its stored JSON form.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSetting {
    pub id: Option<DbId>,
    pub setting_type: InterviewSettingType,
    pub settings: serde_json::Value,
}

impl SettingInput {
    /// Validate the payload and convert it to the stored form.
    pub fn validate(&self) -> Result<ValidSetting, CoreError> {
        let settings = validate_setting(self.setting_type, &self.settings)?;
        Ok(ValidSetting {
            id: self.id,
            setting_type: self.setting_type,
            settings,
        })
    }
}

/// Validate every setting in a payload, stopping at the first failure.
pub fn validate_settings(inputs: &[SettingInput]) -> Result<Vec<ValidSetting>, CoreError> {
    inputs.iter().map(SettingInput::validate).collect()
}

impl Persisted for InterviewSetting {
    type Id = DbId;

    fn id(&self) -> DbId {
        self.id
    }
}

impl Proposed for ValidSetting {
    type Id = DbId;

    fn proposed_id(&self) -> Option<DbId> {
        self.id
    }
}

impl MergeFrom<ValidSetting> for InterviewSetting {
    fn merge_from(&mut self, proposed: &ValidSetting) -> bool {
        let mut changed = false;
        changed |= set_if_changed(
            &mut self.setting_type,
            &proposed.setting_type.as_str().to_string(),
        );
        changed |= set_if_changed(&mut self.settings, &proposed.settings);
        changed
    }
}
