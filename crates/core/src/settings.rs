//! Interview settings payloads and their validation.
//!
//! Settings are stored as provider-specific JSON on the setting row. Payloads
//! are validated explicitly with [`validate_setting`] before any row is built.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Provider a setting row configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewSettingType {
    Airtable,
}

impl InterviewSettingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Airtable => "airtable",
        }
    }
}

// ---------------------------------------------------------------------------
// Airtable payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AirtableField {
    #[validate(length(min = 1, message = "field id must not be empty"))]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AirtableTable {
    #[validate(length(min = 1, message = "table id must not be empty"))]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<AirtableField>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AirtableBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "base id must not be empty"))]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<AirtableTable>>,
}

/// OAuth token set. Expiry values are Unix timestamps in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AirtableAuthSettings {
    #[validate(length(min = 1, message = "access token must not be empty"))]
    pub access_token: String,
    pub access_token_expires: i64,
    #[validate(length(min = 1, message = "refresh token must not be empty"))]
    pub refresh_token: String,
    pub refresh_token_expires: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirtableSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_settings: Option<AirtableAuthSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bases: Option<Vec<AirtableBase>>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn check(value: &impl Validate, path: &str) -> Result<(), CoreError> {
    value
        .validate()
        .map_err(|e| CoreError::Validation(format!("{path}: {e}")))
}

/// Validate an Airtable settings payload.
///
/// Every base, table and field needs a non-empty id, base ids are unique,
/// and table ids are unique within their base.
pub fn validate_airtable_settings(settings: &AirtableSettings) -> Result<(), CoreError> {
    if let Some(auth) = &settings.auth_settings {
        check(auth, "authSettings")?;
    }

    let mut base_ids = HashSet::new();
    for (b, base) in settings.bases.iter().flatten().enumerate() {
        check(base, &format!("bases[{b}]"))?;
        if !base_ids.insert(base.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "duplicate Airtable base id '{}'",
                base.id
            )));
        }

        let mut table_ids = HashSet::new();
        for (t, table) in base.tables.iter().flatten().enumerate() {
            check(table, &format!("bases[{b}].tables[{t}]"))?;
            if !table_ids.insert(table.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate table id '{}' in base '{}'",
                    table.id, base.id
                )));
            }
            for (f, field) in table.fields.iter().flatten().enumerate() {
                check(field, &format!("bases[{b}].tables[{t}].fields[{f}]"))?;
            }
        }
    }
    Ok(())
}

/// Validate a setting payload and serialize it into the stored JSON form.
///
/// `None` members are omitted from the stored document.
pub fn validate_setting(
    setting_type: InterviewSettingType,
    settings: &AirtableSettings,
) -> Result<serde_json::Value, CoreError> {
    match setting_type {
        InterviewSettingType::Airtable => validate_airtable_settings(settings)?,
    }
    serde_json::to_value(settings)
        .map_err(|e| CoreError::Internal(format!("failed to serialize settings: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn base(id: &str) -> AirtableBase {
        AirtableBase {
            name: Some("Clients".to_string()),
            id: id.to_string(),
            tables: None,
        }
    }

    fn table(id: &str) -> AirtableTable {
        AirtableTable {
            id: id.to_string(),
            name: None,
            description: None,
            fields: None,
        }
    }

    #[test]
    fn parses_camel_case_payload() {
        let settings: AirtableSettings = serde_json::from_value(json!({
            "apiKey": "key123",
            "bases": [{
                "id": "app1",
                "tables": [{ "id": "tbl1", "fields": [{ "id": "fld1", "name": "Name", "type": "singleLineText" }] }]
            }]
        }))
        .unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("key123"));
        let field = &settings.bases.as_ref().unwrap()[0].tables.as_ref().unwrap()[0]
            .fields
            .as_ref()
            .unwrap()[0];
        assert_eq!(field.field_type.as_deref(), Some("singleLineText"));
        assert!(validate_airtable_settings(&settings).is_ok());
    }

    #[test]
    fn stored_form_omits_missing_members() {
        let settings = AirtableSettings {
            api_key: None,
            auth_settings: None,
            bases: Some(vec![base("app1")]),
        };

        let stored = validate_setting(InterviewSettingType::Airtable, &settings).unwrap();

        assert_eq!(stored, json!({ "bases": [{ "name": "Clients", "id": "app1" }] }));
    }

    #[test]
    fn empty_settings_are_valid() {
        assert!(validate_airtable_settings(&AirtableSettings::default()).is_ok());
    }

    #[test]
    fn rejects_empty_base_id() {
        let settings = AirtableSettings {
            bases: Some(vec![base("")]),
            ..Default::default()
        };
        assert_matches!(
            validate_airtable_settings(&settings),
            Err(CoreError::Validation(msg)) if msg.starts_with("bases[0]")
        );
    }

    #[test]
    fn rejects_duplicate_base_ids() {
        let settings = AirtableSettings {
            bases: Some(vec![base("app1"), base("app1")]),
            ..Default::default()
        };
        assert!(validate_airtable_settings(&settings).is_err());
    }

    #[test]
    fn rejects_duplicate_table_ids_within_base() {
        let mut b = base("app1");
        b.tables = Some(vec![table("tbl1"), table("tbl1")]);
        let settings = AirtableSettings {
            bases: Some(vec![b]),
            ..Default::default()
        };
        assert!(validate_airtable_settings(&settings).is_err());
    }

    #[test]
    fn rejects_empty_field_id() {
        let mut t = table("tbl1");
        t.fields = Some(vec![AirtableField {
            id: String::new(),
            name: "Name".to_string(),
            description: None,
            field_type: None,
            options: None,
        }]);
        let mut b = base("app1");
        b.tables = Some(vec![t]);
        let settings = AirtableSettings {
            bases: Some(vec![b]),
            ..Default::default()
        };
        assert_matches!(
            validate_airtable_settings(&settings),
            Err(CoreError::Validation(msg)) if msg.contains("fields[0]")
        );
    }

    #[test]
    fn rejects_empty_access_token() {
        let settings = AirtableSettings {
            auth_settings: Some(AirtableAuthSettings {
                access_token: String::new(),
                access_token_expires: 0,
                refresh_token: "r".to_string(),
                refresh_token_expires: 0,
                token_type: None,
                scope: None,
            }),
            ..Default::default()
        };
        assert!(validate_airtable_settings(&settings).is_err());
    }
}
