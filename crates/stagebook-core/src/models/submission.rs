use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Text fields of one booking form submission.
///
/// Field names follow the public form contract, camelCase on the wire
/// (including the historical `dismantalDays` spelling). All values are opaque
/// strings from the caller; absent fields stay absent when serialized so the
/// persisted payload mirrors exactly what was submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shooting_days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_setup_days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismantal_days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gov_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl SubmissionFields {
    /// Assign a field by its wire name. Returns false for unknown names so
    /// callers can log and skip them.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        match field {
            "date" => self.date = Some(value),
            "time" => self.time = Some(value),
            "shootingDays" => self.shooting_days = Some(value),
            "preSetupDays" => self.pre_setup_days = Some(value),
            "dismantalDays" => self.dismantal_days = Some(value),
            "additionalNote" => self.additional_note = Some(value),
            "productionName" => self.production_name = Some(value),
            "personName" => self.person_name = Some(value),
            "phoneNumber" => self.phone_number = Some(value),
            "emailAddress" => self.email_address = Some(value),
            "gst" => self.gst = Some(value),
            "govId" => self.gov_id = Some(value),
            "userId" => self.user_id = Some(value),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_maps_wire_names() {
        let mut fields = SubmissionFields::default();
        assert!(fields.set("personName", "Alice".to_string()));
        assert!(fields.set("dismantalDays", "2".to_string()));
        assert!(fields.set("userId", "abc".to_string()));
        assert!(!fields.set("unknownField", "x".to_string()));
        assert_eq!(fields.person_name.as_deref(), Some("Alice"));
        assert_eq!(fields.dismantal_days.as_deref(), Some("2"));
        assert_eq!(fields.user_id.as_deref(), Some("abc"));
    }

    #[test]
    fn serialization_uses_camel_case_and_omits_absent_fields() {
        let mut fields = SubmissionFields::default();
        fields.set("productionName", "Midnight Run".to_string());
        fields.set("preSetupDays", "1".to_string());

        let value = serde_json::to_value(&fields).expect("serialize");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 2);
        assert_eq!(object["productionName"], "Midnight Run");
        assert_eq!(object["preSetupDays"], "1");
        assert!(!object.contains_key("personName"));
    }

    #[test]
    fn deserialization_round_trips() {
        let json = serde_json::json!({
            "date": "2024-01-01",
            "personName": "Alice",
            "govId": "X123"
        });
        let fields: SubmissionFields = serde_json::from_value(json).expect("deserialize");
        assert_eq!(fields.date.as_deref(), Some("2024-01-01"));
        assert_eq!(fields.person_name.as_deref(), Some("Alice"));
        assert_eq!(fields.gov_id.as_deref(), Some("X123"));
        assert!(fields.user_id.is_none());
    }
}
