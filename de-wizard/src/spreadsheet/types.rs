//! Decoded data extension records
//!
//! These serialize to exactly the JSON body the custom objects endpoint
//! expects, so the decoder output is sent as-is.

use serde::{Deserialize, Serialize};

/// A data extension (table schema) to create in Marketing Cloud
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExtension {
    pub name: String,
    pub key: String,
    /// Always true for wizard-created extensions
    pub is_sendable: bool,
    pub category_id: String,
    pub sendable_custom_object_field: String,
    pub sendable_subscriber_field: String,
    pub fields: Vec<Field>,
}

impl DataExtension {
    /// Identity of a data extension within one decode pass
    pub fn identity(&self) -> (&str, &str) {
        (&self.name, &self.key)
    }
}

/// A single typed column of a data extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// `None` when the cell did not hold a number (sent as `null`)
    pub length: Option<i64>,
    pub ordinal: Option<i64>,
    pub is_primary_key: bool,
    pub is_nullable: bool,
    pub is_template_field: bool,
    pub is_inheritable: bool,
    pub is_overridable: bool,
    pub is_hidden: bool,
    pub is_read_only: bool,
    pub must_override: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_with_wire_names() {
        let de = DataExtension {
            name: "Subscribers".to_string(),
            key: "SUBS".to_string(),
            is_sendable: true,
            category_id: "1234".to_string(),
            sendable_custom_object_field: "Email".to_string(),
            sendable_subscriber_field: "_SubscriberKey".to_string(),
            fields: vec![Field {
                name: "Email".to_string(),
                field_type: "EmailAddress".to_string(),
                length: Some(254),
                ordinal: None,
                is_primary_key: true,
                is_nullable: false,
                is_template_field: false,
                is_inheritable: false,
                is_overridable: true,
                is_hidden: false,
                is_read_only: false,
                must_override: false,
            }],
        };

        let value = serde_json::to_value(&de).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Subscribers",
                "key": "SUBS",
                "isSendable": true,
                "categoryId": "1234",
                "sendableCustomObjectField": "Email",
                "sendableSubscriberField": "_SubscriberKey",
                "fields": [{
                    "name": "Email",
                    "type": "EmailAddress",
                    "length": 254,
                    "ordinal": null,
                    "isPrimaryKey": true,
                    "isNullable": false,
                    "isTemplateField": false,
                    "isInheritable": false,
                    "isOverridable": true,
                    "isHidden": false,
                    "isReadOnly": false,
                    "mustOverride": false
                }]
            })
        );
    }
}
