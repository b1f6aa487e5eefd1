//! Fold sheet rows into data extensions
//!
//! Consecutive rows sharing a `(name, key)` pair describe one data extension,
//! one row per field ("one row per field" layout). The fold carries the
//! completed extensions plus the currently open one.

use std::collections::HashSet;

use crate::error::ParseError;

use super::schema::RowRecord;
use super::types::DataExtension;

#[derive(Default)]
struct Fold {
    completed: Vec<DataExtension>,
    open: Option<DataExtension>,
    seen: HashSet<(String, String)>,
}

impl Fold {
    fn push(mut self, record: RowRecord) -> Result<Self, ParseError> {
        if let Some(open) = self.open.as_mut() {
            if open.identity() == (record.name.as_str(), record.key.as_str()) {
                open.fields.extend(record.fields);
                return Ok(self);
            }
        }

        let identity = (record.name.clone(), record.key.clone());
        if !self.seen.insert(identity) {
            return Err(ParseError::DuplicateDataExtension {
                row: record.row,
                name: record.name,
                key: record.key,
            });
        }

        self.completed.extend(self.open.take());
        self.open = Some(DataExtension {
            name: record.name,
            key: record.key,
            is_sendable: true,
            category_id: record.category_id,
            sendable_custom_object_field: record.sendable_custom_object_field,
            sendable_subscriber_field: record.sendable_subscriber_field,
            fields: record.fields,
        });
        Ok(self)
    }

    fn finish(mut self) -> Vec<DataExtension> {
        self.completed.extend(self.open);
        self.completed
    }
}

/// Group rows into data extensions, preserving first-encounter order
///
/// Group-level attributes (category, sendable fields) come from the row that
/// opened the group. A pair that reappears after its group closed is rejected.
pub fn group_rows<I>(records: I) -> Result<Vec<DataExtension>, ParseError>
where
    I: IntoIterator<Item = RowRecord>,
{
    records
        .into_iter()
        .try_fold(Fold::default(), Fold::push)
        .map(Fold::finish)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::types::Field;

    fn field(name: &str) -> Field {
        Field {
            name: name.to_string(),
            field_type: "Text".to_string(),
            length: Some(50),
            ordinal: None,
            is_primary_key: false,
            is_nullable: true,
            is_template_field: false,
            is_inheritable: false,
            is_overridable: false,
            is_hidden: false,
            is_read_only: false,
            must_override: false,
        }
    }

    fn record(row: usize, name: &str, key: &str, fields: &[&str]) -> RowRecord {
        RowRecord {
            row,
            name: name.to_string(),
            key: key.to_string(),
            category_id: format!("cat-{}", row),
            sendable_custom_object_field: String::new(),
            sendable_subscriber_field: String::new(),
            fields: fields.iter().map(|f| field(f)).collect(),
        }
    }

    #[test]
    fn test_adjacent_rows_fold_into_one() {
        let result = group_rows(vec![
            record(2, "Orders", "ORD", &["Id"]),
            record(3, "Orders", "ORD", &["Total"]),
            record(4, "Orders", "ORD", &[]),
            record(5, "Customers", "CUS", &["Email"]),
        ])
        .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Orders");
        assert_eq!(
            result[0].fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["Id", "Total"]
        );
        // Group attributes come from the opening row
        assert_eq!(result[0].category_id, "cat-2");
        assert!(result[0].is_sendable);
        assert_eq!(result[1].name, "Customers");
        assert_eq!(result[1].fields.len(), 1);
    }

    #[test]
    fn test_same_name_different_key_is_new_group() {
        let result = group_rows(vec![
            record(2, "Orders", "A", &["Id"]),
            record(3, "Orders", "B", &["Id"]),
        ])
        .unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].key, "B");
    }

    #[test]
    fn test_non_adjacent_duplicate_rejected() {
        let err = group_rows(vec![
            record(2, "Orders", "ORD", &["Id"]),
            record(3, "Customers", "CUS", &["Email"]),
            record(4, "Orders", "ORD", &["Total"]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ParseError::DuplicateDataExtension {
                row: 4,
                name: "Orders".to_string(),
                key: "ORD".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(group_rows(Vec::new()).unwrap().is_empty());
    }
}
