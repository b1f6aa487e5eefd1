//! Decode an uploaded spreadsheet into data extensions

use std::path::Path;

use calamine::Data;

use crate::error::ParseError;

use super::cell::header_text;
use super::grouping::group_rows;
use super::reader::read_first_sheet;
use super::schema::HeaderSchema;
use super::types::DataExtension;

/// Decode a whole file payload (workbook or CSV)
pub fn decode_data_extensions(bytes: &[u8]) -> Result<Vec<DataExtension>, ParseError> {
    let rows = read_first_sheet(bytes)?;
    decode_rows(&rows)
}

/// Read a file fully into memory and decode it
pub async fn decode_file(path: &Path) -> Result<Vec<DataExtension>, ParseError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| ParseError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let data_extensions = decode_data_extensions(&bytes)?;
    log::info!(
        "Decoded {} data extensions ({} fields) from {}",
        data_extensions.len(),
        data_extensions.iter().map(|de| de.fields.len()).sum::<usize>(),
        path.display()
    );
    Ok(data_extensions)
}

/// Decode an already loaded grid; row 0 is the header row
pub fn decode_rows(rows: &[Vec<Data>]) -> Result<Vec<DataExtension>, ParseError> {
    let (header, body) = rows.split_first().ok_or(ParseError::EmptySheet)?;

    let headers: Vec<String> = header.iter().map(header_text).collect();
    let schema = HeaderSchema::resolve(&headers)?;

    let records = body
        .iter()
        .enumerate()
        // +2: 1-based, and the header occupies row 1
        .filter_map(|(i, row)| schema.read_row(i + 2, row).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    group_rows(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::FieldAttribute;

    const HEADER: &str = "name,key,categoryId,sendableCustomObjectField,sendableSubscriberField,\
fields__name,fields__type,fields__length,fields__ordinal,fields__isPrimaryKey,fields__isNullable,\
fields__isTemplateField,fields__isInheritable,fields__isOverridable,fields__isHidden,fields__isReadOnly,\
fields__mustOverride";

    fn csv(rows: &[&str]) -> Vec<u8> {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.into_bytes()
    }

    #[test]
    fn test_decode_one_row_per_field() {
        let bytes = csv(&[
            "Subscribers,SUBS,321,Email,_SubscriberKey,Email,EmailAddress,254,0,true,false,false,false,false,false,false,false",
            "Subscribers,SUBS,,,,FirstName,Text,50,1,false,true,false,false,false,false,false,false",
            "Orders,ORD,321,,,OrderId,Number,,0,TRUE,false,false,false,false,false,false,false",
        ]);

        let result = decode_data_extensions(&bytes).unwrap();
        assert_eq!(result.len(), 2);

        let subs = &result[0];
        assert_eq!(subs.identity(), ("Subscribers", "SUBS"));
        assert_eq!(subs.category_id, "321");
        assert_eq!(subs.sendable_custom_object_field, "Email");
        assert_eq!(subs.sendable_subscriber_field, "_SubscriberKey");
        assert_eq!(subs.fields.len(), 2);
        assert_eq!(subs.fields[0].field_type, "EmailAddress");
        assert_eq!(subs.fields[0].length, Some(254));
        assert!(subs.fields[0].is_primary_key);
        assert!(!subs.fields[0].is_nullable);
        assert_eq!(subs.fields[1].name, "FirstName");
        assert_eq!(subs.fields[1].ordinal, Some(1));
        assert!(subs.fields[1].is_nullable);

        let orders = &result[1];
        assert_eq!(orders.fields[0].length, None);
        assert!(orders.fields[0].is_primary_key);
    }

    #[test]
    fn test_decode_skips_blank_rows_and_empty_groups() {
        let bytes = csv(&[
            "Orders,ORD,1,,,Id,Number,,,,,,,,,,",
            ",,,,,,,,,,,,,,,,",
            "Orders,ORD,,,,,,,,,,,,,,,",
        ]);
        let result = decode_data_extensions(&bytes).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].fields.len(), 1);
    }

    #[test]
    fn test_decode_two_field_groups_per_row() {
        let second_group: Vec<String> = FieldAttribute::ALL.iter().map(|a| a.header()).collect();
        let header = format!("{},{}", HEADER, second_group.join(","));
        let bytes = format!(
            "{}\n{}\n{}\n",
            header,
            "Orders,ORD,1,,,Id,Number,,0,true,false,false,false,false,false,false,false,\
Total,Decimal,18,1,false,true,false,false,false,false,false,false",
            "Orders,ORD,,,,Note,Text,500,2,false,true,false,false,false,false,false,false,,,,,,,,,,,,"
        );

        let result = decode_data_extensions(bytes.as_bytes()).unwrap();
        assert_eq!(result.len(), 1);
        let names: Vec<&str> = result[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Id", "Total", "Note"]);
        assert_eq!(result[0].fields[1].field_type, "Decimal");
        assert_eq!(result[0].fields[1].length, Some(18));
        assert!(result[0].fields[1].is_nullable);
    }

    #[test]
    fn test_decode_non_numeric_length() {
        let bytes = csv(&["Orders,ORD,1,,,Id,Text,fifty,x,,,,,,,,"]);
        let result = decode_data_extensions(&bytes).unwrap();
        assert_eq!(result[0].fields[0].length, None);
        assert_eq!(result[0].fields[0].ordinal, None);
    }

    #[test]
    fn test_decode_header_only() {
        assert!(decode_data_extensions(HEADER.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_decode_empty_payload() {
        assert_eq!(decode_data_extensions(b"").unwrap_err(), ParseError::EmptySheet);
    }

    #[test]
    fn test_decode_reports_row_numbers() {
        let bytes = csv(&["Orders,ORD,1,,,Id,Text,,,,,,,,,,", "Orders,,1,,,Id,Text,,,,,,,,,,"]);
        assert_eq!(
            decode_data_extensions(&bytes).unwrap_err(),
            ParseError::MissingValue {
                row: 3,
                column: "key".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_decode_file_missing() {
        let err = decode_file(Path::new("/nonexistent/upload.csv")).await.unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
    }
}
