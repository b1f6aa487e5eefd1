//! Header schema for the data extension sheet
//!
//! Sheet layout:
//! - Data extension columns, located by header name:
//!   `name`, `key`, `categoryId`, `sendableCustomObjectField`, `sendableSubscriberField`
//! - A fields block starting at the first `fields__*` header, made of one or
//!   more field groups of exactly 12 columns (`fields__name` .. `fields__mustOverride`)
//!
//! Headers are resolved once into column indices; a sheet whose headers do not
//! describe complete field groups is rejected instead of decoded positionally.

use calamine::Data;

use crate::error::{AttributeProblem, ParseError};

use super::cell::{cell_at, cell_flag, cell_int, is_blank_row};
use super::types::Field;

/// Prefix shared by every field attribute header
pub const FIELD_PREFIX: &str = "fields__";

/// Columns per field group
pub const FIELD_GROUP_WIDTH: usize = 12;

/// Data extension level columns, in template order
pub const DATA_EXTENSION_COLUMNS: [&str; 5] = [
    "name",
    "key",
    "categoryId",
    "sendableCustomObjectField",
    "sendableSubscriberField",
];

/// How an attribute's cell is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Text,
    Integer,
    Flag,
}

/// One of the 12 attributes in a field group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAttribute {
    Name,
    Type,
    Length,
    Ordinal,
    IsPrimaryKey,
    IsNullable,
    IsTemplateField,
    IsInheritable,
    IsOverridable,
    IsHidden,
    IsReadOnly,
    MustOverride,
}

impl FieldAttribute {
    /// All attributes, in template column order
    pub const ALL: [FieldAttribute; FIELD_GROUP_WIDTH] = [
        FieldAttribute::Name,
        FieldAttribute::Type,
        FieldAttribute::Length,
        FieldAttribute::Ordinal,
        FieldAttribute::IsPrimaryKey,
        FieldAttribute::IsNullable,
        FieldAttribute::IsTemplateField,
        FieldAttribute::IsInheritable,
        FieldAttribute::IsOverridable,
        FieldAttribute::IsHidden,
        FieldAttribute::IsReadOnly,
        FieldAttribute::MustOverride,
    ];

    /// Attribute name as it appears after the `fields__` prefix
    pub fn header_name(&self) -> &'static str {
        match self {
            FieldAttribute::Name => "name",
            FieldAttribute::Type => "type",
            FieldAttribute::Length => "length",
            FieldAttribute::Ordinal => "ordinal",
            FieldAttribute::IsPrimaryKey => "isPrimaryKey",
            FieldAttribute::IsNullable => "isNullable",
            FieldAttribute::IsTemplateField => "isTemplateField",
            FieldAttribute::IsInheritable => "isInheritable",
            FieldAttribute::IsOverridable => "isOverridable",
            FieldAttribute::IsHidden => "isHidden",
            FieldAttribute::IsReadOnly => "isReadOnly",
            FieldAttribute::MustOverride => "mustOverride",
        }
    }

    /// Full header, e.g. `fields__isPrimaryKey`
    pub fn header(&self) -> String {
        format!("{}{}", FIELD_PREFIX, self.header_name())
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            FieldAttribute::Name | FieldAttribute::Type => AttributeKind::Text,
            FieldAttribute::Length | FieldAttribute::Ordinal => AttributeKind::Integer,
            _ => AttributeKind::Flag,
        }
    }

    fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|a| a == self)
            .unwrap_or_default()
    }

    fn from_header_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.header_name() == name)
    }
}

/// Resolved column indices of one field group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroupColumns {
    columns: [usize; FIELD_GROUP_WIDTH],
}

impl FieldGroupColumns {
    /// Column index holding `attribute`
    pub fn column(&self, attribute: FieldAttribute) -> usize {
        self.columns[attribute.position()]
    }

    /// Read one field from a row; `None` when both name and type are empty
    pub fn extract(&self, row: &[Data]) -> Option<Field> {
        let name = cell_at(row, self.column(FieldAttribute::Name));
        let field_type = cell_at(row, self.column(FieldAttribute::Type));
        if name.is_none() && field_type.is_none() {
            return None;
        }

        let cell = |attribute: FieldAttribute| row.get(self.column(attribute)).unwrap_or(&Data::Empty);
        let int = |attribute| cell_int(cell(attribute));
        let flag = |attribute| cell_flag(cell(attribute));

        Some(Field {
            name: name.unwrap_or_default(),
            field_type: field_type.unwrap_or_default(),
            length: int(FieldAttribute::Length),
            ordinal: int(FieldAttribute::Ordinal),
            is_primary_key: flag(FieldAttribute::IsPrimaryKey),
            is_nullable: flag(FieldAttribute::IsNullable),
            is_template_field: flag(FieldAttribute::IsTemplateField),
            is_inheritable: flag(FieldAttribute::IsInheritable),
            is_overridable: flag(FieldAttribute::IsOverridable),
            is_hidden: flag(FieldAttribute::IsHidden),
            is_read_only: flag(FieldAttribute::IsReadOnly),
            must_override: flag(FieldAttribute::MustOverride),
        })
    }

    /// Resolve a stride of exactly 12 headers (`group` is 1-based, for errors)
    fn resolve(group: usize, start: usize, headers: &[String]) -> Result<Self, ParseError> {
        let mut columns: [Option<usize>; FIELD_GROUP_WIDTH] = [None; FIELD_GROUP_WIDTH];

        for (offset, header) in headers.iter().enumerate() {
            let attribute = header
                .strip_prefix(FIELD_PREFIX)
                .and_then(FieldAttribute::from_header_name)
                .ok_or_else(|| ParseError::FieldGroupAttribute {
                    group,
                    attribute: header.clone(),
                    problem: AttributeProblem::Unknown,
                })?;

            let slot = &mut columns[attribute.position()];
            if slot.is_some() {
                return Err(ParseError::FieldGroupAttribute {
                    group,
                    attribute: header.clone(),
                    problem: AttributeProblem::Duplicate,
                });
            }
            *slot = Some(start + offset);
        }

        let mut resolved = [0; FIELD_GROUP_WIDTH];
        for (attribute, column) in FieldAttribute::ALL.iter().zip(columns) {
            resolved[attribute.position()] = column.ok_or_else(|| ParseError::FieldGroupAttribute {
                group,
                attribute: attribute.header(),
                problem: AttributeProblem::Missing,
            })?;
        }

        Ok(Self { columns: resolved })
    }
}

/// Data extension level values of one sheet row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    /// 1-based sheet row number (header is row 1)
    pub row: usize,
    pub name: String,
    pub key: String,
    pub category_id: String,
    pub sendable_custom_object_field: String,
    pub sendable_subscriber_field: String,
    pub fields: Vec<Field>,
}

/// Column layout of a data extension sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    /// Indices of [`DATA_EXTENSION_COLUMNS`], same order
    data_extension_columns: [usize; 5],
    field_groups: Vec<FieldGroupColumns>,
}

impl HeaderSchema {
    /// Resolve the header row into column indices
    pub fn resolve(headers: &[String]) -> Result<Self, ParseError> {
        let fields_start = headers
            .iter()
            .position(|h| h.starts_with(FIELD_PREFIX))
            .ok_or(ParseError::MissingFieldsBlock)?;

        let mut data_extension_columns = [0; 5];
        for (slot, column) in data_extension_columns.iter_mut().zip(DATA_EXTENSION_COLUMNS) {
            *slot = headers[..fields_start]
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| ParseError::MissingColumn(column.to_string()))?;
        }

        // Trailing blank headers are formatting leftovers, not a partial group
        let fields_end = headers
            .iter()
            .rposition(|h| !h.is_empty())
            .map_or(fields_start, |last| last + 1);
        let block = &headers[fields_start..fields_end];

        let mut field_groups = Vec::new();
        for (index, stride) in block.chunks(FIELD_GROUP_WIDTH).enumerate() {
            let start = fields_start + index * FIELD_GROUP_WIDTH;
            if stride.len() != FIELD_GROUP_WIDTH {
                return Err(ParseError::PartialFieldGroup {
                    start,
                    width: stride.len(),
                });
            }
            field_groups.push(FieldGroupColumns::resolve(index + 1, start, stride)?);
        }

        Ok(Self {
            data_extension_columns,
            field_groups,
        })
    }

    pub fn field_groups(&self) -> &[FieldGroupColumns] {
        &self.field_groups
    }

    /// Read one data row; blank rows yield `Ok(None)`
    pub fn read_row(&self, row_number: usize, row: &[Data]) -> Result<Option<RowRecord>, ParseError> {
        if is_blank_row(row) {
            return Ok(None);
        }

        let [name, key, category_id, sendable_co, sendable_sub] = self.data_extension_columns;
        let required = |col: usize, column: &str| {
            cell_at(row, col).ok_or_else(|| ParseError::MissingValue {
                row: row_number,
                column: column.to_string(),
            })
        };

        Ok(Some(RowRecord {
            row: row_number,
            name: required(name, DATA_EXTENSION_COLUMNS[0])?,
            key: required(key, DATA_EXTENSION_COLUMNS[1])?,
            category_id: cell_at(row, category_id).unwrap_or_default(),
            sendable_custom_object_field: cell_at(row, sendable_co).unwrap_or_default(),
            sendable_subscriber_field: cell_at(row, sendable_sub).unwrap_or_default(),
            fields: self
                .field_groups
                .iter()
                .filter_map(|group| group.extract(row))
                .collect(),
        }))
    }
}
