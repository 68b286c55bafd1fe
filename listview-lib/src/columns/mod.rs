//! Schema adapter: column derivation from field metadata
//!
//! Turns raw field metadata into column definitions for the (out-of-scope)
//! table widget: render type, cell alignment, and per-type formatting
//! attributes. Fields absent from the schema fall back to a humanized version
//! of the raw field name; unknown data types render as plain text.

mod filters;

pub use filters::*;

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::model::DataType;
use crate::model::ObjectSchema;

/// How the table widget should render a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderType {
    /// Plain text.
    Text,
    /// Formatted number.
    Number,
    /// Currency amount.
    Currency,
    /// Percentage.
    Percent,
    /// Checkbox/boolean.
    Boolean,
    /// Calendar date, rendered in the viewer's locale without time shifting.
    DateLocal,
    /// Instant, rendered with date and time components.
    Date,
    /// Mailto link.
    Email,
    /// Tel link.
    Phone,
    /// Hyperlink.
    Url,
}

/// Horizontal cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Left-aligned (the default).
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// Type-specific formatting attributes for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeAttributes {
    /// Currency formatting.
    Currency {
        /// ISO currency code.
        currency_code: String,
        /// Minimum fraction digits.
        minimum_fraction_digits: u8,
        /// Maximum fraction digits.
        maximum_fraction_digits: u8,
    },
    /// Plain number formatting.
    Number {
        /// Minimum fraction digits.
        minimum_fraction_digits: u8,
        /// Maximum fraction digits.
        maximum_fraction_digits: u8,
    },
    /// Percent formatting.
    Percent {
        /// Minimum fraction digits.
        minimum_fraction_digits: u8,
        /// Maximum fraction digits.
        maximum_fraction_digits: u8,
    },
    /// Date component granularity.
    Date {
        /// Year component style.
        year: String,
        /// Month component style.
        month: String,
        /// Day component style.
        day: String,
    },
    /// Date-time component granularity.
    DateTime {
        /// Year component style.
        year: String,
        /// Month component style.
        month: String,
        /// Day component style.
        day: String,
        /// Hour component style.
        hour: String,
        /// Minute component style.
        minute: String,
    },
}

/// One derived column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// API name of the field backing the column.
    pub field_name: String,
    /// Column header label.
    pub label: String,
    /// Render type for cells.
    pub render_type: RenderType,
    /// Whether the column offers sorting.
    pub sortable: bool,
    /// Whether cell text wraps.
    pub wrap_text: bool,
    /// Cell alignment.
    pub alignment: Alignment,
    /// Type-specific formatting attributes, if any.
    pub type_attributes: Option<TypeAttributes>,
}

/// Derives column definitions for the displayed fields.
///
/// Fields missing from the schema get a humanized label and plain-text
/// rendering. This never fails.
pub fn derive_columns(
    schema: &ObjectSchema,
    displayed: &[String],
    sortable: &HashSet<String>,
) -> Vec<ColumnSpec> {
    displayed
        .iter()
        .map(|field_name| {
            let descriptor = schema.field(field_name);
            let data_type = descriptor.map(|d| d.data_type);
            let label = descriptor
                .and_then(|d| d.label.clone())
                .unwrap_or_else(|| humanize_field_name(field_name));

            ColumnSpec {
                field_name: field_name.clone(),
                label,
                render_type: render_type(data_type),
                sortable: sortable.contains(field_name),
                wrap_text: true,
                alignment: alignment(data_type),
                type_attributes: type_attributes(data_type),
            }
        })
        .collect()
}

/// Maps a platform data type to a render type. Unknown (`None`) types render
/// as plain text.
pub fn render_type(data_type: Option<DataType>) -> RenderType {
    match data_type {
        Some(DataType::Currency) => RenderType::Currency,
        Some(DataType::Date) => RenderType::DateLocal,
        Some(DataType::DateTime) => RenderType::Date,
        Some(DataType::Email) => RenderType::Email,
        Some(DataType::Phone) => RenderType::Phone,
        Some(DataType::Url) => RenderType::Url,
        Some(DataType::Percent) => RenderType::Percent,
        Some(DataType::Boolean) => RenderType::Boolean,
        Some(DataType::Double) | Some(DataType::Integer) | Some(DataType::Long) => {
            RenderType::Number
        }
        _ => RenderType::Text,
    }
}

/// Cell alignment for a data type: right for numerics, center for
/// boolean/date/datetime, left otherwise.
pub fn alignment(data_type: Option<DataType>) -> Alignment {
    match data_type {
        Some(
            DataType::Currency
            | DataType::Double
            | DataType::Integer
            | DataType::Long
            | DataType::Percent,
        ) => Alignment::Right,
        Some(DataType::Boolean | DataType::Date | DataType::DateTime) => Alignment::Center,
        _ => Alignment::Left,
    }
}

/// Type-specific formatting attributes for a data type, if it has any.
pub fn type_attributes(data_type: Option<DataType>) -> Option<TypeAttributes> {
    match data_type? {
        DataType::Currency => Some(TypeAttributes::Currency {
            currency_code: "USD".to_string(),
            minimum_fraction_digits: 2,
            maximum_fraction_digits: 2,
        }),
        DataType::Percent => Some(TypeAttributes::Percent {
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 1,
        }),
        DataType::Date => Some(TypeAttributes::Date {
            year: "numeric".to_string(),
            month: "short".to_string(),
            day: "2-digit".to_string(),
        }),
        DataType::DateTime => Some(TypeAttributes::DateTime {
            year: "numeric".to_string(),
            month: "short".to_string(),
            day: "2-digit".to_string(),
            hour: "2-digit".to_string(),
            minute: "2-digit".to_string(),
        }),
        DataType::Double | DataType::Integer | DataType::Long => Some(TypeAttributes::Number {
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 2,
        }),
        _ => None,
    }
}

/// Humanizes a raw field API name for use as a label.
///
/// Strips the trailing custom-field suffix, inserts spaces before capitals,
/// and capitalizes the first letter: `AnnualRevenue__c` becomes
/// `Annual Revenue`.
pub fn humanize_field_name(field_name: &str) -> String {
    let base = field_name.strip_suffix("__c").unwrap_or(field_name);

    let mut spaced = String::with_capacity(base.len() + 4);
    for (i, ch) in base.chars().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => spaced,
    };
    capitalized.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldDescriptor;

    fn schema_with(fields: Vec<FieldDescriptor>) -> ObjectSchema {
        let mut schema = ObjectSchema::new();
        for field in fields {
            schema.add_field(field);
        }
        schema
    }

    #[test]
    fn test_humanize_field_name() {
        assert_eq!(humanize_field_name("AnnualRevenue__c"), "Annual Revenue");
        assert_eq!(humanize_field_name("Name"), "Name");
        assert_eq!(humanize_field_name("name"), "Name");
        assert_eq!(humanize_field_name("CloseDate"), "Close Date");
    }

    #[test]
    fn test_render_type_mapping() {
        assert_eq!(render_type(Some(DataType::Currency)), RenderType::Currency);
        assert_eq!(render_type(Some(DataType::Date)), RenderType::DateLocal);
        assert_eq!(render_type(Some(DataType::DateTime)), RenderType::Date);
        assert_eq!(render_type(Some(DataType::Integer)), RenderType::Number);
        assert_eq!(render_type(Some(DataType::Reference)), RenderType::Text);
        assert_eq!(render_type(None), RenderType::Text);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(alignment(Some(DataType::Currency)), Alignment::Right);
        assert_eq!(alignment(Some(DataType::Percent)), Alignment::Right);
        assert_eq!(alignment(Some(DataType::Boolean)), Alignment::Center);
        assert_eq!(alignment(Some(DataType::DateTime)), Alignment::Center);
        assert_eq!(alignment(Some(DataType::Text)), Alignment::Left);
        assert_eq!(alignment(None), Alignment::Left);
    }

    #[test]
    fn test_derive_columns_with_schema_and_fallback() {
        let schema = schema_with(vec![FieldDescriptor::labeled(
            "Name",
            "Account Name",
            DataType::Text,
        )]);
        let displayed = vec!["Name".to_string(), "CustomField__c".to_string()];
        let sortable: HashSet<String> = ["Name".to_string()].into_iter().collect();

        let columns = derive_columns(&schema, &displayed, &sortable);
        assert_eq!(columns.len(), 2);

        assert_eq!(columns[0].label, "Account Name");
        assert!(columns[0].sortable);

        // Unknown field: humanized label, text rendering, not sortable.
        assert_eq!(columns[1].label, "Custom Field");
        assert_eq!(columns[1].render_type, RenderType::Text);
        assert!(!columns[1].sortable);
        assert!(columns[1].type_attributes.is_none());
    }
}
