//! Object schema and field metadata types

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// The primitive data type of a platform field.
///
/// This is a closed set; platform types the adapter does not recognize are
/// decoded as [`DataType::Text`] and rendered as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// Plain single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// Long multi-line text.
    LongText,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Long,
    /// Double-precision floating point.
    Double,
    /// Monetary amount.
    Currency,
    /// Percentage.
    Percent,
    /// True/false.
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time (an instant).
    DateTime,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// URL.
    Url,
    /// Reference to another record.
    Reference,
    /// Single-select picklist.
    Picklist,
    /// Multi-select picklist.
    MultiPicklist,
}

impl DataType {
    /// Returns `true` if free-text search may match against fields of this
    /// type (the search allow-list).
    pub fn is_searchable(self) -> bool {
        matches!(
            self,
            DataType::Text
                | DataType::TextArea
                | DataType::LongText
                | DataType::Email
                | DataType::Phone
                | DataType::Url
                | DataType::Picklist
                | DataType::MultiPicklist
        )
    }

    /// Returns `true` if fields of this type may carry a filter facet.
    ///
    /// This is a closed allow-list: only picklists and date/datetime fields
    /// are ever filterable.
    pub fn is_filterable(self) -> bool {
        matches!(
            self,
            DataType::Picklist | DataType::MultiPicklist | DataType::Date | DataType::DateTime
        )
    }
}

/// One label/value pair of a picklist option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistOption {
    /// Display label.
    pub label: String,
    /// Stored value.
    pub value: String,
}

impl PicklistOption {
    /// Creates a new option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Metadata for a single displayed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// The API name of the field (e.g. `AnnualRevenue`, `Status__c`).
    pub api_name: String,

    /// Display label, if the schema carries one.
    #[serde(default)]
    pub label: Option<String>,

    /// The field's primitive data type.
    pub data_type: DataType,
}

impl FieldDescriptor {
    /// Creates a descriptor with no label.
    pub fn new(api_name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            api_name: api_name.into(),
            label: None,
            data_type,
        }
    }

    /// Creates a descriptor with a display label.
    pub fn labeled(
        api_name: impl Into<String>,
        label: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        Self {
            api_name: api_name.into(),
            label: Some(label.into()),
            data_type,
        }
    }
}

/// Schema information for one object type, as returned by the metadata
/// service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Field metadata keyed by API name.
    pub fields: HashMap<String, FieldDescriptor>,

    /// The default record type, used to scope picklist value sets.
    #[serde(default)]
    pub default_record_type_id: Option<String>,

    /// Object-level picklist values, used as a fallback when no
    /// record-type-scoped values are available.
    #[serde(default)]
    pub picklist_values: HashMap<String, Vec<PicklistOption>>,
}

impl ObjectSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the descriptor for a field, if the schema knows it.
    pub fn field(&self, api_name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(api_name)
    }

    /// Adds a field descriptor, keyed by its API name.
    pub fn add_field(&mut self, descriptor: FieldDescriptor) {
        self.fields.insert(descriptor.api_name.clone(), descriptor);
    }
}
