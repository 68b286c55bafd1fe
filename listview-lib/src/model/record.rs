//! Dynamic entity record

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Value;

/// A dynamic record returned by the data service.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing dynamic
/// access to any configured display field.
///
/// # Example
///
/// ```
/// use listview_lib::model::Record;
/// use uuid::Uuid;
///
/// let record = Record::with_id(Uuid::new_v4())
///     .set("Name", "Contoso")
///     .set("AnnualRevenue", 1_000_000i64);
///
/// assert_eq!(record.get_string("Name"), Some("Contoso"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The unique identifier of the record.
    id: Option<Uuid>,

    /// The field values.
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self {
            id: None,
            fields: HashMap::new(),
        }
    }

    /// Creates a new record with the given ID.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            fields: HashMap::new(),
        }
    }

    /// Returns the record ID, if set.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Sets the record ID.
    pub fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    /// Sets a field value, consuming and returning the record (builder style).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the string content of a field, if it is a string.
    pub fn get_string(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns an iterator over the field names and values.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields on the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}
