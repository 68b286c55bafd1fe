//! Filter facet configuration derivation

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use super::humanize_field_name;
use crate::model::DataType;
use crate::model::ObjectSchema;
use crate::model::PicklistOption;

/// What kind of filter UI a facet drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FacetKind {
    /// Multi-select over a fixed option set (single- or multi-select
    /// picklist fields).
    Picklist {
        /// The available options.
        options: Vec<PicklistOption>,
    },
    /// Calendar-date filter (exact day or inclusive range).
    Date,
    /// Instant filter (local calendar day or inclusive instant range).
    DateTime,
}

/// Configuration of one filterable field, derived once from schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetConfig {
    /// API name of the field.
    pub field_name: String,
    /// Display label for the filter panel.
    pub label: String,
    /// The field's data type.
    pub data_type: DataType,
    /// Kind of facet, with options for picklists.
    pub kind: FacetKind,
}

/// Derives the filter facet configuration for an object.
///
/// Intersects the configured filter fields with the displayed fields and
/// keeps only the closed allow-list of filterable types. Picklist fields
/// source their option set from record-type-scoped values when present, else
/// from object-level values; fields with an empty option source are silently
/// excluded. Date and datetime fields carry only a label.
pub fn derive_facet_configs(
    schema: &ObjectSchema,
    record_type_picklists: Option<&HashMap<String, Vec<PicklistOption>>>,
    filter_fields: &[String],
    displayed: &[String],
) -> Vec<FacetConfig> {
    let display_set: HashSet<&str> = displayed.iter().map(String::as_str).collect();

    let mut configs = Vec::new();
    for field_name in filter_fields {
        if !display_set.contains(field_name.as_str()) {
            continue;
        }
        let Some(descriptor) = schema.field(field_name) else {
            continue;
        };
        let label = descriptor
            .label
            .clone()
            .unwrap_or_else(|| humanize_field_name(field_name));

        match descriptor.data_type {
            DataType::Picklist | DataType::MultiPicklist => {
                let options = record_type_picklists
                    .and_then(|m| m.get(field_name))
                    .or_else(|| schema.picklist_values.get(field_name))
                    .cloned()
                    .unwrap_or_default();
                if options.is_empty() {
                    continue;
                }
                configs.push(FacetConfig {
                    field_name: field_name.clone(),
                    label,
                    data_type: descriptor.data_type,
                    kind: FacetKind::Picklist { options },
                });
            }
            DataType::Date => {
                configs.push(FacetConfig {
                    field_name: field_name.clone(),
                    label,
                    data_type: DataType::Date,
                    kind: FacetKind::Date,
                });
            }
            DataType::DateTime => {
                configs.push(FacetConfig {
                    field_name: field_name.clone(),
                    label,
                    data_type: DataType::DateTime,
                    kind: FacetKind::DateTime,
                });
            }
            // All other types are excluded from filtering.
            _ => {}
        }
    }
    configs
}
